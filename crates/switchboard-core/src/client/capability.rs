use std::collections::BTreeSet;
use std::fmt;

use strum::IntoEnumIterator;

/// One network operation a resource client may expose.
///
/// Each capability owns exactly one operation name, so composing any
/// subset can never produce two definitions of the same operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Capability {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

impl Capability {
    pub fn operation(self) -> &'static str {
        match self {
            Self::List => "get_list",
            Self::Detail => "get_item",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// An unordered set of capabilities.
///
/// Composition is a set union, so a client built from `{List, Detail,
/// Update}` is the same client whichever order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every network capability.
    pub fn all() -> Self {
        Capability::iter().collect()
    }

    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        self.0.insert(capability);
        self
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.0.union(&other.0).copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Operation names exposed by a client with this set.
    pub fn operations(&self) -> Vec<&'static str> {
        self.iter().map(Capability::operation).collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(caps: [Capability; N]) -> Self {
        caps.into_iter().collect()
    }
}

/// `{list, detail, update}`
impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, capability) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{capability}")?;
        }
        f.write_str("}")
    }
}
