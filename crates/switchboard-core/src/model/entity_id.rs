// ── Core identity type ──
//
// EntityId is the merge key for every resource slice. Backends hand out
// integer primary keys, UUIDs, or opaque slugs; consumers never care which.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Canonical identifier for any dashboard resource.
///
/// Deserializes from a JSON number (`Int`), a canonical UUID string
/// (`Uuid`), or any other string (`Key`). Conversion from text is lossless:
/// `EntityId::from(s).to_string() == s`.
///
/// Equality and hashing go through the textual form, so the number `42`
/// from one payload and the string `"42"` typed on a command line name the
/// same item, while `"007"` stays distinct from `7`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Uuid(Uuid),
    Key(String),
}

impl EntityId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Key(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Key(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<Uuid> for EntityId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        // Only the hyphenated lowercase form round-trips through `Uuid`.
        match Uuid::parse_str(&s) {
            Ok(u) if u.hyphenated().to_string() == s => Self::Uuid(u),
            _ => Self::Key(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntityIdVisitor;

        impl Visitor<'_> for EntityIdVisitor {
            type Value = EntityId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string identifier")
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<EntityId, E> {
                Ok(EntityId::Int(n))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<EntityId, E> {
                Ok(i64::try_from(n).map_or_else(|_| EntityId::Key(n.to_string()), EntityId::Int))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<EntityId, E> {
                Ok(EntityId::from(s))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<EntityId, E> {
                Ok(EntityId::from(s))
            }
        }

        deserializer.deserialize_any(EntityIdVisitor)
    }
}
