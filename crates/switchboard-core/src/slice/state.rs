// ── Per-resource collection state ──
//
// Fields are crate-private: views read through accessors, mutation goes
// through the slice reducer. Extension reducers get `modify_item` and
// `extra_mut` only, so they cannot touch `loading_items` or `errors`.

use indexmap::IndexSet;

use super::ExtraState;
use crate::error::ErrorPayload;
use crate::model::{EntityId, Resource};

/// Collection state for one resource type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<R: Resource> {
    /// `None` until the first successful collection fetch.
    pub(crate) results: Option<Vec<R>>,
    pub(crate) selected_item: Option<R>,
    pub(crate) loading: bool,
    /// IDs with an item-scoped request in flight, in dispatch order.
    pub(crate) loading_items: IndexSet<EntityId>,
    pub(crate) errors: Option<ErrorPayload>,
    pub(crate) modal_open: bool,
    pub(crate) extra: ExtraState<R>,
}

impl<R: Resource> ResourceState<R> {
    pub fn new(extra: ExtraState<R>) -> Self {
        Self {
            results: None,
            selected_item: None,
            loading: false,
            loading_items: IndexSet::new(),
            errors: None,
            modal_open: false,
            extra,
        }
    }

    // ── Read accessors ───────────────────────────────────────────────

    pub fn results(&self) -> Option<&[R]> {
        self.results.as_deref()
    }

    /// `true` once a collection fetch has succeeded (even if empty).
    pub fn is_loaded(&self) -> bool {
        self.results.is_some()
    }

    pub fn get(&self, id: &EntityId) -> Option<&R> {
        self.results.as_ref()?.iter().find(|item| item.id() == *id)
    }

    pub fn selected_item(&self) -> Option<&R> {
        self.selected_item.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loading_items(&self) -> &IndexSet<EntityId> {
        &self.loading_items
    }

    /// Views disable per-item controls while this is `true`.
    pub fn is_item_loading(&self, id: &EntityId) -> bool {
        self.loading_items.contains(id)
    }

    pub fn errors(&self) -> Option<&ErrorPayload> {
        self.errors.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn extra(&self) -> &ExtraState<R> {
        &self.extra
    }

    // ── Extension helpers ────────────────────────────────────────────

    pub fn extra_mut(&mut self) -> &mut ExtraState<R> {
        &mut self.extra
    }

    /// Apply `f` to the item with `id` in `results`, and to `selected_item`
    /// when it is the same entity. Returns `false` if the ID is unknown.
    pub fn modify_item(&mut self, id: &EntityId, f: impl Fn(&mut R)) -> bool {
        let Some(item) = self
            .results
            .as_mut()
            .and_then(|items| items.iter_mut().find(|item| item.id() == *id))
        else {
            return false;
        };
        f(item);
        if let Some(selected) = self.selected_item.as_mut() {
            if selected.id() == *id {
                f(selected);
            }
        }
        true
    }

    // ── Merge primitives ─────────────────────────────────────────────

    /// Replace the item with the same ID, or append it. Keeps ordering of
    /// existing entries and refreshes `selected_item` when it matches.
    /// Returns `true` if anything changed.
    pub(crate) fn merge_item(&mut self, item: R) -> bool {
        let id = item.id();
        let mut changed = false;
        if let Some(selected) = self
            .selected_item
            .as_mut()
            .filter(|selected| selected.id() == id && **selected != item)
        {
            *selected = item.clone();
            changed = true;
        }

        let items = self.results.get_or_insert_with(|| {
            changed = true;
            Vec::new()
        });
        match items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) if *existing == item => {}
            Some(existing) => {
                *existing = item;
                changed = true;
            }
            None => {
                items.push(item);
                changed = true;
            }
        }
        changed
    }

    /// Remove the item with `id`. Returns `true` if anything changed.
    pub(crate) fn remove_item(&mut self, id: &EntityId) -> bool {
        let mut changed = false;
        if let Some(items) = self.results.as_mut() {
            let before = items.len();
            items.retain(|item| item.id() != *id);
            changed = items.len() != before;
        }
        if self
            .selected_item
            .as_ref()
            .is_some_and(|selected| selected.id() == *id)
        {
            self.selected_item = None;
            changed = true;
        }
        changed
    }
}

impl<R: Resource> Default for ResourceState<R> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
