// ── Slice transition function ──
//
// Pure and synchronous: no I/O, no clocks. Item-keyed actions only touch
// their own ID, so completions for unrelated IDs commute.

use super::{ResourceState, SliceAction, SliceExtension};
use crate::model::Resource;

/// Apply `action` to `state`. Returns `true` if anything changed.
pub fn reduce<R: Resource>(state: &mut ResourceState<R>, action: SliceAction<R>) -> bool {
    match action {
        SliceAction::Set(items) => {
            let mut results: Vec<R> = Vec::with_capacity(items.len());
            for item in items {
                let id = item.id();
                match results.iter_mut().find(|existing| existing.id() == id) {
                    Some(existing) => *existing = item,
                    None => results.push(item),
                }
            }

            let selected = state.selected_item.as_ref().and_then(|selected| {
                let id = selected.id();
                results.iter().find(|item| item.id() == id).cloned()
            });

            let changed = state.results.as_ref() != Some(&results)
                || state.errors.is_some()
                || state.loading
                || (selected.is_some() && selected != state.selected_item);

            if selected.is_some() {
                state.selected_item = selected;
            }
            state.results = Some(results);
            state.errors = None;
            state.loading = false;
            changed
        }
        SliceAction::SetErrors(payload) => {
            let changed = state.errors.as_ref() != Some(&payload) || state.loading;
            state.errors = Some(payload);
            state.loading = false;
            changed
        }
        SliceAction::ClearErrors => state.errors.take().is_some(),
        SliceAction::SetLoading(loading) => {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        }
        SliceAction::SetLoadingItems(id) => state.loading_items.insert(id),
        SliceAction::SetCompletedLoadingItem(id) => state.loading_items.shift_remove(&id),
        SliceAction::SelectItem(Some(id)) => {
            let next = state.get(&id).cloned();
            let changed = state.selected_item != next;
            state.selected_item = next;
            changed
        }
        SliceAction::SelectItem(None) => state.selected_item.take().is_some(),
        SliceAction::Create(item) => {
            let merged = state.merge_item(item);
            let changed = merged || state.modal_open || state.errors.is_some();
            state.modal_open = false;
            state.errors = None;
            changed
        }
        SliceAction::Update(item) => {
            let merged = state.merge_item(item);
            merged | state.errors.take().is_some()
        }
        SliceAction::DeleteItem(id) => state.remove_item(&id),
        SliceAction::SetModalOpen(open) => {
            let changed = state.modal_open != open;
            state.modal_open = open;
            changed
        }
        SliceAction::Extra(action) => {
            <R::Extension as SliceExtension<R>>::reduce(state, action)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{ErrorKind, ErrorPayload};
    use crate::model::{Bot, EntityId};

    fn bot(id: i64, name: &str) -> Bot {
        Bot {
            id: EntityId::Int(id),
            full_name: name.into(),
            username: None,
            webhook: None,
            active: true,
        }
    }

    fn loaded(items: Vec<Bot>) -> ResourceState<Bot> {
        let mut state = ResourceState::default();
        reduce(&mut state, SliceAction::Set(items));
        state
    }

    fn network_error() -> ErrorPayload {
        ErrorPayload::new(ErrorKind::NetworkFailure, "connection refused")
    }

    // ── Initial state ────────────────────────────────────────────────

    #[test]
    fn initial_state_is_unloaded() {
        let state: ResourceState<Bot> = ResourceState::default();
        assert!(state.results().is_none());
        assert!(!state.is_loaded());
        assert!(state.selected_item().is_none());
        assert!(!state.is_loading());
        assert!(state.loading_items().is_empty());
        assert!(state.errors().is_none());
        assert!(!state.is_modal_open());
    }

    // ── Collection reducers ──────────────────────────────────────────

    #[test]
    fn set_replaces_results_and_clears_errors() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SetLoading(true));
        reduce(&mut state, SliceAction::SetErrors(network_error()));
        reduce(&mut state, SliceAction::SetLoading(true));

        reduce(&mut state, SliceAction::Set(vec![bot(2, "b"), bot(3, "c")]));

        assert_eq!(state.results().unwrap(), &[bot(2, "b"), bot(3, "c")]);
        assert!(state.errors().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn set_with_empty_sequence_is_loaded_but_empty() {
        let state = loaded(vec![]);
        assert!(state.is_loaded());
        assert_eq!(state.results().unwrap().len(), 0);
    }

    #[test]
    fn set_collapses_duplicate_ids() {
        let state = loaded(vec![bot(1, "old"), bot(2, "b"), bot(1, "new")]);
        assert_eq!(state.results().unwrap(), &[bot(1, "new"), bot(2, "b")]);
    }

    #[test]
    fn set_errors_keeps_results_and_stops_loading() {
        let mut state = loaded(vec![bot(1, "A"), bot(2, "B")]);
        reduce(&mut state, SliceAction::SetLoading(true));

        reduce(&mut state, SliceAction::SetErrors(network_error()));

        assert_eq!(state.results().unwrap(), &[bot(1, "A"), bot(2, "B")]);
        assert_eq!(state.errors(), Some(&network_error()));
        assert!(!state.is_loading());
    }

    #[test]
    fn set_errors_leaves_item_markers_alone() {
        let mut state = loaded(vec![bot(1, "A")]);
        reduce(&mut state, SliceAction::SetLoadingItems(EntityId::Int(1)));
        reduce(&mut state, SliceAction::SetErrors(network_error()));
        assert!(state.is_item_loading(&EntityId::Int(1)));
    }

    #[test]
    fn clear_errors() {
        let mut state = loaded(vec![]);
        reduce(&mut state, SliceAction::SetErrors(network_error()));
        assert!(reduce(&mut state, SliceAction::ClearErrors));
        assert!(state.errors().is_none());
        assert!(!reduce(&mut state, SliceAction::ClearErrors));
    }

    // ── Item markers ─────────────────────────────────────────────────

    #[test]
    fn loading_item_bracket_clears_marker() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        let one = EntityId::Int(1);
        let two = EntityId::Int(2);

        reduce(&mut state, SliceAction::SetLoadingItems(one.clone()));
        reduce(&mut state, SliceAction::SetLoadingItems(two.clone()));
        reduce(&mut state, SliceAction::SetCompletedLoadingItem(one.clone()));

        assert!(!state.is_item_loading(&one));
        assert!(state.is_item_loading(&two));

        reduce(&mut state, SliceAction::SetCompletedLoadingItem(two.clone()));
        assert!(state.loading_items().is_empty());
    }

    #[test]
    fn interleaved_completions_commute() {
        let base = loaded(vec![bot(1, "a"), bot(2, "b")]);
        let one = EntityId::Int(1);
        let two = EntityId::Int(2);

        let mut ab = base.clone();
        let mut ba = base;
        for state in [&mut ab, &mut ba] {
            reduce(state, SliceAction::SetLoadingItems(one.clone()));
            reduce(state, SliceAction::SetLoadingItems(two.clone()));
        }

        reduce(&mut ab, SliceAction::Update(bot(1, "a2")));
        reduce(&mut ab, SliceAction::SetCompletedLoadingItem(one.clone()));
        reduce(&mut ab, SliceAction::Update(bot(2, "b2")));
        reduce(&mut ab, SliceAction::SetCompletedLoadingItem(two.clone()));

        reduce(&mut ba, SliceAction::Update(bot(2, "b2")));
        reduce(&mut ba, SliceAction::SetCompletedLoadingItem(two));
        reduce(&mut ba, SliceAction::Update(bot(1, "a2")));
        reduce(&mut ba, SliceAction::SetCompletedLoadingItem(one));

        assert_eq!(ab, ba);
        assert!(ab.loading_items().is_empty());
    }

    #[test]
    fn loading_item_marker_is_idempotent() {
        let mut state = loaded(vec![]);
        let id = EntityId::Int(1);
        assert!(reduce(&mut state, SliceAction::SetLoadingItems(id.clone())));
        assert!(!reduce(&mut state, SliceAction::SetLoadingItems(id.clone())));
        assert_eq!(state.loading_items().len(), 1);
    }

    #[test]
    fn completing_unknown_marker_is_noop() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SetLoadingItems(EntityId::Int(1)));
        let before = state.clone();

        let changed = reduce(&mut state, SliceAction::SetCompletedLoadingItem(EntityId::Int(9)));

        assert!(!changed);
        assert_eq!(state, before);
    }

    // ── Merge-by-ID ──────────────────────────────────────────────────

    #[test]
    fn update_merges_by_id_in_place() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b"), bot(3, "c")]);
        let mut patched = bot(2, "b");
        patched.webhook = Some("x".into());

        reduce(&mut state, SliceAction::Update(patched.clone()));

        let results = state.results().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], bot(1, "a"));
        assert_eq!(results[1], patched);
        assert_eq!(results[2], bot(3, "c"));
    }

    #[test]
    fn update_of_unknown_id_appends() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::Update(bot(5, "e")));
        assert_eq!(state.results().unwrap(), &[bot(1, "a"), bot(5, "e")]);
    }

    #[test]
    fn update_refreshes_selected_item() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(2))));
        assert_eq!(state.selected_item(), Some(&bot(2, "b")));

        let mut patched = bot(2, "b");
        patched.webhook = Some("https://x".into());
        reduce(&mut state, SliceAction::Update(patched.clone()));

        assert_eq!(state.selected_item(), Some(&patched));
    }

    #[test]
    fn update_of_other_id_keeps_selection() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(2))));
        reduce(&mut state, SliceAction::Update(bot(1, "a2")));
        assert_eq!(state.selected_item(), Some(&bot(2, "b")));
    }

    #[test]
    fn update_clears_errors() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SetErrors(network_error()));
        reduce(&mut state, SliceAction::Update(bot(1, "a2")));
        assert!(state.errors().is_none());
    }

    #[test]
    fn identical_update_reports_no_change() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(2))));
        let before = state.clone();

        assert!(!reduce(&mut state, SliceAction::Update(bot(2, "b"))));
        assert_eq!(state, before);

        assert!(reduce(&mut state, SliceAction::Update(bot(2, "b2"))));
    }

    #[test]
    fn identical_update_still_reports_cleared_errors() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SetErrors(network_error()));
        assert!(reduce(&mut state, SliceAction::Update(bot(1, "a"))));
        assert!(state.errors().is_none());
    }

    // ── Create ───────────────────────────────────────────────────────

    #[test]
    fn create_from_absent_initializes_results() {
        let mut state: ResourceState<Bot> = ResourceState::default();
        reduce(&mut state, SliceAction::Create(bot(1, "first")));
        assert_eq!(state.results().unwrap(), &[bot(1, "first")]);
    }

    #[test]
    fn create_appends_and_closes_modal() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SetModalOpen(true));
        assert!(state.is_modal_open());

        reduce(&mut state, SliceAction::Create(bot(2, "b")));

        assert_eq!(state.results().unwrap(), &[bot(1, "a"), bot(2, "b")]);
        assert!(!state.is_modal_open());
    }

    #[test]
    fn repeated_create_reports_no_change() {
        let mut state = loaded(vec![bot(1, "a")]);
        assert!(reduce(&mut state, SliceAction::Create(bot(2, "b"))));
        assert!(!reduce(&mut state, SliceAction::Create(bot(2, "b"))));

        reduce(&mut state, SliceAction::SetModalOpen(true));
        assert!(reduce(&mut state, SliceAction::Create(bot(2, "b"))));
        assert!(!state.is_modal_open());
    }

    #[test]
    fn create_never_duplicates_an_id() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::Create(bot(1, "again")));
        assert_eq!(state.results().unwrap(), &[bot(1, "again")]);
    }

    // ── Selection & deletion ─────────────────────────────────────────

    #[test]
    fn select_unknown_id_clears_selection() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(1))));
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(99))));
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn select_none_clears_selection() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(1))));
        assert!(reduce(&mut state, SliceAction::SelectItem(None)));
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn set_refreshes_selected_item_still_present() {
        let mut state = loaded(vec![bot(1, "a")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(1))));
        reduce(&mut state, SliceAction::Set(vec![bot(1, "renamed")]));
        assert_eq!(state.selected_item(), Some(&bot(1, "renamed")));
    }

    #[test]
    fn delete_removes_and_clears_matching_selection() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(2))));

        assert!(reduce(&mut state, SliceAction::DeleteItem(EntityId::Int(2))));

        assert_eq!(state.results().unwrap(), &[bot(1, "a")]);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn delete_other_id_keeps_selection() {
        let mut state = loaded(vec![bot(1, "a"), bot(2, "b")]);
        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::Int(2))));
        reduce(&mut state, SliceAction::DeleteItem(EntityId::Int(1)));
        assert_eq!(state.selected_item(), Some(&bot(2, "b")));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut state = loaded(vec![bot(1, "a")]);
        let before = state.clone();
        assert!(!reduce(&mut state, SliceAction::DeleteItem(EntityId::Int(7))));
        assert_eq!(state, before);
    }

    #[test]
    fn textual_id_matches_numeric_backend_id() {
        let mut textual = bot(1, "a");
        textual.id = EntityId::Key("42".into());
        let mut state = loaded(vec![textual.clone(), bot(2, "b")]);

        reduce(&mut state, SliceAction::SelectItem(Some(EntityId::from("42"))));
        assert_eq!(state.selected_item(), Some(&textual));

        assert!(reduce(&mut state, SliceAction::DeleteItem(EntityId::from("42"))));
        assert_eq!(state.results().unwrap(), &[bot(2, "b")]);
        assert!(state.selected_item().is_none());

        let mut numeric = loaded(vec![bot(42, "n")]);
        assert!(reduce(&mut numeric, SliceAction::DeleteItem(EntityId::from("42"))));
        assert!(numeric.results().unwrap().is_empty());
    }

    #[test]
    fn leading_zeros_name_a_different_item() {
        let mut state = loaded(vec![bot(7, "seven")]);
        assert!(!reduce(&mut state, SliceAction::DeleteItem(EntityId::from("007"))));
        assert_eq!(state.results().unwrap().len(), 1);
    }

    #[test]
    fn modal_flag_toggles() {
        let mut state: ResourceState<Bot> = ResourceState::default();
        assert!(reduce(&mut state, SliceAction::SetModalOpen(true)));
        assert!(!reduce(&mut state, SliceAction::SetModalOpen(true)));
        assert!(reduce(&mut state, SliceAction::SetModalOpen(false)));
    }

    #[test]
    fn action_names_match_reducers() {
        assert_eq!(SliceAction::<Bot>::SetLoading(true).name(), "setLoading");
        assert_eq!(
            SliceAction::<Bot>::SetCompletedLoadingItem(EntityId::Int(1)).name(),
            "setCompletedLoadingItem"
        );
        assert_eq!(
            SliceAction::<Bot>::DeleteItem(EntityId::Int(1)).name(),
            "deleteItem"
        );
    }
}
