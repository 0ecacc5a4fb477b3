use super::ExtraAction;
use crate::error::ErrorPayload;
use crate::model::{EntityId, Resource};

/// Every state transition a resource slice accepts.
///
/// One variant per reducer; [`name`](Self::name) gives the reducer's
/// action name for logging (`setLoadingItems`, `deleteItem`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<R: Resource> {
    /// Replace `results` wholesale, clear `errors`, stop `loading`.
    Set(Vec<R>),
    /// Surface an error and stop `loading`.
    SetErrors(ErrorPayload),
    /// Dismiss the current error.
    ClearErrors,
    SetLoading(bool),
    /// Mark one ID as having an item-scoped request in flight.
    SetLoadingItems(EntityId),
    /// Clear the in-flight marker for one ID.
    SetCompletedLoadingItem(EntityId),
    /// Select by ID from `results`, or clear the selection with `None`.
    SelectItem(Option<EntityId>),
    /// Append a newly created item and close the create dialog.
    Create(R),
    /// Merge an item by ID.
    Update(R),
    DeleteItem(EntityId),
    SetModalOpen(bool),
    /// Resource-specific reducer.
    Extra(ExtraAction<R>),
}

impl<R: Resource> SliceAction<R> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Set(_) => "set",
            Self::SetErrors(_) => "setErrors",
            Self::ClearErrors => "clearErrors",
            Self::SetLoading(_) => "setLoading",
            Self::SetLoadingItems(_) => "setLoadingItems",
            Self::SetCompletedLoadingItem(_) => "setCompletedLoadingItem",
            Self::SelectItem(_) => "selectItem",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::DeleteItem(_) => "deleteItem",
            Self::SetModalOpen(_) => "setModalOpen",
            Self::Extra(action) => {
                <R::Extension as super::SliceExtension<R>>::action_name(action)
            }
        }
    }

    /// The ID an item-scoped action targets, if any.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::SetLoadingItems(id)
            | Self::SetCompletedLoadingItem(id)
            | Self::DeleteItem(id)
            | Self::SelectItem(Some(id)) => Some(id.clone()),
            Self::Create(item) | Self::Update(item) => Some(item.id()),
            _ => None,
        }
    }
}
