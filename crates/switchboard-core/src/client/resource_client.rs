// ── Resource client ──
//
// Per-resource façade over the REST client. Every operation checks its
// capability up front and returns a `Thunk`; all network I/O and all
// dispatches happen when the thunk runs.
//
// Item-scoped operations share one bracket: `setLoadingItems(id)` before
// the call, the success or failure dispatch after it, and
// `setCompletedLoadingItem(id)` last on every path.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;
use switchboard_api::{AuthScheme, BearerToken, HeaderValue, RestClient};
use tracing::{debug, warn};

use super::builder::{NoToken, ResourceClientBuilder};
use super::capability::{Capability, CapabilitySet};
use super::thunk::{SliceDispatcher, Thunk};
use crate::error::CoreError;
use crate::model::EntityId;
use crate::slice::SliceAction;
use crate::store::StoreSlice;

pub struct ResourceClient<R> {
    rest: RestClient,
    capabilities: CapabilitySet,
    scheme: AuthScheme,
    _resource: PhantomData<fn() -> R>,
}

impl<R: StoreSlice> ResourceClient<R> {
    pub fn builder(rest: RestClient) -> ResourceClientBuilder<R, NoToken> {
        ResourceClientBuilder::new(rest)
    }

    pub(crate) fn new(rest: RestClient, capabilities: CapabilitySet, scheme: AuthScheme) -> Self {
        Self {
            rest,
            capabilities,
            scheme,
            _resource: PhantomData,
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.scheme
    }

    // ── Operations ───────────────────────────────────────────────────

    /// `GET {base}`: replace the whole collection.
    pub fn get_list(&self, token: &BearerToken) -> Result<Thunk<R, Vec<R>>, CoreError> {
        self.require(Capability::List)?;
        let client = self.clone();
        let token = token.clone();

        Ok(Thunk::new(Capability::List.operation(), move |dispatcher| async move {
            dispatcher.dispatch(SliceAction::SetLoading(true));
            let result = async {
                let auth = client.authorization(&token)?;
                Ok::<_, CoreError>(client.rest.list::<R>(R::BASE_PATH, &auth).await?)
            }
            .await;

            match result {
                Ok(items) => {
                    debug!(resource = R::NAME, count = items.len(), "collection loaded");
                    dispatcher.dispatch(SliceAction::Set(items.clone()));
                    Ok(items)
                }
                Err(err) => Err(surface(&dispatcher, Capability::List.operation(), None, err)),
            }
        }))
    }

    /// `GET {base}/{id}`: merge one item by ID.
    pub fn get_item(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
    ) -> Result<Thunk<R, R>, CoreError> {
        self.require(Capability::Detail)?;
        let client = self.clone();
        let token = token.clone();
        let id = id.into();

        Ok(Thunk::new(Capability::Detail.operation(), move |dispatcher| async move {
            let call = async {
                let path = item_path::<R>(&id)?;
                let auth = client.authorization(&token)?;
                Ok::<_, CoreError>(client.rest.get::<R>(&path, &auth).await?)
            };
            bracket(&dispatcher, id.clone(), Capability::Detail.operation(), call, |d, item| {
                d.dispatch(SliceAction::Update(item.clone()));
            })
            .await
        }))
    }

    /// `POST {base}`: append the created item and close the create dialog.
    pub fn create<B>(&self, token: &BearerToken, payload: B) -> Result<Thunk<R, R>, CoreError>
    where
        B: Serialize + Send + Sync + 'static,
    {
        self.require(Capability::Create)?;
        let client = self.clone();
        let token = token.clone();

        Ok(Thunk::new(Capability::Create.operation(), move |dispatcher| async move {
            let result = async {
                let auth = client.authorization(&token)?;
                Ok::<_, CoreError>(client.rest.post::<R, B>(R::BASE_PATH, &payload, &auth).await?)
            }
            .await;

            match result {
                Ok(item) => {
                    debug!(resource = R::NAME, id = %item.id(), "created {}", item.display_name());
                    dispatcher.dispatch(SliceAction::Create(item.clone()));
                    Ok(item)
                }
                Err(err) => Err(surface(&dispatcher, Capability::Create.operation(), None, err)),
            }
        }))
    }

    /// `PATCH {base}/{id}`: merge the returned item by ID.
    pub fn update<B>(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
        patch: B,
    ) -> Result<Thunk<R, R>, CoreError>
    where
        B: Serialize + Send + Sync + 'static,
    {
        self.require(Capability::Update)?;
        let client = self.clone();
        let token = token.clone();
        let id = id.into();

        Ok(Thunk::new(Capability::Update.operation(), move |dispatcher| async move {
            let call = client.patch_item(token, id.clone(), patch);
            bracket(&dispatcher, id, Capability::Update.operation(), call, |d, item| {
                debug!(resource = R::NAME, "updated {}", item.display_name());
                d.dispatch(SliceAction::Update(item.clone()));
            })
            .await
        }))
    }

    /// `DELETE {base}/{id}`: drop the item from the collection.
    pub fn delete(
        &self,
        token: &BearerToken,
        id: impl Into<EntityId>,
    ) -> Result<Thunk<R, ()>, CoreError> {
        self.require(Capability::Delete)?;
        let client = self.clone();
        let token = token.clone();
        let id = id.into();

        Ok(Thunk::new(Capability::Delete.operation(), move |dispatcher| async move {
            let call = async {
                let path = item_path::<R>(&id)?;
                let auth = client.authorization(&token)?;
                Ok::<_, CoreError>(client.rest.delete(&path, &auth).await?)
            };
            let target = id.clone();
            bracket(&dispatcher, id.clone(), Capability::Delete.operation(), call, move |d, _| {
                d.dispatch(SliceAction::DeleteItem(target));
            })
            .await
        }))
    }

    // ── Helpers ──────────────────────────────────────────────────────

    pub(crate) fn require(&self, capability: Capability) -> Result<(), CoreError> {
        if self.capabilities.contains(capability) {
            Ok(())
        } else {
            Err(CoreError::Unsupported {
                operation: capability.operation().into(),
                resource: R::NAME.into(),
            })
        }
    }

    fn authorization(&self, token: &BearerToken) -> Result<HeaderValue, CoreError> {
        Ok(self.scheme.header_value(token)?)
    }

    /// The PATCH round trip shared by `update` and the light commands.
    pub(crate) async fn patch_item<B>(
        &self,
        token: BearerToken,
        id: EntityId,
        patch: B,
    ) -> Result<R, CoreError>
    where
        B: Serialize + Send + Sync,
    {
        let auth = self.authorization(&token)?;
        let path = item_path::<R>(&id)?;
        Ok(self.rest.patch::<R, B>(&path, &patch, &auth).await?)
    }
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
            capabilities: self.capabilities.clone(),
            scheme: self.scheme,
            _resource: PhantomData,
        }
    }
}

impl<R: StoreSlice> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .field("base_path", &R::BASE_PATH)
            .field("capabilities", &self.capabilities.to_string())
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

// ── Shared completion paths ──────────────────────────────────────────

fn item_path<R: StoreSlice>(id: &EntityId) -> Result<String, CoreError> {
    Ok(RestClient::item_path(R::BASE_PATH, &id.to_string())?)
}

/// Run `call` inside the `loading_items` bracket for `id`.
pub(crate) async fn bracket<R, T, Fut, F>(
    dispatcher: &SliceDispatcher<R>,
    id: EntityId,
    operation: &'static str,
    call: Fut,
    on_success: F,
) -> Result<T, CoreError>
where
    R: StoreSlice,
    Fut: Future<Output = Result<T, CoreError>>,
    F: FnOnce(&SliceDispatcher<R>, &T),
{
    dispatcher.dispatch(SliceAction::SetLoadingItems(id.clone()));
    let result = match call.await {
        Ok(value) => {
            on_success(dispatcher, &value);
            Ok(value)
        }
        Err(err) => Err(surface(dispatcher, operation, Some(&id), err)),
    };
    dispatcher.dispatch(SliceAction::SetCompletedLoadingItem(id));
    result
}

/// Log a failed operation and surface it into the slice's `errors`.
pub(crate) fn surface<R: StoreSlice>(
    dispatcher: &SliceDispatcher<R>,
    operation: &'static str,
    id: Option<&EntityId>,
    err: CoreError,
) -> CoreError {
    match id {
        Some(id) => warn!(
            resource = R::NAME,
            operation,
            %id,
            kind = %err.kind(),
            "{err}"
        ),
        None => warn!(resource = R::NAME, operation, kind = %err.kind(), "{err}"),
    }
    dispatcher.dispatch(SliceAction::SetErrors(err.payload()));
    err
}
