// ── Application root ──
//
// Owns the store and one resource client per resource type. Created at
// startup, dropped at shutdown; everything that dispatches gets the store
// from here rather than from ambient state.

use switchboard_api::{BearerToken, RestClient};
use tracing::{info, warn};

use crate::auth::AuthAction;
use crate::client::{CapabilitySet, ResourceClient, Thunk};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Bot, Light, TrainingJob};
use crate::slice::SliceAction;
use crate::store::{Store, StoreSlice};

#[derive(Debug, Clone)]
pub struct Dashboard {
    config: ClientConfig,
    store: Store,
    bots: ResourceClient<Bot>,
    lights: ResourceClient<Light>,
    training_jobs: ResourceClient<TrainingJob>,
}

impl Dashboard {
    /// Build the HTTP client and resource clients. Does no I/O.
    ///
    /// A token in `config` logs in immediately.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let rest = RestClient::new(config.url.as_str(), &config.transport())?;
        let scheme = config.auth_scheme;

        let bots = ResourceClient::builder(rest.clone())
            .capabilities(CapabilitySet::all().iter())
            .token(scheme)
            .build();
        let lights = ResourceClient::builder(rest.clone())
            .list()
            .detail()
            .update()
            .token(scheme)
            .build();
        let training_jobs = ResourceClient::builder(rest)
            .list()
            .detail()
            .create()
            .token(scheme)
            .build();

        let dashboard = Self {
            store: Store::new(),
            bots,
            lights,
            training_jobs,
            config,
        };
        if let Some(token) = dashboard.config.token.clone() {
            dashboard.login(BearerToken::from(token), None);
        }
        Ok(dashboard)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn bots(&self) -> &ResourceClient<Bot> {
        &self.bots
    }

    pub fn lights(&self) -> &ResourceClient<Light> {
        &self.lights
    }

    pub fn training_jobs(&self) -> &ResourceClient<TrainingJob> {
        &self.training_jobs
    }

    pub fn client<R: DashboardResource>(&self) -> &ResourceClient<R> {
        R::client(self)
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn login(&self, token: impl Into<BearerToken>, username: Option<String>) {
        info!(user = username.as_deref().unwrap_or("-"), "logged in");
        self.store.dispatch(AuthAction::Login {
            token: token.into(),
            username,
        });
    }

    /// Clear the token. Subsequent `authorized` calls fail with
    /// `AuthRejected`.
    pub fn logout(&self) {
        if self.store.dispatch(AuthAction::Logout) {
            info!("logged out");
        }
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.store.token()
    }

    // ── Running operations ───────────────────────────────────────────

    pub async fn run<R: StoreSlice, T: 'static>(&self, thunk: Thunk<R, T>) -> Result<T, CoreError> {
        self.store.run(thunk).await
    }

    /// Build an operation with the current token and run it.
    ///
    /// When logged out nothing goes on the wire; `AuthRejected` is surfaced
    /// into `R`'s slice and returned.
    ///
    /// ```no_run
    /// # use switchboard_core::{Bot, ClientConfig, Dashboard};
    /// # async fn demo(dashboard: Dashboard) -> Result<(), switchboard_core::CoreError> {
    /// let bots = dashboard
    ///     .authorized::<Bot, _>(|client, token| client.get_list(token))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authorized<R, T>(
        &self,
        op: impl FnOnce(&ResourceClient<R>, &BearerToken) -> Result<Thunk<R, T>, CoreError>,
    ) -> Result<T, CoreError>
    where
        R: DashboardResource,
        T: 'static,
    {
        let Some(token) = self.token() else {
            let err = CoreError::AuthRejected {
                message: "not logged in".into(),
            };
            warn!(resource = R::NAME, "{err}");
            self.store.dispatch(R::wrap(SliceAction::SetErrors(err.payload())));
            return Err(err);
        };

        let thunk = op(self.client::<R>(), &token)?;
        self.store.run(thunk).await
    }
}

/// A resource the dashboard holds a client for.
pub trait DashboardResource: StoreSlice {
    fn client(dashboard: &Dashboard) -> &ResourceClient<Self>;
}

impl DashboardResource for Bot {
    fn client(dashboard: &Dashboard) -> &ResourceClient<Self> {
        &dashboard.bots
    }
}

impl DashboardResource for Light {
    fn client(dashboard: &Dashboard) -> &ResourceClient<Self> {
        &dashboard.lights
    }
}

impl DashboardResource for TrainingJob {
    fn client(dashboard: &Dashboard) -> &ResourceClient<Self> {
        &dashboard.training_jobs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::client::Capability;
    use crate::error::ErrorKind;

    fn config() -> ClientConfig {
        ClientConfig::parse("http://127.0.0.1:9/api/").unwrap()
    }

    #[test]
    fn resource_capabilities() {
        let dashboard = Dashboard::new(config()).unwrap();
        assert!(dashboard.bots().supports(Capability::Delete));
        assert!(!dashboard.lights().supports(Capability::Create));
        assert!(!dashboard.training_jobs().supports(Capability::Update));
    }

    #[test]
    fn configured_token_logs_in() {
        let mut config = config();
        config.token = Some(SecretString::from("abc".to_owned()));
        let dashboard = Dashboard::new(config).unwrap();
        assert_eq!(dashboard.token(), Some(BearerToken::new("abc")));

        dashboard.logout();
        assert!(dashboard.token().is_none());
    }

    #[tokio::test]
    async fn logged_out_operations_surface_auth_rejected() {
        let dashboard = Dashboard::new(config()).unwrap();

        let err = dashboard
            .authorized::<Light, _>(|client, token| client.get_list(token))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthRejected);
        let lights = dashboard.store().slice::<Light>();
        assert_eq!(lights.errors().unwrap().kind, ErrorKind::AuthRejected);
        assert!(!lights.is_loading());
        assert!(dashboard.store().slice::<Bot>().errors().is_none());
    }

    #[tokio::test]
    async fn unsupported_operations_leave_state_alone() {
        let dashboard = Dashboard::new(config()).unwrap();
        dashboard.login("abc", None);
        let before = dashboard.store().snapshot();

        let err = dashboard
            .authorized::<TrainingJob, _>(|client, token| {
                client.update(token, 1, serde_json::json!({ "title": "x" }))
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(*dashboard.store().snapshot(), *before);
    }
}
