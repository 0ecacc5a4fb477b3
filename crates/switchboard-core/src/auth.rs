// ── Auth slice ──
//
// Holds the opaque credential every resource client reads. Only login and
// logout write it; resource clients never do.

use switchboard_api::BearerToken;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub(crate) token: Option<BearerToken>,
    pub(crate) username: Option<String>,
}

impl AuthState {
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login {
        token: BearerToken,
        username: Option<String>,
    },
    Logout,
}

impl AuthAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
        }
    }
}

pub fn reduce(state: &mut AuthState, action: AuthAction) -> bool {
    match action {
        AuthAction::Login { token, username } => {
            let changed = state.token.as_ref() != Some(&token) || state.username != username;
            state.token = Some(token);
            state.username = username;
            changed
        }
        AuthAction::Logout => {
            let changed = state.token.is_some() || state.username.is_some();
            *state = AuthState::default();
            changed
        }
    }
}
