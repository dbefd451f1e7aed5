//! Auth resource client
//!
//! Login stores the session (token + profile) in the injected handle and the
//! persistent store; logout clears both. The local session is cleared even
//! when the logout round-trip fails, so the process never stays logged in
//! against the user's intent.

use crate::{ClientResult, HttpClient, Session, SessionStore};
use shared::envelope::decode;
use shared::models::{LoginRequest, LoginResponse, UserProfile};

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: HttpClient,
    store: Option<SessionStore>,
}

impl AuthClient {
    pub fn new(http: HttpClient, store: Option<SessionStore>) -> Self {
        Self { http, store }
    }

    /// Login and persist the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = self.http.post("/user/login", &request).await?;
        let response: LoginResponse = decode(body)?;

        let profile = UserProfile::from(&response);
        let session = Session {
            token: response.token,
            user: profile.clone(),
        };
        if let Some(store) = &self.store {
            store.save(&session)?;
        }
        self.http.session().set(session);
        Ok(profile)
    }

    /// Logout. Local session state is cleared unconditionally.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.http.post_empty("/user/logout").await;

        self.http.session().clear();
        if let Some(store) = &self.store {
            store.clear()?;
        }

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "logout round-trip failed, session cleared locally");
                Err(err)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.session().is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.http.session().user()
    }
}
