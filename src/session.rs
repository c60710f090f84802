use crate::error::{NoSessionSnafu, RosterError, TowerSessionSnafu};
use axum::{extract::FromRequestParts, http::request::Parts};
use snafu::{OptionExt, ResultExt};
use tower_sessions::{
    Expiry, MemoryStore, Session, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};
use uuid::Uuid;

const CLIENT_KEY: &str = "toast_client";

pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_same_site(SameSite::Lax)
        // admin tool, usually reached over plain http
        .with_secure(false)
}

/// The browser a request came from, minted into the session on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastClient(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for ToastClient {
    type Rejection = RosterError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .context(NoSessionSnafu)?;

        if let Some(id) = session.get::<Uuid>(CLIENT_KEY).await.context(TowerSessionSnafu)? {
            return Ok(Self(id));
        }

        let id = Uuid::new_v4();
        session.insert(CLIENT_KEY, id).await.context(TowerSessionSnafu)?;
        debug!(%id, "New toast client");
        Ok(Self(id))
    }
}
