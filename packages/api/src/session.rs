//! # Session store
//!
//! One [`SessionStore`] exists per running app. It is the only place the
//! bearer token is written: login, register, logout, restore and expiry all go
//! through it, and the token is mirrored to durable storage under `"token"`.
//!
//! ## States
//!
//! ```text
//! Initializing ──restore ok──────────▶ Authenticated
//!      │                                 │      ▲
//!      └─no token / restore failed─▶ Unauthenticated
//!                       logout / expire ◀┘      │
//!                                     login / register
//! ```
//!
//! Every transition bumps `epoch`. A restore captures the epoch in a
//! [`RestoreTicket`] when it starts and its result is only applied if the
//! epoch is unchanged, so a slow `/auth/me` answer can never resurrect a
//! session the user has since logged out of (or replace a newer login).
//!
//! The store is single-threaded (`Rc` + `RefCell`). Listeners registered with
//! [`SessionStore::subscribe`] are called after every transition; the UI uses
//! this to mirror the session into a reactive signal.

use std::cell::RefCell;
use std::rc::Rc;

use store::{clear_token, load_token, save_token, KeyValueStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::UserInfo;
use crate::transport::Transport;

pub const LOGIN_FAILED: &str = "Innlogging feilet";
pub const REGISTER_FAILED: &str = "Registrering feilet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Unauthenticated,
    Authenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Still verifying a stored token; render nothing yet.
    Pending,
    Granted,
    /// Redirect to login.
    Denied,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    pub phase: SessionPhase,
    pub epoch: u64,
}

impl Session {
    fn initializing(token: Option<String>) -> Self {
        Self {
            token,
            user: None,
            phase: SessionPhase::Initializing,
            epoch: 0,
        }
    }

    /// Optimistic: a present token counts until verification says otherwise.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_initializing(&self) -> bool {
        self.phase == SessionPhase::Initializing
    }

    pub fn route_access(&self) -> RouteAccess {
        match self.phase {
            SessionPhase::Initializing => RouteAccess::Pending,
            _ if self.is_authenticated() => RouteAccess::Granted,
            _ => RouteAccess::Denied,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Proof that a restore started at a given epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreTicket {
    token: String,
    epoch: u64,
}

impl RestoreTicket {
    pub fn token(&self) -> &str {
        &self.token
    }
}

type Listener = Box<dyn Fn(&Session)>;

struct Inner<S, T> {
    storage: S,
    client: ApiClient<T>,
    session: RefCell<Session>,
    listeners: RefCell<Vec<Listener>>,
}

pub struct SessionStore<S, T> {
    inner: Rc<Inner<S, T>>,
}

impl<S, T> Clone for SessionStore<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, T> PartialEq for SessionStore<S, T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: KeyValueStore, T: Transport> SessionStore<S, T> {
    /// Start in `Initializing` with whatever token storage holds.
    pub fn new(storage: S, client: ApiClient<T>) -> Self {
        let token = load_token(&storage);
        Self {
            inner: Rc::new(Inner {
                storage,
                client,
                session: RefCell::new(Session::initializing(token)),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.inner.client
    }

    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.session.borrow().token.clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    fn transition(&self, token: Option<String>, user: Option<UserInfo>, phase: SessionPhase) {
        let snapshot = {
            let mut session = self.inner.session.borrow_mut();
            session.token = token;
            session.user = user;
            session.phase = phase;
            session.epoch += 1;
            session.clone()
        };
        tracing::debug!(phase = ?snapshot.phase, epoch = snapshot.epoch, "session transition");
        for listener in self.inner.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    fn clear(&self) {
        clear_token(&self.inner.storage);
        self.transition(None, None, SessionPhase::Unauthenticated);
    }

    // ---- restore ----

    /// Capture the current token for verification. Without a token the
    /// session settles as `Unauthenticated` and `None` is returned.
    pub fn begin_restore(&self) -> Option<RestoreTicket> {
        let (token, epoch, phase) = {
            let session = self.inner.session.borrow();
            (session.token.clone(), session.epoch, session.phase)
        };
        match token {
            Some(token) => Some(RestoreTicket { token, epoch }),
            None => {
                if phase != SessionPhase::Unauthenticated {
                    self.transition(None, None, SessionPhase::Unauthenticated);
                }
                None
            }
        }
    }

    /// Apply a verification result. Returns `false` if the session moved on
    /// since the ticket was issued and the result was ignored.
    ///
    /// Any failure, including a network error, clears the stored token.
    pub fn finish_restore(&self, ticket: RestoreTicket, result: Result<UserInfo, ApiError>) -> bool {
        if self.inner.session.borrow().epoch != ticket.epoch {
            tracing::debug!("discarding stale session restore");
            return false;
        }
        match result {
            Ok(user) => {
                self.transition(Some(ticket.token), Some(user), SessionPhase::Authenticated);
            }
            Err(err) => {
                tracing::warn!("stored token rejected: {err}");
                self.clear();
            }
        }
        true
    }

    /// Verify the stored token against `/auth/me`.
    pub async fn restore(&self) -> SessionPhase {
        if let Some(ticket) = self.begin_restore() {
            let result = self.inner.client.current_user(Some(ticket.token())).await;
            self.finish_restore(ticket, result);
        }
        self.inner.session.borrow().phase
    }

    // ---- login / logout ----

    /// On failure the session is left as it was and nothing is persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, String> {
        match self.inner.client.login(email, password).await {
            Ok(response) => {
                save_token(&self.inner.storage, &response.access_token);
                let user = response.user;
                self.transition(
                    Some(response.access_token),
                    Some(user.clone()),
                    SessionPhase::Authenticated,
                );
                tracing::info!(email = %user.email, "logged in");
                Ok(user)
            }
            Err(err) => Err(err.user_message(LOGIN_FAILED)),
        }
    }

    /// Register, then log in with the same credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserInfo, String> {
        self.inner
            .client
            .register(email, password, full_name)
            .await
            .map_err(|err| err.user_message(REGISTER_FAILED))?;
        self.login(email, password).await
    }

    /// Local only; the backend is not told.
    pub fn logout(&self) {
        self.clear();
        tracing::info!("logged out");
    }

    /// Forced clear after the backend rejected the token mid-session.
    pub fn expire(&self) {
        if self.inner.session.borrow().token.is_some() {
            tracing::warn!("session expired");
            self.clear();
        }
    }

    /// Expire the session if `err` says the token is no longer valid.
    /// Returns `true` when it did.
    pub fn check_unauthorized(&self, err: &ApiError) -> bool {
        if err.is_unauthorized() && self.inner.session.borrow().token.is_some() {
            self.expire();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;
    use store::MemoryStore;

    use super::*;
    use crate::transport::mock::MockTransport;
    use crate::transport::Method;

    fn admin() -> serde_json::Value {
        json!({"id": "u1", "email": "admin@zenvit.no", "full_name": "Admin", "role": "admin"})
    }

    fn store_with(storage: MemoryStore) -> (SessionStore<MemoryStore, MockTransport>, MockTransport) {
        let mock = MockTransport::new();
        (SessionStore::new(storage, ApiClient::new(mock.clone())), mock)
    }

    #[tokio::test]
    async fn test_wrong_password_stays_unauthenticated() {
        let storage = MemoryStore::new();
        let (session, mock) = store_with(storage.clone());
        mock.on(
            Method::Post,
            "auth/login",
            401,
            json!({"detail": "Incorrect email or password"}),
        );
        session.restore().await;

        let err = session.login("admin@zenvit.no", "wrongpass").await.unwrap_err();
        assert_eq!(err, "Incorrect email or password");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Unauthenticated);
        assert!(!snapshot.is_authenticated());
        assert!(load_token(&storage).is_none());
        assert_eq!(snapshot.route_access(), RouteAccess::Denied);
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let storage = MemoryStore::new();
        let (session, mock) = store_with(storage.clone());
        mock.on(
            Method::Post,
            "auth/login",
            200,
            json!({"access_token": "jwt-1", "token_type": "bearer", "user": admin()}),
        );

        let user = session.login("admin@zenvit.no", "secret").await.unwrap();
        assert_eq!(user.full_name, "Admin");
        assert_eq!(load_token(&storage).as_deref(), Some("jwt-1"));
        assert_eq!(session.snapshot().route_access(), RouteAccess::Granted);
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback_message() {
        let (session, mock) = store_with(MemoryStore::new());
        mock.go_offline();
        assert_eq!(session.login("a@b.no", "x").await.unwrap_err(), LOGIN_FAILED);
        assert_eq!(
            session.register("a@b.no", "x", "A").await.unwrap_err(),
            REGISTER_FAILED
        );
    }

    #[tokio::test]
    async fn test_register_auto_logs_in() {
        let storage = MemoryStore::new();
        let (session, mock) = store_with(storage.clone());
        mock.on(Method::Post, "auth/register", 200, admin())
            .on(
                Method::Post,
                "auth/login",
                200,
                json!({"access_token": "jwt-2", "user": admin()}),
            );

        session.register("admin@zenvit.no", "secret", "Admin").await.unwrap();
        assert_eq!(session.token().as_deref(), Some("jwt-2"));
        let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["auth/register", "auth/login"]);
    }

    #[tokio::test]
    async fn test_register_failure_does_not_login() {
        let (session, mock) = store_with(MemoryStore::new());
        mock.on(Method::Post, "auth/register", 400, json!({"detail": "Email already registered"}));
        let err = session.register("a@b.no", "x", "A").await.unwrap_err();
        assert_eq!(err, "Email already registered");
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_restore_without_token() {
        let (session, mock) = store_with(MemoryStore::new());
        assert_eq!(session.snapshot().route_access(), RouteAccess::Pending);
        assert_eq!(session.restore().await, SessionPhase::Unauthenticated);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_success() {
        let storage = MemoryStore::new();
        save_token(&storage, "jwt-old");
        let (session, mock) = store_with(storage);
        mock.on(Method::Get, "auth/me", 200, admin());

        // Token present: optimistic, but routes wait for verification.
        assert!(session.snapshot().is_authenticated());
        assert_eq!(session.snapshot().route_access(), RouteAccess::Pending);

        assert_eq!(session.restore().await, SessionPhase::Authenticated);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.user.unwrap().email, "admin@zenvit.no");
        assert_eq!(mock.last_request().unwrap().bearer.as_deref(), Some("jwt-old"));
    }

    #[tokio::test]
    async fn test_restore_failure_fails_closed() {
        let storage = MemoryStore::new();
        save_token(&storage, "expired");
        let (session, mock) = store_with(storage.clone());
        mock.on(Method::Get, "auth/me", 401, json!({"detail": "Could not validate credentials"}));

        assert_eq!(session.restore().await, SessionPhase::Unauthenticated);
        let snapshot = session.snapshot();
        assert!(snapshot.token.is_none());
        assert!(snapshot.user.is_none());
        assert!(load_token(&storage).is_none());
    }

    #[tokio::test]
    async fn test_restore_network_error_clears_token() {
        let storage = MemoryStore::new();
        save_token(&storage, "jwt");
        let (session, mock) = store_with(storage.clone());
        mock.go_offline();
        assert_eq!(session.restore().await, SessionPhase::Unauthenticated);
        assert!(load_token(&storage).is_none());
    }

    #[test]
    fn test_stale_restore_after_logout_is_ignored() {
        let storage = MemoryStore::new();
        save_token(&storage, "jwt");
        let (session, _mock) = store_with(storage.clone());

        let ticket = session.begin_restore().unwrap();
        session.logout();

        let user: UserInfo = serde_json::from_value(admin()).unwrap();
        assert!(!session.finish_restore(ticket, Ok(user)));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Unauthenticated);
        assert!(!snapshot.is_authenticated());
        assert!(load_token(&storage).is_none());
    }

    #[tokio::test]
    async fn test_stale_restore_failure_after_login_keeps_new_session() {
        let storage = MemoryStore::new();
        save_token(&storage, "old");
        let (session, mock) = store_with(storage.clone());
        mock.on(
            Method::Post,
            "auth/login",
            200,
            json!({"access_token": "new", "user": admin()}),
        );

        let ticket = session.begin_restore().unwrap();
        session.login("admin@zenvit.no", "secret").await.unwrap();

        assert!(!session.finish_restore(ticket, Err(ApiError::Unauthorized("expired".into()))));
        assert_eq!(session.token().as_deref(), Some("new"));
        assert_eq!(load_token(&storage).as_deref(), Some("new"));
    }

    #[test]
    fn test_logout_notifies_listeners() {
        let storage = MemoryStore::new();
        save_token(&storage, "jwt");
        let (session, _mock) = store_with(storage);

        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        session.subscribe(move |s| {
            assert_eq!(s.route_access(), RouteAccess::Denied);
            seen.set(seen.get() + 1);
        });

        session.logout();
        assert_eq!(calls.get(), 1);
        assert_eq!(session.snapshot().epoch, 1);
    }

    #[test]
    fn test_unauthorized_error_expires_session() {
        let storage = MemoryStore::new();
        save_token(&storage, "jwt");
        let (session, _mock) = store_with(storage.clone());

        assert!(!session.check_unauthorized(&ApiError::NotFound("x".into())));
        assert!(session.check_unauthorized(&ApiError::Unauthorized("expired".into())));
        assert!(load_token(&storage).is_none());
        assert!(!session.check_unauthorized(&ApiError::Unauthorized("again".into())));
    }
}
