//! Tower session middleware.
//!
//! `SessionLayer` and `SessionService` wrap any inner service with signed
//! session-cookie resolution. Generic over `AccountLoader` — the HTTP
//! layer never talks to storage directly for identity.
//!
//! Unlike a bearer-token gate, an unresolvable session is not an error
//! here: the request simply proceeds anonymously, and gated routes decide
//! for themselves what anonymity means.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use crate::service::AccountService;
use crate::session::{token_from_cookie_header, CurrentAccount, SessionKey};

/// Trait for resolving a session-bound account id to an identity.
///
/// The middleware calls `load()` with the id recovered from a validly
/// signed token. `None` means the id no longer resolves (deleted
/// account); the request is then anonymous.
pub trait AccountLoader: Send + Sync + 'static {
    /// Resolve an account id to a `CurrentAccount`.
    fn load(
        &self,
        account_id: i64,
    ) -> Pin<Box<dyn Future<Output = Option<CurrentAccount>> + Send + '_>>;
}

impl AccountLoader for AccountService {
    fn load(
        &self,
        account_id: i64,
    ) -> Pin<Box<dyn Future<Output = Option<CurrentAccount>> + Send + '_>> {
        Box::pin(async move {
            match self.load_session_account(account_id).await {
                Ok(found) => found.map(|account| CurrentAccount {
                    id: account.id,
                    email: account.email,
                    username: account.username,
                }),
                Err(e) => {
                    // A storage fault during identity resolution demotes
                    // the request to anonymous rather than failing it.
                    tracing::warn!("session account load failed: {e}");
                    None
                }
            }
        })
    }
}

/// Tower `Layer` that wraps services with session resolution.
#[derive(Clone)]
pub struct SessionLayer<L: AccountLoader> {
    loader: Arc<L>,
    key: SessionKey,
}

impl<L: AccountLoader> SessionLayer<L> {
    /// Create a new session layer with the given loader and signing key.
    pub fn new(loader: Arc<L>, key: SessionKey) -> Self {
        Self { loader, key }
    }
}

impl<L: AccountLoader, S> Layer<S> for SessionLayer<L> {
    type Service = SessionService<L, S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            loader: self.loader.clone(),
            key: self.key.clone(),
        }
    }
}

/// Tower `Service` that resolves session cookies before forwarding.
///
/// On successful resolution, inserts [`CurrentAccount`] into request
/// extensions where it's available to downstream handlers. Requests
/// without a valid session pass through unchanged.
#[derive(Clone)]
pub struct SessionService<L: AccountLoader, S> {
    inner: S,
    loader: Arc<L>,
    key: SessionKey,
}

impl<L, S> Service<Request<Body>> for SessionService<L, S>
where
    L: AccountLoader,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let loader = self.loader.clone();
        let key = self.key.clone();

        Box::pin(async move {
            if let Some(account_id) = session_id(&req, &key) {
                match loader.load(account_id).await {
                    Some(current) => {
                        req.extensions_mut().insert(current);
                    }
                    None => {
                        tracing::debug!(account_id, "session id no longer resolves");
                    }
                }
            }

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

/// Extract and verify the session token, returning the bound account id.
fn session_id(req: &Request<Body>, key: &SessionKey) -> Option<i64> {
    let header = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    let token = token_from_cookie_header(header)?;
    key.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::sync::Mutex;
    use tower::ServiceExt;

    // A test loader that resolves id 1 and nothing else.
    struct TestLoader;

    impl AccountLoader for TestLoader {
        fn load(
            &self,
            account_id: i64,
        ) -> Pin<Box<dyn Future<Output = Option<CurrentAccount>> + Send + '_>> {
            Box::pin(async move {
                (account_id == 1).then(|| CurrentAccount {
                    id: 1,
                    email: "a@x.com".to_string(),
                    username: "a".to_string(),
                })
            })
        }
    }

    fn test_key() -> SessionKey {
        SessionKey::from_secret("test-secret")
    }

    /// Mock inner service that captures the CurrentAccount.
    #[derive(Clone)]
    struct MockService {
        captured: Arc<Mutex<Option<CurrentAccount>>>,
    }

    impl MockService {
        fn new() -> Self {
            Self {
                captured: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Service<Request<Body>> for MockService {
        type Response = axum::response::Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let captured = self.captured.clone();
            Box::pin(async move {
                let current = req.extensions().get::<CurrentAccount>().cloned();
                *captured.lock().unwrap() = current;
                Ok((StatusCode::OK, "ok").into_response())
            })
        }
    }

    fn request_with_cookie(cookie: &str) -> Request<Body> {
        Request::builder()
            .header("Cookie", cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let mock = MockService::new();
        let captured = mock.captured.clone();
        let service = SessionLayer::new(Arc::new(TestLoader), test_key()).layer(mock);

        let req = Request::builder().body(Body::empty()).unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(captured.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_cookie_injects_account() {
        let mock = MockService::new();
        let captured = mock.captured.clone();
        let key = test_key();
        let token = key.sign(1);
        let service = SessionLayer::new(Arc::new(TestLoader), key).layer(mock);

        let resp = service
            .oneshot(request_with_cookie(&format!("session={token}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let current = captured.lock().unwrap();
        let current = current.as_ref().expect("CurrentAccount should be present");
        assert_eq!(current.id, 1);
        assert_eq!(current.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_forged_cookie_is_anonymous() {
        let mock = MockService::new();
        let captured = mock.captured.clone();
        let service = SessionLayer::new(Arc::new(TestLoader), test_key()).layer(mock);

        let forged = SessionKey::from_secret("attacker-secret").sign(1);
        let resp = service
            .oneshot(request_with_cookie(&format!("session={forged}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(captured.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unresolvable_id_is_anonymous() {
        let mock = MockService::new();
        let captured = mock.captured.clone();
        let key = test_key();
        // Validly signed, but the loader doesn't know id 2.
        let token = key.sign(2);
        let service = SessionLayer::new(Arc::new(TestLoader), key).layer(mock);

        let resp = service
            .oneshot(request_with_cookie(&format!("session={token}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(captured.lock().unwrap().is_none());
    }
}
