//! 认证会话
//!
//! - `TokenStore`: 内存中的访问令牌（每个标签页至多一个）
//! - `AuthSession`: 持有令牌与 HTTP 客户端，负责单飞 (single-flight) 刷新
//!
//! 整个模块面向单线程的浏览器事件循环，使用 `Rc`/`RefCell` 共享状态。

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::api;
use crate::config::NavigationConfig;
use crate::error::AuthResult;
use crate::request::HttpClient;

// =========================================================
// TokenStore
// =========================================================

/// 访问令牌持有者
///
/// 克隆得到的是同一个存储的句柄。不做持久化，刷新页面后丢失。
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Rc<RefCell<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner.borrow().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.borrow_mut() = Some(token.into());
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().take();
    }

    pub fn has_token(&self) -> bool {
        self.inner.borrow().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 不打印令牌本身
        f.debug_struct("TokenStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}

// =========================================================
// AuthSession
// =========================================================

type SharedRefresh = Shared<LocalBoxFuture<'static, AuthResult<String>>>;

/// 认证会话
///
/// 同一时刻至多一个刷新请求在途：并发的受保护导航共享同一个结果，
/// 结果落定后清空槽位，下一次被拦截的导航会重新发起请求。
pub struct AuthSession<C> {
    client: Rc<C>,
    tokens: TokenStore,
    refresh_url: String,
    in_flight: Rc<RefCell<Option<SharedRefresh>>>,
}

impl<C> Clone for AuthSession<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            tokens: self.tokens.clone(),
            refresh_url: self.refresh_url.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<C: HttpClient + 'static> AuthSession<C> {
    pub fn new(client: C, tokens: TokenStore, config: &NavigationConfig) -> Self {
        Self {
            client: Rc::new(client),
            tokens,
            refresh_url: config.refresh_url(),
            in_flight: Rc::new(RefCell::new(None)),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// 是否有刷新请求在途
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.borrow().is_some()
    }

    /// 刷新访问令牌，成功时写入 `TokenStore`
    pub async fn refresh(&self) -> AuthResult<String> {
        let pending = self.join_or_start();
        let result = pending.clone().await;

        // 只清理自己等待的那一次，避免误删之后新发起的请求
        let mut slot = self.in_flight.borrow_mut();
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&pending)) {
            *slot = None;
        }

        result
    }

    fn join_or_start(&self) -> SharedRefresh {
        let mut slot = self.in_flight.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            log::debug!("[Auth] Joining in-flight token refresh");
            return pending.clone();
        }

        let client = self.client.clone();
        let tokens = self.tokens.clone();
        let url = self.refresh_url.clone();

        let pending = async move {
            let token = api::refresh_access_token(client.as_ref(), &url).await?;
            tokens.set(token.clone());
            Ok(token)
        }
        .boxed_local()
        .shared();

        *slot = Some(pending.clone());
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpError, MockHttpClient};
    use serde_json::json;

    fn session_with(client: MockHttpClient) -> AuthSession<MockHttpClient> {
        AuthSession::new(client, TokenStore::new(), &NavigationConfig::default())
    }

    #[test]
    fn test_token_store_shares_state_between_handles() {
        let store = TokenStore::new();
        let handle = store.clone();
        assert!(!handle.has_token());

        store.set("abc");
        assert_eq!(handle.get().as_deref(), Some("abc"));
        assert_eq!(format!("{:?}", handle), "TokenStore { has_token: true }");

        handle.clear();
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn test_refresh_stores_token() {
        let client = MockHttpClient::new();
        client.mock_response("/auth/refresh", 200, json!({ "access_token": "fresh" }));
        let session = session_with(client);

        assert_eq!(session.refresh().await.unwrap(), "fresh");
        assert_eq!(session.access_token().as_deref(), Some("fresh"));
        assert!(!session.is_refreshing());
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_share_one_request() {
        let client = MockHttpClient::new();
        client.mock_response("/auth/refresh", 200, json!({ "access_token": "once" }));
        let release = client.hold();
        let session = session_with(client);

        let (a, b, c, _) = futures::join!(
            session.refresh(),
            session.refresh(),
            session.refresh(),
            async move {
                assert!(release.send(()).is_ok());
            }
        );
        assert_eq!(a.unwrap(), "once");
        assert_eq!(b.unwrap(), "once");
        assert_eq!(c.unwrap(), "once");
        assert_eq!(session.client.request_count(), 1);
        assert!(!session.is_refreshing());
    }

    #[tokio::test]
    async fn test_failed_refresh_is_shared_then_retried_on_next_call() {
        let client = MockHttpClient::new();
        client.mock_failure("/auth/refresh", HttpError::NetworkError("down".into()));
        let release = client.hold();
        let session = session_with(client);

        let (a, b, _) = futures::join!(session.refresh(), session.refresh(), async move {
            drop(release);
        });
        assert!(a.is_err());
        assert!(b.is_err());
        assert_eq!(session.client.request_count(), 1);
        assert!(session.access_token().is_none());

        // 槽位已清空，后续调用重新发起请求
        session
            .client
            .mock_response("/auth/refresh", 200, json!({ "access_token": "later" }));
        assert_eq!(session.refresh().await.unwrap(), "later");
        assert_eq!(session.client.request_count(), 2);
    }
}
