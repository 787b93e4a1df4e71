use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use parkhub_shared::protocol::HttpMethod;

#[cfg(test)]
use futures::FutureExt;
#[cfg(test)]
use futures::channel::oneshot;
#[cfg(test)]
use futures::future::Shared;
#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "网络错误: {}", msg),
            HttpError::ResponseParseFailed(msg) => write!(f, "响应解析失败: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    /// 是否携带 Cookie 等凭据（刷新接口依赖会话 Cookie）
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            with_credentials: false,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::ResponseParseFailed(e.to_string()))
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 相关类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
enum MockReply {
    Respond(u16, String),
    Fail(HttpError),
}

#[cfg(test)]
pub struct MockHttpClient {
    replies: RefCell<HashMap<String, MockReply>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    // 设置后，所有请求挂起直到对应的 Sender 发送或被丢弃
    gate: RefCell<Option<Shared<oneshot::Receiver<()>>>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
        }
    }

    /// 挂起之后的所有响应，返回用于放行的句柄
    pub fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx.shared());
        tx
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_raw_response(&self, url: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_failure(&self, url: &str, error: HttpError) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), MockReply::Fail(error));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match self.replies.borrow().get(&url) {
            Some(MockReply::Respond(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::Fail(error)) => Err(error.clone()),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
