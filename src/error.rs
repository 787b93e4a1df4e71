use std::fmt;

use crate::request::HttpError;

// =========================================================
// 错误状态枚举
// =========================================================

/// 认证失败的分类
///
/// 守卫对所有分类一视同仁（重定向到登录页），分类仅用于日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorStatus {
    /// 网络层失败（请求无法发出或连接中断）
    Network,
    /// 刷新接口返回了非 200 状态码
    BadStatus,
    /// 响应体无法解析为 JSON
    Malformed,
    /// 响应成功但没有可用的 access_token
    MissingToken,
}

impl AuthErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthErrorStatus::Network => "NETWORK_ERROR",
            AuthErrorStatus::BadStatus => "REFRESH_REJECTED",
            AuthErrorStatus::Malformed => "MALFORMED_RESPONSE",
            AuthErrorStatus::MissingToken => "MISSING_ACCESS_TOKEN",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "auth.refresh"
    pub operation: String,
    /// 额外的细节信息，如请求 URL
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 认证刷新错误
///
/// 必须是 `Clone`：同一次进行中的刷新结果会分发给所有等待的导航。
#[derive(Debug, Clone)]
pub struct AuthError {
    pub status: AuthErrorStatus,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl AuthError {
    pub fn new(status: AuthErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AuthErrorStatus::Network, message)
    }

    pub fn bad_status(status_code: u16) -> Self {
        Self::new(
            AuthErrorStatus::BadStatus,
            format!("unexpected status {}", status_code),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AuthErrorStatus::Malformed, message)
    }

    pub fn missing_token() -> Self {
        Self::new(
            AuthErrorStatus::MissingToken,
            "Invalid refresh response: no access_token",
        )
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for AuthError {}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<HttpError> for AuthError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ResponseParseFailed(msg) => AuthError::malformed(msg),
            other => AuthError::network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_trace() {
        let err = AuthError::bad_status(401)
            .in_op_with("auth.refresh", "/auth/refresh")
            .in_op("router.guard");

        assert_eq!(
            err.to_string(),
            "[REFRESH_REJECTED] unexpected status 401 | trace: auth.refresh(/auth/refresh) -> router.guard"
        );
        assert_eq!(err.spans().len(), 2);
    }

    #[test]
    fn test_http_error_mapping() {
        let err: AuthError = HttpError::NetworkError("offline".into()).into();
        assert_eq!(err.status, AuthErrorStatus::Network);

        let err: AuthError = HttpError::ResponseParseFailed("eof".into()).into();
        assert_eq!(err.status, AuthErrorStatus::Malformed);
        assert_eq!(err.message(), "eof");
    }
}
