use crate::error::{AuthError, AuthResult};
use crate::request::{HttpClient, HttpRequest};
use parkhub_shared::protocol::{ApiRequest, RefreshTokenRequest, RefreshTokenResponse};

// =========================================================
// 业务逻辑: 刷新访问令牌
// =========================================================

// GET /auth/refresh
//
// 浏览器携带会话 Cookie，后端换发新的 access_token。
//
// Response
// Status: 200
// {"access_token": "<TOKEN>"}
//
// 其他状态码、缺失或为空的 access_token 均视为失败。
pub async fn refresh_access_token<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> AuthResult<String> {
    let req = HttpRequest::new(url, RefreshTokenRequest::METHOD)
        .with_header("Accept", "application/json")
        .with_credentials();

    let resp = client
        .send(req)
        .await
        .map_err(|e| AuthError::from(e).in_op_with("auth.refresh", url))?;

    if resp.status != 200 {
        return Err(AuthError::bad_status(resp.status).in_op_with("auth.refresh", url));
    }

    let body: <RefreshTokenRequest as ApiRequest>::Response = resp
        .json()
        .map_err(|e| AuthError::from(e).in_op_with("auth.refresh", url))?;

    token_from(body).map_err(|e| e.in_op_with("auth.refresh", url))
}

fn token_from(body: RefreshTokenResponse) -> AuthResult<String> {
    body.token()
        .map(str::to_string)
        .ok_or_else(AuthError::missing_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthErrorStatus;
    use crate::request::{HttpError, HttpMethod, MockHttpClient};
    use serde_json::json;

    const URL: &str = "/auth/refresh";

    #[tokio::test]
    async fn test_refresh_success() {
        let client = MockHttpClient::new();
        client.mock_response(URL, 200, json!({ "access_token": "tok-1" }));

        let token = refresh_access_token(&client, URL).await.unwrap();
        assert_eq!(token, "tok-1");

        let requests = client.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert!(requests[0].with_credentials);
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_refresh_failures_are_classified() {
        let client = MockHttpClient::new();

        client.mock_response(URL, 200, json!({ "message": "ok" }));
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::MissingToken);

        client.mock_response(URL, 200, json!({ "access_token": "" }));
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::MissingToken);

        client.mock_response(URL, 401, json!({ "access_token": "ignored" }));
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::BadStatus);

        // 2xx 但不是 200 同样视为失败
        client.mock_response(URL, 204, json!({ "access_token": "ignored" }));
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::BadStatus);

        client.mock_raw_response(URL, 200, "<html>gateway</html>");
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::Malformed);

        client.mock_failure(URL, HttpError::NetworkError("connection reset".into()));
        let err = refresh_access_token(&client, URL).await.unwrap_err();
        assert_eq!(err.status, AuthErrorStatus::Network);
        assert_eq!(err.spans()[0].detail.as_deref(), Some(URL));
    }
}
