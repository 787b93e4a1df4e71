use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange the session cookie for a fresh access token
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest;

impl ApiRequest for RefreshTokenRequest {
    type Response = RefreshTokenResponse;
    const PATH: &'static str = "/auth/refresh";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Body of a refresh response. The token is optional on the wire:
/// a 200 without it counts as a failed refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl RefreshTokenResponse {
    /// The usable token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}
