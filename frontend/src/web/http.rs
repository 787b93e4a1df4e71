//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现导航核心的 `HttpClient`。

use parkhub::request::{HttpClient, HttpError, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// 基于浏览器 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn build_request(req: &HttpRequest) -> Result<Request, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if req.with_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))
    }

    async fn read_text(response: &Response) -> Result<String, HttpError> {
        let promise = response
            .text()
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ResponseParseFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ResponseParseFailed("无法转换为字符串".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let request = Self::build_request(&req)?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            HttpError::ResponseParseFailed(format!("Response 类型转换失败: {:?}", e))
        })?;

        Ok(HttpResponse {
            status: response.status(),
            body: Self::read_text(&response).await?,
        })
    }
}
