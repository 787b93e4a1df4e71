//! 导航层运行时配置
//!
//! 所有字段都有默认值，前端只需覆盖 API 地址。

use parkhub_shared::protocol::{ApiRequest, RefreshTokenRequest};

pub const DEFAULT_TITLE: &str = "The Parking Hub";
pub const DEFAULT_REDIRECT_PARAM: &str = "redirect";

/// 导航配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// 后端地址，为空表示同源
    pub api_base_url: String,
    /// 刷新接口路径
    pub refresh_path: String,
    /// 路由没有配置标题时使用的文档标题
    pub default_title: String,
    /// 登录页上携带原始路径的查询参数名
    pub redirect_param: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            refresh_path: RefreshTokenRequest::PATH.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            redirect_param: DEFAULT_REDIRECT_PARAM.to_string(),
        }
    }
}

impl NavigationConfig {
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 拼接刷新接口的完整 URL
    pub fn refresh_url(&self) -> String {
        self.url(&self.refresh_path)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}
