//! 认证模块
//!
//! 持有内存令牌与导航守卫，通过 Context 在组件间共享。
//! 路由服务从这里取得守卫，而不是直接依赖令牌存储。

use crate::web::{BrowserDocument, FetchClient};
use leptos::prelude::*;
use parkhub::{AuthSession, NavigationConfig, NavigationGuard, TokenStore};

/// LocalStorage 中覆盖后端地址的键
const STORAGE_API_BASE_KEY: &str = "parkhub_api_base";

pub type AppGuard = NavigationGuard<FetchClient, BrowserDocument>;

/// 解析运行时配置
///
/// 后端地址优先级：LocalStorage > 编译期 `PARKHUB_API_BASE` > 同源。
pub fn load_config() -> NavigationConfig {
    let api_base_url = crate::web::LocalStorage::get(STORAGE_API_BASE_KEY)
        .or_else(|| option_env!("PARKHUB_API_BASE").map(str::to_string))
        .unwrap_or_default();

    if !api_base_url.is_empty() {
        log::info!("[Auth] Using API base {}", api_base_url);
    }

    NavigationConfig::default().with_api_base_url(api_base_url)
}

/// 认证上下文
///
/// 守卫内部使用 `Rc`，因此以 `LocalStorage` 方式存放在响应式 arena 中。
#[derive(Clone, Copy)]
pub struct AuthContext {
    guard: StoredValue<AppGuard, LocalStorage>,
}

impl AuthContext {
    pub fn new(config: &NavigationConfig) -> Self {
        let session = AuthSession::new(FetchClient, TokenStore::new(), config);
        let guard = NavigationGuard::new(session, BrowserDocument, config);
        Self {
            guard: StoredValue::new_local(guard),
        }
    }

    /// 获取守卫句柄（共享同一令牌与在途刷新）
    pub fn guard(&self) -> AppGuard {
        self.guard.get_value()
    }

    /// 当前访问令牌，供页面调用后端 API 时使用
    pub fn access_token(&self) -> Option<String> {
        self.guard.with_value(|g| g.session().access_token())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// 守卫写入原始路径时使用的查询参数名
    pub fn redirect_param(&self) -> String {
        self.guard.with_value(|g| g.redirect_param().to_string())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
