//! 导航守卫
//!
//! 每次路由切换前调用。流程：请求 -> 验证(Guard) -> 处理 -> 加载。
//! 守卫从不向调用方返回错误：认证失败一律转化为到登录页的重定向。
//!
//! 所有副作用都通过显式注入的上下文完成：
//! - `DocumentTitle`: 文档标题
//! - `TokenStore`（经由 `AuthSession`）: 访问令牌

use crate::config::NavigationConfig;
use crate::location::Location;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::AuthSession;

#[cfg(test)]
mod tests;

/// 重定向链的最大长度，防止循环重定向
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// 文档标题（全局展示状态）的抽象
pub trait DocumentTitle {
    fn set_title(&self, title: &str);
}

/// 单次守卫的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// 放行到请求的目标
    Proceed,
    /// 改为导航到另一个位置
    Redirect(Location),
}

/// 跟随重定向后的最终导航结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: AppRoute,
    pub location: Location,
    /// 最终位置是否与请求的位置不同
    pub redirected: bool,
}

pub struct NavigationGuard<C, D> {
    session: AuthSession<C>,
    document: D,
    default_title: String,
    redirect_param: String,
}

impl<C, D: Clone> Clone for NavigationGuard<C, D> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            document: self.document.clone(),
            default_title: self.default_title.clone(),
            redirect_param: self.redirect_param.clone(),
        }
    }
}

impl<C, D> NavigationGuard<C, D>
where
    C: HttpClient + 'static,
    D: DocumentTitle,
{
    pub fn new(session: AuthSession<C>, document: D, config: &NavigationConfig) -> Self {
        Self {
            session,
            document,
            default_title: config.default_title.clone(),
            redirect_param: config.redirect_param.clone(),
        }
    }

    pub fn session(&self) -> &AuthSession<C> {
        &self.session
    }

    /// 登录重定向时携带原始路径的查询参数名
    pub fn redirect_param(&self) -> &str {
        &self.redirect_param
    }

    /// **核心方法：守卫单次导航**
    pub async fn before_each(&self, to: &Location) -> NavigationDecision {
        let route = to.route();

        // --- Step 1: 公开路由直接放行 ---
        if !route.requires_auth() {
            self.apply_title(route);
            return NavigationDecision::Proceed;
        }

        // --- Step 2: 已持有令牌 ---
        if self.session.access_token().is_some() {
            self.apply_title(route);
            return NavigationDecision::Proceed;
        }

        // --- Step 3: 尝试一次刷新 ---
        match self.session.refresh().await {
            Ok(_) => {
                self.apply_title(route);
                NavigationDecision::Proceed
            }
            Err(e) => {
                log::error!("Auth refresh failed: {}", e);
                self.apply_title(route);
                let sign_in = Location::for_route(AppRoute::auth_failure_redirect())
                    .with_query(&self.redirect_param, &to.full_path());
                NavigationDecision::Redirect(sign_in)
            }
        }
    }

    /// 守卫并跟随重定向，返回最终落地的位置
    ///
    /// 每个重定向目标同样经过守卫；超过 `MAX_REDIRECT_DEPTH` 时停在最后一个目标。
    pub async fn resolve(&self, requested: Location) -> Resolution {
        let mut current = requested.clone();

        for _ in 0..MAX_REDIRECT_DEPTH {
            match self.before_each(&current).await {
                NavigationDecision::Proceed => break,
                NavigationDecision::Redirect(next) => {
                    log::debug!("[Router] Redirecting {} -> {}", current, next);
                    current = next;
                }
            }
        }

        Resolution {
            route: current.route(),
            redirected: current != requested,
            location: current,
        }
    }

    fn apply_title(&self, route: AppRoute) {
        let title = route.title().unwrap_or(&self.default_title);
        self.document.set_title(title);
    }
}
