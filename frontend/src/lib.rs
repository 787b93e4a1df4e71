//! ParkHub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `parkhub::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎），守卫委托给 `parkhub::NavigationGuard`
//! - `auth`: 令牌与守卫的持有者
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod dashboard;
    pub mod layout;
    pub mod pages;
    pub mod sign_in;
}

use crate::auth::{AuthContext, load_config};
use crate::components::dashboard::DashboardPage;
use crate::components::pages::*;
use crate::components::sign_in::{SignInPage, SignUpPage};

use leptos::prelude::*;
use parkhub::AppRoute;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod document;
    mod http;
    pub mod router;
    mod storage;

    pub use document::BrowserDocument;
    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::SignIn => view! { <SignInPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::Parking => view! { <ParkingPage /> }.into_any(),
        AppRoute::Inbox => view! { <InboxPage /> }.into_any(),
        AppRoute::Tickets => view! { <TicketsPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 解析运行时配置并创建认证上下文
    let config = load_config();
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    view! {
        // 2. 路由器组件：注入认证上下文实现守卫
        <Router auth=auth_ctx>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
