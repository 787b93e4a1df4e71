//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证部分委托给 `parkhub::NavigationGuard`。

use leptos::prelude::*;
use leptos::task::spawn_local;
use parkhub::{AppRoute, Location};
use wasm_bindgen::prelude::*;

use crate::auth::AuthContext;

/// 获取当前浏览器完整路径（含查询与锚点）
fn browser_location() -> Location {
    let full_path = web_sys::window()
        .map(|w| w.location())
        .map(|loc| {
            format!(
                "{}{}{}",
                loc.pathname().unwrap_or_else(|_| "/".to_string()),
                loc.search().unwrap_or_default(),
                loc.hash().unwrap_or_default()
            )
        })
        .unwrap_or_else(|| "/".to_string());
    Location::parse(&full_path)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向和 popstate）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由，首次导航完成前为 `None`
    current_route: ReadSignal<Option<AppRoute>>,
    set_route: WriteSignal<Option<AppRoute>>,
    current_location: ReadSignal<Location>,
    set_location: WriteSignal<Location>,
    auth: AuthContext,
    /// 最近一次导航的序号，过期的守卫结果直接丢弃
    latest: StoredValue<u64>,
}

impl RouterService {
    fn new(auth: AuthContext) -> Self {
        let (current_route, set_route) = signal(None);
        let (current_location, set_location) = signal(browser_location());

        Self {
            current_route,
            set_route,
            current_location,
            set_location,
            auth,
            latest: StoredValue::new(0),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<Option<AppRoute>> {
        self.current_route
    }

    /// 获取当前位置信号（含查询参数，如登录页的 `redirect`）
    pub fn current_location(&self) -> ReadSignal<Location> {
        self.current_location
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to(Location::parse(path), HistoryMode::Push);
    }

    /// 导航到指定位置
    ///
    /// 守卫是异步的（可能需要刷新令牌），结果回来时若已有更新的导航则丢弃。
    fn navigate_to(&self, requested: Location, mode: HistoryMode) {
        self.latest.update_value(|n| *n += 1);
        let seq = self.latest.get_value();
        let guard = self.auth.guard();
        let this = *self;

        spawn_local(async move {
            // --- Step 1: 验证目标路由 ---
            let resolution = guard.resolve(requested).await;

            if this.latest.get_value() != seq {
                log::debug!("[Router] Navigation to {} superseded", resolution.location);
                return;
            }

            if resolution.redirected {
                log::info!("[Router] Access denied. Redirecting to {}", resolution.location);
            }

            // --- Step 2: 加载页面 (更新状态) ---
            let path = resolution.location.full_path();
            match mode {
                HistoryMode::Push => push_history_state(&path),
                HistoryMode::Replace => replace_history_state(&path),
            }
            this.set_location.set(resolution.location);
            this.set_route.set(Some(resolution.route));
        });
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let this = *self;

        // popstate 时 URL 已变化，同样执行守卫逻辑
        let closure = Closure::<dyn Fn()>::new(move || {
            this.navigate_to(browser_location(), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(auth: AuthContext) -> RouterService {
    let router = RouterService::new(auth);

    router.init_popstate_listener();
    // 首次加载：守卫落地的 URL
    router.navigate_to(browser_location(), HistoryMode::Replace);

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证上下文（提供导航守卫）
    auth: AuthContext,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件；首次导航完成前显示加载状态。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.current_route().get() {
        Some(route) => matcher(route),
        None => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接
///
/// 普通左键点击走路由服务（经过守卫），带修饰键时交给浏览器处理。
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key() {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
