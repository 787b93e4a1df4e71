//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 路由元信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    /// 文档标题，`None` 时使用默认标题
    pub title: Option<&'static str>,
    /// 是否需要认证
    pub requires_auth: bool,
}

/// 路由表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub route: AppRoute,
    pub name: &'static str,
    pub meta: RouteMeta,
}

const fn entry(
    path: &'static str,
    route: AppRoute,
    name: &'static str,
    title: Option<&'static str>,
    requires_auth: bool,
) -> RouteEntry {
    RouteEntry {
        path,
        route,
        name,
        meta: RouteMeta {
            title,
            requires_auth,
        },
    }
}

/// 静态路由表，顺序即匹配顺序；`NotFound` 为兜底，不参与路径匹配
///
/// 首页不设标题，沿用应用的默认标题。
pub const ROUTES: &[RouteEntry] = &[
    entry("/", AppRoute::Home, "home", None, false),
    entry("/dashboard", AppRoute::Dashboard, "dashboard", Some("Dashboard"), true),
    entry("/sign-in", AppRoute::SignIn, "auth.sign-in", Some("Sign In"), false),
    entry("/sign-up", AppRoute::SignUp, "auth.sign-up", Some("Sign Up"), false),
    entry("/parking", AppRoute::Parking, "parking", Some("Parking"), true),
    entry("/inbox", AppRoute::Inbox, "inbox", Some("Inbox"), true),
    entry("/tickets", AppRoute::Tickets, "tickets", Some("Tickets"), true),
    entry("/settings", AppRoute::Settings, "settings", Some("Settings"), true),
];

static NOT_FOUND: RouteEntry = entry(
    "/404",
    AppRoute::NotFound,
    "not-found",
    Some("Not Found"),
    false,
);

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 首页
    #[default]
    Home,
    Dashboard,
    SignIn,
    SignUp,
    Parking,
    Inbox,
    Tickets,
    Settings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 允许一个可选的末尾斜杠并忽略 ASCII 大小写，未匹配的路径一律为 `NotFound`。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        ROUTES
            .iter()
            .find(|e| e.path.eq_ignore_ascii_case(normalized))
            .map(|e| e.route)
            .unwrap_or(Self::NotFound)
    }

    /// 按路由名称查找，如 `"auth.sign-in"`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|r| r.name() == name)
    }

    /// 全部路由（含 `NotFound`）
    pub fn all() -> impl Iterator<Item = AppRoute> {
        ROUTES.iter().map(|e| e.route).chain(std::iter::once(Self::NotFound))
    }

    /// 获取路由表条目
    pub fn entry(&self) -> &'static RouteEntry {
        ROUTES
            .iter()
            .find(|e| e.route == *self)
            .unwrap_or(&NOT_FOUND)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        self.entry().path
    }

    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    pub fn title(&self) -> Option<&'static str> {
        self.entry().meta.title
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        self.entry().meta.requires_auth
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::SignIn
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
