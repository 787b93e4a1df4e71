//! ParkHub 导航核心
//!
//! 与平台无关的路由层，浏览器前端 (`frontend/`) 在其上实现 History API 绑定：
//! - `route`: 静态路由表（路径、名称、标题、是否需要认证）
//! - `location`: 完整路径的解析与序列化
//! - `session`: 内存令牌与单飞刷新
//! - `guard`: 导航守卫
//! - `request`: HTTP 客户端抽象

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod location;
pub mod request;
pub mod route;
pub mod session;

pub use config::NavigationConfig;
pub use error::{AuthError, AuthErrorStatus, AuthResult};
pub use guard::{DocumentTitle, NavigationDecision, NavigationGuard, Resolution};
pub use location::Location;
pub use request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
pub use route::AppRoute;
pub use session::{AuthSession, TokenStore};
