//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，提供简洁的本地存储接口。

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// 键不存在、为空或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?
            .get_item(key)
            .ok()?
            .filter(|v| !v.trim().is_empty())
    }
}
