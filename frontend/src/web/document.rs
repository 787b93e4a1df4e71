use parkhub::DocumentTitle;

/// 浏览器 `document.title` 绑定
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDocument;

impl DocumentTitle for BrowserDocument {
    fn set_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }
}
