//! 导航目标（路径 + 查询参数 + 锚点）
//!
//! `full_path()` 的结果就是登录重定向时放入 `redirect` 参数的值。

use crate::route::AppRoute;

/// 解析后的导航位置
///
/// 查询参数以原始（已编码）形式保存，`full_path()` 原样输出，
/// 因此解析再序列化不会改变任何字节。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    query: Vec<QueryPair>,
    hash: Option<String>,
}

/// 单个查询参数；`value` 为 `None` 表示没有 `=` 的裸键（`?flag`）
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryPair {
    key: String,
    value: Option<String>,
}

impl Location {
    /// 从完整路径解析，如 `/tickets?page=2#top`
    pub fn parse(full_path: &str) -> Self {
        let (rest, hash) = match full_path.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (full_path, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, Vec::new()),
        };

        Self {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            query,
            hash,
        }
    }

    pub fn for_route(route: AppRoute) -> Self {
        Self::parse(route.to_path())
    }

    /// 追加（或替换同名）查询参数，`value` 为未编码的原文
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.retain(|pair| decode_component(&pair.key) != key);
        self.query.push(QueryPair {
            key: encode_component(key),
            value: Some(encode_component(value)),
        });
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// 取第一个同名查询参数（已解码），裸键返回空串
    pub fn query(&self, key: &str) -> Option<String> {
        self.query
            .iter()
            .find(|pair| decode_component(&pair.key) == key)
            .map(|pair| pair.value.as_deref().map(decode_component).unwrap_or_default())
    }

    pub fn route(&self) -> AppRoute {
        AppRoute::from_path(&self.path)
    }

    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        for (i, pair) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(&pair.key);
            if let Some(value) = &pair.value {
                out.push('=');
                out.push_str(value);
            }
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_path())
    }
}

fn parse_query(query: &str) -> Vec<QueryPair> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => QueryPair {
                key: k.to_string(),
                value: Some(v.to_string()),
            },
            None => QueryPair {
                key: pair.to_string(),
                value: None,
            },
        })
        .collect()
}

// =========================================================
// 百分号编码 (RFC 3986 unreserved 之外全部编码)
// =========================================================

fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// 无效的转义序列按原样保留；解码结果不是合法 UTF-8 时返回原文
fn decode_component(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| input.to_string())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
