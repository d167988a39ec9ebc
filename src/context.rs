use serde_derive::{Deserialize, Serialize};

use crate::fast_hash_map::FastHashMap;

/// A page (a document in a browsing context) which markers can be attributed to
/// via their `innerWindowID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, rename = "tabID", skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<u64>,
    #[serde(rename = "innerWindowID")]
    pub inner_window_id: u64,
    pub url: String,
    #[serde(
        default,
        rename = "embedderInnerWindowID",
        skip_serializing_if = "Option::is_none"
    )]
    pub embedder_inner_window_id: Option<u64>,
    #[serde(default)]
    pub is_private_browsing: bool,
}

/// What the marker pipeline needs to know about the rest of the profile.
///
/// In JSON:
///
/// ```json
/// {
///   "threads": { "1": "GeckoMain", "7": "IPC I/O Parent" },
///   "pages": [{ "innerWindowID": 2, "url": "https://example.com/" }],
///   "zeroAt": 1000.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ContextJson")]
pub struct ProfileContext {
    thread_names: FastHashMap<u32, String>,
    pages: FastHashMap<u64, PageInfo>,
    zero_at: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextJson {
    #[serde(default)]
    threads: FastHashMap<u32, String>,
    #[serde(default)]
    pages: Vec<PageInfo>,
    #[serde(default)]
    zero_at: f64,
}

impl From<ContextJson> for ProfileContext {
    fn from(json: ContextJson) -> Self {
        let mut context = ProfileContext {
            thread_names: json.threads,
            zero_at: json.zero_at,
            ..Default::default()
        };
        for page in json.pages {
            context = context.with_page(page);
        }
        context
    }
}

impl ProfileContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_name(mut self, tid: u32, name: &str) -> Self {
        self.thread_names.insert(tid, name.to_owned());
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.pages.insert(page.inner_window_id, page);
        self
    }

    /// Sets the profile's zero time, in the same time base as the marker timestamps.
    pub fn with_zero_at(mut self, zero_at: f64) -> Self {
        self.zero_at = zero_at;
        self
    }

    pub fn thread_name(&self, tid: u32) -> Option<&str> {
        self.thread_names.get(&tid).map(String::as_str)
    }

    pub fn page(&self, inner_window_id: u64) -> Option<&PageInfo> {
        self.pages.get(&inner_window_id)
    }

    pub fn zero_at(&self) -> f64 {
        self.zero_at
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn context_from_json() {
        let context: ProfileContext = serde_json::from_value(json!({
            "threads": { "1": "GeckoMain" },
            "pages": [
                { "tabID": 1, "innerWindowID": 2, "url": "https://example.com/" },
                { "innerWindowID": 3, "url": "about:blank", "isPrivateBrowsing": true }
            ],
            "zeroAt": 1000.0
        }))
        .unwrap();
        assert_eq!(context.thread_name(1), Some("GeckoMain"));
        assert_eq!(context.thread_name(2), None);
        assert_eq!(context.page(2).unwrap().url, "https://example.com/");
        assert!(context.page(3).unwrap().is_private_browsing);
        assert_eq!(context.zero_at(), 1000.0);

        let empty: ProfileContext = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ProfileContext::new());
    }
}
