use serde_derive::{Deserialize, Serialize};

use super::CauseBacktrace;

/// The tracing category used for DOM event markers.
pub const DOM_EVENT_CATEGORY: &str = "DOMEvent";

/// A generic tracing marker, such as Paint, CC, Navigation or DOMEvent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingPayload {
    pub category: String,
    /// The DOM event type, for DOMEvent markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(
        default,
        rename = "innerWindowID",
        skip_serializing_if = "Option::is_none"
    )]
    pub inner_window_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<CauseBacktrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIoPayload {
    /// The I/O interposer source, e.g. `PoisonIOInterposer`.
    pub source: String,
    /// e.g. `create/open`, `read`, `write`, `fsync`, `stat`.
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// The thread on which the I/O happened, if it was recorded on another thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<CauseBacktrace>,
}

/// A JIT bailout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BailoutPayload {
    pub bailout_type: String,
    #[serde(rename = "where")]
    pub where_: String,
    pub script: String,
    pub bailout_line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTimingEntryType {
    Measure,
    Mark,
}

/// A marker created with `performance.measure()` or `performance.mark()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTimingPayload {
    pub name: String,
    pub entry_type: UserTimingEntryType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotPayload {
    /// An index into the thread's string table, holding a data URL of the image.
    pub url: u32,
    #[serde(rename = "windowID")]
    pub window_id: String,
    pub window_width: f64,
    pub window_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceReadPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_access_time: Option<f64>,
    pub pref_name: String,
    pub pref_kind: String,
    pub pref_type: String,
    pub pref_value: String,
}

/// Statistics from a style recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePayload {
    pub elements_traversed: u64,
    pub elements_styled: u64,
    pub elements_matched: u64,
    pub styles_shared: u64,
    pub styles_reused: u64,
}
