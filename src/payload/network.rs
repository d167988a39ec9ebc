use serde_derive::{Deserialize, Serialize};

use super::CauseBacktrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkStatus {
    #[serde(rename = "STATUS_START")]
    Start,
    #[serde(rename = "STATUS_STOP")]
    Stop,
    #[serde(rename = "STATUS_REDIRECT")]
    Redirect,
    #[serde(rename = "STATUS_CANCEL")]
    Cancel,
}

impl NetworkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "STATUS_START",
            Self::Stop => "STATUS_STOP",
            Self::Redirect => "STATUS_REDIRECT",
            Self::Cancel => "STATUS_CANCEL",
        }
    }

    /// Whether an event with this status ends the load with the same id.
    pub fn closes_load(self) -> bool {
        !matches!(self, Self::Start)
    }
}

/// An HTTP-like load. A load is reported as a `STATUS_START` event followed by an
/// event with a closing status and the same `id`.
///
/// The timing fields after `fetch_start` are only present on the closing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPayload {
    pub id: u64,
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(
        default,
        rename = "RedirectURI",
        skip_serializing_if = "Option::is_none"
    )]
    pub redirect_uri: Option<String>,
    pub status: NetworkStatus,
    /// Gecko request priority; lower is more important.
    #[serde(default)]
    pub pri: i32,
    /// Transferred byte count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_lookup_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_lookup_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_connect_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_connection_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<u32>,
    #[serde(
        default,
        rename = "innerWindowID",
        skip_serializing_if = "Option::is_none"
    )]
    pub inner_window_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private_browsing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<CauseBacktrace>,
}
