//! The closed set of marker payloads.
//!
//! The JSON shape of every payload is the processed-profile shape: a `type` tag plus
//! the payload's fields. Older ("Gecko") shapes are converted by [`normalize_payload`].

mod common;
mod gc;
mod ipc;
mod network;
mod normalize;

pub use common::*;
pub use gc::*;
pub use ipc::*;
pub use network::*;
pub use normalize::normalize_payload;

use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fast_hash_map::FastIndexMap;

/// Per-phase GC times in microseconds, in the order the runtime reported them.
pub type PhaseTimes = FastIndexMap<String, f64>;

/// An index into the thread's stack table. Never resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackIndex(pub u32);

/// The call stack which triggered a marker.
///
/// `time` is when the stack was captured. If it precedes the marker's start, the
/// cause is asynchronous; if it falls within the marker, it is synchronous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CauseBacktrace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    pub stack: StackIndex,
}

impl CauseBacktrace {
    pub fn is_async_for(&self, marker_start: f64) -> bool {
        self.time.is_some_and(|time| time < marker_start)
    }
}

/// A marker payload. The variant is selected by the JSON `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarkerPayload {
    #[serde(rename = "tracing")]
    Tracing(TracingPayload),
    #[serde(rename = "Text")]
    Text(TextPayload),
    #[serde(rename = "Network")]
    Network(NetworkPayload),
    #[serde(rename = "IPC")]
    Ipc(IpcPayload),
    #[serde(rename = "GCMinor")]
    GcMinor(GcMinorPayload),
    #[serde(rename = "GCMajor")]
    GcMajor(GcMajorPayload),
    #[serde(rename = "GCSlice")]
    GcSlice(GcSlicePayload),
    #[serde(rename = "FileIO")]
    FileIo(FileIoPayload),
    #[serde(rename = "Bailout")]
    Bailout(BailoutPayload),
    #[serde(rename = "UserTiming")]
    UserTiming(UserTimingPayload),
    #[serde(rename = "CompositorScreenshot")]
    Screenshot(ScreenshotPayload),
    #[serde(rename = "PreferenceRead")]
    PreferenceRead(PreferenceReadPayload),
    #[serde(rename = "Styles")]
    Style(StylePayload),
}

/// The discriminator of [`MarkerPayload`], without the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PayloadKind {
    Tracing,
    Text,
    Network,
    Ipc,
    GcMinor,
    GcMajor,
    GcSlice,
    FileIo,
    Bailout,
    UserTiming,
    Screenshot,
    PreferenceRead,
    Style,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 13] = [
        Self::Tracing,
        Self::Text,
        Self::Network,
        Self::Ipc,
        Self::GcMinor,
        Self::GcMajor,
        Self::GcSlice,
        Self::FileIo,
        Self::Bailout,
        Self::UserTiming,
        Self::Screenshot,
        Self::PreferenceRead,
        Self::Style,
    ];

    /// The value of the JSON `type` field for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Tracing => "tracing",
            Self::Text => "Text",
            Self::Network => "Network",
            Self::Ipc => "IPC",
            Self::GcMinor => "GCMinor",
            Self::GcMajor => "GCMajor",
            Self::GcSlice => "GCSlice",
            Self::FileIo => "FileIO",
            Self::Bailout => "Bailout",
            Self::UserTiming => "UserTiming",
            Self::Screenshot => "CompositorScreenshot",
            Self::PreferenceRead => "PreferenceRead",
            Self::Style => "Styles",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == type_name)
    }
}

impl MarkerPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Tracing(_) => PayloadKind::Tracing,
            Self::Text(_) => PayloadKind::Text,
            Self::Network(_) => PayloadKind::Network,
            Self::Ipc(_) => PayloadKind::Ipc,
            Self::GcMinor(_) => PayloadKind::GcMinor,
            Self::GcMajor(_) => PayloadKind::GcMajor,
            Self::GcSlice(_) => PayloadKind::GcSlice,
            Self::FileIo(_) => PayloadKind::FileIo,
            Self::Bailout(_) => PayloadKind::Bailout,
            Self::UserTiming(_) => PayloadKind::UserTiming,
            Self::Screenshot(_) => PayloadKind::Screenshot,
            Self::PreferenceRead(_) => PayloadKind::PreferenceRead,
            Self::Style(_) => PayloadKind::Style,
        }
    }

    /// The name of the marker schema which describes this payload.
    ///
    /// This is the `type` tag, except for DOM event tracing markers, which have
    /// their own schema.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::Tracing(tracing) if tracing.category == DOM_EVENT_CATEGORY => "DOMEvent",
            _ => self.kind().type_name(),
        }
    }

    pub fn cause(&self) -> Option<&CauseBacktrace> {
        match self {
            Self::Tracing(payload) => payload.cause.as_ref(),
            Self::Network(payload) => payload.cause.as_ref(),
            Self::FileIo(payload) => payload.cause.as_ref(),
            Self::Text(_)
            | Self::Ipc(_)
            | Self::GcMinor(_)
            | Self::GcMajor(_)
            | Self::GcSlice(_)
            | Self::Bailout(_)
            | Self::UserTiming(_)
            | Self::Screenshot(_)
            | Self::PreferenceRead(_)
            | Self::Style(_) => None,
        }
    }

    /// The thread on which the marked activity happened, if the payload says it
    /// differs from the thread which recorded the marker.
    pub fn occurring_thread_id(&self) -> Option<u32> {
        match self {
            Self::Ipc(payload) => payload.thread_id,
            Self::FileIo(payload) => payload.thread_id,
            _ => None,
        }
    }

    pub fn inner_window_id(&self) -> Option<u64> {
        match self {
            Self::Tracing(payload) => payload.inner_window_id,
            Self::Network(payload) => payload.inner_window_id,
            _ => None,
        }
    }

    /// The payload as a JSON object, including the `type` field.
    pub fn to_json_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Internally tagged enums always serialize to an object.
            _ => Map::new(),
        }
    }
}
