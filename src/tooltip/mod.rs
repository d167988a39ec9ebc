//! Composes the title and the ordered label/value rows shown for a marker.
//!
//! Composition never fails: missing data renders as a placeholder or is left out.

mod bailout;
mod gc;
mod ipc;
mod network;

pub use bailout::bailout_description;
pub use network::{network_phases, priority_label, NetworkPhase};

use serde_derive::Serialize;
use serde_json::{Map, Value};

use crate::context::ProfileContext;
use crate::format::{
    format_field_value, format_integer, format_milliseconds, maybe_format_duration,
};
use crate::marker::Marker;
use crate::markers::MarkerSchemaField;
use crate::payload::{MarkerPayload, StackIndex};
use crate::schema_registry::MarkerSchemaRegistry;

/// Shown as the duration of a marker whose end was never observed.
pub const UNKNOWN_DURATION: &str = "unknown duration";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerTooltip {
    pub title: String,
    /// `None` for instant markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub details: Vec<TooltipDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<TooltipCause>,
}

impl MarkerTooltip {
    /// The value of the first row with this label.
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|detail| detail.label == label)
            .map(|detail| detail.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipDetail {
    pub label: String,
    pub value: String,
}

impl TooltipDetail {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The stack which caused a marker. The stack is passed through unresolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipCause {
    pub stack: StackIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    /// When the stack was captured, relative to the profile's zero time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<f64>,
    /// Whether the stack was captured before the marker started.
    pub is_async: bool,
}

/// Composes the tooltip of `marker`.
///
/// The title comes from the schema's tooltip label, then the marker's own title,
/// then its name. Rows are ordered: thread, page, schema fields (in schema order),
/// then the rows specific to the payload type.
pub fn compose_tooltip(
    marker: &Marker,
    registry: &MarkerSchemaRegistry,
    context: &ProfileContext,
) -> MarkerTooltip {
    let data = marker
        .data
        .as_ref()
        .map(MarkerPayload::to_json_map)
        .unwrap_or_default();
    let schema_name = marker.data.as_ref().map(MarkerPayload::schema_name);

    let title = schema_name
        .and_then(|name| registry.label_maker(name))
        .and_then(|label_maker| label_maker.evaluate(&marker.name, &data))
        .or_else(|| marker.title.clone())
        .unwrap_or_else(|| marker.name.clone());

    let duration = if marker.incomplete {
        Some(UNKNOWN_DURATION.to_owned())
    } else {
        marker.duration().map(format_milliseconds)
    };

    let mut details = Vec::new();
    push_thread_details(&mut details, marker, context);
    push_page_details(&mut details, marker, context);
    if let Some(schema) = schema_name.and_then(|name| registry.lookup(name)) {
        if let Some(description) = &schema.description {
            if !schema.has_static_field("Description") {
                details.push(TooltipDetail::new("Description", description.as_str()));
            }
        }
        push_schema_details(&mut details, &schema.data, &data);
    }
    if let Some(payload) = &marker.data {
        push_custom_details(&mut details, marker, payload, context);
    }

    let cause = marker
        .data
        .as_ref()
        .and_then(MarkerPayload::cause)
        .map(|cause| TooltipCause {
            stack: cause.stack,
            thread_id: cause.tid,
            captured_at: cause.time.map(|time| time - context.zero_at()),
            is_async: cause.is_async_for(marker.start),
        });

    MarkerTooltip {
        title,
        duration,
        details,
        cause,
    }
}

fn thread_label(tid: u32, context: &ProfileContext) -> String {
    match context.thread_name(tid) {
        Some(name) => name.to_owned(),
        None => tid.to_string(),
    }
}

fn push_thread_details(
    details: &mut Vec<TooltipDetail>,
    marker: &Marker,
    context: &ProfileContext,
) {
    let recording = marker.thread_id;
    let occurring = marker
        .data
        .as_ref()
        .and_then(MarkerPayload::occurring_thread_id);
    match (recording, occurring) {
        (Some(recording), Some(occurring)) if recording != occurring => {
            details.push(TooltipDetail::new(
                "Recording Thread",
                thread_label(recording, context),
            ));
            details.push(TooltipDetail::new(
                "Occurring Thread",
                thread_label(occurring, context),
            ));
        }
        (Some(tid), _) | (None, Some(tid)) => {
            details.push(TooltipDetail::new("Thread", thread_label(tid, context)))
        }
        (None, None) => {}
    }
}

fn push_page_details(details: &mut Vec<TooltipDetail>, marker: &Marker, context: &ProfileContext) {
    let Some(page) = marker
        .data
        .as_ref()
        .and_then(MarkerPayload::inner_window_id)
        .and_then(|id| context.page(id))
    else {
        return;
    };
    let value = if page.is_private_browsing {
        format!("{} (private)", page.url)
    } else {
        page.url.clone()
    };
    details.push(TooltipDetail::new("Page URL", value));
}

fn push_schema_details(
    details: &mut Vec<TooltipDetail>,
    fields: &[MarkerSchemaField],
    data: &Map<String, Value>,
) {
    for field in fields {
        match field {
            MarkerSchemaField::Dynamic(field) => {
                if let Some(value) = data.get(&field.key) {
                    details.push(TooltipDetail::new(
                        field.display_label(),
                        format_field_value(&field.format, value),
                    ));
                }
            }
            MarkerSchemaField::Static(field) => {
                details.push(TooltipDetail::new(field.label.as_str(), field.value.as_str()));
            }
        }
    }
}

fn push_custom_details(
    details: &mut Vec<TooltipDetail>,
    marker: &Marker,
    payload: &MarkerPayload,
    context: &ProfileContext,
) {
    match payload {
        MarkerPayload::Tracing(tracing) => {
            if let Some(cause_time) = tracing.cause.and_then(|cause| cause.time) {
                details.push(TooltipDetail::new(
                    "Latency",
                    maybe_format_duration(Some(cause_time), Some(marker.start)),
                ));
            }
        }
        MarkerPayload::Network(network) => network::push_details(details, network, context),
        MarkerPayload::Ipc(ipc) => ipc::push_details(details, ipc),
        MarkerPayload::GcMinor(minor) => gc::push_minor_details(details, &minor.nursery),
        MarkerPayload::GcMajor(major) => gc::push_major_details(details, &major.timings),
        MarkerPayload::GcSlice(slice) => gc::push_slice_details(details, &slice.timings),
        MarkerPayload::Bailout(bailout) => {
            if let Some(description) = bailout_description(&bailout.bailout_type) {
                details.push(TooltipDetail::new("Description", description));
            }
        }
        MarkerPayload::Screenshot(screenshot) => details.push(TooltipDetail::new(
            "Window size",
            format!(
                "{}×{}",
                format_integer(screenshot.window_width),
                format_integer(screenshot.window_height)
            ),
        )),
        MarkerPayload::Text(_)
        | MarkerPayload::FileIo(_)
        | MarkerPayload::UserTiming(_)
        | MarkerPayload::PreferenceRead(_)
        | MarkerPayload::Style(_) => {}
    }
}
