//! This crate turns the raw marker events of a Gecko profile into markers which
//! can be displayed in the [Firefox Profiler](https://profiler.firefox.com/), and
//! composes the tooltip for each marker.
//!
//! The pipeline has three steps:
//!
//!  1. [`derive_markers`] classifies each raw payload into a [`MarkerPayload`],
//!     converting older payload shapes on the way, and merges events which
//!     describe the same activity: interval start/end pairs, network loads,
//!     the phases of IPC messages, and GC slices.
//!  2. A [`MarkerSchemaRegistry`] says which payload fields are shown for each
//!     marker type, in which format.
//!  3. [`compose_tooltip`] turns a [`Marker`] into a title and an ordered list
//!     of label/value rows.
//!
//! ## Example
//!
//! ```
//! use fxprof_markers::{
//!     compose_tooltip, derive_markers, DeriveOptions, MarkerSchemaRegistry, ProfileContext,
//!     RawMarkerEvent,
//! };
//! use serde_json::json;
//!
//! let events = vec![
//!     RawMarkerEvent::interval("Load 5", 90.0, 100.0).with_data(json!({
//!         "type": "Network", "id": 5, "URI": "https://example.com/",
//!         "status": "STATUS_START", "startTime": 90.0, "endTime": 100.0
//!     })),
//!     RawMarkerEvent::interval("Load 5", 100.0, 130.0).with_data(json!({
//!         "type": "Network", "id": 5, "URI": "https://example.com/",
//!         "status": "STATUS_STOP", "startTime": 100.0, "endTime": 130.0
//!     })),
//! ];
//! let context = ProfileContext::new();
//! let derived = derive_markers(&events, &DeriveOptions::default(), &context).unwrap();
//! assert_eq!(derived.markers.len(), 1);
//!
//! let registry = MarkerSchemaRegistry::with_builtin_schemas();
//! let tooltip = compose_tooltip(&derived.markers[0], &registry, &context);
//! assert_eq!(tooltip.title, "Load 5: https://example.com/");
//! assert_eq!(tooltip.duration.as_deref(), Some("40ms"));
//! ```

mod builtin_schemas;
mod context;
mod derive;
mod error;
mod fast_hash_map;
pub mod format;
mod marker;
pub mod markers;
pub mod payload;
mod schema_registry;
mod tooltip;

pub use builtin_schemas::builtin_schemas;
pub use context::{PageInfo, ProfileContext};
pub use derive::{derive_markers, DeriveOptions, DerivedMarkers, MarkerDeriver, MarkerDiagnostic};
pub use error::MarkerError;
pub use marker::{Marker, MarkerPhase, RawMarkerEvent};
pub use markers::{
    LabelMaker, MarkerFieldFormat, MarkerLocations, MarkerNumberFieldFormat, MarkerSchema,
    MarkerSchemaField, MarkerStringFieldFormat,
};
pub use payload::{normalize_payload, CauseBacktrace, MarkerPayload, PayloadKind};
pub use schema_registry::MarkerSchemaRegistry;
pub use tooltip::{
    bailout_description, compose_tooltip, network_phases, priority_label, MarkerTooltip,
    NetworkPhase, TooltipCause, TooltipDetail, UNKNOWN_DURATION,
};
