use crate::markers::{
    MarkerLocations, MarkerNumberFieldFormat as Number, MarkerSchema,
    MarkerStringFieldFormat as Str,
};

/// The schemas of the marker types which Gecko emits.
///
/// The GC schemas declare almost nothing; their details are custom tooltip rows.
pub fn builtin_schemas() -> Vec<MarkerSchema> {
    let chart_and_table = MarkerLocations::MARKER_CHART | MarkerLocations::MARKER_TABLE;
    let memory = chart_and_table | MarkerLocations::TIMELINE_MEMORY;

    vec![
        MarkerSchema::new(
            "tracing",
            chart_and_table | MarkerLocations::TIMELINE_OVERVIEW,
        )
        .with_field("category", "Type", Str::String),
        MarkerSchema::new("DOMEvent", chart_and_table | MarkerLocations::TIMELINE_OVERVIEW)
            .with_tooltip_label("{marker.data.eventType} - DOMEvent")
            .with_table_label("{marker.data.eventType}")
            .with_chart_label("{marker.data.eventType}")
            .with_searchable_field("eventType", "Type", Str::String),
        MarkerSchema::new("Text", chart_and_table)
            .with_table_label("{marker.name} - {marker.data.name}")
            .with_chart_label("{marker.data.name}")
            .with_searchable_field("name", "Details", Str::SanitizedString),
        MarkerSchema::new("UserTiming", chart_and_table)
            .with_tooltip_label("{marker.data.name}")
            .with_table_label("{marker.data.name}")
            .with_chart_label("{marker.data.name}")
            .with_searchable_field("name", "User Marker Name", Str::SanitizedString)
            .with_field("entryType", "Entry Type", Str::String)
            .with_description(
                "UserTiming is created using the DOM APIs performance.mark() and performance.measure().",
            ),
        MarkerSchema::new("Network", MarkerLocations::MARKER_TABLE)
            .with_table_label("{marker.data.URI}")
            .with_field("status", "Status", Str::String)
            .with_searchable_field("URI", "URL", Str::Url)
            .with_field("RedirectURI", "Redirect URL", Str::Url)
            .with_field("requestStatus", "Request status", Str::String)
            .with_field("responseStatus", "Response status code", Number::Integer)
            .with_field("contentType", "MIME type", Str::String)
            .with_field("count", "Requested bytes", Number::Bytes)
            .with_field("httpVersion", "HTTP version", Str::String)
            .with_field("classOfService", "Class of service", Str::String),
        MarkerSchema::new("IPC", chart_and_table | MarkerLocations::TIMELINE_IPC)
            .with_tooltip_label("IPC {marker.data.niceDirection}")
            .with_table_label("{marker.name} {marker.data.niceDirection}")
            .with_chart_label("{marker.data.messageType}")
            .with_searchable_field("messageType", "Type", Str::String)
            .with_field("sync", "Sync", Str::String)
            .with_field("messageSeqno", "Seqno", Number::Integer)
            .with_field("otherPid", "Other Pid", Number::Integer)
            .with_field("niceDirection", "Direction", Str::String),
        MarkerSchema::new("FileIO", chart_and_table | MarkerLocations::TIMELINE_FILEIO)
            .with_tooltip_label("{marker.data.operation} {marker.data.source}")
            .with_table_label("({marker.data.source}) {marker.data.operation}")
            .with_chart_label("{marker.data.operation}")
            .with_field("operation", "Operation", Str::String)
            .with_field("source", "Source", Str::String)
            .with_searchable_field("filename", "Filename", Str::FilePath),
        MarkerSchema::new("Bailout", chart_and_table)
            .with_tooltip_label("Bailout: {marker.data.bailoutType}")
            .with_field("bailoutType", "Type", Str::String)
            .with_field("where", "Where", Str::String)
            .with_field("script", "Script", Str::Url)
            .with_field("functionLine", "Function line", Number::Integer)
            .with_field("bailoutLine", "Bailout line", Number::Integer),
        MarkerSchema::new("GCMinor", memory),
        MarkerSchema::new("GCMajor", memory),
        MarkerSchema::new("GCSlice", memory),
        MarkerSchema::new("CompositorScreenshot", MarkerLocations::empty())
            .with_field("windowID", "Window ID", Str::String),
        MarkerSchema::new("PreferenceRead", chart_and_table)
            .with_tooltip_label("{marker.data.prefName}")
            .with_table_label("{marker.data.prefName}: {marker.data.prefValue}")
            .with_field("prefAccessTime", "Time", Number::Time)
            .with_searchable_field("prefName", "Name", Str::String)
            .with_field("prefKind", "Kind", Str::String)
            .with_field("prefType", "Type", Str::String)
            .with_field("prefValue", "Value", Str::SanitizedString),
        MarkerSchema::new("Styles", chart_and_table)
            .with_field("elementsTraversed", "Elements traversed", Number::Integer)
            .with_field("elementsStyled", "Elements styled", Number::Integer)
            .with_field("elementsMatched", "Elements matched", Number::Integer)
            .with_field("stylesShared", "Styles shared", Number::Integer)
            .with_field("stylesReused", "Styles reused", Number::Integer),
    ]
}
