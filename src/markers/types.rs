use bitflags::bitflags;

/// The kind of a marker field, i.e. which kind of JSON value it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerFieldKind {
    String,
    Number,
    /// A format this crate doesn't interpret.
    Other,
}

bitflags! {
    /// Locations in the profiler UI where markers can be displayed.
    #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Default)]
    pub struct MarkerLocations: u32 {
        /// Show the marker in the "marker chart" panel.
        const MARKER_CHART = 1 << 0;
        /// Show the marker in the marker table.
        const MARKER_TABLE = 1 << 1;
        /// This adds markers to the main marker timeline in the header.
        const TIMELINE_OVERVIEW = 1 << 2;
        /// In the timeline, this is a section that breaks out markers that are
        /// related to memory.
        const TIMELINE_MEMORY = 1 << 3;
        /// This adds markers to the IPC timeline area in the header.
        const TIMELINE_IPC = 1 << 4;
        /// This adds markers to the FileIO timeline area in the header.
        const TIMELINE_FILEIO = 1 << 5;
        /// Show the marker in the stack chart.
        const STACK_CHART = 1 << 6;
    }
}

impl MarkerLocations {
    /// The name of each location in the `display` list of a schema, in serialization order.
    pub(crate) const NAMES: [(MarkerLocations, &'static str); 7] = [
        (Self::MARKER_CHART, "marker-chart"),
        (Self::MARKER_TABLE, "marker-table"),
        (Self::TIMELINE_OVERVIEW, "timeline-overview"),
        (Self::TIMELINE_MEMORY, "timeline-memory"),
        (Self::TIMELINE_IPC, "timeline-ipc"),
        (Self::TIMELINE_FILEIO, "timeline-fileio"),
        (Self::STACK_CHART, "stack-chart"),
    ];

    pub fn from_location_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(location, _)| *location)
    }
}
