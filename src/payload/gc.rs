use serde_derive::{Deserialize, Serialize};

use super::PhaseTimes;

/// The nursery status of a minor GC that actually collected something.
pub const NURSERY_STATUS_COMPLETE: &str = "complete";
pub const NURSERY_STATUS_EMPTY: &str = "nursery empty";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcMinorPayload {
    pub nursery: MinorGcNursery,
}

/// Statistics of a nursery collection. Sizes are in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorGcNursery {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_before: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_tenured: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_tenured: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_allocated_nursery: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_allocated_tenured: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings_tenured: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cur_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy_capacity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_alloc_us: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_times: Option<PhaseTimes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcMajorPayload {
    pub timings: MajorGcTimings,
}

/// The summary of a major GC. Aborted collections carry no timing detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MajorGcTimings {
    Aborted,
    Completed(CompletedMajorGc),
}

/// Durations are in milliseconds, except for `phase_times`, which are in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedMajorGc {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonincremental_reason: Option<String>,
    pub max_pause: f64,
    pub total_time: f64,
    #[serde(default)]
    pub zones_collected: u32,
    #[serde(default)]
    pub total_zones: u32,
    #[serde(default)]
    pub total_compartments: u32,
    #[serde(default)]
    pub minor_gcs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_buffer_overflows: Option<u32>,
    /// The number of slices reported by the runtime.
    #[serde(default)]
    pub slices: u32,
    /// Minimum mutator utilization over 20ms windows, as a 0–1 fraction.
    #[serde(default)]
    pub mmu_20ms: f64,
    #[serde(default)]
    pub mmu_50ms: f64,
    #[serde(default)]
    pub allocated_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_chunks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_chunks: Option<u32>,
    pub major_gc_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_gc_number: Option<u64>,
    #[serde(default)]
    pub phase_times: PhaseTimes,
    /// The slices of this GC, ordered by slice index. Filled in by the derivation pass.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slices_list: Vec<GcSliceTimings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcSlicePayload {
    pub timings: GcSliceTimings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcSliceTimings {
    /// The index of this slice within its major GC.
    pub slice: u32,
    pub major_gc_number: u64,
    pub reason: String,
    /// The time budget, as reported, e.g. `10ms` or `unlimited`.
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub initial_state: String,
    #[serde(default)]
    pub final_state: String,
    #[serde(default)]
    pub page_faults: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_threshold: Option<u64>,
    #[serde(default)]
    pub phase_times: PhaseTimes,
}
