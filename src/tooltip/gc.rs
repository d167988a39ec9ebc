use super::TooltipDetail;
use crate::format::{format_bytes, format_integer, format_milliseconds, format_percent};
use crate::payload::{
    GcSliceTimings, MajorGcTimings, MinorGcNursery, PhaseTimes, NURSERY_STATUS_COMPLETE,
    NURSERY_STATUS_EMPTY,
};

pub(super) fn push_minor_details(details: &mut Vec<TooltipDetail>, nursery: &MinorGcNursery) {
    match nursery.status.as_str() {
        NURSERY_STATUS_COMPLETE => {}
        NURSERY_STATUS_EMPTY => {
            details.push(TooltipDetail::new("Status", "Nursery empty"));
            return;
        }
        status => {
            details.push(TooltipDetail::new("Status", status));
            return;
        }
    }

    if let Some(reason) = &nursery.reason {
        details.push(TooltipDetail::new("Reason", reason.as_str()));
    }
    if let (Some(tenured), Some(before)) = (nursery.bytes_tenured, nursery.bytes_before) {
        let rate = if before == 0 {
            String::new()
        } else {
            format!(" ({})", format_percent(tenured as f64 / before as f64))
        };
        details.push(TooltipDetail::new(
            "Bytes tenured",
            format!("{}{rate}", format_bytes(tenured as f64)),
        ));
    }
    let counts = [
        ("Cells tenured", nursery.cells_tenured),
        ("Strings tenured", nursery.strings_tenured),
        ("Cells allocated in nursery", nursery.cells_allocated_nursery),
        ("Cells allocated tenured", nursery.cells_allocated_tenured),
    ];
    for (label, count) in counts {
        if let Some(count) = count {
            details.push(TooltipDetail::new(label, format_integer(count as f64)));
        }
    }
    match (nursery.cur_capacity, nursery.new_capacity) {
        (Some(current), Some(new)) if current != new => details.push(TooltipDetail::new(
            "Nursery size",
            format!("{} → {}", format_bytes(current as f64), format_bytes(new as f64)),
        )),
        (Some(current), _) => {
            details.push(TooltipDetail::new("Nursery size", format_bytes(current as f64)))
        }
        (None, _) => {}
    }
    if let Some(lazy) = nursery.lazy_capacity {
        details.push(TooltipDetail::new(
            "Nursery capacity used",
            format_bytes(lazy as f64),
        ));
    }
    if let Some(chunk_alloc_us) = nursery.chunk_alloc_us {
        details.push(TooltipDetail::new(
            "Chunk allocation time",
            format_milliseconds(chunk_alloc_us / 1000.0),
        ));
    }
    if let Some(phase_times) = &nursery.phase_times {
        push_phase_times(details, phase_times);
    }
}

pub(super) fn push_major_details(details: &mut Vec<TooltipDetail>, timings: &MajorGcTimings) {
    let gc = match timings {
        MajorGcTimings::Aborted => {
            details.push(TooltipDetail::new("Status", "Aborted (OOM)"));
            return;
        }
        MajorGcTimings::Completed(gc) => gc,
    };

    details.push(TooltipDetail::new("Reason", gc.reason.as_str()));
    if let Some(reason) = &gc.nonincremental_reason {
        details.push(TooltipDetail::new("Non-incremental reason", reason.as_str()));
    }
    details.push(TooltipDetail::new(
        "Total slice times",
        format_milliseconds(gc.total_time),
    ));
    details.push(TooltipDetail::new(
        "Max pause",
        format_milliseconds(gc.max_pause),
    ));
    details.push(TooltipDetail::new(
        "Heap size (allocated)",
        format_bytes(gc.allocated_bytes as f64),
    ));
    details.push(TooltipDetail::new("MMU 20ms", format_percent(gc.mmu_20ms)));
    details.push(TooltipDetail::new("MMU 50ms", format_percent(gc.mmu_50ms)));
    details.push(TooltipDetail::new(
        "Minor GCs",
        format_integer(gc.minor_gcs as f64),
    ));
    let slices = if gc.slices_list.is_empty() {
        format_integer(gc.slices as f64)
    } else {
        format!(
            "{} (recorded {})",
            format_integer(gc.slices as f64),
            format_integer(gc.slices_list.len() as f64)
        )
    };
    details.push(TooltipDetail::new("Slices", slices));
    details.push(TooltipDetail::new(
        "Zones",
        format!(
            "{} / {}",
            format_integer(gc.zones_collected as f64),
            format_integer(gc.total_zones as f64)
        ),
    ));
    details.push(TooltipDetail::new(
        "Compartments",
        format_integer(gc.total_compartments as f64),
    ));
    let counts = [
        ("Store buffer overflows", gc.store_buffer_overflows),
        ("Chunks added", gc.added_chunks),
        ("Chunks removed", gc.removed_chunks),
    ];
    for (label, count) in counts {
        if let Some(count) = count {
            details.push(TooltipDetail::new(label, format_integer(count as f64)));
        }
    }
    push_phase_times(details, &gc.phase_times);
}

pub(super) fn push_slice_details(details: &mut Vec<TooltipDetail>, timings: &GcSliceTimings) {
    details.push(TooltipDetail::new("Reason", timings.reason.as_str()));
    if !timings.budget.is_empty() {
        details.push(TooltipDetail::new("Budget", timings.budget.as_str()));
    }
    if !timings.initial_state.is_empty() || !timings.final_state.is_empty() {
        details.push(TooltipDetail::new(
            "States",
            format!("{} → {}", timings.initial_state, timings.final_state),
        ));
    }
    details.push(TooltipDetail::new(
        "Page faults",
        format_integer(timings.page_faults as f64),
    ));
    if let (Some(amount), Some(threshold)) = (timings.trigger_amount, timings.trigger_threshold) {
        details.push(TooltipDetail::new(
            "Trigger (amount / threshold)",
            format!(
                "{} / {}",
                format_bytes(amount as f64),
                format_bytes(threshold as f64)
            ),
        ));
    }
    push_phase_times(details, &timings.phase_times);
}

/// Phase times are in microseconds.
fn push_phase_times(details: &mut Vec<TooltipDetail>, phase_times: &PhaseTimes) {
    for (phase, us) in phase_times {
        details.push(TooltipDetail::new(
            phase.as_str(),
            format_milliseconds(us / 1000.0),
        ));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn minor_gc_statuses() {
        let mut details = Vec::new();
        let empty: MinorGcNursery =
            serde_json::from_value(json!({ "status": "nursery empty" })).unwrap();
        push_minor_details(&mut details, &empty);
        assert_eq!(details, [TooltipDetail::new("Status", "Nursery empty")]);

        let mut details = Vec::new();
        let complete: MinorGcNursery = serde_json::from_value(json!({
            "status": "complete",
            "reason": "FULL_CELL_PTR_OBJ_BUFFER",
            "bytes_before": 4096,
            "bytes_tenured": 1024,
            "cur_capacity": 1048576,
            "new_capacity": 2097152,
            "phase_times": { "TraceValues": 1500.0 }
        }))
        .unwrap();
        push_minor_details(&mut details, &complete);
        assert_eq!(
            details,
            [
                TooltipDetail::new("Reason", "FULL_CELL_PTR_OBJ_BUFFER"),
                TooltipDetail::new("Bytes tenured", "1KB (25%)"),
                TooltipDetail::new("Nursery size", "1MB → 2MB"),
                TooltipDetail::new("TraceValues", "1.5ms"),
            ]
        );
    }

    #[test]
    fn aborted_major_gc() {
        let mut details = Vec::new();
        push_major_details(&mut details, &MajorGcTimings::Aborted);
        assert_eq!(details, [TooltipDetail::new("Status", "Aborted (OOM)")]);
    }

    #[test]
    fn slice_rows() {
        let mut details = Vec::new();
        let timings: GcSliceTimings = serde_json::from_value(json!({
            "slice": 0,
            "major_gc_number": 7,
            "reason": "CC_WAITING",
            "budget": "10ms",
            "initial_state": "NotActive",
            "final_state": "Mark",
            "page_faults": 2,
            "phase_times": { "Mark": 250.0 }
        }))
        .unwrap();
        push_slice_details(&mut details, &timings);
        assert_eq!(
            details,
            [
                TooltipDetail::new("Reason", "CC_WAITING"),
                TooltipDetail::new("Budget", "10ms"),
                TooltipDetail::new("States", "NotActive → Mark"),
                TooltipDetail::new("Page faults", "2"),
                TooltipDetail::new("Mark", "0.25ms"),
            ]
        );
    }
}
