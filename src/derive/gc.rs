use crate::fast_hash_map::FastHashMap;
use crate::marker::Marker;
use crate::payload::{GcSliceTimings, MajorGcTimings, MarkerPayload};

/// GC numbers count up separately in each JS runtime, so slices are only
/// attached to a major GC recorded on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GcKey {
    thread_id: Option<u32>,
    major_gc_number: u64,
}

/// Collects GC slices by thread and major GC number.
#[derive(Debug, Default)]
pub struct GcSlices {
    by_major_gc: FastHashMap<GcKey, Vec<GcSliceTimings>>,
}

impl GcSlices {
    pub fn record(&mut self, thread_id: Option<u32>, slice: &GcSliceTimings) {
        let key = GcKey {
            thread_id,
            major_gc_number: slice.major_gc_number,
        };
        self.by_major_gc.entry(key).or_default().push(slice.clone());
    }

    /// Fills in the `slices_list` of every completed major GC marker, ordered by
    /// slice index. Slices may have arrived in any order.
    pub fn finish(mut self, markers: &mut [Marker]) {
        for slices in self.by_major_gc.values_mut() {
            slices.sort_by_key(|slice| slice.slice);
        }
        for marker in markers {
            let thread_id = marker.thread_id;
            let Some(MarkerPayload::GcMajor(major)) = &mut marker.data else {
                continue;
            };
            let MajorGcTimings::Completed(completed) = &mut major.timings else {
                continue;
            };
            let key = GcKey {
                thread_id,
                major_gc_number: completed.major_gc_number,
            };
            match self.by_major_gc.get(&key) {
                Some(slices) => completed.slices_list = slices.clone(),
                None => log::debug!(
                    "No slices were recorded for major GC {} on thread {thread_id:?}",
                    completed.major_gc_number
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::marker::RawMarkerEvent;
    use crate::payload::normalize_payload;

    fn slice(major_gc_number: u64, slice: u32) -> GcSliceTimings {
        serde_json::from_value(json!({
            "slice": slice,
            "major_gc_number": major_gc_number,
            "reason": "ALLOC_TRIGGER",
            "budget": "10ms",
        }))
        .unwrap()
    }

    fn major_gc(tid: Option<u32>, major_gc_number: u64) -> Marker {
        let payload = normalize_payload(
            &json!({
                "type": "GCMajor",
                "timings": {
                    "status": "completed",
                    "reason": "ALLOC_TRIGGER",
                    "max_pause": 3.0,
                    "total_time": 8.0,
                    "major_gc_number": major_gc_number,
                }
            }),
            0.0,
        )
        .unwrap();
        let event = RawMarkerEvent {
            thread_id: tid,
            ..RawMarkerEvent::interval("GCMajor", 1.0, 9.0)
        };
        Marker::from_event(&event, Some(payload))
    }

    fn slice_indexes(marker: &Marker) -> Vec<u32> {
        match &marker.data {
            Some(MarkerPayload::GcMajor(major)) => match &major.timings {
                MajorGcTimings::Completed(completed) => {
                    completed.slices_list.iter().map(|s| s.slice).collect()
                }
                MajorGcTimings::Aborted => Vec::new(),
            },
            data => panic!("unexpected payload {data:?}"),
        }
    }

    #[test]
    fn slices_are_ordered_by_index() {
        let mut gc = GcSlices::default();
        gc.record(None, &slice(7, 2));
        gc.record(None, &slice(8, 0));
        gc.record(None, &slice(7, 0));

        let mut markers = vec![major_gc(None, 7)];
        gc.finish(&mut markers);
        assert_eq!(slice_indexes(&markers[0]), [0, 2]);
    }

    #[test]
    fn slices_stay_on_their_thread() {
        let mut gc = GcSlices::default();
        gc.record(Some(1), &slice(7, 0));
        gc.record(Some(2), &slice(7, 1));

        let mut markers = vec![major_gc(Some(1), 7), major_gc(Some(3), 7)];
        gc.finish(&mut markers);
        assert_eq!(slice_indexes(&markers[0]), [0]);
        assert!(slice_indexes(&markers[1]).is_empty());
    }
}
