use crate::fast_hash_map::FastHashMap;
use crate::marker::{Marker, MarkerPhase, RawMarkerEvent};
use crate::payload::{MarkerPayload, PayloadKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IntervalKey {
    thread_id: Option<u32>,
    name: String,
    kind: Option<PayloadKind>,
}

impl IntervalKey {
    fn new(event: &RawMarkerEvent, payload: Option<&MarkerPayload>) -> Self {
        Self {
            thread_id: event.thread_id,
            name: event.name.clone(),
            kind: payload.map(MarkerPayload::kind),
        }
    }
}

/// Pairs `IntervalStart` and `IntervalEnd` events. Nested intervals with the same
/// key are closed innermost first.
#[derive(Debug, Default)]
pub struct IntervalPairing {
    /// Indexes into the marker list of the started but not yet ended markers.
    open: FastHashMap<IntervalKey, Vec<usize>>,
}

impl IntervalPairing {
    pub fn push(
        &mut self,
        markers: &mut Vec<Marker>,
        event: &RawMarkerEvent,
        payload: Option<MarkerPayload>,
    ) {
        match event.resolved_phase() {
            MarkerPhase::Instant => markers.push(Marker::from_event(event, payload)),
            MarkerPhase::Interval => {
                let mut marker = Marker::from_event(event, payload);
                marker.end = Some(event.end_or_start());
                markers.push(marker);
            }
            MarkerPhase::IntervalStart => {
                let key = IntervalKey::new(event, payload.as_ref());
                let mut marker = Marker::from_event(event, payload);
                marker.incomplete = true;
                self.open.entry(key).or_default().push(markers.len());
                markers.push(marker);
            }
            MarkerPhase::IntervalEnd => {
                let end = event.end_or_start();
                match self.pop_open(IntervalKey::new(event, payload.as_ref())) {
                    Some(index) => {
                        let marker = &mut markers[index];
                        marker.end = Some(end);
                        marker.incomplete = false;
                        if marker.data.is_none() {
                            marker.data = payload;
                        }
                    }
                    None => {
                        log::debug!(
                            "IntervalEnd marker {:?} at {end} has no matching IntervalStart",
                            event.name
                        );
                        let mut marker = Marker::from_event(event, payload);
                        marker.start = end;
                        marker.end = Some(end);
                        marker.incomplete = true;
                        markers.push(marker);
                    }
                }
            }
        }
    }

    /// Finds the innermost open interval for an end event. An end event with a
    /// payload also closes a start event which had none.
    fn pop_open(&mut self, key: IntervalKey) -> Option<usize> {
        if let Some(index) = self.open.get_mut(&key).and_then(Vec::pop) {
            return Some(index);
        }
        if key.kind.is_none() {
            return None;
        }
        let key = IntervalKey { kind: None, ..key };
        self.open.get_mut(&key).and_then(Vec::pop)
    }
}
