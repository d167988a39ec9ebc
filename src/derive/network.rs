use crate::fast_hash_map::FastHashMap;
use crate::marker::{Marker, RawMarkerEvent};
use crate::payload::{MarkerPayload, NetworkPayload, NetworkStatus};

#[derive(Debug)]
struct OpenLoad {
    marker_index: usize,
    /// The end of the `STATUS_START` event, i.e. when the channel was opened.
    opened_at: f64,
}

/// Merges the `STATUS_START` event of a network load with the event which ends it.
#[derive(Debug, Default)]
pub struct NetworkLoads {
    open: FastHashMap<u64, OpenLoad>,
}

impl NetworkLoads {
    pub fn push(
        &mut self,
        markers: &mut Vec<Marker>,
        event: &RawMarkerEvent,
        payload: NetworkPayload,
    ) {
        let id = payload.id;
        if !payload.status.closes_load() {
            let mut marker = Marker::from_event(event, None);
            marker.incomplete = true;
            marker.title = Some(load_title(&payload));
            marker.data = Some(MarkerPayload::Network(payload));
            let load = OpenLoad {
                marker_index: markers.len(),
                opened_at: event.end_or_start(),
            };
            if self.open.insert(id, load).is_some() {
                log::debug!("Network load {id} was started again before it ended");
            }
            markers.push(marker);
            return;
        }

        let Some(load) = self.open.remove(&id) else {
            let mut marker = Marker::from_event(event, None);
            marker.end = Some(event.end_or_start());
            marker.title = Some(load_title(&payload));
            marker.data = Some(MarkerPayload::Network(payload));
            markers.push(marker);
            return;
        };

        if load.opened_at != event.start {
            log::debug!(
                "Network load {id}: {} ended at {}, but {} started at {}",
                NetworkStatus::Start.as_str(),
                load.opened_at,
                payload.status.as_str(),
                event.start
            );
        }
        let marker = &mut markers[load.marker_index];
        let (start_time, start_cause) = match &marker.data {
            Some(MarkerPayload::Network(start)) => (start.start_time, start.cause),
            _ => (payload.start_time, None),
        };
        let merged = NetworkPayload {
            start_time,
            fetch_start: Some(event.start),
            cause: start_cause.or(payload.cause),
            ..payload
        };
        marker.end = Some(event.end_or_start());
        marker.incomplete = false;
        marker.title = Some(load_title(&merged));
        marker.data = Some(MarkerPayload::Network(merged));
    }
}

fn load_title(payload: &NetworkPayload) -> String {
    format!("Load {}: {}", payload.id, payload.uri)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::payload::{normalize_payload, StackIndex};

    fn network_event(status: &str, start: f64, end: f64) -> (RawMarkerEvent, NetworkPayload) {
        let event = RawMarkerEvent::interval("Load 5: https://example.com/", start, end).with_data(
            json!({
                "type": "Network",
                "id": 5,
                "URI": "https://example.com/",
                "status": status,
                "pri": 0,
                "startTime": start,
                "endTime": end,
            }),
        );
        let payload = match normalize_payload(event.data.as_ref().unwrap(), start).unwrap() {
            MarkerPayload::Network(payload) => payload,
            payload => panic!("unexpected payload {payload:?}"),
        };
        (event, payload)
    }

    #[test]
    fn start_and_stop_merge() {
        let mut loads = NetworkLoads::default();
        let mut markers = Vec::new();
        let (event, mut payload) = network_event("STATUS_START", 90.0, 100.0);
        payload.cause = Some(crate::payload::CauseBacktrace {
            tid: None,
            time: Some(89.0),
            stack: StackIndex(3),
        });
        loads.push(&mut markers, &event, payload);
        let (event, mut payload) = network_event("STATUS_STOP", 100.0, 130.0);
        payload.response_end = Some(129.0);
        loads.push(&mut markers, &event, payload);

        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!((marker.start, marker.end), (90.0, Some(130.0)));
        assert!(!marker.incomplete);
        assert_eq!(marker.title.as_deref(), Some("Load 5: https://example.com/"));
        let Some(MarkerPayload::Network(merged)) = &marker.data else {
            panic!("unexpected payload {:?}", marker.data);
        };
        assert_eq!(merged.status, NetworkStatus::Stop);
        assert_eq!(merged.start_time, 90.0);
        assert_eq!(merged.fetch_start, Some(100.0));
        assert_eq!(merged.response_end, Some(129.0));
        assert_eq!(merged.cause.map(|cause| cause.stack), Some(StackIndex(3)));
    }

    #[test]
    fn unmatched_loads() {
        let mut loads = NetworkLoads::default();
        let mut markers = Vec::new();
        let (event, payload) = network_event("STATUS_START", 90.0, 100.0);
        loads.push(&mut markers, &event, payload);
        assert!(markers[0].incomplete);
        assert_eq!(markers[0].end, None);

        let mut loads = NetworkLoads::default();
        let mut markers = Vec::new();
        let (event, payload) = network_event("STATUS_CANCEL", 100.0, 110.0);
        loads.push(&mut markers, &event, payload);
        assert!(!markers[0].incomplete);
        assert_eq!(markers[0].duration(), Some(10.0));
    }
}
