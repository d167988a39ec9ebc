use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::MarkerPayload;

// From https://searchfox.org/mozilla-central/rev/0e7394a77cdbe1df5e04a1d4171d6da67b57fa17/mozglue/baseprofiler/public/BaseProfilerMarkersPrerequisites.h#355-360
const PHASE_INSTANT: u8 = 0;
const PHASE_INTERVAL: u8 = 1;
const PHASE_INTERVAL_START: u8 = 2;
const PHASE_INTERVAL_END: u8 = 3;

/// The phase of a raw marker event, i.e. which timestamps it carries.
///
/// In the profile JSON this is the numeric `phase` column of the raw marker table.
/// The names `instant`, `interval`, `intervalStart` and `intervalEnd` are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PhaseRepr", into = "u8")]
pub enum MarkerPhase {
    /// A single point in time.
    Instant,
    /// A complete interval with a start and an end timestamp.
    Interval,
    /// The start of an interval. Paired with an `IntervalEnd` event of the same name.
    IntervalStart,
    /// The end of an interval. Paired with an earlier `IntervalStart` event of the same name.
    IntervalEnd,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhaseRepr {
    Number(u8),
    Name(String),
}

impl TryFrom<PhaseRepr> for MarkerPhase {
    type Error = String;

    fn try_from(repr: PhaseRepr) -> Result<Self, Self::Error> {
        match repr {
            PhaseRepr::Number(PHASE_INSTANT) => Ok(Self::Instant),
            PhaseRepr::Number(PHASE_INTERVAL) => Ok(Self::Interval),
            PhaseRepr::Number(PHASE_INTERVAL_START) => Ok(Self::IntervalStart),
            PhaseRepr::Number(PHASE_INTERVAL_END) => Ok(Self::IntervalEnd),
            PhaseRepr::Number(n) => Err(format!("unexpected marker phase {n}")),
            PhaseRepr::Name(name) => match name.as_str() {
                "instant" => Ok(Self::Instant),
                "interval" => Ok(Self::Interval),
                "intervalStart" => Ok(Self::IntervalStart),
                "intervalEnd" => Ok(Self::IntervalEnd),
                _ => Err(format!("unexpected marker phase {name:?}")),
            },
        }
    }
}

impl From<MarkerPhase> for u8 {
    fn from(phase: MarkerPhase) -> Self {
        match phase {
            MarkerPhase::Instant => PHASE_INSTANT,
            MarkerPhase::Interval => PHASE_INTERVAL,
            MarkerPhase::IntervalStart => PHASE_INTERVAL_START,
            MarkerPhase::IntervalEnd => PHASE_INTERVAL_END,
        }
    }
}

/// A marker event as emitted by the instrumented runtime, before correlation.
///
/// Timestamps are float milliseconds relative to the profile's reference time.
/// The payload in `data` is loosely typed; it is classified and normalized into a
/// [`MarkerPayload`] by the derivation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarkerEvent {
    pub name: String,
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<MarkerPhase>,
    #[serde(default)]
    pub category: u32,
    /// The thread which recorded this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    /// The process which recorded this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RawMarkerEvent {
    pub fn instant(name: &str, time: f64) -> Self {
        Self {
            name: name.to_owned(),
            start: time,
            end: None,
            phase: Some(MarkerPhase::Instant),
            category: 0,
            thread_id: None,
            process_id: None,
            data: None,
        }
    }

    pub fn interval(name: &str, start: f64, end: f64) -> Self {
        Self {
            end: Some(end),
            phase: Some(MarkerPhase::Interval),
            ..Self::instant(name, start)
        }
    }

    pub fn with_phase(mut self, phase: MarkerPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn on_thread(mut self, tid: u32) -> Self {
        self.thread_id = Some(tid);
        self
    }

    pub fn in_process(mut self, pid: u32) -> Self {
        self.process_id = Some(pid);
        self
    }

    /// The phase of this event.
    ///
    /// If no phase was recorded, legacy tracing payloads decide via their
    /// `interval: "start" | "end"` field; otherwise an event with an end timestamp
    /// is an interval and an event without one is an instant.
    pub fn resolved_phase(&self) -> MarkerPhase {
        if let Some(phase) = self.phase {
            return phase;
        }
        let legacy_interval = self
            .data
            .as_ref()
            .and_then(|data| data.get("interval"))
            .and_then(Value::as_str);
        match (legacy_interval, self.end) {
            (Some("start"), _) => MarkerPhase::IntervalStart,
            (Some("end"), _) => MarkerPhase::IntervalEnd,
            (_, Some(_)) => MarkerPhase::Interval,
            (_, None) => MarkerPhase::Instant,
        }
    }

    /// The end time for `Interval` and `IntervalEnd` events. Events which only
    /// carry one timestamp have it in `start`.
    pub fn end_or_start(&self) -> f64 {
        self.end.unwrap_or(self.start)
    }
}

/// A normalized marker, produced by the derivation pass.
///
/// `end` is `None` both for instant markers and for intervals whose end was never
/// observed; the latter have `incomplete` set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub name: String,
    pub start: f64,
    pub end: Option<f64>,
    pub incomplete: bool,
    pub category: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    /// A title computed during derivation, e.g. `Load 12: https://example.com/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data: Option<MarkerPayload>,
}

impl Marker {
    pub(crate) fn from_event(event: &RawMarkerEvent, data: Option<MarkerPayload>) -> Self {
        Self {
            name: event.name.clone(),
            start: event.start,
            end: None,
            incomplete: false,
            category: event.category,
            thread_id: event.thread_id,
            title: None,
            data,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.end.is_none() && !self.incomplete
    }

    /// The marker's duration in milliseconds, or `None` for instant and incomplete markers.
    pub fn duration(&self) -> Option<f64> {
        match (self.incomplete, self.end) {
            (false, Some(end)) => Some(end - self.start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn phase_accepts_numbers_and_names() {
        let event: RawMarkerEvent =
            serde_json::from_value(json!({ "name": "A", "start": 1.0, "phase": 2 })).unwrap();
        assert_eq!(event.phase, Some(MarkerPhase::IntervalStart));
        let event: RawMarkerEvent =
            serde_json::from_value(json!({ "name": "A", "start": 1.0, "phase": "intervalEnd" }))
                .unwrap();
        assert_eq!(event.phase, Some(MarkerPhase::IntervalEnd));
        assert!(serde_json::from_value::<RawMarkerEvent>(
            json!({ "name": "A", "start": 1.0, "phase": 7 })
        )
        .is_err());
    }

    #[test]
    fn phase_inference() {
        assert_eq!(
            RawMarkerEvent::interval("A", 1.0, 2.0).resolved_phase(),
            MarkerPhase::Interval
        );
        let mut event = RawMarkerEvent::instant("A", 1.0);
        event.phase = None;
        assert_eq!(event.resolved_phase(), MarkerPhase::Instant);
        event.end = Some(3.0);
        assert_eq!(event.resolved_phase(), MarkerPhase::Interval);
        event.data = Some(json!({ "type": "tracing", "category": "Paint", "interval": "end" }));
        assert_eq!(event.resolved_phase(), MarkerPhase::IntervalEnd);
    }

    #[test]
    fn incomplete_markers_have_no_duration() {
        let event = RawMarkerEvent::instant("A", 5.0);
        let mut marker = Marker::from_event(&event, None);
        assert!(marker.is_instant());
        assert_eq!(marker.duration(), None);
        marker.incomplete = true;
        assert!(!marker.is_instant());
        assert_eq!(marker.duration(), None);
        marker.incomplete = false;
        marker.end = Some(7.5);
        assert_eq!(marker.duration(), Some(2.5));
    }
}
