use serde_json::{Map, Value};

use super::{MarkerPayload, PayloadKind};
use crate::error::MarkerError;

/// Classifies a raw payload and converts it into its normalized shape.
///
/// `captured_at` is the timestamp of the event carrying the payload. A legacy
/// `stack` field is turned into a `cause` captured at that time.
///
/// Legacy shapes are recognized structurally:
///
///  - `stack` (without `cause`) becomes `cause: { time, stack }`.
///  - `GCMajor` `timings.totals`, `GCSlice` `timings.times` and `GCMinor`
///    `nursery.times` are millisecond maps; they become `phase_times` in microseconds.
///  - `tracing` payloads lose their `interval` field, which is folded into the
///    event's phase instead (see [`RawMarkerEvent::resolved_phase`](crate::RawMarkerEvent::resolved_phase)).
///  - `IPC` payloads without a `phase` are endpoint events.
///
/// Normalizing the JSON of an already normalized payload returns the same payload.
pub fn normalize_payload(raw: &Value, captured_at: f64) -> Result<MarkerPayload, MarkerError> {
    let Value::Object(raw) = raw else {
        return Err(MarkerError::PayloadNotAnObject);
    };
    let type_name = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or(MarkerError::MissingPayloadKind)?;
    let kind = PayloadKind::from_type_name(type_name)
        .ok_or_else(|| MarkerError::UnrecognizedPayloadKind(type_name.to_owned()))?;

    let mut map = raw.clone();
    upgrade_stack_to_cause(&mut map, captured_at);
    match kind {
        PayloadKind::Tracing => {
            map.remove("interval");
        }
        PayloadKind::Ipc => {
            map.entry("phase")
                .or_insert_with(|| Value::from("endpoint"));
            map.entry("sync").or_insert(Value::Bool(false));
        }
        PayloadKind::GcMajor => upgrade_phase_times(map.get_mut("timings"), "totals"),
        PayloadKind::GcSlice => upgrade_phase_times(map.get_mut("timings"), "times"),
        PayloadKind::GcMinor => upgrade_phase_times(map.get_mut("nursery"), "times"),
        PayloadKind::Text
        | PayloadKind::Network
        | PayloadKind::FileIo
        | PayloadKind::Bailout
        | PayloadKind::UserTiming
        | PayloadKind::Screenshot
        | PayloadKind::PreferenceRead
        | PayloadKind::Style => {}
    }

    serde_json::from_value(Value::Object(map)).map_err(|source| MarkerError::MalformedPayload {
        kind: kind.type_name().to_owned(),
        source,
    })
}

fn upgrade_stack_to_cause(map: &mut Map<String, Value>, captured_at: f64) {
    let Some(stack) = map.remove("stack") else {
        return;
    };
    if map.contains_key("cause") || stack.is_null() {
        return;
    }
    let mut cause = Map::new();
    cause.insert("time".to_owned(), Value::from(captured_at));
    cause.insert("stack".to_owned(), stack);
    map.insert("cause".to_owned(), Value::Object(cause));
}

/// Replaces a legacy millisecond phase map with `phase_times` in microseconds.
fn upgrade_phase_times(container: Option<&mut Value>, legacy_key: &str) {
    let Some(Value::Object(container)) = container else {
        return;
    };
    let Some(legacy) = container.remove(legacy_key) else {
        return;
    };
    if container.contains_key("phase_times") {
        return;
    }
    let Value::Object(legacy) = legacy else {
        log::debug!("Ignoring non-object legacy GC phase times under {legacy_key:?}");
        return;
    };
    let phase_times: Map<String, Value> = legacy
        .into_iter()
        .filter_map(|(phase, ms)| match ms.as_f64() {
            Some(ms) => Some((phase, Value::from(ms * 1000.0))),
            None => {
                log::debug!("Dropping non-numeric time for GC phase {phase:?}");
                None
            }
        })
        .collect();
    container.insert("phase_times".to_owned(), Value::Object(phase_times));
}
