use serde_derive::Serialize;

use super::TooltipDetail;
use crate::context::ProfileContext;
use crate::format::format_milliseconds;
use crate::payload::NetworkPayload;

/// One segment of a network load's timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPhase {
    pub label: &'static str,
    /// Relative to the profile's zero time, in milliseconds.
    pub start: f64,
    pub duration: f64,
}

/// The phases of a load, in timeline order. A phase is left out if either of its
/// boundaries wasn't recorded, or if its end precedes its start.
pub fn network_phases(payload: &NetworkPayload, zero_at: f64) -> Vec<NetworkPhase> {
    let boundaries: [(&'static str, Option<f64>, Option<f64>); 10] = [
        (
            "Waiting for socket thread",
            Some(payload.start_time),
            payload.domain_lookup_start,
        ),
        (
            "DNS request",
            payload.domain_lookup_start,
            payload.domain_lookup_end,
        ),
        (
            "After DNS request",
            payload.domain_lookup_end,
            payload.connect_start,
        ),
        (
            "TCP connection",
            payload.connect_start,
            payload.tcp_connect_end,
        ),
        (
            "After TCP connection",
            payload.tcp_connect_end,
            payload.secure_connection_start,
        ),
        (
            "Establishing TLS session",
            payload.secure_connection_start,
            payload.connect_end,
        ),
        (
            "Waiting for HTTP request",
            payload.connect_end,
            payload.request_start,
        ),
        (
            "HTTP request and waiting for response",
            payload.request_start,
            payload.response_start,
        ),
        ("HTTP response", payload.response_start, payload.response_end),
        (
            "Waiting to transmit the response",
            payload.response_end,
            Some(payload.end_time),
        ),
    ];
    boundaries
        .into_iter()
        .filter_map(|(label, start, end)| match (start, end) {
            (Some(start), Some(end)) if end >= start => Some(NetworkPhase {
                label,
                start: start - zero_at,
                duration: end - start,
            }),
            _ => None,
        })
        .collect()
}

/// Gecko request priorities are centered on 0; lower is more urgent.
pub fn priority_label(priority: i32) -> String {
    let label = match priority {
        i32::MIN..=-20 => "Highest",
        -19..=-1 => "High",
        0 => "Normal",
        1..=10 => "Low",
        _ => "Lowest",
    };
    format!("{label} ({priority})")
}

pub(super) fn push_details(
    details: &mut Vec<TooltipDetail>,
    payload: &NetworkPayload,
    context: &ProfileContext,
) {
    details.push(TooltipDetail::new("Priority", priority_label(payload.pri)));
    if !payload.status.closes_load() {
        return;
    }
    for phase in network_phases(payload, context.zero_at()) {
        details.push(TooltipDetail::new(
            phase.label,
            format_milliseconds(phase.duration),
        ));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload() -> NetworkPayload {
        serde_json::from_value(json!({
            "id": 1,
            "URI": "https://example.com/",
            "status": "STATUS_STOP",
            "startTime": 100.0,
            "endTime": 160.0,
            "domainLookupStart": 102.0,
            "domainLookupEnd": 110.0,
            "requestStart": 120.0,
            "responseStart": 150.0,
            "responseEnd": 158.0
        }))
        .unwrap()
    }

    #[test]
    fn phases_skip_missing_boundaries() {
        let phases = network_phases(&payload(), 100.0);
        let labels: Vec<&str> = phases.iter().map(|phase| phase.label).collect();
        assert_eq!(
            labels,
            [
                "Waiting for socket thread",
                "DNS request",
                "HTTP request and waiting for response",
                "HTTP response",
                "Waiting to transmit the response"
            ]
        );
        assert_eq!(phases[1].start, 2.0);
        assert_eq!(phases[1].duration, 8.0);
    }

    #[test]
    fn priorities() {
        assert_eq!(priority_label(-20), "Highest (-20)");
        assert_eq!(priority_label(-10), "High (-10)");
        assert_eq!(priority_label(0), "Normal (0)");
        assert_eq!(priority_label(10), "Low (10)");
        assert_eq!(priority_label(20), "Lowest (20)");
    }
}
