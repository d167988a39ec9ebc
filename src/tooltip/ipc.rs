use super::TooltipDetail;
use crate::format::maybe_format_duration;
use crate::payload::{IpcPayload, IpcSharedData};

/// The latency rows of an IPC message, in timeline order. Rows whose ends
/// weren't both observed say `unknown`.
pub(super) fn push_details(details: &mut Vec<TooltipDetail>, payload: &IpcPayload) {
    let empty = IpcSharedData::default();
    let shared = payload.shared.as_ref().unwrap_or(&empty);
    let durations = [
        (
            "IPC Send Thread Latency",
            shared.start_time,
            shared.send_start_time,
        ),
        (
            "IPC Send Duration",
            shared.send_start_time,
            shared.send_end_time,
        ),
        ("IPC Recv Latency", shared.send_end_time, shared.recv_end_time),
        (
            "IPC Recv Thread Latency",
            shared.recv_end_time,
            shared.end_time,
        ),
    ];
    for (label, start, end) in durations {
        details.push(TooltipDetail::new(label, maybe_format_duration(start, end)));
    }
    if let Some(name) = &shared.send_thread_name {
        details.push(TooltipDetail::new("Sending Thread", name.as_str()));
    }
    if let Some(name) = &shared.recv_thread_name {
        details.push(TooltipDetail::new("Receiving Thread", name.as_str()));
    }
}
