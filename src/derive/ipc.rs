use crate::context::ProfileContext;
use crate::fast_hash_map::FastHashMap;
use crate::marker::{Marker, RawMarkerEvent};
use crate::payload::{IpcDirection, IpcPayload, IpcPhaseSlot, IpcSharedData, MarkerPayload};

/// The processes at the two ends of a message.
///
/// Without the recording process id, only the other side is known, and the
/// sending and receiving halves of a message have different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IpcPeers {
    Other(u32),
    Pair { sender: u32, receiver: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IpcKey {
    peers: IpcPeers,
    message_type: String,
    message_seqno: u64,
}

impl IpcKey {
    fn new(event: &RawMarkerEvent, payload: &IpcPayload) -> Self {
        let peers = match (event.process_id, payload.direction) {
            (None, _) => IpcPeers::Other(payload.other_pid),
            (Some(pid), IpcDirection::Sending) => IpcPeers::Pair {
                sender: pid,
                receiver: payload.other_pid,
            },
            (Some(pid), IpcDirection::Receiving) => IpcPeers::Pair {
                sender: payload.other_pid,
                receiver: pid,
            },
        };
        Self {
            peers,
            message_type: payload.message_type.clone(),
            message_seqno: payload.message_seqno,
        }
    }
}

#[derive(Debug, Default)]
struct IpcMessage {
    shared: IpcSharedData,
    /// Indexes into the marker list of the endpoint markers of this message.
    endpoint_markers: Vec<usize>,
    /// The first transfer event, used if no endpoint event arrives.
    first_transfer: Option<Marker>,
}

/// Collects the phases of each IPC message.
///
/// Every endpoint event becomes a marker. Transfer events (on the I/O threads)
/// only contribute their timestamps. When the pass is done, each endpoint
/// marker receives the complete [`IpcSharedData`] of its message.
#[derive(Debug, Default)]
pub struct IpcMessages {
    keys: FastHashMap<IpcKey, usize>,
    messages: Vec<IpcMessage>,
}

impl IpcMessages {
    pub fn push(
        &mut self,
        markers: &mut Vec<Marker>,
        event: &RawMarkerEvent,
        mut payload: IpcPayload,
        context: &ProfileContext,
    ) {
        let Some(slot) = payload.phase_slot() else {
            log::debug!(
                "IPC message {:?} has a receiving transferStart phase, which doesn't exist",
                payload.message_type
            );
            markers.push(Marker::from_event(event, Some(MarkerPayload::Ipc(payload))));
            return;
        };

        let next_index = self.messages.len();
        let index = *self
            .keys
            .entry(IpcKey::new(event, &payload))
            .or_insert(next_index);
        if index == next_index {
            self.messages.push(IpcMessage::default());
        }
        let message = &mut self.messages[index];

        message.shared.record(slot, payload.start_time);
        if let Some(tid) = payload.thread_id.or(event.thread_id) {
            message
                .shared
                .record_thread(slot, tid, context.thread_name(tid));
        }
        payload.nice_direction = Some(payload.describe_direction());

        let mut marker = Marker::from_event(event, None);
        marker.data = Some(MarkerPayload::Ipc(payload));
        match slot {
            IpcPhaseSlot::SenderEndpoint | IpcPhaseSlot::ReceiverEndpoint => {
                message.endpoint_markers.push(markers.len());
                markers.push(marker);
            }
            IpcPhaseSlot::SenderTransferStart
            | IpcPhaseSlot::SenderTransferEnd
            | IpcPhaseSlot::ReceiverTransferEnd => {
                message.first_transfer.get_or_insert(marker);
            }
        }
    }

    /// Attaches the collected phase times to the endpoint markers, and adds an
    /// incomplete marker for each message which was only seen in transfer.
    pub fn finish(self, markers: &mut Vec<Marker>) {
        for message in self.messages {
            let IpcMessage {
                shared,
                endpoint_markers,
                first_transfer,
            } = message;
            if endpoint_markers.is_empty() {
                if let Some(mut marker) = first_transfer {
                    marker.start = shared.earliest_time().unwrap_or(marker.start);
                    marker.end = None;
                    marker.incomplete = true;
                    set_shared(&mut marker, &shared);
                    markers.push(marker);
                }
                continue;
            }
            for index in endpoint_markers {
                let marker = &mut markers[index];
                match (shared.start_time, shared.end_time) {
                    (Some(start), Some(end)) => {
                        marker.start = start;
                        marker.end = Some(end);
                        marker.incomplete = false;
                    }
                    _ => {
                        marker.end = None;
                        marker.incomplete = true;
                    }
                }
                set_shared(marker, &shared);
            }
        }
    }
}

fn set_shared(marker: &mut Marker, shared: &IpcSharedData) {
    if let Some(MarkerPayload::Ipc(payload)) = &mut marker.data {
        payload.shared = Some(shared.clone());
    }
}
