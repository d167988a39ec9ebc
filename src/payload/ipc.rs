use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpcSide {
    Parent,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpcDirection {
    Sending,
    Receiving,
}

/// Which step of a message's journey an IPC event reports.
///
/// Profiles recorded before phases existed have only endpoint events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IpcPhase {
    Endpoint,
    TransferStart,
    TransferEnd,
}

/// One of the five points in time at which a message is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpcPhaseSlot {
    /// The sending thread hands the message to IPC.
    SenderEndpoint,
    /// The I/O thread starts writing the message.
    SenderTransferStart,
    /// The I/O thread finishes writing the message.
    SenderTransferEnd,
    /// The receiving side's I/O thread has read the message.
    ReceiverTransferEnd,
    /// The receiving thread starts handling the message.
    ReceiverEndpoint,
}

impl IpcPhaseSlot {
    pub fn new(direction: IpcDirection, phase: IpcPhase) -> Option<Self> {
        match (direction, phase) {
            (IpcDirection::Sending, IpcPhase::Endpoint) => Some(Self::SenderEndpoint),
            (IpcDirection::Sending, IpcPhase::TransferStart) => Some(Self::SenderTransferStart),
            (IpcDirection::Sending, IpcPhase::TransferEnd) => Some(Self::SenderTransferEnd),
            (IpcDirection::Receiving, IpcPhase::TransferEnd) => Some(Self::ReceiverTransferEnd),
            (IpcDirection::Receiving, IpcPhase::Endpoint) => Some(Self::ReceiverEndpoint),
            (IpcDirection::Receiving, IpcPhase::TransferStart) => None,
        }
    }
}

/// An IPC message event.
///
/// `shared` and `nice_direction` are filled in by the derivation pass; the remaining
/// fields come from the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcPayload {
    pub start_time: f64,
    pub end_time: f64,
    pub other_pid: u32,
    pub message_type: String,
    pub message_seqno: u64,
    pub side: IpcSide,
    pub direction: IpcDirection,
    pub phase: IpcPhase,
    pub sync: bool,
    /// The thread on which this phase happened, e.g. the I/O thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice_direction: Option<String>,
    #[serde(
        default,
        rename = "sharedData",
        skip_serializing_if = "Option::is_none"
    )]
    pub shared: Option<IpcSharedData>,
}

impl IpcPayload {
    pub fn phase_slot(&self) -> Option<IpcPhaseSlot> {
        IpcPhaseSlot::new(self.direction, self.phase)
    }

    /// `sent to 1234` or `received from 1234`.
    pub fn describe_direction(&self) -> String {
        match self.direction {
            IpcDirection::Sending => format!("sent to {}", self.other_pid),
            IpcDirection::Receiving => format!("received from {}", self.other_pid),
        }
    }
}

/// Everything observed so far about one IPC message, across all of its phase events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcSharedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv_end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_tid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv_tid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_thread_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv_thread_name: Option<String>,
}

impl IpcSharedData {
    /// Records the time of one phase. A field that is already set is kept, so
    /// repeated reports of the same phase don't move it.
    pub fn record(&mut self, slot: IpcPhaseSlot, time: f64) {
        let field = match slot {
            IpcPhaseSlot::SenderEndpoint => &mut self.start_time,
            IpcPhaseSlot::SenderTransferStart => &mut self.send_start_time,
            IpcPhaseSlot::SenderTransferEnd => &mut self.send_end_time,
            IpcPhaseSlot::ReceiverTransferEnd => &mut self.recv_end_time,
            IpcPhaseSlot::ReceiverEndpoint => &mut self.end_time,
        };
        field.get_or_insert(time);
    }

    /// Records the thread of an endpoint phase.
    pub fn record_thread(&mut self, slot: IpcPhaseSlot, tid: u32, name: Option<&str>) {
        let (tid_field, name_field) = match slot {
            IpcPhaseSlot::SenderEndpoint => (&mut self.send_tid, &mut self.send_thread_name),
            IpcPhaseSlot::ReceiverEndpoint => (&mut self.recv_tid, &mut self.recv_thread_name),
            _ => return,
        };
        if tid_field.is_none() {
            *tid_field = Some(tid);
            *name_field = name.map(ToOwned::to_owned);
        }
    }

    pub fn earliest_time(&self) -> Option<f64> {
        [
            self.start_time,
            self.send_start_time,
            self.send_end_time,
            self.recv_end_time,
            self.end_time,
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_phases_are_never_overwritten() {
        let mut shared = IpcSharedData::default();
        shared.record(IpcPhaseSlot::SenderTransferStart, 10.0);
        shared.record(IpcPhaseSlot::SenderTransferStart, 12.0);
        shared.record(IpcPhaseSlot::SenderTransferEnd, 15.0);
        assert_eq!(shared.send_start_time, Some(10.0));
        assert_eq!(shared.send_end_time, Some(15.0));
        assert_eq!(shared.start_time, None);
        assert_eq!(shared.earliest_time(), Some(10.0));
    }

    #[test]
    fn threads_come_from_endpoints_only() {
        let mut shared = IpcSharedData::default();
        shared.record_thread(IpcPhaseSlot::SenderTransferStart, 7, Some("IPC I/O Parent"));
        assert_eq!(shared.send_tid, None);
        shared.record_thread(IpcPhaseSlot::SenderEndpoint, 1, Some("GeckoMain"));
        shared.record_thread(IpcPhaseSlot::ReceiverEndpoint, 2, None);
        assert_eq!(shared.send_tid, Some(1));
        assert_eq!(shared.send_thread_name.as_deref(), Some("GeckoMain"));
        assert_eq!(shared.recv_tid, Some(2));
        assert_eq!(shared.recv_thread_name, None);
    }

    #[test]
    fn receiving_transfer_start_has_no_slot() {
        assert_eq!(
            IpcPhaseSlot::new(IpcDirection::Receiving, IpcPhase::TransferStart),
            None
        );
        assert_eq!(
            IpcPhaseSlot::new(IpcDirection::Sending, IpcPhase::TransferEnd),
            Some(IpcPhaseSlot::SenderTransferEnd)
        );
    }
}
