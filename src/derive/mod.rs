//! Turns raw marker events into [`Marker`]s.
//!
//! Events are processed in a single pass, ordered by start time. Events which
//! describe the same activity are merged:
//!
//!  - `IntervalStart` / `IntervalEnd` pairs with the same thread, name and payload type,
//!  - network loads, by load id,
//!  - the phases of an IPC message, by sender, receiver, message type and seqno,
//!  - GC slices, which are attached to the major GC with the same number.
//!
//! Activity whose closing event never arrives is kept as an incomplete marker.

mod gc;
mod interval;
mod ipc;
mod network;

use std::fmt;

use gc::GcSlices;
use interval::IntervalPairing;
use ipc::IpcMessages;
use network::NetworkLoads;

use crate::context::ProfileContext;
use crate::error::MarkerError;
use crate::marker::{Marker, RawMarkerEvent};
use crate::payload::{normalize_payload, MarkerPayload};

#[derive(Debug, Clone)]
pub struct DeriveOptions {
    /// If true, an event whose payload can't be classified keeps its timing but
    /// loses its payload, and the error is reported in
    /// [`DerivedMarkers::diagnostics`]. If false, the first such error aborts the pass.
    pub skip_malformed_payloads: bool,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            skip_malformed_payloads: true,
        }
    }
}

impl DeriveOptions {
    pub fn strict() -> Self {
        Self {
            skip_malformed_payloads: false,
        }
    }
}

/// A payload which couldn't be classified.
#[derive(Debug)]
pub struct MarkerDiagnostic {
    /// The index of the event in the input.
    pub event_index: usize,
    pub event_name: String,
    pub error: MarkerError,
}

impl fmt::Display for MarkerDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event {} ({:?}): {}",
            self.event_index, self.event_name, self.error
        )
    }
}

#[derive(Debug, Default)]
pub struct DerivedMarkers {
    /// The derived markers, ordered by start time.
    pub markers: Vec<Marker>,
    pub diagnostics: Vec<MarkerDiagnostic>,
}

/// Derives markers from `events`.
///
/// The events don't need to be sorted; they are processed in the order of their
/// start time. Events with the same start time are ordered by their end time, and
/// otherwise keep their input order.
pub fn derive_markers(
    events: &[RawMarkerEvent],
    options: &DeriveOptions,
    context: &ProfileContext,
) -> Result<DerivedMarkers, MarkerError> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&events[a], &events[b]);
        a.start
            .total_cmp(&b.start)
            .then_with(|| a.end_or_start().total_cmp(&b.end_or_start()))
    });

    let mut deriver = MarkerDeriver::new(context);
    let mut diagnostics = Vec::new();
    for event_index in order {
        let event = &events[event_index];
        let payload = match event.data.as_ref().map(|raw| normalize_payload(raw, event.start)) {
            None => None,
            Some(Ok(payload)) => Some(payload),
            Some(Err(error)) if options.skip_malformed_payloads => {
                let diagnostic = MarkerDiagnostic {
                    event_index,
                    event_name: event.name.clone(),
                    error,
                };
                log::warn!("Dropping the payload of {diagnostic}");
                diagnostics.push(diagnostic);
                None
            }
            Some(Err(error)) => return Err(error),
        };
        deriver.push(event, payload);
    }

    Ok(DerivedMarkers {
        markers: deriver.finish(),
        diagnostics,
    })
}

/// The state of one derivation pass.
pub struct MarkerDeriver<'a> {
    context: &'a ProfileContext,
    markers: Vec<Marker>,
    intervals: IntervalPairing,
    network: NetworkLoads,
    ipc: IpcMessages,
    gc: GcSlices,
}

impl<'a> MarkerDeriver<'a> {
    pub fn new(context: &'a ProfileContext) -> Self {
        Self {
            context,
            markers: Vec::new(),
            intervals: IntervalPairing::default(),
            network: NetworkLoads::default(),
            ipc: IpcMessages::default(),
            gc: GcSlices::default(),
        }
    }

    /// Processes one event. Events must be pushed in the order of their start time.
    pub fn push(&mut self, event: &RawMarkerEvent, payload: Option<MarkerPayload>) {
        match payload {
            Some(MarkerPayload::Network(network)) => {
                self.network.push(&mut self.markers, event, network)
            }
            Some(MarkerPayload::Ipc(ipc)) => {
                self.ipc.push(&mut self.markers, event, ipc, self.context)
            }
            Some(MarkerPayload::GcSlice(slice)) => {
                self.gc.record(event.thread_id, &slice.timings);
                self.intervals.push(
                    &mut self.markers,
                    event,
                    Some(MarkerPayload::GcSlice(slice)),
                );
            }
            payload => self.intervals.push(&mut self.markers, event, payload),
        }
    }

    /// Completes the pass. Returns the markers ordered by start time.
    pub fn finish(self) -> Vec<Marker> {
        let Self {
            mut markers,
            ipc,
            gc,
            ..
        } = self;
        ipc.finish(&mut markers);
        gc.finish(&mut markers);
        markers.sort_by(|a, b| a.start.total_cmp(&b.start));
        markers
    }
}
