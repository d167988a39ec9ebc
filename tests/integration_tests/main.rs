use assert_json_diff::assert_json_eq;
use fxprof_markers::payload::{IpcPayload, IpcSharedData, MajorGcTimings};
use fxprof_markers::{
    compose_tooltip, derive_markers, normalize_payload, DeriveOptions, Marker, MarkerPayload,
    MarkerPhase, MarkerSchemaRegistry, ProfileContext, RawMarkerEvent,
};
use serde_json::{json, Value};

fn derive(events: &[RawMarkerEvent], context: &ProfileContext) -> Vec<Marker> {
    let derived = derive_markers(events, &DeriveOptions::strict(), context).unwrap();
    assert!(derived.diagnostics.is_empty());
    derived.markers
}

fn gc_slice(start: f64, major_gc_number: u64, slice: u32) -> RawMarkerEvent {
    RawMarkerEvent::interval("GCSlice", start, start + 1.0).with_data(json!({
        "type": "GCSlice",
        "timings": {
            "slice": slice,
            "major_gc_number": major_gc_number,
            "reason": "ALLOC_TRIGGER",
            "budget": "10ms",
            "initial_state": "Mark",
            "final_state": "Sweep",
            "page_faults": 0,
            "times": { "Mark": 0.5 }
        }
    }))
}

fn ipc_payload(marker: &Marker) -> &IpcPayload {
    match &marker.data {
        Some(MarkerPayload::Ipc(payload)) => payload,
        data => panic!("unexpected payload {data:?}"),
    }
}

#[test]
fn gc_slices_are_ordered_by_slice_index() {
    let events = vec![
        gc_slice(10.0, 7, 2),
        gc_slice(12.0, 7, 0),
        gc_slice(13.0, 8, 0),
        RawMarkerEvent::interval("GCMajor", 5.0, 20.0).with_data(json!({
            "type": "GCMajor",
            "timings": {
                "status": "completed",
                "reason": "ALLOC_TRIGGER",
                "max_pause": 1.0,
                "total_time": 2.0,
                "mmu_20ms": 0.8,
                "mmu_50ms": 0.9,
                "major_gc_number": 7,
                "slices": 2,
                "totals": { "Mark": 1.0, "Sweep": 1.0 }
            }
        })),
    ];
    let markers = derive(&events, &ProfileContext::new());

    let names: Vec<&str> = markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["GCMajor", "GCSlice", "GCSlice", "GCSlice"]);
    let Some(MarkerPayload::GcMajor(major)) = &markers[0].data else {
        panic!("unexpected payload {:?}", markers[0].data);
    };
    let MajorGcTimings::Completed(completed) = &major.timings else {
        panic!("unexpected timings {:?}", major.timings);
    };
    let slices: Vec<(u64, u32)> = completed
        .slices_list
        .iter()
        .map(|s| (s.major_gc_number, s.slice))
        .collect();
    assert_eq!(slices, [(7, 0), (7, 2)]);
    assert_eq!(completed.phase_times.get("Mark"), Some(&1000.0));

    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    let tooltip = compose_tooltip(&markers[0], &registry, &ProfileContext::new());
    assert_eq!(tooltip.detail("MMU 20ms"), Some("80%"));
    assert_eq!(tooltip.detail("Slices"), Some("2 (recorded 2)"));
    assert_eq!(tooltip.detail("Mark"), Some("1ms"));
}

#[test]
fn network_start_without_stop_is_incomplete() {
    let events = vec![RawMarkerEvent::interval("Load 5: https://example.com/", 90.0, 100.0)
        .with_data(json!({
            "type": "Network",
            "id": 5,
            "URI": "https://example.com/",
            "status": "STATUS_START",
            "pri": 8,
            "startTime": 90.0,
            "endTime": 100.0
        }))];
    let markers = derive(&events, &ProfileContext::new());
    assert_eq!(markers.len(), 1);
    assert!(markers[0].incomplete);
    assert_eq!(markers[0].end, None);

    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    let tooltip = compose_tooltip(&markers[0], &registry, &ProfileContext::new());
    assert_eq!(tooltip.duration.as_deref(), Some("unknown duration"));
    assert_eq!(tooltip.title, "Load 5: https://example.com/");
    assert_eq!(tooltip.detail("Priority"), Some("Low (8)"));
}

#[test]
fn network_fetch_start_is_the_junction() {
    let load = |status: &str, start: f64, end: f64, extra: Value| {
        let mut data = json!({
            "type": "Network",
            "id": 12,
            "URI": "https://example.com/app.js",
            "status": status,
            "startTime": start,
            "endTime": end,
        });
        if let (Some(data), Value::Object(extra)) = (data.as_object_mut(), extra) {
            data.extend(extra);
        }
        RawMarkerEvent::interval("Load 12: https://example.com/app.js", start, end)
            .on_thread(1)
            .with_data(data)
    };
    let events = vec![
        load(
            "STATUS_STOP",
            100.0,
            140.0,
            json!({
                "domainLookupStart": 101.0, "domainLookupEnd": 104.0,
                "connectStart": 104.0, "tcpConnectEnd": 110.0,
                "requestStart": 111.0, "responseStart": 130.0, "responseEnd": 139.0,
                "contentType": "text/javascript", "count": 2048
            }),
        ),
        load("STATUS_START", 80.0, 100.0, json!({ "innerWindowID": 3 })),
    ];
    let context = ProfileContext::new()
        .with_thread_name(1, "GeckoMain")
        .with_zero_at(50.0);
    let markers = derive(&events, &context);
    assert_eq!(markers.len(), 1);
    let Some(MarkerPayload::Network(network)) = &markers[0].data else {
        panic!("unexpected payload {:?}", markers[0].data);
    };
    assert_eq!(network.fetch_start, Some(100.0));
    assert_eq!(network.start_time, 80.0);
    assert_eq!((markers[0].start, markers[0].end), (80.0, Some(140.0)));

    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    let tooltip = compose_tooltip(&markers[0], &registry, &context);
    let value = serde_json::to_value(&tooltip).unwrap();
    assert_json_eq!(
        value,
        json!({
            "title": "Load 12: https://example.com/app.js",
            "duration": "60ms",
            "details": [
                { "label": "Thread", "value": "GeckoMain" },
                { "label": "Status", "value": "STATUS_STOP" },
                { "label": "URL", "value": "https://example.com/app.js" },
                { "label": "MIME type", "value": "text/javascript" },
                { "label": "Requested bytes", "value": "2KB" },
                { "label": "Priority", "value": "Normal (0)" },
                { "label": "Waiting for socket thread", "value": "21ms" },
                { "label": "DNS request", "value": "3ms" },
                { "label": "After DNS request", "value": "0ms" },
                { "label": "TCP connection", "value": "6ms" },
                { "label": "HTTP request and waiting for response", "value": "19ms" },
                { "label": "HTTP response", "value": "9ms" },
                { "label": "Waiting to transmit the response", "value": "1ms" }
            ]
        })
    );
}

#[test]
fn ipc_send_duration_with_partial_phases() {
    let mut payload: IpcPayload = serde_json::from_value(json!({
        "startTime": 10.0,
        "endTime": 10.0,
        "otherPid": 200,
        "messageType": "PContent::Msg_Foo",
        "messageSeqno": 1,
        "side": "parent",
        "direction": "sending",
        "phase": "endpoint",
        "sync": false
    }))
    .unwrap();
    payload.shared = Some(IpcSharedData {
        send_start_time: Some(10.0),
        send_end_time: Some(15.0),
        ..Default::default()
    });
    let marker = Marker {
        name: "IPC".to_owned(),
        start: 10.0,
        end: None,
        incomplete: true,
        category: 0,
        thread_id: None,
        title: None,
        data: Some(MarkerPayload::Ipc(payload)),
    };
    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    let tooltip = compose_tooltip(&marker, &registry, &ProfileContext::new());
    assert_eq!(tooltip.detail("IPC Send Duration"), Some("5ms"));
    assert_eq!(tooltip.detail("IPC Send Thread Latency"), Some("unknown"));
    assert_eq!(tooltip.detail("IPC Recv Latency"), Some("unknown"));
    assert_eq!(tooltip.detail("IPC Recv Thread Latency"), Some("unknown"));
}

#[test]
fn ipc_durations_are_never_negative() {
    let phase = |pid: u32, tid: u32, other: u32, direction: &str, phase: &str, time: f64| {
        RawMarkerEvent::instant("IPC", time)
            .in_process(pid)
            .on_thread(tid)
            .with_data(json!({
                "type": "IPC",
                "startTime": time,
                "endTime": time,
                "otherPid": other,
                "messageType": "PBrowser::Msg_RealMouseMoveEvent",
                "messageSeqno": 77,
                "side": "child",
                "direction": direction,
                "phase": phase,
                "sync": false
            }))
    };
    // Not in time order.
    let events = vec![
        phase(200, 21, 100, "receiving", "endpoint", 9.0),
        phase(100, 1, 200, "sending", "endpoint", 1.0),
        phase(100, 2, 200, "sending", "transferStart", 2.0),
        phase(200, 22, 100, "receiving", "transferEnd", 6.0),
    ];
    let context = ProfileContext::new()
        .with_thread_name(1, "GeckoMain")
        .with_thread_name(21, "GeckoMain");
    let markers = derive(&events, &context);
    assert_eq!(markers.len(), 2);

    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    for marker in &markers {
        let shared = ipc_payload(marker).shared.as_ref().unwrap();
        assert_eq!(shared.start_time, Some(1.0));
        assert_eq!(shared.end_time, Some(9.0));
        let tooltip = compose_tooltip(marker, &registry, &context);
        assert_eq!(tooltip.duration.as_deref(), Some("8ms"));
        assert_eq!(tooltip.detail("IPC Send Thread Latency"), Some("1ms"));
        assert_eq!(tooltip.detail("IPC Send Duration"), Some("unknown"));
        assert_eq!(tooltip.detail("IPC Recv Latency"), Some("unknown"));
        assert_eq!(tooltip.detail("IPC Recv Thread Latency"), Some("3ms"));
        assert_eq!(tooltip.detail("Sending Thread"), Some("GeckoMain"));
        for detail in &tooltip.details {
            assert!(!detail.value.starts_with('-'), "negative row {detail:?}");
        }
    }
    assert_eq!(
        compose_tooltip(&markers[0], &registry, &context).title,
        "IPC sent to 200"
    );
}

#[test]
fn bailout_without_description() {
    let events = vec![RawMarkerEvent::instant("Bailout", 3.0).with_data(json!({
        "type": "Bailout",
        "bailoutType": "Debugger",
        "where": "",
        "script": "https://example.com/a.js",
        "bailoutLine": 12,
        "functionLine": 10
    }))];
    let markers = derive(&events, &ProfileContext::new());
    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    let tooltip = compose_tooltip(&markers[0], &registry, &ProfileContext::new());
    assert_eq!(tooltip.title, "Bailout: Debugger");
    assert_eq!(tooltip.detail("Description"), None);
    assert_eq!(tooltip.detail("Bailout line"), Some("12"));

    let mut overflow = markers[0].clone();
    if let Some(MarkerPayload::Bailout(bailout)) = &mut overflow.data {
        bailout.bailout_type = "Overflow".to_owned();
    }
    let tooltip = compose_tooltip(&overflow, &registry, &ProfileContext::new());
    assert!(tooltip.detail("Description").is_some());
}

#[test]
fn normalization_is_idempotent() {
    let raw_payloads = [
        json!({ "type": "tracing", "category": "Paint", "interval": "start", "stack": 1 }),
        json!({ "type": "FileIO", "source": "PoisonIOInterposer", "operation": "write", "stack": 2 }),
        json!({ "type": "GCMinor", "nursery": { "status": "complete", "times": { "Sweep": 0.25 } } }),
        json!({
            "type": "IPC", "startTime": 1.0, "endTime": 1.0, "otherPid": 4,
            "messageType": "M", "messageSeqno": 1, "side": "parent", "direction": "receiving"
        }),
        json!({ "type": "Styles", "elementsTraversed": 1, "elementsStyled": 2, "elementsMatched": 3, "stylesShared": 4, "stylesReused": 5 }),
        json!({ "type": "PreferenceRead", "prefName": "a.b", "prefKind": "User", "prefType": "Bool", "prefValue": "true" }),
    ];
    for raw in raw_payloads {
        let once = normalize_payload(&raw, 42.0).unwrap();
        let twice = normalize_payload(&serde_json::to_value(&once).unwrap(), 99.0).unwrap();
        assert_eq!(once, twice);
        let json = serde_json::to_value(&once).unwrap();
        assert!(json.get("stack").is_none());
    }
}

#[test]
fn unmatched_interval_events() {
    let events = vec![
        RawMarkerEvent::instant("Jank", 4.0).with_phase(MarkerPhase::IntervalEnd),
        RawMarkerEvent::instant("Paint", 6.0).with_phase(MarkerPhase::IntervalStart),
    ];
    let markers = derive(&events, &ProfileContext::new());
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|marker| marker.incomplete));
    let registry = MarkerSchemaRegistry::with_builtin_schemas();
    for marker in &markers {
        let tooltip = compose_tooltip(marker, &registry, &ProfileContext::new());
        assert_eq!(tooltip.duration.as_deref(), Some("unknown duration"));
    }
}

#[test]
fn custom_schemas_override_builtin_ones() {
    let mut registry = MarkerSchemaRegistry::with_builtin_schemas();
    let loaded = registry
        .extend_from_json(&json!([{
            "name": "Text",
            "display": ["marker-chart"],
            "tooltipLabel": "Note: {marker.data.name}",
            "data": [
                { "key": "name", "label": "Note", "format": "string" },
                { "label": "Origin", "value": "custom" }
            ]
        }]))
        .unwrap();
    assert_eq!(loaded, 1);

    let events =
        vec![RawMarkerEvent::instant("Text", 1.0).with_data(json!({ "type": "Text", "name": "hi" }))];
    let markers = derive(&events, &ProfileContext::new());
    let tooltip = compose_tooltip(&markers[0], &registry, &ProfileContext::new());
    assert_json_eq!(
        serde_json::to_value(&tooltip).unwrap(),
        json!({
            "title": "Note: hi",
            "details": [
                { "label": "Note", "value": "hi" },
                { "label": "Origin", "value": "custom" }
            ]
        })
    );
}
