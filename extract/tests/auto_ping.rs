use std::sync::Mutex;

use netsift_core::PingStatus;
use netsift_extract::auto_ping::run_auto_ping;
use netsift_extract::ping::{PingBackend, PingSettings, RawPingResult};
use netsift_extract::{Result, SiftError, analyze_ping_output};

/// Answers every address in reverse order and records what it was asked.
#[derive(Default)]
struct ReversedBackend {
    requested: Mutex<Vec<String>>,
    down: Vec<&'static str>,
}

impl PingBackend for ReversedBackend {
    fn ping_all(&self, ips: &[String], _settings: &PingSettings) -> Result<Vec<RawPingResult>> {
        self.requested.lock().unwrap().extend(ips.iter().cloned());
        Ok(ips
            .iter()
            .rev()
            .map(|ip| {
                let lost = if self.down.contains(&ip.as_str()) { 4 } else { 0 };
                RawPingResult {
                    ip: ip.clone(),
                    success: lost == 0,
                    output: format!(
                        "Pinging {ip} with 32 bytes of data:\n\nPing statistics for {ip}:\n    Packets: Sent = 4, Received = {}, Lost = {lost} ({}% loss),",
                        4 - lost,
                        lost * 25
                    ),
                }
            })
            .collect())
    }
}

struct BrokenBackend;

impl PingBackend for BrokenBackend {
    fn ping_all(&self, _ips: &[String], _settings: &PingSettings) -> Result<Vec<RawPingResult>> {
        Err(SiftError::Collaborator("no ping binary".into()))
    }
}

const DEVICE_LIST: &str = "\
AU-JIM-EPCR-WAP16-192.168.55.104
AU-JIM-EPCR-SW01 - 192.168.55.1
10.1.1.9
";

fn analyzing() -> PingSettings {
    PingSettings {
        analyze: true,
        ..PingSettings::default()
    }
}

#[test]
fn test_out_of_order_responses_keep_request_order() {
    let backend = ReversedBackend::default();
    let run = run_auto_ping(DEVICE_LIST, &backend, &PingSettings::default()).unwrap();

    assert_eq!(
        *backend.requested.lock().unwrap(),
        vec!["192.168.55.104", "192.168.55.1", "10.1.1.9"]
    );
    let ips: Vec<_> = run.entries.iter().map(|e| e.ip.as_str()).collect();
    assert_eq!(ips, vec!["192.168.55.104", "192.168.55.1", "10.1.1.9"]);
    assert!(run.entries.iter().all(|e| e.output.as_deref().unwrap().contains(&e.ip)));
}

#[test]
fn test_analysis_carries_device_names() {
    let backend = ReversedBackend {
        down: vec!["192.168.55.1"],
        ..ReversedBackend::default()
    };
    let run = run_auto_ping(DEVICE_LIST, &backend, &analyzing()).unwrap();
    let analysis = run.analysis.unwrap();

    assert_eq!(analysis.summary().to_string(), "2 up, 1 down");
    assert_eq!(analysis.outcomes[1].device.as_deref(), Some("AU-JIM-EPCR-SW01"));
    assert_eq!(analysis.outcomes[1].status, PingStatus::Down);
    assert_eq!(analysis.outcomes[2].device, None);
}

#[test]
fn test_detailed_output_round_trips_through_analyzer() {
    let backend = ReversedBackend {
        down: vec!["10.1.1.9"],
        ..ReversedBackend::default()
    };
    let run = run_auto_ping(DEVICE_LIST, &backend, &analyzing()).unwrap();
    let reparsed = analyze_ping_output(&run.detailed_output());

    assert_eq!(Some(reparsed), run.analysis);
}

#[test]
fn test_backend_failure_propagates() {
    let err = run_auto_ping(DEVICE_LIST, &BrokenBackend, &analyzing()).unwrap_err();
    assert!(matches!(err, SiftError::Collaborator(_)));
    assert_eq!(err.to_string(), "ping collaborator failed: no ping binary");
}

#[test]
fn test_no_addresses_never_calls_backend() {
    let run = run_auto_ping("nothing to ping", &BrokenBackend, &analyzing()).unwrap();
    assert!(run.entries.is_empty());
    assert!(run.analysis.is_none());
}
