use std::fs;
use std::path::PathBuf;

use netsift_core::{DeviceIp, PingStatus, validate_devices};
use netsift_extract::{
    NO_INPUT_FOUND, NO_IP_FOUND, NO_PING_OUTPUT, device_report, ip_report, ip_report_with_devices,
    ping_report,
};

#[test]
fn test_mixed_alert_dump_groups_devices() {
    let inventory = device_report(&fixture("alerts-mixed.txt"));

    let names: Vec<_> = inventory.devices.iter().map(|d| d.node_name.as_str()).collect();
    assert_eq!(names, vec!["AU-TEST-DSW01", "BMA-DSW2-3", "SYD-CORE-01"]);
    assert_eq!(
        inventory.get("AU-TEST-DSW01").unwrap().interfaces,
        vec!["Port-channel10", "Gi1/0/48"]
    );
    assert_eq!(
        inventory.get("BMA-DSW2-3").unwrap().interfaces,
        vec!["Port 14", "Port 13"]
    );
    assert_eq!(
        inventory.get("SYD-CORE-01").unwrap().ip,
        DeviceIp::Known("10.20.30.40".into())
    );
    assert_eq!(inventory.total_interfaces(), 5);
    assert!(validate_devices(&inventory.devices).is_empty());
}

#[test]
fn test_mixed_alert_dump_report_header() {
    let report = device_report(&fixture("alerts-mixed.txt")).render_report();
    assert!(report.starts_with("Total Interfaces Down: 5 (across 3 devices)\n\n"));
    assert!(report.contains("Node name: SYD-CORE-01\nIP: 10.20.30.40\nInterfaces: 1\n\n  Port 14\n"));
    assert!(!report.contains("Node name: AB\n"));
}

#[test]
fn test_labelled_port_keeps_label_dialect() {
    let inventory = device_report("Interfaces: Port 14 on Node: SITE-LAB-01 is Down");
    assert_eq!(inventory.devices[0].interfaces, vec!["Port 14"]);
}

#[test]
fn test_single_alert_sentence() {
    let inventory = device_report("Interface: Port-channel10 on Node: AU-TEST-DSW01 is Down.");
    assert_eq!(inventory.device_count(), 1);
    assert_eq!(inventory.devices[0].node_name, "AU-TEST-DSW01");
    assert_eq!(inventory.devices[0].interfaces, vec!["Port-channel10"]);
}

#[test]
fn test_typo_alert_sentence() {
    let inventory = device_report("Pert 14 an Node: SITE-A 31s Down");
    assert_eq!(inventory.devices[0].node_name, "SITE-A");
    assert_eq!(inventory.devices[0].interfaces, vec!["Port 14"]);
}

#[test]
fn test_device_list_token_mode() {
    let list = ip_report(&fixture("device-list.txt"));
    let ips: Vec<_> = list.addresses().collect();
    assert_eq!(ips, vec!["192.168.55.104", "192.168.55.1", "10.1.1.9", "10.9.9.9"]);
    assert!(list.ips.iter().all(|r| r.device.is_none()));
}

#[test]
fn test_device_list_association_mode() {
    let list = ip_report_with_devices(&fixture("device-list.txt"));
    assert_eq!(list.len(), 4);
    assert_eq!(list.device_for("192.168.55.104"), Some("AU-JIM-EPCR-WAP16"));
    assert_eq!(list.device_for("192.168.55.1"), Some("AU-JIM-EPCR-SW01"));
    assert_eq!(list.device_for("10.1.1.9"), Some("EDGE-RTR"));
    assert_eq!(list.device_for("10.9.9.9"), None);
}

#[test]
fn test_device_list_doubled_is_unchanged() {
    let text = fixture("device-list.txt");
    let doubled = format!("{text}\n{text}");
    assert_eq!(ip_report(&text), ip_report(&doubled));
    assert_eq!(ip_report_with_devices(&text), ip_report_with_devices(&doubled));
}

#[test]
fn test_windows_console_outcomes() {
    let analysis = ping_report(&fixture("ping-console-windows.txt"));
    assert_eq!(analysis.outcomes.len(), 3);

    let wap = &analysis.outcomes[0];
    assert_eq!(wap.ip, "192.168.55.104");
    assert_eq!(wap.device.as_deref(), Some("AU-JIM-EPCR-WAP16"));
    assert_eq!(wap.status, PingStatus::Up);

    let switch = &analysis.outcomes[1];
    assert_eq!(switch.device.as_deref(), Some("AU-JIM-EPCR-SW01"));
    assert_eq!(switch.loss_percent, 100);

    let router = &analysis.outcomes[2];
    assert_eq!(router.device.as_deref(), Some("EDGE-RTR"));
    assert_eq!(router.loss_percent, 25);
    assert_eq!(router.status, PingStatus::Down);

    assert_eq!(analysis.summary().to_string(), "1 up, 2 down");
}

#[test]
fn test_windows_console_report() {
    let report = ping_report(&fixture("ping-console-windows.txt")).render_report();
    let expected = "\
Total nodes count: 3
Up devices: 1
Down devices: 2

-------> List of 1 Up devices
AU-JIM-EPCR-WAP16 - 192.168.55.104
====================================
-------> List of 2 Down devices
AU-JIM-EPCR-SW01 - 192.168.55.1
EDGE-RTR - 10.1.1.9
";
    assert_eq!(report, expected);
}

#[test]
fn test_orphan_loss_lines_add_nothing() {
    let text = format!(
        "    Packets: Sent = 4, Received = 0, Lost = 4 (100% loss),\n{}",
        fixture("ping-console-windows.txt")
    );
    assert_eq!(ping_report(&text).outcomes.len(), 3);
}

#[test]
fn test_empty_input_placeholders() {
    for text in ["", "   ", "\n\n\t"] {
        assert_eq!(device_report(text).render_report(), NO_INPUT_FOUND);
        assert_eq!(ip_report(text).render_ping_commands(), NO_IP_FOUND);
        assert_eq!(ping_report(text).render_report(), NO_PING_OUTPUT);
    }
}

#[test]
fn test_parsers_are_deterministic() {
    for name in ["alerts-mixed.txt", "ping-console-windows.txt", "device-list.txt"] {
        let text = fixture(name);
        assert_eq!(device_report(&text), device_report(&text));
        assert_eq!(ip_report_with_devices(&text), ip_report_with_devices(&text));
        assert_eq!(ping_report(&text), ping_report(&text));
    }
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}
