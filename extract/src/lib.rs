//! Text extraction for network-operations alert dumps and ping output.
//!
//! This crate turns pasted monitoring text into structured records and the
//! plain-text reports operators copy into tickets:
//!
//! - [`device_report`] — interface-down alerts grouped per device
//!   ([`alert`], [`aggregate`]).
//! - [`ip_report`] / [`ip_report_with_devices`] — unique addresses, ready to
//!   be turned into `ping` commands ([`ips`]).
//! - [`ping_report`] — up/down status from pasted `ping` console output
//!   ([`ping_analyze`]).
//! - [`auto_ping::run_auto_ping`] — extract, ping through a
//!   [`ping::PingBackend`], and optionally analyze in one step.
//!
//! Parsers never return errors for unmatched input. Each report renders a
//! placeholder instead ([`NO_INPUT_FOUND`], [`NO_IP_FOUND`],
//! [`NO_PING_OUTPUT`]).
//!
//! # Example
//!
//! ```
//! use netsift_extract::device_report;
//!
//! let alerts = "\
//! Interface: Port-channel10 on Node: AU-TEST-DSW01 is Down.
//! Pert 14 an Node: SITE-A 31s Down
//! ";
//!
//! let inventory = device_report(alerts);
//! assert_eq!(inventory.device_count(), 2);
//! assert_eq!(inventory.devices[0].node_name, "AU-TEST-DSW01");
//! assert_eq!(inventory.devices[1].interfaces, vec!["Port 14"]);
//! ```

pub mod aggregate;
pub mod alert;
pub mod auto_ping;
pub mod commands;
pub mod config;
pub mod error;
pub mod ips;
pub mod output;
pub mod ping;
pub mod ping_analyze;

pub use aggregate::{DeviceInventory, aggregate_alerts};
pub use alert::{AlertParser, InterfaceAlert, parse_interface_alerts};
pub use error::{Result, SiftError};
pub use ips::{IpList, extract_ips, extract_ips_with_devices};
pub use ping_analyze::{NO_PING_OUTPUT, PingAnalysis, PingSummary, analyze_ping_output};

/// Placeholder for input that yields no records.
pub const NO_INPUT_FOUND: &str = "No input found";

/// Placeholder for input without any IPv4 address.
pub const NO_IP_FOUND: &str = "No IP found";

/// Parses interface-down alerts and groups them by device.
pub fn device_report(text: &str) -> DeviceInventory {
    aggregate_alerts(parse_interface_alerts(text))
}

/// Extracts unique addresses in first-occurrence order.
///
/// # Examples
///
/// ```
/// use netsift_extract::ip_report;
///
/// let list = ip_report("Reply from 10.0.0.1\nReply from 10.0.0.1\n10.0.0.2 up");
/// assert_eq!(list.render_ping_commands(), "ping 10.0.0.1\nping 10.0.0.2\n");
/// ```
pub fn ip_report(text: &str) -> IpList {
    extract_ips(text)
}

/// Extracts unique addresses with the device labels written before them.
pub fn ip_report_with_devices(text: &str) -> IpList {
    extract_ips_with_devices(text)
}

/// Reconstructs ping outcomes from console output.
pub fn ping_report(text: &str) -> PingAnalysis {
    analyze_ping_output(text)
}
