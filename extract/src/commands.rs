//! Remediation command generation for devices with interfaces down.

use netsift_core::DeviceRecord;

/// First line of every command batch, so the device does not page output.
pub const TERMINAL_LENGTH: &str = "terminal length 0";

/// Per-interface diagnostics for one device.
///
/// Each interface gets `sh <if>`, `sh run <if>` and a log filter on the part
/// of the name after its first space (the whole name when it has none).
///
/// # Examples
///
/// ```
/// use netsift_core::DeviceRecord;
/// use netsift_extract::commands::interface_commands;
///
/// let record = DeviceRecord::new("SITE-A-DSW1", "Port 14").unwrap();
/// assert_eq!(
///     interface_commands(&record),
///     "terminal length 0\nsh Port 14\nsh run Port 14\nsh logg | i 14\n"
/// );
/// ```
pub fn interface_commands(record: &DeviceRecord) -> String {
    let blocks: Vec<String> = record
        .interfaces
        .iter()
        .map(|interface| {
            let tail = interface
                .split_once(' ')
                .map_or(interface.as_str(), |(_, rest)| rest);
            format!("sh {interface}\nsh run {interface}\nsh logg | i {tail}\n")
        })
        .collect();

    format!("{TERMINAL_LENGTH}\n{}", blocks.join("\n"))
}

/// One `sh ip int br` filter covering every port of the device.
///
/// # Examples
///
/// ```
/// use netsift_core::DeviceRecord;
/// use netsift_extract::commands::status_command;
///
/// let mut record = DeviceRecord::new("SITE-A-DSW1", "Gi1/0/1").unwrap();
/// record.push_interface("Gi1/0/2");
/// assert_eq!(status_command(&record), "sh ip int br | i Gi1/0/1 |Gi1/0/2 ");
/// ```
pub fn status_command(record: &DeviceRecord) -> String {
    let filter: String = record.ports.iter().map(|port| format!("{port} |")).collect();
    let filter = filter.strip_suffix('|').unwrap_or(&filter);
    format!("sh ip int br | i {filter}")
}
