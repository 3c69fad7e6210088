//! Folding interface alerts into per-device records.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::alert::InterfaceAlert;
use crate::NO_INPUT_FOUND;
use netsift_core::{DeviceIp, DeviceRecord};

const DEVICE_DIVIDER: &str = "------------------------------------------------------------";

/// Devices grouped by normalized node name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceInventory {
    pub devices: Vec<DeviceRecord>,
}

impl DeviceInventory {
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Sum of interface counts over all devices.
    pub fn total_interfaces(&self) -> usize {
        self.devices.iter().map(DeviceRecord::interface_count).sum()
    }

    pub fn get(&self, node_name: &str) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.node_name == node_name)
    }

    /// Renders the operator-facing summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsift_extract::aggregate::aggregate_alerts;
    /// use netsift_extract::alert::parse_interface_alerts;
    ///
    /// let alerts = parse_interface_alerts("Port 14 on Node: SITE-A is Down");
    /// let report = aggregate_alerts(alerts).render_report();
    /// assert!(report.starts_with("Total Interfaces Down: 1 (across 1 devices)"));
    /// assert!(report.contains("Node name: SITE-A\nInterfaces: 1\n\n  Port 14\n"));
    /// ```
    pub fn render_report(&self) -> String {
        if self.is_empty() {
            return NO_INPUT_FOUND.to_string();
        }

        let mut out = format!(
            "Total Interfaces Down: {} (across {} devices)\n\n",
            self.total_interfaces(),
            self.device_count()
        );

        for (index, device) in self.devices.iter().enumerate() {
            if index > 0 {
                out.push_str(&format!("\n{DEVICE_DIVIDER}\n\n"));
            }
            out.push_str(&format!("Node name: {}\n", device.node_name));
            if let DeviceIp::Known(ip) = &device.ip {
                out.push_str(&format!("IP: {ip}\n"));
            }
            out.push_str(&format!("Interfaces: {}\n\n", device.interface_count()));
            for interface in &device.interfaces {
                out.push_str(&format!("  {interface}\n"));
            }
        }

        out
    }
}

/// Groups alerts by node name.
///
/// The first alert for a node creates its record; later alerts append their
/// interface (duplicates included). A record's unknown address is filled in
/// by the first alert that carries one.
pub fn aggregate_alerts(alerts: impl IntoIterator<Item = InterfaceAlert>) -> DeviceInventory {
    let mut devices: Vec<DeviceRecord> = Vec::new();
    let mut index_by_node: HashMap<String, usize> = HashMap::new();

    for alert in alerts {
        let position = match index_by_node.get(&alert.node_name) {
            Some(&position) => {
                devices[position].push_interface(&alert.interface);
                position
            }
            None => match DeviceRecord::new(&alert.node_name, &alert.interface) {
                Ok(record) => {
                    devices.push(record);
                    index_by_node.insert(alert.node_name.clone(), devices.len() - 1);
                    devices.len() - 1
                }
                Err(e) => {
                    debug!(node = %alert.node_name, error = %e, "Skipping alert");
                    continue;
                }
            },
        };

        let device = &mut devices[position];
        if let (false, Some(ip)) = (device.ip.is_known(), alert.ip) {
            device.ip = DeviceIp::Known(ip);
        }
    }

    DeviceInventory { devices }
}
