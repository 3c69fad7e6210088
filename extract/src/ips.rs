//! Address extraction from free text.
//!
//! Two modes share the same matcher:
//!
//! - [`extract_ips`] splits the text into whitespace tokens and keeps the
//!   first address of each token.
//! - [`extract_ips_with_devices`] works line by line and also remembers the
//!   label written before the address (`CORE-SW1 - 10.0.0.1`).
//!
//! Both de-duplicate while keeping first-occurrence order.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::NO_IP_FOUND;
use netsift_core::{IpResult, accept_device_label, find_ipv4, find_ipv4_with_offset};

/// Ordered, de-duplicated addresses from one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpList {
    pub ips: Vec<IpResult>,
}

impl IpList {
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ips.len()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.ips.iter().map(|r| r.ip.as_str())
    }

    /// Label recorded for `ip`, if any.
    pub fn device_for(&self, ip: &str) -> Option<&str> {
        self.ips
            .iter()
            .find(|r| r.ip == ip)
            .and_then(|r| r.device.as_deref())
    }

    /// One `ping <ip>` line per address, or [`NO_IP_FOUND`].
    ///
    /// # Examples
    ///
    /// ```
    /// use netsift_extract::ips::extract_ips;
    ///
    /// let list = extract_ips("a 10.0.0.1 b 10.0.0.2 a 10.0.0.1");
    /// assert_eq!(list.render_ping_commands(), "ping 10.0.0.1\nping 10.0.0.2\n");
    /// assert_eq!(extract_ips("").render_ping_commands(), "No IP found");
    /// ```
    pub fn render_ping_commands(&self) -> String {
        if self.is_empty() {
            return NO_IP_FOUND.to_string();
        }
        self.addresses().map(|ip| format!("ping {ip}\n")).collect()
    }
}

/// Token-mode extraction.
pub fn extract_ips(text: &str) -> IpList {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ips = Vec::new();

    for ip in text.split_whitespace().filter_map(find_ipv4) {
        if !seen.insert(ip) {
            continue;
        }
        match IpResult::new(ip) {
            Ok(result) => ips.push(result),
            Err(e) => debug!(ip, error = %e, "Skipping address"),
        }
    }

    IpList { ips }
}

/// Line-mode extraction with device labels.
///
/// The text before the first address on a line, minus surrounding spaces
/// and one trailing hyphen, becomes that address's device label when it is
/// longer than two characters. The first line that labels an address wins.
///
/// # Examples
///
/// ```
/// use netsift_extract::ips::extract_ips_with_devices;
///
/// let list = extract_ips_with_devices("AU-JIM-EPCR-WAP16-192.168.55.104\n10.0.0.9\n");
/// assert_eq!(list.device_for("192.168.55.104"), Some("AU-JIM-EPCR-WAP16"));
/// assert_eq!(list.device_for("10.0.0.9"), None);
/// ```
pub fn extract_ips_with_devices(text: &str) -> IpList {
    let mut ips: Vec<IpResult> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let Some((offset, ip)) = find_ipv4_with_offset(line) else {
            continue;
        };
        let label = &line[..offset];

        match ips.iter_mut().find(|r| r.ip == ip) {
            Some(existing) => {
                if existing.device.is_none() {
                    existing.device = accept_device_label(label);
                }
            }
            None => match IpResult::new(ip) {
                Ok(result) => ips.push(result.with_device(label)),
                Err(e) => debug!(ip, error = %e, "Skipping address"),
            },
        }
    }

    IpList { ips }
}
