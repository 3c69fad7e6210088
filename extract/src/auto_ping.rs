//! Extract addresses, ping them, and collect the console output.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::ips::{IpList, extract_ips_with_devices};
use crate::ping::{PingBackend, PingSettings, RawPingResult};
use crate::ping_analyze::{PingAnalysis, loss_percent_of};
use crate::NO_IP_FOUND;
use netsift_core::PingOutcome;

const BLOCK_RULE: &str = "====================================";

/// One pinged address with its device label and raw output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoPingEntry {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// `None` when the backend returned nothing usable for this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl AutoPingEntry {
    fn render(&self) -> String {
        let mut out = format!("{BLOCK_RULE}\n");
        match &self.device {
            Some(device) => out.push_str(&format!("Device: {device}\nIP: {}\n", self.ip)),
            None => out.push_str(&format!("Pinging {}\n", self.ip)),
        }
        out.push_str(&format!("{BLOCK_RULE}\n\n"));
        match &self.output {
            Some(output) => out.push_str(&format!("{output}\n\n")),
            None => out.push_str(&format!("No output available for {}\n\n", self.ip)),
        }
        out
    }
}

/// Result of one auto-ping run, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutoPingRun {
    pub entries: Vec<AutoPingEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PingAnalysis>,
}

impl AutoPingRun {
    /// Per-address blocks with `Device:`/`IP:` headers, or [`NO_IP_FOUND`].
    ///
    /// The headers use the same wording the analyzer recognizes, so the
    /// detailed output can be fed back through
    /// [`analyze_ping_output`](crate::ping_analyze::analyze_ping_output).
    pub fn detailed_output(&self) -> String {
        if self.entries.is_empty() {
            return NO_IP_FOUND.to_string();
        }
        self.entries.iter().map(AutoPingEntry::render).collect()
    }
}

/// Extracts labelled addresses from `text`, pings them through `backend`
/// and optionally analyzes the outputs.
///
/// Text without addresses returns an empty run without calling the backend.
///
/// # Errors
///
/// Returns the backend's error unchanged; no partial results are kept.
pub fn run_auto_ping(
    text: &str,
    backend: &dyn PingBackend,
    settings: &PingSettings,
) -> Result<AutoPingRun> {
    let targets = extract_ips_with_devices(text);
    if targets.is_empty() {
        return Ok(AutoPingRun::default());
    }

    let requested: Vec<String> = targets.addresses().map(str::to_string).collect();
    let responses = backend.ping_all(&requested, settings)?;
    let mut by_ip: HashMap<String, RawPingResult> = HashMap::new();
    for response in responses {
        by_ip.entry(response.ip.clone()).or_insert(response);
    }

    let entries = collect_entries(&targets, &mut by_ip);
    if !by_ip.is_empty() {
        debug!(extra = by_ip.len(), "Ignoring responses for unrequested addresses");
    }

    let analysis = settings.analyze.then(|| analyze_entries(&entries));
    Ok(AutoPingRun { entries, analysis })
}

fn collect_entries(
    targets: &IpList,
    by_ip: &mut HashMap<String, RawPingResult>,
) -> Vec<AutoPingEntry> {
    targets
        .ips
        .iter()
        .map(|target| {
            let output = by_ip
                .remove(&target.ip)
                .map(|r| r.output)
                .filter(|output| !output.trim().is_empty());
            if output.is_none() {
                debug!(ip = %target.ip, "No ping output for address");
            }
            AutoPingEntry {
                ip: target.ip.clone(),
                device: target.device.clone(),
                output,
            }
        })
        .collect()
}

/// Classifies each entry from its own output; no loss summary counts as
/// total loss.
fn analyze_entries(entries: &[AutoPingEntry]) -> PingAnalysis {
    let outcomes = entries
        .iter()
        .filter_map(|entry| {
            let loss = entry.output.as_deref().and_then(loss_percent_of).unwrap_or(100);
            PingOutcome::new(&entry.ip, loss, entry.device.clone()).ok()
        })
        .collect();

    PingAnalysis {
        outcomes,
        saw_loss_line: !entries.is_empty(),
    }
}
