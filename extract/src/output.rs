//! Output formatting for reports.

use chrono::Utc;
use serde::Serialize;

use crate::aggregate::DeviceInventory;
use crate::auto_ping::AutoPingRun;
use crate::error::Result;
use crate::ips::IpList;
use crate::ping_analyze::PingAnalysis;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// The operator-facing text report.
    #[default]
    Text,
    Json,
    Yaml,
}

/// Metadata wrapper around structured output.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub tool_version: &'static str,
    pub generated_at: String,
    pub kind: &'static str,
    pub report: &'a T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn new(kind: &'static str, report: &'a T) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now().to_rfc3339(),
            kind,
            report,
        }
    }
}

fn format_structured<T: Serialize>(
    kind: &'static str,
    report: &T,
    format: OutputFormat,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Envelope::new(kind, report))?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&Envelope::new(kind, report))?),
    }
}

/// Formats a device inventory. `with_commands` appends remediation commands
/// to the text report.
pub fn format_inventory(
    inventory: &DeviceInventory,
    format: OutputFormat,
    with_commands: bool,
) -> Result<String> {
    format_structured("devices", inventory, format, || {
        let mut out = inventory.render_report();
        if with_commands {
            for device in &inventory.devices {
                out.push_str(&format!(
                    "\n# {}\n{}\n{}\n",
                    device.node_name,
                    crate::commands::interface_commands(device),
                    crate::commands::status_command(device)
                ));
            }
        }
        out
    })
}

/// Formats an extracted address list.
pub fn format_ip_list(list: &IpList, format: OutputFormat) -> Result<String> {
    format_structured("ips", list, format, || list.render_ping_commands())
}

/// Formats a ping status analysis.
pub fn format_analysis(analysis: &PingAnalysis, format: OutputFormat) -> Result<String> {
    format_structured("ping-analysis", analysis, format, || analysis.render_report())
}

/// Formats an auto-ping run: the detailed output, followed by the status
/// report when the run was analyzed.
pub fn format_auto_ping(run: &AutoPingRun, format: OutputFormat) -> Result<String> {
    format_structured("auto-ping", run, format, || {
        let mut out = run.detailed_output();
        if let Some(analysis) = &run.analysis {
            out.push_str(&analysis.render_report());
        }
        out
    })
}
