//! Canned command and resolution-note templates.
//!
//! Templates are static line blocks keyed by [`TemplateKey`]. They carry no
//! logic; [`render_template`] joins the lines with newlines and falls back
//! to [`NO_TEMPLATE_TEXT`] for unknown keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for an unknown template key.
pub const NO_TEMPLATE_TEXT: &str = "No Text Copied!";

const RULE: &str = "_______________________________________________________________";

/// Closed set of template keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKey {
    NodeUp,
    HardwareUp,
    CpuCheck,
    NodeResolution,
    HardwareResolution,
    InterfaceResolution,
    CpuLoadResolution,
    VillageResolution,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 8] = [
        Self::NodeUp,
        Self::HardwareUp,
        Self::CpuCheck,
        Self::NodeResolution,
        Self::HardwareResolution,
        Self::InterfaceResolution,
        Self::CpuLoadResolution,
        Self::VillageResolution,
    ];

    /// Kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::NodeUp => "node-up",
            Self::HardwareUp => "hardware-up",
            Self::CpuCheck => "cpu-check",
            Self::NodeResolution => "node-resolution",
            Self::HardwareResolution => "hardware-resolution",
            Self::InterfaceResolution => "interface-resolution",
            Self::CpuLoadResolution => "cpu-load-resolution",
            Self::VillageResolution => "village-resolution",
        }
    }

    /// Button identifier used by older front ends.
    fn legacy_id(self) -> &'static str {
        match self {
            Self::NodeUp => "NodeUpCmd",
            Self::HardwareUp => "hardwareUpCmd",
            Self::CpuCheck => "CPU_Cmd",
            Self::NodeResolution => "Node_Resolution_template",
            Self::HardwareResolution => "Hardware_Resolution_template",
            Self::InterfaceResolution => "Interface_Resolution_template",
            Self::CpuLoadResolution => "CPU_Load_Resolution_template",
            Self::VillageResolution => "Village_Resolution_template",
        }
    }

    /// Lines of the template, in order.
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Self::NodeUp => &[
                "terminal length 0",
                "sh ver | i reload|up",
                "sh cdp nei",
                "sh env all",
                "sh process cpu his",
                "sh clo",
                "",
            ],
            Self::HardwareUp => &[
                "terminal length 0",
                "sh env all",
                "sh logg | i fan",
                "sh logg | i temp",
                "sh logg | i power",
                "sh clo",
                "",
            ],
            Self::CpuCheck => &["terminal length 0", "sh process cpu his", "sh clo", ""],
            Self::NodeResolution => &[
                "1.",
                "Reason for Outage(RFO): Power issue",
                "Impact:  ",
                "Resolution Steps: ",
                " -  Power restored. ",
                " -  Device is up and stable. ",
                " Hence proceeding to closure of this incident. ",
                RULE,
                "2.",
                "SLA: Met",
                "Breached Reason: NA",
                "Vendor/Telco Details: NA",
                "Case No: NA",
                "Incident Category: Power issue",
                "Reason for Outage (RFO): The device went down due to a power issue",
                "Service(s) Impacted: LAN services",
                "Impact:  ",
                "Customer confirmation on RFO awareness: No",
                "Customer confirmation on restoration of normal operations: No",
            ],
            Self::HardwareResolution => &[
                "1.",
                "Reason for Outage(RFO): Hardware  was down due to power issue",
                "Impact:  ",
                "Resolution Steps: ",
                "--- Hardware status of the device is  working fine.",
                "--- Hence proceeding to closure of this incident.",
                RULE,
                "2.",
                "SLA: Met",
                "Breached Reason: NA",
                "Vendor/Telco Details: NA",
                "Case No: NA",
                "Incident Category: Power issue",
                "Reason for Outage (RFO): Hardware of the device was down due to power issue",
                "Service(s) Impacted: LAN services",
                "Impact:  ",
                "Customer confirmation on RFO awareness: No",
                "Customer confirmation on restoration of normal operations: No",
            ],
            Self::InterfaceResolution => &[
                "1.",
                "Reason for Outage(RFO): Interface is down maybe due to neighbour device is down.",
                "Impact:  ",
                "Resolution Steps:",
                "--Interface is up.",
                "--Hence, proceding to close the incident.",
                " ",
                RULE,
                " ",
                "2.",
                "SLA: Met",
                "Breached Reason: NA",
                "Vendor/Telco Details: NA",
                "Case No: NA",
                "Incident Category: Power issue",
                "Reason for Outage (RFO): Interface is down maybe due to neighbour device is down",
                "Service(s) Impacted: LAN services",
                "Impact:  ",
                "Customer confirmation on RFO awareness: No",
                "Customer confirmation on restoration of normal operations: No",
            ],
            Self::CpuLoadResolution => &[
                "1.",
                "Reason for Outage(RFO): High CPU utilization",
                "Impact:  ",
                "Resolution Steps: ",
                "---CPU load is below 80% and utilization is normal.",
                "--- Hence proceeding to close the incident.",
                RULE,
                " ",
                "2.",
                "SLA: Met",
                "Breached Reason: NA",
                "Vendor/Telco Details: NA",
                "Case No: NA",
                "Incident Category: High CPU Load",
                "Reason for Outage (RFO): CPU Load was above 80%",
                "Service(s) Impacted: LAN services",
                "Impact:  ",
                "Customer confirmation on RFO awareness: No",
                "Customer confirmation on restoration of normal operations: No",
            ],
            Self::VillageResolution => &[
                "Customer Name:",
                "",
                "SLA: NA",
                "",
                "SLA Breached Reason:",
                "",
                "Issue Description:",
                "",
                "Resolution Steps:",
                " - User length of stay has completed",
                " - Hence, Proceeding to close the incident",
                "",
                "Fix Actions Taken: Yes",
                "",
                "Customer Confirmed Normal Operation & RFO Awareness: NA",
            ],
        }
    }

    /// Joined template text.
    pub fn render(self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKey {
    type Err = String;

    /// Accepts the kebab-case name or the legacy identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(s) || key.legacy_id() == s)
            .ok_or_else(|| format!("unknown template key: {s}"))
    }
}

/// Renders the template named `key`, or [`NO_TEMPLATE_TEXT`] when the key
/// is not part of the table.
///
/// # Examples
///
/// ```
/// use netsift_core::{render_template, NO_TEMPLATE_TEXT};
///
/// assert!(render_template("cpu-check").starts_with("terminal length 0\n"));
/// assert!(render_template("CPU_Cmd").contains("sh process cpu his"));
/// assert_eq!(render_template("does-not-exist"), NO_TEMPLATE_TEXT);
/// ```
pub fn render_template(key: &str) -> String {
    key.parse::<TemplateKey>()
        .map(TemplateKey::render)
        .unwrap_or_else(|_| NO_TEMPLATE_TEXT.to_string())
}
