//! Ping console output analysis.
//!
//! Operators paste the console output of one or many `ping` runs, often
//! with the device list they started from mixed in. The analyzer makes two
//! passes over the lines:
//!
//! 1. **Name recovery** — builds an address → device-name map from
//!    `Device:`/`IP:` header pairs, `PS ...> ping <ip>` prompts preceded by a
//!    `Device:` header, and inline `NAME-<ip>` device-list lines.
//! 2. **Result reconstruction** — pairs each target line (`Pinging <ip>`)
//!    with the next loss summary (`Lost = N (P% loss)`) and emits one
//!    [`PingOutcome`] per pair.
//!
//! Both the Windows and the Unix wording of the target and loss lines are
//! recognized; see [`PING_DIALECTS`].

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::NO_INPUT_FOUND;
use netsift_core::{PingOutcome, accept_device_label, find_ipv4, find_ipv4_with_offset};

/// Placeholder rendered when the buffer contains no loss summary at all.
pub const NO_PING_OUTPUT: &str = "No ping output detected!

To use this feature:
1. Run `netsift ips` to generate ping commands
2. Run the commands in your terminal
3. Copy the ENTIRE terminal output
4. Feed it to `netsift analyze`";

const LIST_DIVIDER: &str = "====================================";

/// Substrings that mark a line as ping chrome rather than a device list entry.
const PING_CHROME: &[&str] = &[
    "Pinging",
    "Reply",
    "Packets:",
    "Ping statistics",
    "Approximate",
    "bytes of data",
    "Minimum",
    "===",
    "TTL=",
    "> ping",
];

/// Target/loss line wording of one ping implementation.
#[derive(Debug)]
pub struct PingDialect {
    pub name: &'static str,
    /// Captures the pinged address in group 1.
    target: Regex,
    /// Captures the loss percentage in group 1.
    loss: Regex,
}

impl PingDialect {
    fn new(name: &'static str, target: &str, loss: &str) -> Self {
        Self {
            name,
            target: Regex::new(target).expect("static regex must compile"),
            loss: Regex::new(loss).expect("static regex must compile"),
        }
    }

    fn target_ip<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.target
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn loss_percent(&self, line: &str) -> Option<u8> {
        let raw = self.loss.captures(line)?.get(1)?.as_str();
        let value: f64 = raw.parse().ok()?;
        // Round up so that any fractional loss is still reported as down.
        Some(value.ceil().clamp(0.0, 100.0) as u8)
    }
}

// SAFETY: These regexes are compile-time constants and are validated by tests.
pub static PING_DIALECTS: LazyLock<Vec<PingDialect>> = LazyLock::new(|| {
    vec![
        PingDialect::new(
            "windows",
            r"Pinging (\d+\.\d+\.\d+\.\d+)",
            r"Lost = \d+ \((\d+)% loss\)",
        ),
        PingDialect::new(
            "unix",
            r"^\s*PING\s+\S+\s+\((\d+\.\d+\.\d+\.\d+)\)",
            r"(\d+(?:\.\d+)?)% packet loss",
        ),
    ]
});

static PROMPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PS\s+.*>\s*ping\s+(\d+\.\d+\.\d+\.\d+)").expect("static regex must compile")
});

/// Up/down counts of one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PingSummary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
}

impl PingSummary {
    pub fn all_up(&self) -> bool {
        self.total > 0 && self.up == self.total
    }

    pub fn all_down(&self) -> bool {
        self.total > 0 && self.down == self.total
    }
}

impl fmt::Display for PingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} up, {} down", self.up, self.down)
    }
}

/// Outcomes reconstructed from one console buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PingAnalysis {
    pub outcomes: Vec<PingOutcome>,
    /// Whether any loss summary line was present, consumed or not.
    pub saw_loss_line: bool,
}

impl PingAnalysis {
    pub fn summary(&self) -> PingSummary {
        let up = self.outcomes.iter().filter(|o| o.is_up()).count();
        PingSummary {
            total: self.outcomes.len(),
            up,
            down: self.outcomes.len() - up,
        }
    }

    pub fn up(&self) -> impl Iterator<Item = &PingOutcome> {
        self.outcomes.iter().filter(|o| o.is_up())
    }

    pub fn down(&self) -> impl Iterator<Item = &PingOutcome> {
        self.outcomes.iter().filter(|o| !o.is_up())
    }

    /// Renders the up/down status report.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsift_extract::ping_analyze::analyze_ping_output;
    ///
    /// let text = "Pinging 10.0.0.1 with 32 bytes of data:\n    Packets: Sent = 4, Received = 4, Lost = 0 (0% loss),\n";
    /// let report = analyze_ping_output(text).render_report();
    /// assert!(report.contains("All 1 devices are up"));
    /// ```
    pub fn render_report(&self) -> String {
        if !self.saw_loss_line {
            return NO_PING_OUTPUT.to_string();
        }
        if self.outcomes.is_empty() {
            return NO_INPUT_FOUND.to_string();
        }

        let summary = self.summary();
        let mut out = format!(
            "Total nodes count: {}\nUp devices: {}\nDown devices: {}\n\n",
            summary.total, summary.up, summary.down
        );

        if summary.all_up() {
            out.push_str(&format!("All {} devices are up\n\n", summary.total));
            push_list(&mut out, "Up", self.up());
        } else if summary.all_down() {
            out.push_str(&format!("All {} devices are down\n\n", summary.total));
            push_list(&mut out, "Down", self.down());
        } else {
            push_list(&mut out, "Up", self.up());
            out.push_str(LIST_DIVIDER);
            out.push('\n');
            push_list(&mut out, "Down", self.down());
        }

        out
    }
}

fn push_list<'a>(out: &mut String, kind: &str, outcomes: impl Iterator<Item = &'a PingOutcome>) {
    let labels: Vec<String> = outcomes.map(PingOutcome::label).collect();
    out.push_str(&format!("-------> List of {} {kind} devices\n", labels.len()));
    for label in labels {
        out.push_str(&label);
        out.push('\n');
    }
}

/// Analyzes ping console output.
pub fn analyze_ping_output(text: &str) -> PingAnalysis {
    let lines: Vec<&str> = text.lines().collect();
    let names = recover_device_names(&lines);
    let (outcomes, saw_loss_line) = reconstruct_outcomes(&lines, &names);

    PingAnalysis {
        outcomes,
        saw_loss_line,
    }
}

/// Pass 1: address → device name.
///
/// Header pairs and prompts are explicit and overwrite earlier entries;
/// inline device-list labels only fill addresses that have no name yet.
pub fn recover_device_names(lines: &[&str]) -> HashMap<String, String> {
    let mut names: HashMap<String, String> = HashMap::new();
    let mut pending: Option<String> = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Device:") {
            let name = rest.trim();
            pending = (!name.is_empty()).then(|| name.to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix("IP:") {
            if let Some(name) = pending.take() {
                match find_ipv4(rest) {
                    Some(ip) => {
                        names.insert(ip.to_string(), name);
                    }
                    None => debug!(line, "Dropping incomplete Device/IP pair"),
                }
            }
            continue;
        }

        if let Some(caps) = PROMPT_RE.captures(line) {
            if let (Some(ip), Some(name)) = (caps.get(1), pending.take()) {
                names.insert(ip.as_str().to_string(), name);
            }
            continue;
        }

        if line.starts_with("PS ") || PING_CHROME.iter().any(|chrome| line.contains(chrome)) {
            continue;
        }

        if let Some((offset, ip)) = find_ipv4_with_offset(line) {
            if let Some(label) = accept_device_label(&line[..offset]) {
                names.entry(ip.to_string()).or_insert(label);
            }
        }
    }

    names
}

/// Pass 2: target/loss pairing.
///
/// A target line replaces any unconsumed target; a loss line with no pending
/// target is ignored. Returns the outcomes and whether any loss line was seen.
pub fn reconstruct_outcomes(
    lines: &[&str],
    names: &HashMap<String, String>,
) -> (Vec<PingOutcome>, bool) {
    let mut outcomes = Vec::new();
    let mut current_ip: Option<&str> = None;
    let mut saw_loss_line = false;

    for line in lines {
        if let Some((dialect, ip)) = target_of(line) {
            if let Some(orphan) = current_ip.replace(ip) {
                debug!(ip = orphan, dialect, "Target line without loss summary");
            }
        }

        let Some((dialect, loss)) = loss_of(line) else {
            continue;
        };
        saw_loss_line = true;

        let Some(ip) = current_ip.take() else {
            debug!(line, dialect, "Loss summary without target line");
            continue;
        };
        match PingOutcome::new(ip, loss, names.get(ip).cloned()) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => debug!(ip, dialect, error = %e, "Skipping ping block"),
        }
    }

    (outcomes, saw_loss_line)
}

/// Target address of `line` and the name of the dialect that recognized it.
fn target_of(line: &str) -> Option<(&'static str, &str)> {
    PING_DIALECTS
        .iter()
        .find_map(|d| d.target_ip(line).map(|ip| (d.name, ip)))
}

/// Loss percentage of `line` and the name of the dialect that recognized it.
fn loss_of(line: &str) -> Option<(&'static str, u8)> {
    PING_DIALECTS
        .iter()
        .find_map(|d| d.loss_percent(line).map(|loss| (d.name, loss)))
}

/// Extracts the loss percentage of a single ping run's output, if the run
/// printed a recognizable summary.
pub fn loss_percent_of(output: &str) -> Option<u8> {
    output.lines().find_map(|line| loss_of(line).map(|(_, loss)| loss))
}
