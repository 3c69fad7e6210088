//! Interface-down alert parsing.
//!
//! Alert text arrives in several dialects, often mixed in one paste and
//! sometimes run together on a single line:
//!
//! - `Interface: Gi1/0/1 on Node: AU-SYD-DSW01 is Down.`
//! - `Interfaces: Port-channel10 an Node: au mel core 02 is Down`
//! - `Port 14 on Node: BMA-VT-BPV-COM2-DSW2-3 IS Down`
//! - `Pert 13 an Node: SITE-A 31s Down` (typos included)
//!
//! Each dialect is a [`DialectRule`]: a pattern for the part before
//! `on Node:` plus a rule for how the captured interface is rendered. The
//! rules are compiled into one alternation that shares a common node tail,
//! and the whole buffer is scanned once, left to right. At a given position
//! the first rule that matches wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SiftError};
use netsift_core::MIN_NODE_NAME_LEN;

/// How the interface capture of a dialect becomes an interface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceForm {
    /// Use the capture as-is (trimmed). Remediation commands must echo the
    /// name exactly as the device reports it.
    Verbatim,
    /// Render as `Port <capture>`; also repairs the `Pert` typo.
    PortPrefixed,
}

impl InterfaceForm {
    fn render(self, capture: &str) -> String {
        match self {
            Self::Verbatim => capture.to_string(),
            Self::PortPrefixed => format!("Port {capture}"),
        }
    }
}

/// One alert dialect.
///
/// `pattern` matches everything before the `on Node:` divider and must
/// contain exactly one `(?P<iface>...)` group.
#[derive(Debug, Clone)]
pub struct DialectRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub interface: InterfaceForm,
}

/// Built-in dialects in priority order.
pub const DIALECT_RULES: &[DialectRule] = &[
    DialectRule {
        name: "interface-label",
        pattern: r"(?:Interfa[cs]es?|Intfs?)\s*:\s*(?P<iface>.+?)",
        interface: InterfaceForm::Verbatim,
    },
    DialectRule {
        name: "port-number",
        pattern: r"\b(?:Port|Pert)\s+(?P<iface>\d+)",
        interface: InterfaceForm::PortPrefixed,
    },
    DialectRule {
        name: "port-name",
        pattern: r"\b(?:Port|Pert)\s+(?P<iface>.+?)",
        interface: InterfaceForm::PortPrefixed,
    },
];

/// Shared tail: divider, node span, optional address, terminator.
///
/// The node span is non-greedy and ends before `is Down`, a line break, a
/// period or the end of input. `is` must start a word so that typos such as
/// `3is Down` stay inside the span and are stripped during normalization.
const NODE_TAIL: &str = r"\s+(?:on|an)\s+Node:\s*(?P<node>[^\n.]+?)(?:\s*[(\-]\s*(?P<ip>\d{1,3}(?:\.\d{1,3}){3})\s*\)?)?\s*(?:\bis\s+Down|[\n.]|$)";

const IFACE_GROUP: &str = "(?P<iface>";

// SAFETY: These regexes are compile-time constants and are validated by tests.
static STATUS_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[- ]+(?:is|an|31s|3is|6is)(?:[- ]+downs?)?$").expect("static regex must compile")
});
static DOWN_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[- ]+downs?$").expect("static regex must compile"));
static TRAILING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,;]+$").expect("static regex must compile"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

static DEFAULT_PARSER: LazyLock<AlertParser> = LazyLock::new(|| {
    AlertParser::with_rules(DIALECT_RULES.to_vec()).expect("built-in dialect rules must compile")
});

/// An `(interface, node)` pair recognized in alert text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceAlert {
    pub interface: String,
    /// Normalized node name.
    pub node_name: String,
    /// Address written next to the node name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Name of the dialect rule that matched.
    pub dialect: &'static str,
}

/// Compiled set of dialect rules.
#[derive(Debug)]
pub struct AlertParser {
    regex: Regex,
    rules: Vec<DialectRule>,
    group_names: Vec<String>,
}

impl AlertParser {
    /// Compiles `rules` into a single scanner.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::InvalidInput`] when a rule lacks its
    /// `(?P<iface>...)` group or the combined pattern does not compile.
    pub fn with_rules(rules: Vec<DialectRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(SiftError::InvalidInput("no dialect rules given".to_string()));
        }

        let mut alternatives = Vec::with_capacity(rules.len());
        let mut group_names = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if rule.pattern.matches(IFACE_GROUP).count() != 1 {
                return Err(SiftError::InvalidInput(format!(
                    "dialect {} must contain exactly one {IFACE_GROUP}...) group",
                    rule.name
                )));
            }
            let group = format!("iface{index}");
            alternatives.push(format!(
                "(?:{})",
                rule.pattern.replace(IFACE_GROUP, &format!("(?P<{group}>"))
            ));
            group_names.push(group);
        }

        let pattern = format!("(?i)(?:{}){NODE_TAIL}", alternatives.join("|"));
        let regex = Regex::new(&pattern)
            .map_err(|e| SiftError::InvalidInput(format!("dialect rules do not compile: {e}")))?;

        Ok(Self {
            regex,
            rules,
            group_names,
        })
    }

    pub fn rules(&self) -> &[DialectRule] {
        &self.rules
    }

    /// Scans `text` and returns every recognized alert in text order.
    ///
    /// Matches whose node name normalizes to fewer than three characters are
    /// dropped.
    pub fn parse(&self, text: &str) -> Vec<InterfaceAlert> {
        let mut alerts = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let matched = self
                .rules
                .iter()
                .zip(&self.group_names)
                .find_map(|(rule, group)| caps.name(group).map(|m| (rule, m.as_str())));
            let Some((rule, raw_interface)) = matched else {
                continue;
            };
            let raw_interface = raw_interface.trim();
            if raw_interface.is_empty() {
                continue;
            }

            let raw_node = caps.name("node").map_or("", |m| m.as_str());
            let Some(node_name) = normalize_node_name(raw_node) else {
                debug!(raw_node, dialect = rule.name, "Discarding alert with short node name");
                continue;
            };

            alerts.push(InterfaceAlert {
                interface: rule.interface.render(raw_interface),
                node_name,
                ip: caps.name("ip").map(|m| m.as_str().to_string()),
                dialect: rule.name,
            });
        }

        alerts
    }
}

/// Parses alert text with the built-in [`DIALECT_RULES`].
///
/// # Examples
///
/// ```
/// use netsift_extract::alert::parse_interface_alerts;
///
/// let alerts = parse_interface_alerts("Pert 14 an Node: SITE-A 31s Down");
/// assert_eq!(alerts.len(), 1);
/// assert_eq!(alerts[0].node_name, "SITE-A");
/// assert_eq!(alerts[0].interface, "Port 14");
/// ```
pub fn parse_interface_alerts(text: &str) -> Vec<InterfaceAlert> {
    DEFAULT_PARSER.parse(text)
}

/// Normalizes a raw node capture.
///
/// Strips trailing punctuation, a trailing status phrase (`is Down`, `an`,
/// `31s Down`, ...), a bare trailing `Down`, then punctuation and hyphens
/// again, joins words with
/// hyphens and upper-cases the result. Returns `None` for names shorter
/// than three characters.
///
/// # Examples
///
/// ```
/// use netsift_extract::alert::normalize_node_name;
///
/// assert_eq!(normalize_node_name("au mel core 02").as_deref(), Some("AU-MEL-CORE-02"));
/// assert_eq!(normalize_node_name("SITE-A 6is-Downs").as_deref(), Some("SITE-A"));
/// assert_eq!(normalize_node_name("AB"), None);
/// ```
pub fn normalize_node_name(raw: &str) -> Option<String> {
    let name = TRAILING_PUNCT_RE.replace(raw.trim(), "");
    let name = STATUS_SUFFIX_RE.replace(name.trim_end(), "");
    let name = DOWN_SUFFIX_RE.replace(&name, "");
    let name = TRAILING_PUNCT_RE.replace(&name, "");
    let name = name.trim_end_matches('-').trim();
    let name = WHITESPACE_RE.replace_all(name, "-").to_uppercase();

    (name.chars().count() >= MIN_NODE_NAME_LEN).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse_interface_alerts(text)
            .into_iter()
            .map(|a| (a.interface, a.node_name))
            .collect()
    }

    #[test]
    fn test_label_dialect_stops_before_is_down() {
        assert_eq!(
            pairs("Interface: Port-channel10 on Node: AU-TEST-DSW01 is Down."),
            vec![("Port-channel10".to_string(), "AU-TEST-DSW01".to_string())]
        );
    }

    #[test]
    fn test_label_typos_are_recognized() {
        for label in ["Interface", "Interfaces", "Interfase", "Intf", "Intfs"] {
            let text = format!("{label}: Gi1/0/1 on Node: CORE-SW1 is Down");
            assert_eq!(pairs(&text).len(), 1, "{label}");
        }
    }

    #[test]
    fn test_port_number_dialect_synthesizes_name() {
        assert_eq!(
            pairs("Port 14 on Node: BMA-VT-BPV-COM2-DSW2-3 IS Down"),
            vec![("Port 14".to_string(), "BMA-VT-BPV-COM2-DSW2-3".to_string())]
        );
    }

    #[test]
    fn test_pert_typo_and_digit_status_typos() {
        assert_eq!(
            pairs("Pert 14 an Node: SITE-A 31s Down"),
            vec![("Port 14".to_string(), "SITE-A".to_string())]
        );
        assert_eq!(
            pairs("Pert 13 an Node: BMA-DSW2-3 3is Down"),
            vec![("Port 13".to_string(), "BMA-DSW2-3".to_string())]
        );
    }

    #[test]
    fn test_port_name_fallback() {
        let alerts = parse_interface_alerts("Port Gi1/0/3 on Node: EDGE-SW4 is Down");
        assert_eq!(alerts[0].interface, "Port Gi1/0/3");
        assert_eq!(alerts[0].dialect, "port-name");
    }

    #[test]
    fn test_multi_word_node_is_hyphenated() {
        assert_eq!(
            pairs("Interfaces: Gi0/1 an Node: au mel core 02 is Down"),
            vec![("Gi0/1".to_string(), "AU-MEL-CORE-02".to_string())]
        );
    }

    #[test]
    fn test_blob_with_periods_yields_every_alert() {
        let blob = "Interface: Gi1/0/1 on Node: SYD-DSW01 is Down. Interface: Gi1/0/2 on Node: SYD-DSW01 is Down. Port 7 on Node: MEL-DSW02.";
        assert_eq!(
            pairs(blob),
            vec![
                ("Gi1/0/1".to_string(), "SYD-DSW01".to_string()),
                ("Gi1/0/2".to_string(), "SYD-DSW01".to_string()),
                ("Port 7".to_string(), "MEL-DSW02".to_string()),
            ]
        );
    }

    #[test]
    fn test_typo_status_before_punctuation_is_stripped() {
        assert_eq!(
            pairs("Pert 14 an Node: SITE-A 31s Down;"),
            vec![("Port 14".to_string(), "SITE-A".to_string())]
        );
        assert_eq!(
            pairs("Port 13 on Node: BMA-DSW2-3 3is Down,"),
            vec![("Port 13".to_string(), "BMA-DSW2-3".to_string())]
        );
        assert_eq!(
            pairs("Interface: Gi1/0/1 on Node: CORE-SW1 IS-Down;"),
            vec![("Gi1/0/1".to_string(), "CORE-SW1".to_string())]
        );
        assert_eq!(normalize_node_name("SITE-ISLAND;").as_deref(), Some("SITE-ISLAND"));
    }

    #[test]
    fn test_short_node_is_rejected() {
        assert!(pairs("Interface: Gi0/1 on Node: AB is Down").is_empty());
    }

    #[test]
    fn test_address_next_to_node_is_captured() {
        let alerts = parse_interface_alerts("Intf: Te1/1/1 on Node: SYD-DSW01 (10.20.30.40) is Down");
        assert_eq!(alerts[0].node_name, "SYD-DSW01");
        assert_eq!(alerts[0].ip.as_deref(), Some("10.20.30.40"));

        let alerts = parse_interface_alerts("Interface: Gi1 on Node: SYD-DSW01-10.1.1.1");
        assert_eq!(alerts[0].node_name, "SYD-DSW01");
        assert_eq!(alerts[0].ip.as_deref(), Some("10.1.1.1"));
    }

    #[test]
    fn test_label_wins_over_port_when_both_could_apply() {
        // The labelled dialect starts earlier, so its verbatim capture is used
        // even though the interface itself looks like the Port dialect.
        let alerts = parse_interface_alerts("Interface: Pert 14 on Node: SITE-B is Down");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].interface, "Pert 14");
        assert_eq!(alerts[0].dialect, "interface-label");
    }

    #[test]
    fn test_word_containing_port_is_not_a_dialect() {
        assert!(pairs("Transport 5 on Node: CORE-SW1 is Down").is_empty());
    }

    #[test]
    fn test_normalization_steps() {
        assert_eq!(normalize_node_name("CORE-SW1 IS-Down").as_deref(), Some("CORE-SW1"));
        assert_eq!(normalize_node_name("CORE-SW1 Downs").as_deref(), Some("CORE-SW1"));
        assert_eq!(normalize_node_name("CORE-SW1;,").as_deref(), Some("CORE-SW1"));
        assert_eq!(normalize_node_name("CORE-SW1--").as_deref(), Some("CORE-SW1"));
        assert_eq!(normalize_node_name("core  sw\t1").as_deref(), Some("CORE-SW-1"));
        // Status words are only stripped at the end of the name.
        assert_eq!(normalize_node_name("SITE-ISLAND").as_deref(), Some("SITE-ISLAND"));
    }

    #[test]
    fn test_rule_without_group_is_rejected() {
        let rules = vec![DialectRule {
            name: "broken",
            pattern: r"Link\s+\S+",
            interface: InterfaceForm::Verbatim,
        }];
        assert!(AlertParser::with_rules(rules).is_err());
    }

    #[test]
    fn test_custom_dialect_can_be_added() {
        let mut rules = DIALECT_RULES.to_vec();
        rules.push(DialectRule {
            name: "link",
            pattern: r"\bLink\s+(?P<iface>\S+)",
            interface: InterfaceForm::Verbatim,
        });
        let parser = AlertParser::with_rules(rules).unwrap();
        assert_eq!(parser.rules().len(), DIALECT_RULES.len() + 1);
        assert_eq!(parser.rules().last().map(|r| r.name), Some("link"));
        let alerts = parser.parse("Link xe-0/0/1 on Node: JNP-EDGE-1 is Down");
        assert_eq!(alerts[0].interface, "xe-0/0/1");
        assert_eq!(alerts[0].dialect, "link");
    }
}
