//! Record types produced by the extraction pipelines.
//!
//! Each pipeline returns its own record kind:
//!
//! - [`DeviceRecord`] from interface-down alerts, one per normalized node name.
//! - [`IpResult`] from arbitrary text, one per unique address.
//! - [`PingOutcome`] from ping console output, one per target/loss block.
//!
//! Constructors validate the invariants of each record and return a
//! [`ValidationError`] instead of building an inconsistent value. The types
//! serialize with [`serde`] so reports can be emitted as JSON or YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ip::is_ipv4_shape;
use crate::validate::ValidationError;

/// Minimum length of a normalized node name.
pub const MIN_NODE_NAME_LEN: usize = 3;

/// Minimum length (exclusive) of a device label recovered from the text
/// before an address.
pub const MIN_DEVICE_LABEL_LEN: usize = 2;

/// Text rendered for a device whose address could not be determined.
pub const UNKNOWN_IP_LABEL: &str = "N/A";

/// Address of a device as far as the input revealed it.
///
/// Alert dialects rarely carry the address, so most records stay
/// [`DeviceIp::Unknown`]. The sentinel is a distinct variant so it can never
/// be mistaken for a real address.
///
/// # Examples
///
/// ```
/// use netsift_core::DeviceIp;
///
/// assert_eq!(DeviceIp::default(), DeviceIp::Unknown);
/// assert_eq!(DeviceIp::Unknown.to_string(), "N/A");
/// assert_eq!(DeviceIp::Known("10.0.0.1".into()).as_known(), Some("10.0.0.1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceIp {
    /// No address was present next to the node name.
    #[default]
    Unknown,
    /// Address supplied explicitly by the alert text.
    Known(String),
}

impl DeviceIp {
    /// Returns the address when known.
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(ip) => Some(ip),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for DeviceIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(ip) => f.write_str(ip),
            Self::Unknown => f.write_str(UNKNOWN_IP_LABEL),
        }
    }
}

/// A device mentioned by one or more interface-down alerts.
///
/// Records are keyed by `node_name`; the aggregator appends to an existing
/// record whenever the same node shows up again. Repeated alerts for the same
/// interface are kept, so `interfaces` may contain duplicates.
///
/// # Examples
///
/// ```
/// use netsift_core::DeviceRecord;
///
/// let mut record = DeviceRecord::new("AU-TEST-DSW01", "Port-channel10").unwrap();
/// record.push_interface("Gi1/0/1");
/// assert_eq!(record.interface_count(), 2);
/// assert_eq!(record.ports, record.interfaces);
///
/// assert!(DeviceRecord::new("AB", "Gi1/0/1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Normalized node identifier (uppercase, hyphen-joined).
    pub node_name: String,
    /// Address of the node, if the input supplied one.
    #[serde(default)]
    pub ip: DeviceIp,
    /// Interface names in the order they were first reported.
    pub interfaces: Vec<String>,
    /// Names fed to the status-filter command; mirrors `interfaces`.
    pub ports: Vec<String>,
}

impl DeviceRecord {
    /// Creates a record holding its first interface.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NodeNameTooShort`] when `node_name` has
    /// fewer than [`MIN_NODE_NAME_LEN`] characters, or
    /// [`ValidationError::EmptyInterfaceName`] for a blank interface.
    pub fn new(node_name: &str, interface: &str) -> Result<Self, ValidationError> {
        let node_name = node_name.trim();
        if node_name.chars().count() < MIN_NODE_NAME_LEN {
            return Err(ValidationError::NodeNameTooShort(node_name.to_string()));
        }
        let interface = interface.trim();
        if interface.is_empty() {
            return Err(ValidationError::EmptyInterfaceName(node_name.to_string()));
        }

        Ok(Self {
            node_name: node_name.to_string(),
            ip: DeviceIp::Unknown,
            interfaces: vec![interface.to_string()],
            ports: vec![interface.to_string()],
        })
    }

    /// Sets a known address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIp`] if `ip` is not dotted-quad shaped.
    pub fn with_ip(mut self, ip: &str) -> Result<Self, ValidationError> {
        if !is_ipv4_shape(ip) {
            return Err(ValidationError::InvalidIp(ip.to_string()));
        }
        self.ip = DeviceIp::Known(ip.to_string());
        Ok(self)
    }

    /// Appends an interface to both the display and port lists.
    pub fn push_interface(&mut self, interface: &str) {
        let interface = interface.trim();
        self.interfaces.push(interface.to_string());
        self.ports.push(interface.to_string());
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }
}

/// One unique address pulled from free text.
///
/// # Examples
///
/// ```
/// use netsift_core::IpResult;
///
/// let plain = IpResult::new("10.0.0.1").unwrap();
/// assert!(plain.device.is_none());
///
/// let labelled = IpResult::new("10.0.0.2").unwrap().with_device("CORE-SW1");
/// assert_eq!(labelled.device.as_deref(), Some("CORE-SW1"));
///
/// // Labels of two characters or fewer are not trusted.
/// let short = IpResult::new("10.0.0.3").unwrap().with_device("AB");
/// assert!(short.device.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpResult {
    pub ip: String,
    /// Label that preceded the address on its source line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl IpResult {
    /// Creates a result without a device label.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIp`] if `ip` is not dotted-quad shaped.
    pub fn new(ip: &str) -> Result<Self, ValidationError> {
        if !is_ipv4_shape(ip) {
            return Err(ValidationError::InvalidIp(ip.to_string()));
        }
        Ok(Self {
            ip: ip.to_string(),
            device: None,
        })
    }

    /// Attaches a device label if it is long enough to be trusted.
    pub fn with_device(mut self, label: &str) -> Self {
        self.device = accept_device_label(label);
        self
    }
}

/// Cleans a label taken from the text before an address: trims it, strips
/// one trailing hyphen, and keeps it only if it is longer than
/// [`MIN_DEVICE_LABEL_LEN`] characters.
///
/// # Examples
///
/// ```
/// use netsift_core::accept_device_label;
///
/// assert_eq!(accept_device_label(" AU-JIM-EPCR-WAP16-"), Some("AU-JIM-EPCR-WAP16".to_string()));
/// assert_eq!(accept_device_label("SW -"), None);
/// assert_eq!(accept_device_label(""), None);
/// ```
pub fn accept_device_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let label = trimmed.strip_suffix('-').unwrap_or(trimmed).trim();
    (label.chars().count() > MIN_DEVICE_LABEL_LEN).then(|| label.to_string())
}

/// Reachability classification of a pinged address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PingStatus {
    Up,
    Down,
}

impl PingStatus {
    /// Classifies a loss percentage.
    ///
    /// Only a loss of exactly zero is up. Partial loss counts as down: a
    /// flaky link is reported as a problem rather than hidden behind a
    /// threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsift_core::PingStatus;
    ///
    /// assert_eq!(PingStatus::from_loss(0), PingStatus::Up);
    /// assert_eq!(PingStatus::from_loss(25), PingStatus::Down);
    /// assert_eq!(PingStatus::from_loss(100), PingStatus::Down);
    /// ```
    pub fn from_loss(loss_percent: u8) -> Self {
        if loss_percent == 0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

impl fmt::Display for PingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Result of one ping block found in console output.
///
/// # Examples
///
/// ```
/// use netsift_core::{PingOutcome, PingStatus};
///
/// let outcome = PingOutcome::new("10.0.0.2", 100, None).unwrap();
/// assert_eq!(outcome.status, PingStatus::Down);
/// assert_eq!(outcome.label(), "10.0.0.2");
///
/// let named = PingOutcome::new("10.0.0.1", 0, Some("CORE-SW1".into())).unwrap();
/// assert_eq!(named.label(), "CORE-SW1 - 10.0.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingOutcome {
    pub ip: String,
    pub loss_percent: u8,
    pub status: PingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl PingOutcome {
    /// Creates an outcome, deriving `status` from `loss_percent`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIp`] for a malformed address or
    /// [`ValidationError::LossOutOfRange`] for a percentage above 100.
    pub fn new(ip: &str, loss_percent: u8, device: Option<String>) -> Result<Self, ValidationError> {
        if !is_ipv4_shape(ip) {
            return Err(ValidationError::InvalidIp(ip.to_string()));
        }
        if loss_percent > 100 {
            return Err(ValidationError::LossOutOfRange(u32::from(loss_percent)));
        }
        Ok(Self {
            ip: ip.to_string(),
            loss_percent,
            status: PingStatus::from_loss(loss_percent),
            device,
        })
    }

    pub fn is_up(&self) -> bool {
        self.status == PingStatus::Up
    }

    /// Returns `device - ip` when the device is known, else the bare address.
    pub fn label(&self) -> String {
        match &self.device {
            Some(device) => format!("{device} - {}", self.ip),
            None => self.ip.clone(),
        }
    }
}
