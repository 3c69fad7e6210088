//! Record and inventory validation.
//!
//! Record constructors already refuse inconsistent values; these functions
//! re-check records that were built or edited elsewhere (for example
//! deserialized from a JSON report) and check the cross-record invariant
//! that node names are unique within one result.
//!
//! # Examples
//!
//! ```
//! use netsift_core::*;
//!
//! let a = DeviceRecord::new("CORE-SW1", "Gi1/0/1").unwrap();
//! let b = DeviceRecord::new("EDGE-SW2", "Gi1/0/2").unwrap();
//! assert!(validate_devices(&[a.clone(), b]).is_empty());
//!
//! // Same node twice violates the aggregation key.
//! let errors = validate_devices(&[a.clone(), a]);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateNode(_))));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::ip::is_ipv4_shape;
use crate::types::{DeviceIp, DeviceRecord, MIN_NODE_NAME_LEN};

/// Record validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Normalized node name is shorter than the minimum length.
    #[error("node name too short: {0:?}")]
    NodeNameTooShort(String),
    /// Interface name is blank (payload is the node name).
    #[error("empty interface name for node {0}")]
    EmptyInterfaceName(String),
    /// A device record has no interfaces at all.
    #[error("device {0} has no interfaces")]
    NoInterfaces(String),
    /// Display and port lists disagree in length.
    #[error("device {0} has mismatched interface and port lists")]
    PortListMismatch(String),
    /// Value is not a dotted-quad address.
    #[error("invalid IPv4 address: {0}")]
    InvalidIp(String),
    /// Loss percentage outside 0..=100.
    #[error("loss percentage out of range: {0}")]
    LossOutOfRange(u32),
    /// Two records in one result share a node name.
    #[error("duplicate node in result: {0}")]
    DuplicateNode(String),
}

/// Validates a single device record.
///
/// # Examples
///
/// ```
/// use netsift_core::*;
///
/// let mut record = DeviceRecord::new("CORE-SW1", "Gi1/0/1").unwrap();
/// assert!(validate_device(&record).is_empty());
///
/// record.interfaces.clear();
/// record.ports.clear();
/// assert_eq!(
///     validate_device(&record),
///     vec![ValidationError::NoInterfaces("CORE-SW1".into())]
/// );
/// ```
pub fn validate_device(record: &DeviceRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.node_name.chars().count() < MIN_NODE_NAME_LEN {
        errors.push(ValidationError::NodeNameTooShort(record.node_name.clone()));
    }
    if record.interfaces.is_empty() {
        errors.push(ValidationError::NoInterfaces(record.node_name.clone()));
    }
    if record.interfaces.iter().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyInterfaceName(record.node_name.clone()));
    }
    if record.interfaces.len() != record.ports.len() {
        errors.push(ValidationError::PortListMismatch(record.node_name.clone()));
    }
    if let DeviceIp::Known(ip) = &record.ip {
        if !is_ipv4_shape(ip) {
            errors.push(ValidationError::InvalidIp(ip.clone()));
        }
    }

    errors
}

/// Validates a full device result: every record, plus node-name uniqueness.
pub fn validate_devices(records: &[DeviceRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for record in records {
        if !seen.insert(record.node_name.as_str()) {
            errors.push(ValidationError::DuplicateNode(record.node_name.clone()));
        }
        errors.extend(validate_device(record));
    }

    errors
}
