//! Core record types for network-operations text extraction.
//!
//! This crate defines the values shared by every extraction pipeline:
//!
//! - [`find_ipv4`] — the dotted-quad matcher every parser builds on.
//! - [`DeviceRecord`] — a device and the interfaces reported down on it.
//! - [`IpResult`] — a unique address with an optional device label.
//! - [`PingOutcome`] — loss and up/down status for one pinged address.
//! - [`TemplateKey`] — the canned remediation text blocks.
//!
//! Validation ([`validate_device`], [`validate_devices`]) re-checks the
//! record invariants, including node-name uniqueness within a result.
//!
//! # Example
//!
//! ```
//! use netsift_core::*;
//!
//! let mut record = DeviceRecord::new("AU-TEST-DSW01", "Port-channel10").unwrap();
//! record.push_interface("Gi1/0/48");
//! assert_eq!(record.interface_count(), 2);
//! assert!(validate_device(&record).is_empty());
//!
//! let outcome = PingOutcome::new("10.0.0.1", 0, Some("AU-TEST-DSW01".into())).unwrap();
//! assert_eq!(outcome.status, PingStatus::Up);
//! assert_eq!(find_ipv4("reply from 10.0.0.1: bytes=32"), Some("10.0.0.1"));
//! ```

mod ip;
mod templates;
mod types;
mod validate;

pub use ip::{find_ipv4, find_ipv4_with_offset, is_ipv4_shape};
pub use templates::{NO_TEMPLATE_TEXT, TemplateKey, render_template};
pub use types::*;
pub use validate::{ValidationError, validate_device, validate_devices};
