//! Range and threshold evaluation for monitoring plugins.
//!
//! A [`Range`] is parsed from the compact syntax used by Nagios-compatible
//! plugins for their `--warning` and `--critical` options. A [`Threshold`]
//! pairs a warning range with a critical range and reduces a measured value
//! to a [`Severity`].
//!
//! # Example
//!
//! ```
//! use thresholds::{Range, Severity, Threshold};
//!
//! let range: Range = "@10:20".parse().unwrap();
//! assert!(range.check_value(15.0));
//!
//! let threshold = Threshold::from_specs(Some("80"), Some("90")).unwrap();
//! assert_eq!(threshold.get_status(95.0), Severity::Critical);
//! assert_eq!(threshold.get_status(85.0), Severity::Warning);
//! ```
//!
//! Everything here is an immutable value type and safe to share between
//! threads.

pub mod error;
pub mod range;
pub mod threshold;
pub mod types;

pub use error::RangeError;
pub use range::{IntoRange, Range};
pub use threshold::Threshold;
pub use types::Severity;
