//! Building blocks for Nagios-compatible check plugins.
//!
//! A [`Resource`] measures something and returns [`Metric`]s. The [`Runner`]
//! judges each metric against its [`Threshold`](thresholds::Threshold),
//! merges the verdicts into a [`ServiceState`] and renders the
//! [`PluginOutput`] the monitoring controller reads from stdout.
//!
//! # Example
//!
//! ```no_run
//! use plugin::{Metric, Resource, Runner};
//! use thresholds::Threshold;
//!
//! struct Load;
//!
//! impl Resource for Load {
//!     fn name(&self) -> &str {
//!         "load"
//!     }
//!
//!     fn probe(&self) -> common::Result<Vec<Metric>> {
//!         let threshold = Threshold::from_specs(Some("5"), Some("10"))?;
//!         Ok(vec![Metric::new("load1", 0.42).with_threshold(threshold)])
//!     }
//! }
//!
//! Runner::new().run(&Load).print_and_exit();
//! ```

pub mod check;
pub mod config;
pub mod message;
pub mod output;
pub mod types;

pub use check::{Check, Evaluation, Metric, Resource, Runner};
pub use config::{ConfigError, MetricConfig, ThresholdConfig};
pub use message::Message;
pub use output::{ParsedOutput, PluginOutput};
pub use types::ServiceState;
