//! Performance data codec for monitoring plugins.
//!
//! A [`PerformanceDatum`] is one `label=value[uom];warn;crit;min;max` token;
//! a [`PerformanceSet`] is the space-separated list of tokens a plugin prints
//! after the `|` of its status line.
//!
//! ```
//! use perfdata::{PerformanceDatum, PerformanceSet, Uom};
//!
//! let datum = PerformanceDatum::parse("'disk free'=512MB;1000;500").unwrap();
//! assert_eq!(datum.label(), "disk free");
//! assert_eq!(datum.uom(), &Uom::Megabytes);
//!
//! let set = PerformanceSet::parse_line("a=1 b=2;3;4 c=5%");
//! assert_eq!(set.len(), 3);
//! ```

pub mod datum;
pub mod error;
pub mod set;
pub mod uom;

pub use datum::PerformanceDatum;
pub use error::{Field, PerformanceError};
pub use set::{PerformanceSet, RejectedToken};
pub use uom::Uom;
