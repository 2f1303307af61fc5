//! Plugin output text.
//!
//! ```text
//! DISK WARNING - /var is 91% full | '/var'=91%;90;95;0;100
//! /var: 91% used
//! /tmp: 12% used | '/tmp'=12%;90;95;0;100
//! ```
//!
//! The first line carries the status text and optionally performance data
//! after `|`. Following lines are long output; once a `|` appears in long
//! output, the rest of the text is performance data.

use crate::types::ServiceState;
use perfdata::{PerformanceSet, RejectedToken};
use std::fmt;

/// Everything a check writes to stdout, plus the state it exits with.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginOutput {
    pub state: ServiceState,
    pub status_text: String,
    pub long_output: Vec<String>,
    pub perfdata: PerformanceSet,
}

/// Result of [`PluginOutput::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOutput {
    pub output: PluginOutput,
    /// Performance tokens that were skipped.
    pub rejected: Vec<RejectedToken>,
}

impl PluginOutput {
    pub fn new(state: ServiceState, status_text: impl Into<String>) -> Self {
        Self {
            state,
            status_text: status_text.into(),
            long_output: Vec::new(),
            perfdata: PerformanceSet::new(),
        }
    }

    pub fn with_long_output(mut self, line: impl Into<String>) -> Self {
        self.long_output.push(line.into());
        self
    }

    pub fn with_perfdata(mut self, perfdata: PerformanceSet) -> Self {
        self.perfdata = perfdata;
        self
    }

    /// Parse text produced by a plugin that exited with `state`.
    pub fn parse(text: &str, state: ServiceState) -> ParsedOutput {
        let mut lines = text.lines();
        let first = lines.next().unwrap_or_default();

        let (status_text, mut perf_text) = match first.split_once('|') {
            Some((status, perf)) => (status.trim_end(), perf.trim().to_string()),
            None => (first.trim_end(), String::new()),
        };

        let mut long_output = Vec::new();
        let mut in_perfdata = false;
        for line in lines {
            if in_perfdata {
                perf_text.push(' ');
                perf_text.push_str(line.trim());
                continue;
            }
            match line.split_once('|') {
                Some((text, perf)) => {
                    if !text.trim().is_empty() {
                        long_output.push(text.trim_end().to_string());
                    }
                    perf_text.push(' ');
                    perf_text.push_str(perf.trim());
                    in_perfdata = true;
                }
                None => long_output.push(line.to_string()),
            }
        }

        let (perfdata, rejected) = PerformanceSet::parse_line_with_rejects(&perf_text);
        ParsedOutput {
            output: Self {
                state,
                status_text: status_text.to_string(),
                long_output,
                perfdata,
            },
            rejected,
        }
    }

    /// Write the output to stdout and exit with the state's exit code.
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self);
        std::process::exit(self.state.exit_code())
    }
}

impl fmt::Display for PluginOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_text)?;
        if !self.perfdata.is_empty() {
            write!(f, " | {}", self.perfdata)?;
        }
        for line in &self.long_output {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}
