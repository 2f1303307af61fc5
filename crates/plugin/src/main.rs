//! perfdata-lint: check the performance data in plugin output read from stdin.
//!
//! Prints the output with its performance data re-rendered in canonical form.
//! Exits UNKNOWN when any performance token is malformed.

use plugin::{PluginOutput, ServiceState};
use std::io::Read;

fn main() {
    common::logging::init();

    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        PluginOutput::new(
            ServiceState::Unknown,
            format!("PERFDATA UNKNOWN - failed to read stdin: {}", e),
        )
        .print_and_exit();
    }

    let parsed = PluginOutput::parse(&text, ServiceState::Ok);
    for reject in &parsed.rejected {
        tracing::warn!(token = %reject.token, error = %reject.error, "malformed performance data");
    }

    let state = if parsed.rejected.is_empty() {
        ServiceState::Ok
    } else {
        ServiceState::Unknown
    };
    tracing::info!(
        data = parsed.output.perfdata.len(),
        rejected = parsed.rejected.len(),
        "performance data checked"
    );

    PluginOutput {
        state,
        ..parsed.output
    }
    .print_and_exit();
}
