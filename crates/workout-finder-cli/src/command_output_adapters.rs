// SPDX-License-Identifier: Apache-2.0

use crate::{CliError, OutputMode};
use serde_json::Value;
use std::io::Write;
use workout_finder_core::canonical;

/// Writes a command result: canonical single-line JSON with `--json`,
/// pretty-printed JSON otherwise.
pub(crate) fn emit_ok(
    out: &mut dyn Write,
    output_mode: OutputMode,
    payload: &Value,
) -> Result<(), CliError> {
    let bytes = if output_mode.json {
        canonical::stable_json_bytes(payload)
    } else {
        serde_json::to_vec_pretty(payload)
    }
    .map_err(|e| CliError::internal(e.to_string()))?;
    out.write_all(&bytes)
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|e| CliError::internal(format!("failed to write output: {e}")))
}
