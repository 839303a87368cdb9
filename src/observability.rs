//! This module provides the logging hooks for the antijoin engines.
//!
//! The engines only emit through the `log` facade. Applications that do not
//! install a logger of their own can call [`init_logging`], which wires up
//! `env_logger` with a compact `[LEVEL] message` format.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Once;

use log::LevelFilter;

use crate::config::NullValuePolicy;
use crate::error::AntijoinError;
use crate::types::AntijoinResult;

static INIT_LOGGER: Once = Once::new();

/// Installs a global `env_logger` at `Info` level, optionally appending to
/// `log_file` instead of stderr.
///
/// Returns `Ok(true)` when this call installed the logger. Once a logger is in
/// place, later calls return `Ok(false)` without touching `log_file`. A call
/// that cannot open `log_file` fails with `Io` and leaves the next call free
/// to try again.
pub fn init_logging(log_file: Option<&str>) -> Result<bool, AntijoinError> {
    if INIT_LOGGER.is_completed() {
        return Ok(false);
    }
    let target = log_file.map(open_log_file).transpose()?;

    let mut installed = false;
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        // Fails when the host application already set a logger.
        installed = builder.try_init().is_ok();
    });
    Ok(installed)
}

fn open_log_file(path: &str) -> Result<File, AntijoinError> {
    Ok(OpenOptions::new().append(true).create(true).open(path)?)
}

/// Logs the per-call summary of a list-semantics run.
pub(crate) fn log_stats<L, R>(
    result: &AntijoinResult<L, R>,
    null_policy: NullValuePolicy,
    level: log::Level,
) {
    if !log::log_enabled!(level) {
        return;
    }
    let stats = result.stats();
    log::log!(
        level,
        "antijoin ({}): left_rows={} right_rows={} | left_complement={} joined_pairs={} right_complement={} | null_keys left={} right={} retained left={} right={} | right_duplicates_overwritten={}",
        null_policy,
        stats.left_rows,
        stats.right_rows,
        result.left_complement().len(),
        result.joined_pairs().len(),
        result.right_complement().len(),
        stats.left_null_keys,
        stats.right_null_keys,
        stats.nulls_retained_left,
        stats.nulls_retained_right,
        stats.right_duplicates_overwritten,
    );
}
