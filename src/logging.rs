// src/logging.rs
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::LevelFilter;

use crate::error::{BamcoverError, Result};

/// Timestamp format of the log lines, e.g. `10/16/2026 14:03:59`.
const LOG_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Route the `log` macros into a freshly truncated `path`.
///
/// Debug and above are written unless `RUST_LOG` says otherwise.
/// Called once by the binary; library code only emits.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| BamcoverError::Log {
        path: path.to_path_buf(),
        source,
    })?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(format_log)
        .try_init()
        .map_err(|e| BamcoverError::LoggerInstalled {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn format_log(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    let ts = chrono::Local::now().format(LOG_TIME_FORMAT);
    writeln!(buf, "{ts} {} {}", record.level(), record.args())
}

/// The full command line, the way the user typed it.
/// Arguments that are not valid UTF-8 are shown lossily.
pub fn command_line() -> String {
    join_args(std::env::args_os())
}

fn join_args<I: IntoIterator<Item = OsString>>(args: I) -> String {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect::<Vec<String>>()
        .join(" ")
}
