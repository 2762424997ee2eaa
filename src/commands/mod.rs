use crate::script::error::ScriptError;
use crate::utils::config::{ConfigurationRecord, FIELDS};
use clap::ArgMatches;

pub mod render;
pub mod run;

pub const DEFAULT_TEMPLATE: &str = "script.mst";

/// Builds the record from `--config` first, then lets per-field flags override it.
pub fn collect_record(cmd: &ArgMatches) -> Result<ConfigurationRecord, ScriptError> {
    let mut record = match cmd.value_of("config") {
        Some(path) => ConfigurationRecord::from_file(path)?,
        None => ConfigurationRecord::default(),
    };
    for (field, _) in FIELDS {
        if let Some(value) = cmd.value_of(field) {
            record.set(field, value);
        }
    }
    Ok(record)
}
