use crate::commands::{collect_record, DEFAULT_TEMPLATE};
use crate::script::render::render_file;
use crate::script::report::{self, Outcome};
use clap::ArgMatches;
use log::{error, info};
use std::fs;

/// Writes the generated script without running it.
pub fn main(cmd: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    let record = collect_record(cmd)?;
    let template = cmd.value_of("template").unwrap_or(DEFAULT_TEMPLATE);
    let script = match render_file(template, &record) {
        Ok(script) => script,
        Err(e) => {
            error!("{}", e);
            report::display(&Outcome::render_failed());
            return Ok(false);
        }
    };
    match cmd.value_of("output") {
        Some(path) => {
            fs::write(path, &script)?;
            info!("Generated script written to {}", path);
        }
        None => print!("{}", script),
    }
    Ok(true)
}
