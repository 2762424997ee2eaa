use crate::commands::{collect_record, DEFAULT_TEMPLATE};
use crate::script::execute::{ShellRunner, DEFAULT_SHELL};
use crate::script::report;
use crate::session::Session;
use crate::utils::{config::Request, tools::verify_config};
use clap::ArgMatches;
use log::{debug, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Turns the subcommand and its flags into the collector's request.
pub fn build_request(name: &str, cmd: &ArgMatches) -> Result<Request, Box<dyn std::error::Error>> {
    let (is_client, is_reset) = match name {
        "client" => (true, false),
        "reset" => (false, true),
        "run" => (cmd.is_present("client"), cmd.is_present("reset")),
        _ => (false, false),
    };
    Ok(Request {
        inputs: collect_record(cmd)?,
        is_client,
        is_reset,
    })
}

pub fn main(name: &str, cmd: &ArgMatches) -> Result<bool, Box<dyn std::error::Error>> {
    let request = build_request(name, cmd)?;
    debug!(
        "Request: client={} reset={}",
        request.is_client, request.is_reset
    );
    if !cmd.is_present("yes") && !verify_config(&request.inputs)? {
        warn!("Configuration rejected, nothing was executed");
        return Ok(false);
    }

    let timeout = match cmd.value_of("timeout") {
        Some(secs) => Some(Duration::from_secs(secs.parse::<u64>()?)),
        None => None,
    };
    let runner = ShellRunner::new(cmd.value_of("shell").unwrap_or(DEFAULT_SHELL), timeout);
    let session = Session::new(
        PathBuf::from(cmd.value_of("template").unwrap_or(DEFAULT_TEMPLATE)),
        Box::new(runner),
    );

    let outcome = session.handle(&request);
    report::display(&outcome);
    Ok(outcome.code)
}
