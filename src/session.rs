//! One render-then-execute cycle per request.

use crate::script::execute::{execute, ProcessRunner};
use crate::script::{mode::Mode, render, report::Outcome};
use crate::utils::config::Request;
use log::{error, info};
use std::path::PathBuf;

pub struct Session {
    pub template: PathBuf,
    pub runner: Box<dyn ProcessRunner>,
}

impl Session {
    pub fn new(template: PathBuf, runner: Box<dyn ProcessRunner>) -> Session {
        Session { template, runner }
    }

    /// Renders the template for `request` and runs it. A render failure
    /// returns before anything is spawned.
    pub fn handle(&self, request: &Request) -> Outcome {
        let script = match render::render_file(&self.template, &request.inputs) {
            Ok(script) => script,
            Err(e) => {
                error!("{}", e);
                return Outcome::render_failed();
            }
        };
        let mode = Mode::resolve(request.is_client, request.is_reset);
        let outcome = Outcome::from_execution(execute(self.runner.as_ref(), &script, mode), mode);
        info!("{}", outcome.text);
        outcome
    }
}
