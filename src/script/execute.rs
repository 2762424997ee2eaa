use crate::script::error::ScriptError;
use crate::script::mode::Mode;
use log::{debug, error, info, warn};
use std::time::Duration;
use subprocess::{Popen, PopenConfig, Redirection};

pub const DEFAULT_SHELL: &str = "/bin/bash";

/// What came back from one command line. `error` is set for anything that
/// counts as a failed run; the streams are only kept for the log.
#[derive(Debug, Default)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub error: Option<ScriptError>,
}

pub trait ProcessRunner {
    fn run(&self, command_line: &str) -> RunOutput;
}

/// Hands the command line to `<shell> -c`.
pub struct ShellRunner {
    pub shell: String,
    pub timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(shell: &str, timeout: Option<Duration>) -> ShellRunner {
        ShellRunner {
            shell: shell.to_owned(),
            timeout,
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        ShellRunner::new(DEFAULT_SHELL, None)
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str) -> RunOutput {
        let mut p = match Popen::create(
            &[self.shell.as_str(), "-c", command_line],
            PopenConfig {
                stdout: Redirection::Pipe,
                stderr: Redirection::Pipe,
                ..Default::default()
            },
        ) {
            Ok(p) => p,
            Err(e) => {
                return RunOutput {
                    error: Some(ScriptError::ExecutionFailed(format!(
                        "failed to start {}: {}",
                        self.shell, e
                    ))),
                    ..Default::default()
                }
            }
        };

        let mut comm = p.communicate_start(None);
        if let Some(limit) = self.timeout {
            comm = comm.limit_time(limit);
        }
        let (out, err) = match comm.read_string() {
            Ok(streams) => streams,
            Err(e) => {
                // still running past the limit, or the pipes broke
                let _ = p.kill();
                let _ = p.wait();
                return RunOutput {
                    error: Some(ScriptError::ExecutionFailed(format!(
                        "script did not finish: {}",
                        e
                    ))),
                    ..Default::default()
                };
            }
        };

        let mut output = RunOutput {
            stdout: out.unwrap_or_default(),
            stderr: err.unwrap_or_default(),
            error: None,
        };
        match p.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                output.error = Some(ScriptError::ExecutionFailed(format!(
                    "script exited with {:?}",
                    status
                )))
            }
            Err(e) => output.error = Some(ScriptError::ExecutionFailed(e.to_string())),
        }
        output
    }
}

/// Script text plus the mode token. One trailing line break is dropped so
/// the token stays on the last line of the script.
pub fn command_line(script: &str, mode: Mode) -> String {
    let script = script
        .strip_suffix("\r\n")
        .or_else(|| script.strip_suffix('\n'))
        .unwrap_or(script);
    format!("{}{}", script, mode.suffix())
}

/// Runs `script` with the mode token appended and reports whether it worked.
/// Output is logged, never inspected.
pub fn execute(runner: &dyn ProcessRunner, script: &str, mode: Mode) -> bool {
    info!("Executing generated script in {} mode", mode);
    let output = runner.run(&command_line(script, mode));
    debug!("stdout: {}", output.stdout);
    match output.error {
        Some(e) => {
            warn!("stderr: {}", output.stderr);
            error!("error: {}", e);
            false
        }
        None => {
            debug!("stderr: {}", output.stderr);
            true
        }
    }
}
