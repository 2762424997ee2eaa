use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("template unavailable: {0}")]
    TemplateUnavailable(String),
    #[error("script execution failed: {0}")]
    ExecutionFailed(String),
    #[error("bad configuration: {0}")]
    Config(String),
}
