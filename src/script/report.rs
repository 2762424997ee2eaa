use crate::script::mode::Mode;

pub const RENDER_FAILED: &str = "Generating the script failed.";
pub const EXECUTE_FAILED: &str = "Something went wrong with executing the script.";
pub const CLIENT_DONE: &str = "Client machine set up successfully.";
pub const RESET_DONE: &str = "Firewall reset successfully.";
pub const FIREWALL_DONE: &str = "Firewall set up successfully.";

/// What the user gets to see after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: bool,
    pub text: String,
}

impl Outcome {
    fn new(code: bool, text: &str) -> Outcome {
        Outcome {
            code,
            text: text.to_owned(),
        }
    }

    pub fn render_failed() -> Outcome {
        Outcome::new(false, RENDER_FAILED)
    }

    /// Only meaningful once rendering worked.
    pub fn from_execution(exec_success: bool, mode: Mode) -> Outcome {
        if !exec_success {
            return Outcome::new(false, EXECUTE_FAILED);
        }
        match mode {
            Mode::Client => Outcome::new(true, CLIENT_DONE),
            Mode::Reset => Outcome::new(true, RESET_DONE),
            Mode::Firewall => Outcome::new(true, FIREWALL_DONE),
        }
    }
}

/// Terminal stand-in for the result dialog.
pub fn display(outcome: &Outcome) {
    if outcome.code {
        println!("Success! {}", outcome.text);
    } else {
        println!("Error! {}", outcome.text);
    }
}
