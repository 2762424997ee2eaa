use std::fmt::Display;

/// What the generated script is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Firewall,
    Client,
    Reset,
}

impl Mode {
    /// Reset wins over client; firewall is the fallback.
    pub fn resolve(is_client: bool, is_reset: bool) -> Mode {
        if is_reset {
            Mode::Reset
        } else if is_client {
            Mode::Client
        } else {
            Mode::Firewall
        }
    }

    /// Token appended to the script text, leading space included.
    pub fn suffix(&self) -> &'static str {
        match self {
            Mode::Firewall => " firewall",
            Mode::Client => " client",
            Mode::Reset => " reset",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix().trim_start())
    }
}
