//! Terminal outcomes of a parse.
//!
//! Every variant ends the current parse: no further tokens are scanned and no
//! further events fire once one of these is returned. Help and version
//! requests travel the same path but report a successful exit code, so the
//! embedding binary decides how to print and exit.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A bound action's required positional slot had no token.
    #[error("missing required argument `{0}'")]
    MissingArgument(String),

    /// A required-value option ran out of tokens or hit another option.
    #[error("{}", option_missing_message(.flags, .got.as_deref()))]
    OptionMissingArgument { flags: String, got: Option<String> },

    /// An option-shaped token matched no declared option in scope.
    #[error("unknown option `{token}'")]
    UnknownOption {
        token: String,
        suggestion: Option<String>,
    },

    /// A value coercer rejected the supplied value.
    #[error("option `{flags}' argument `{value}' is invalid: {reason}")]
    InvalidOptionValue {
        flags: String,
        value: String,
        reason: String,
    },

    /// `action` was called on a command with no parent to listen on.
    #[error("command `{0}' has no parent command to bind an action on")]
    DetachedCommand(String),

    /// A user action returned an error.
    #[error("command `{command}' failed: {source}")]
    Action {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    /// `-h, --help` was given; carries the rendered help text.
    #[error("{0}")]
    HelpRequested(String),

    /// `-v, --version` was given; carries the version string.
    #[error("{0}")]
    VersionRequested(String),
}

fn option_missing_message(flags: &str, got: Option<&str>) -> String {
    match got {
        Some(got) => format!("option `{}' argument missing, got `{}'", flags, got),
        None => format!("option `{}' argument missing", flags),
    }
}

impl Error {
    /// Process exit code for this outcome: 0 for help/version, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// True for help and version requests.
    pub fn is_success(&self) -> bool {
        matches!(self, Error::HelpRequested(_) | Error::VersionRequested(_))
    }

    /// "Did you mean" hint for unknown options.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Error::UnknownOption { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}
