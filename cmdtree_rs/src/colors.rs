//! Terminal colors for diagnostics written to stderr.

use std::io::IsTerminal;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

// ============================================================================
// Color State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `Never` when `NO_COLOR` is set to anything non-empty, `Auto` otherwise.
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(value) if !value.is_empty() => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }
}

/// Determines if colors should be used; `Auto` follows whether stderr is a terminal.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stderr().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Fatal parse errors - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Offending tokens - BOLD
    pub fn token(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    /// Suggestions, hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painter_disabled() {
        let p = Painter::new(ColorMode::Never);
        assert!(!p.enabled());
        assert_eq!(p.error("error:"), "error:");
        assert_eq!(p.dim("hint"), "hint");
    }

    #[test]
    fn painter_enabled() {
        let p = Painter::new(ColorMode::Always);
        assert_eq!(p.error("error:"), format!("{RED}error:{RESET}"));
        assert_eq!(p.token("-x"), format!("{BOLD}-x{RESET}"));
        assert!(p.dim("hint").starts_with(DIM));
    }
}
