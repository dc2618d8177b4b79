//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Resolved output mode
    pub mode: OutputMode,
    /// Suppress everything except the command's payload
    pub quiet: bool,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(json_flag: bool, no_color_flag: bool, ascii_flag: bool, quiet: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            color: is_tty && !no_color_flag && !no_color_env && !term_is_dumb,
            unicode: !ascii_flag,
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
            quiet,
        }
    }

    /// Whether step-by-step progress should be printed.
    pub fn shows_progress(&self) -> bool {
        !self.quiet && !self.mode.is_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_from_flag() {
        let ctx = UiContext::from_env(true, false, false, false);
        assert_eq!(ctx.mode, OutputMode::Json);
        assert!(!ctx.shows_progress());
    }

    #[test]
    fn test_ascii_disables_unicode() {
        let ctx = UiContext::from_env(false, false, true, false);
        assert!(!ctx.unicode);
    }

    #[test]
    fn test_no_color_disables_color() {
        let ctx = UiContext::from_env(false, true, false, false);
        assert!(!ctx.color);
    }

    #[test]
    fn test_quiet_hides_progress() {
        let ctx = UiContext::from_env(false, false, false, true);
        assert!(!ctx.shows_progress());
    }
}
