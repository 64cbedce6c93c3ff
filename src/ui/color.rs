//! ANSI styling for terminal summaries

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    paint(text, color, supports_formatting())
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether stdout should receive ANSI escapes
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if cfg!(test) {
        return false;
    }

    formatting_enabled(
        env::var("NO_COLOR").is_ok(),
        env::var("FORCE_COLOR").ok().as_deref(),
        std::io::stdout().is_terminal(),
        env::var("TERM").ok().as_deref(),
    )
}

/// `NO_COLOR` wins, then `FORCE_COLOR`, then a non-dumb terminal.
fn formatting_enabled(
    no_color: bool,
    force_color: Option<&str>,
    is_terminal: bool,
    term: Option<&str>,
) -> bool {
    if no_color || force_color == Some("0") {
        return false;
    }
    if force_color.is_some() {
        return true;
    }
    if !is_terminal {
        return false;
    }
    !matches!(term, Some("dumb") | Some(""))
}
