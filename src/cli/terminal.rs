//! Coloured terminal output

use owo_colors::{OwoColorize, colors::css};

/// How a line of output should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Everything checked out (green)
    Good,
    /// A problem worth attention (amber)
    Warn,
    /// Headline figures (blue)
    Info,
    /// Uneventful detail
    Muted,
}

impl Tone {
    /// The tone for a problem counter: muted at zero, a warning otherwise.
    #[must_use]
    pub const fn for_problems(count: usize) -> Self {
        if count == 0 { Self::Muted } else { Self::Warn }
    }
}

/// Whether stdout accepts colour escapes
fn colour_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Paints `text` in the given tone, or returns it unchanged when stdout is
/// not a colour terminal.
#[must_use]
pub fn paint(text: &str, tone: Tone) -> String {
    if !colour_enabled() {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.fg::<css::Green>().to_string(),
        Tone::Warn => text.fg::<css::Orange>().to_string(),
        Tone::Info => text.fg::<css::LightBlue>().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

/// A left-aligned `label  count` row of a summary table.
#[must_use]
pub fn row(label: &str, count: usize, tone: Tone) -> String {
    paint(&format!("{label:<28}{count}"), tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_tone() {
        assert_eq!(Tone::for_problems(0), Tone::Muted);
        assert_eq!(Tone::for_problems(3), Tone::Warn);
    }

    #[test]
    fn row_keeps_label_and_value() {
        let line = row("trees valid", 12, Tone::Info);
        assert!(line.contains("trees valid"));
        assert!(line.contains("12"));
    }
}
