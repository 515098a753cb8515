// Terminal styling for the report. Subtotal rows are bold, deductions red.
use tabled::settings::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Emphasis,
    Negative,
    Heading,
    Muted,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    enabled: bool,
}

impl ThemePalette {
    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    // No escape codes: used for --no-color, JSON output and non-terminal stdout.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn color(&self, tone: Tone) -> Option<Color> {
        if !self.enabled {
            return None;
        }
        let color = match tone {
            Tone::Emphasis => Color::BOLD,
            Tone::Negative => Color::FG_RED,
            Tone::Heading => Color::BOLD | Color::FG_CYAN,
            Tone::Muted => Color::FG_BRIGHT_BLACK,
            Tone::Bar => Color::FG_GREEN,
        };
        Some(color)
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        match self.color(tone) {
            Some(color) => format!("{}{}{}", color.get_prefix(), text, color.get_suffix()),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_leaves_text_untouched() {
        let palette = ThemePalette::plain();
        assert_eq!(palette.paint(Tone::Emphasis, "Net Sales"), "Net Sales");
        assert!(palette.color(Tone::Negative).is_none());
    }

    #[test]
    fn test_ansi_palette_wraps_text() {
        let palette = ThemePalette::ansi();
        let painted = palette.paint(Tone::Emphasis, "Net Sales");
        assert!(painted.starts_with("\u{1b}[1m"));
        assert!(painted.contains("Net Sales"));
        assert_ne!(painted, "Net Sales");
    }
}
