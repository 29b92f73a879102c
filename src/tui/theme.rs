// Theme system for the TUI
//
// A small closed set of palettes, cyclable at runtime with 'T'.

use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    /// Inherit the terminal's own palette
    Terminal,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Terminal]
    }

    /// Parse a config value; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "terminal" => ThemeKind::Terminal,
            _ => ThemeKind::Dark,
        }
    }

    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Terminal => "Terminal",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Terminal => Theme::terminal(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    pub title: Color,
    pub table_header: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,

    pub price: Color,
    pub muted: Color,
    pub accent: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 24),
            fg: Color::Rgb(220, 220, 220),
            border: Color::Rgb(80, 80, 100),
            border_focused: Color::Rgb(130, 170, 255),
            title: Color::Rgb(130, 170, 255),
            table_header: Color::Rgb(180, 190, 254),
            selected_bg: Color::Rgb(50, 60, 90),
            selected_fg: Color::White,
            price: Color::Rgb(166, 227, 161),
            muted: Color::Rgb(120, 120, 140),
            accent: Color::Rgb(250, 179, 135),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 240),
            fg: Color::Rgb(40, 40, 40),
            border: Color::Rgb(160, 160, 160),
            border_focused: Color::Rgb(30, 90, 200),
            title: Color::Rgb(30, 90, 200),
            table_header: Color::Rgb(70, 50, 160),
            selected_bg: Color::Rgb(200, 215, 245),
            selected_fg: Color::Black,
            price: Color::Rgb(20, 120, 60),
            muted: Color::Rgb(130, 130, 130),
            accent: Color::Rgb(180, 90, 20),
            success: Color::Rgb(20, 120, 60),
            warning: Color::Rgb(170, 120, 0),
            error: Color::Rgb(180, 40, 40),
        }
    }

    fn terminal() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            title: Color::Cyan,
            table_header: Color::Magenta,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            price: Color::Green,
            muted: Color::DarkGray,
            accent: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("TERMINAL"), ThemeKind::Terminal);
        assert_eq!(ThemeKind::from_name("dracula"), ThemeKind::Dark);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }
}
