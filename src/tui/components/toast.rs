//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a short duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Toast flavor, mapped exhaustively to a border color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn color(self, theme: &Theme) -> Color {
        match self {
            ToastKind::Success => theme.success,
            ToastKind::Error => theme.error,
            ToastKind::Info => theme.accent,
        }
    }
}

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    /// Errors stay up longer so the classified message can actually be read
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        let duration = match kind {
            ToastKind::Error => Duration::from_secs(4),
            ToastKind::Success | ToastKind::Info => Duration::from_secs(2),
        };
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` so the toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Message width plus border and padding
        let width = (self.message.chars().count() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.kind.color(theme)))
            .style(Style::default().bg(theme.bg));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
