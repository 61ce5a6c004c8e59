use ratatui::style::{Color, Style};

use crate::controller::ToastKind;

/// Color palette
pub struct Theme {
    pub primary: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(59, 130, 246),       // #3B82F6
            surface: Color::Rgb(31, 41, 55),         // #1F2937
            text_primary: Color::Rgb(255, 255, 255), // #FFFFFF
            text_dim: Color::Rgb(156, 163, 175),     // #9CA3AF
            success: Color::Green,
            error: Color::Red,
            info: Color::Blue,
        }
    }
}

impl Theme {
    /// Get the primary style for titles and active elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get the surface style for panels
    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface)
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn toast_style(&self, kind: ToastKind) -> Style {
        match kind {
            ToastKind::Success => Style::default().fg(self.success),
            ToastKind::Error => Style::default().fg(self.error),
        }
    }
}
