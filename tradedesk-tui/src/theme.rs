//! Parrot/neon palette and the style helpers the render modules use.
//!
//! - **Accent**: electric cyan (focus, active tab, headings)
//! - **Positive**: neon green (filled orders, success, buy side)
//! - **Negative**: hot pink (errors, sell side)
//! - **Warning**: neon orange (validation, expired orders)
//! - **Neutral**: cool purple (submitted orders, hints)
//! - **Muted**: steel blue (labels, secondary text)

use ratatui::style::{Color, Modifier, Style};

use tradedesk_core::domain::{OrderSide, OrderStatus};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Color for an order status code.
    pub fn status_color(&self, status: &OrderStatus) -> Color {
        match status {
            OrderStatus::Filled => self.positive,
            OrderStatus::Submitted => self.neutral,
            OrderStatus::Expired => self.warning,
            OrderStatus::Other(_) => self.text_primary,
        }
    }

    pub fn side_color(&self, side: OrderSide) -> Color {
        match side {
            OrderSide::Buy => self.positive,
            OrderSide::Sell => self.negative,
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Nav bar tab: the highlighted tab is reversed.
pub fn tab(active: bool) -> Style {
    if active {
        accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        muted()
    }
}

/// Form field label, highlighted when focused.
pub fn field_label(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        muted()
    }
}

pub fn disabled() -> Style {
    muted().add_modifier(Modifier::DIM)
}

pub fn status_style(status: &OrderStatus) -> Style {
    Style::default().fg(THEME.status_color(status))
}

pub fn side_style(side: OrderSide) -> Style {
    Style::default().fg(THEME.side_color(side))
}
