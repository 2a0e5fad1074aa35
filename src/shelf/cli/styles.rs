//! Styles for the shelf terminal client.
//!
//! Templates never name colors. They name what a piece of text *is* (a price, a stock
//! badge, a focused form field) and the theme decides how that looks:
//!
//! ```text
//! {{ card.price | style("price") }}
//! ```
//!
//! Stock badges follow the product's stock level: `stock-ok` above the low-stock
//! threshold, `stock-low` for the last few units, `stock-out` at zero.
//!
//! A style name the theme does not know renders with a `(!?)` prefix, so typos in
//! templates show up in the output instead of silently losing their styling.

use console::Style;
use once_cell::sync::Lazy;
use shelf::model::StockLevel;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const TIME: &str = "time";
    pub const PRICE: &str = "price";
    pub const CATEGORY: &str = "category";
    pub const HEADER: &str = "header";
    pub const STOCK_OK: &str = "stock-ok";
    pub const STOCK_LOW: &str = "stock-low";
    pub const STOCK_OUT: &str = "stock-out";
    pub const PAGE: &str = "page";
    pub const PAGE_CURRENT: &str = "page-current";
    pub const LABEL: &str = "label";
    pub const VALUE: &str = "value";
    pub const FOCUS: &str = "focus";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named collection of console styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style. Returns self for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Applies a named style. Without color the text passes through unchanged.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => {
                style.clone().force_styling(true).apply_to(text).to_string()
            }
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub fn stock_style(level: StockLevel) -> &'static str {
    match level {
        StockLevel::InStock => names::STOCK_OK,
        StockLevel::Low => names::STOCK_LOW,
        StockLevel::Out => names::STOCK_OUT,
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

pub static SHELF_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(rgb_to_ansi256((128, 128, 128)));
    let accent = Style::new().color256(rgb_to_ansi256((37, 99, 235)));

    Theme::new()
        .add(names::TITLE, Style::new().bold())
        .add(names::MUTED, muted.clone())
        .add(
            names::FAINT,
            Style::new().color256(rgb_to_ansi256((170, 170, 170))),
        )
        .add(names::TIME, muted.clone().italic())
        .add(names::PRICE, accent.clone().bold())
        .add(names::CATEGORY, muted.clone())
        .add(names::HEADER, muted.clone().bold())
        .add(names::STOCK_OK, Style::new().green())
        .add(names::STOCK_LOW, Style::new().yellow())
        .add(names::STOCK_OUT, Style::new().red())
        .add(names::PAGE, Style::new())
        .add(names::PAGE_CURRENT, accent.bold().reverse())
        .add(names::LABEL, Style::new().bold())
        .add(names::VALUE, Style::new())
        .add(names::FOCUS, Style::new().cyan().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
});
