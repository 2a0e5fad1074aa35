//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone `.tmp` files,
//! which are easier to edit and diff than string literals buried in code. They are
//! embedded here at compile time.
//!
//! The environment runs with `trim_blocks` and `lstrip_blocks`, so a line holding only a
//! block tag produces no output. A line that ends in an inline block tag loses its line
//! break too; such lines end with an explicit `{{ "\n" }}`.
//!
//! `screen.tmp` is the entry point for a full frame and includes the others by name.

pub const SCREEN_TEMPLATE: &str = include_str!("templates/screen.tmp");
pub const CARDS_TEMPLATE: &str = include_str!("templates/cards.tmp");
pub const TABLE_TEMPLATE: &str = include_str!("templates/table.tmp");
pub const PAGINATION_TEMPLATE: &str = include_str!("templates/pagination.tmp");
pub const FORM_TEMPLATE: &str = include_str!("templates/form.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const HELP_TEMPLATE: &str = include_str!("templates/help.tmp");

/// Every template with the name it is registered (and included) under.
pub const ALL: [(&str, &str); 7] = [
    ("screen.tmp", SCREEN_TEMPLATE),
    ("cards.tmp", CARDS_TEMPLATE),
    ("table.tmp", TABLE_TEMPLATE),
    ("pagination.tmp", PAGINATION_TEMPLATE),
    ("form.tmp", FORM_TEMPLATE),
    ("messages.tmp", MESSAGES_TEMPLATE),
    ("help.tmp", HELP_TEMPLATE),
];
