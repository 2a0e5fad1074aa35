//! Terminal front end: templated rendering, the theme and the interactive shell.

pub mod render;
pub mod shell;
pub mod styles;
pub mod templates;
