//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic product-inventory library**. The terminal client is one way to
//! drive it; the same session could sit behind a web view or a native window.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, args.rs, wired by main.rs)                │
//! │  - Parses arguments, reads the shell, renders templates     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One UI session: search box, page, view mode, form dialog │
//! │  - Turns discrete events into state changes                 │
//! │  - Derives the screen as a pure function of its state       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Filtering, pagination math, form validation, commits     │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ProductStore trait, InMemoryStore                        │
//! │  - Seeded once from a static dataset (seed.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! keystroke ─► debounce ─► filter ─► paginate ─► render
//! submit    ─► validate ─► normalize ─► commit to store ─► render
//! ```
//!
//! Nothing is persisted. The store lives as long as the session does.
//!
//! ## Time
//!
//! The only suspension point is the search debounce. Rather than spawning timers, the
//! session takes the current [`std::time::Instant`] with every event and every tick, so
//! the quiescent window is fully deterministic under test.
//!
//! ## Module Overview
//!
//! - [`api`]: The UI session facade
//! - [`commands`]: Search, pagination, form validation, create and update
//! - [`store`]: Storage abstraction and the in-memory store
//! - [`model`]: Core data types (`Product`, `ProductDraft`, `ViewMode`)
//! - [`seed`]: Static dataset loading and normalization
//! - [`debounce`]: Quiescent-window debouncer
//! - [`price`]: Locale price formatting
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the interactive shell and templated rendering (binary only)

pub mod api;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod model;
pub mod price;
pub mod seed;
pub mod store;
