//! # Card Engine
//!
//! Picks which question card to show and remembers the ones a player liked.
//! Question data comes from `question_bank`; this crate only filters it,
//! draws from it, and tracks favorites.
//!
//! ## Core Components
//!
//! - **selection**: Moment/category filtering, non-repeating random draws, and
//!   the per-view selection session
//! - **favorites**: An ordered favorites list persisted through a key-value store
//! - **config**: TOML configuration for the favorites store
//!
//! ## Design Philosophy
//!
//! - **Stateless draws**: `select_next` is a pure function of its candidates,
//!   the excluded id, and the random source
//! - **Injected collaborators**: Randomness and storage sit behind small traits
//!   so callers and tests can substitute their own
//! - **No fatal paths**: Empty filters, corrupt data, and missing storage all
//!   resolve to a defined empty or fallback value

pub mod config;
pub mod favorites;
pub mod selection;

pub use config::*;
pub use favorites::*;
pub use selection::*;
