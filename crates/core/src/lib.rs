//! prompt-repo: community prompt catalog backed by SQLite
//!
//! Users browse, search, filter, submit and upvote short text prompts.
//! This crate provides:
//! - Persistence of prompts in a single `prompts` table
//! - Search, category filtering and category listing
//! - Atomic upvote counting
//! - A JSON command registry for presentation layers and the CLI
//!
//! ## Architecture
//!
//! - **db**: schema, connection pool and the prompt operations
//! - **commands**: `"prompts.<action>"` handlers over a global pool
//! - **config**: environment-driven settings (`.env` aware)

// Module declarations
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod runtime;

pub use config::Config;
pub use db::{
    prompts::{NewPrompt, Prompt, Stats, SUGGESTED_CATEGORIES},
    Db,
};
pub use errors::{PromptRepoError, Result};
