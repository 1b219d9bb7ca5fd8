//! Command registry and dispatch system
//!
//! This module provides a static registry of commands a presentation layer
//! can call. Commands are registered as "category.action" (e.g.,
//! "prompts.search", "prompts.upvote") and dispatched to handler functions.
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::{
    config::Config,
    db::Db,
    errors::{PromptRepoError, Result},
    runtime,
};

pub mod prompts;

/// Type alias for command handler functions
///
/// All command handlers take a JSON Value (arguments) and return a Result<Value>
pub type CommandHandler = fn(Value) -> Result<Value>;

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.browse", prompts::browse as CommandHandler);
    map.insert("prompts.search", prompts::search as CommandHandler);
    map.insert("prompts.filter", prompts::filter as CommandHandler);
    map.insert("prompts.categories", prompts::categories as CommandHandler);
    map.insert(
        "prompts.suggested_categories",
        prompts::suggested_categories as CommandHandler,
    );
    map.insert("prompts.count", prompts::count as CommandHandler);
    map.insert("prompts.create", prompts::create as CommandHandler);
    map.insert("prompts.upvote", prompts::upvote as CommandHandler);
    map.insert("prompts.stats", prompts::stats as CommandHandler);

    map
});

/// Open the global database pool the handlers run against
pub fn setup(config: &Config) -> Result<()> {
    runtime::block_on(Db::init(config))
}

/// Dispatch a command by name
///
/// Looks up the command in the registry and executes it with the provided arguments.
///
/// # Arguments
/// * `command` - Command name (e.g., "prompts.list")
/// * `args` - Command arguments as JSON Value
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(command: &str, args: Value) -> Result<Value> {
    tracing::debug!(command, "dispatching command");
    match REGISTRY.get(command) {
        Some(handler) => handler(args),
        None => Err(PromptRepoError::CommandNotFound(command.to_string())),
    }
}

/// Dispatch and fold any failure into an error object
///
/// Error objects have the fields:
/// - `error`: true (marker that this is an error response)
/// - `message`: user-friendly error message
/// - `category`: error category for logging/handling
pub fn call(command: &str, args: Value) -> Value {
    match dispatch(command, args) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(command, category = err.category(), "command failed: {}", err);
            error_object(&err)
        },
    }
}

pub fn error_object(err: &PromptRepoError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
    })
}

/// Whether `value` is an error object produced by [`call`]
pub fn is_error(value: &Value) -> bool {
    value.get("error").and_then(Value::as_bool).unwrap_or(false)
}

/// Command name that lists the registry instead of dispatching
pub const LIST_COMMAND: &str = "commands";

/// Run `command` with raw JSON arguments, as the CLI does
///
/// The flag is `false` when the result is an error object. Arguments that
/// are not valid JSON fail with `SerdeError` before anything is dispatched.
pub fn execute(command: &str, raw_args: Option<&str>) -> Result<(Value, bool)> {
    if command == LIST_COMMAND {
        return Ok((json!(list_commands()), true));
    }

    let args: Value = match raw_args {
        Some(raw) => serde_json::from_str(raw)?,
        None => Value::Object(Default::default()),
    };

    let result = call(command, args);
    let ok = !is_error(&result);
    Ok((result, ok))
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}
