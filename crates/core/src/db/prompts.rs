use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::errors::{PromptRepoError, Result};

/// Categories offered to submitters. Storage accepts any text.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Qualitative Analysis",
    "Quantitative Analysis",
    "Research Design",
    "Literature Review",
    "Data Analysis",
    "Content Analysis",
    "Digital Methods",
    "Survey Design",
    "Mixed Methods",
    "Other",
];

/// Category filter value meaning "no filter" in browse views
pub const ALL_CATEGORIES: &str = "All";

const COLUMNS: &str =
    "id, title, description, prompt_text, category, tags, use_case, upvotes, created_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub prompt_text: String,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub use_case: Option<String>,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    /// Tags split on commas, trimmed, blanks dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Creation date as `YYYY-MM-DD`
    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Fields supplied by a submitter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPrompt {
    pub title: String,
    pub description: Option<String>,
    pub prompt_text: String,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub use_case: Option<String>,
}

impl NewPrompt {
    pub fn new(title: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt_text: prompt_text.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_case = Some(use_case.into());
        self
    }

    /// Title and prompt text must contain something other than whitespace
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.prompt_text.trim().is_empty() {
            missing.push("prompt_text");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PromptRepoError::ValidationError(format!(
                "{} required",
                missing.join(" and ")
            )))
        }
    }
}

/// Repository-wide totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Stats {
    pub total_prompts: i64,
    pub total_categories: i64,
    pub total_upvotes: i64,
}

pub async fn add_prompt(pool: &SqlitePool, new: NewPrompt) -> Result<i64> {
    new.validate()?;

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    let id = sqlx::query(
        "INSERT INTO prompts (title, description, prompt_text, category, tags, use_case, upvotes, created_at)
         VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.prompt_text)
    .bind(&new.category)
    .bind(&new.tags)
    .bind(&new.use_case)
    .bind(&created_at)
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::info!(id, title = %new.title, "prompt added");
    Ok(id)
}

/// Every prompt, newest first
pub async fn get_all_prompts(pool: &SqlitePool) -> Result<Vec<Prompt>> {
    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {COLUMNS} FROM prompts ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    tracing::debug!(count = prompts.len(), "listed prompts");
    Ok(prompts)
}

/// Case-insensitive substring search over title, description, prompt text
/// and tags
///
/// SQLite `LIKE` folds ASCII case only. Wildcard characters in `query` match
/// literally.
pub async fn search_prompts(pool: &SqlitePool, query: &str) -> Result<Vec<Prompt>> {
    let pattern = format!("%{}%", escape_like(query));

    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {COLUMNS} FROM prompts
         WHERE title LIKE ? ESCAPE '\\'
            OR description LIKE ? ESCAPE '\\'
            OR prompt_text LIKE ? ESCAPE '\\'
            OR tags LIKE ? ESCAPE '\\'
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    tracing::debug!(query, count = prompts.len(), "searched prompts");
    Ok(prompts)
}

/// Prompts whose category equals `category` exactly (case-sensitive)
pub async fn filter_by_category(pool: &SqlitePool, category: &str) -> Result<Vec<Prompt>> {
    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {COLUMNS} FROM prompts WHERE category = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(category)
    .fetch_all(pool)
    .await?;

    tracing::debug!(category, count = prompts.len(), "filtered prompts");
    Ok(prompts)
}

/// Distinct non-empty categories in use, sorted
pub async fn get_categories(pool: &SqlitePool) -> Result<Vec<String>> {
    let categories = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT category FROM prompts
         WHERE category IS NOT NULL AND category <> ''
         ORDER BY category",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn get_prompt_count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prompts")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Add one upvote to prompt `id`
///
/// Returns `false` when no prompt has that id; that case is not an error.
pub async fn upvote_prompt(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE prompts SET upvotes = upvotes + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let found = result.rows_affected() > 0;
    if found {
        tracing::debug!(id, "prompt upvoted");
    } else {
        tracing::warn!(id, "upvote ignored, no such prompt");
    }

    Ok(found)
}

/// Default browse view: search wins over the category filter, and `"All"`
/// or an empty category means no filter
pub async fn browse(
    pool: &SqlitePool,
    query: Option<&str>,
    category: Option<&str>,
) -> Result<Vec<Prompt>> {
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        return search_prompts(pool, query).await;
    }

    match category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES) {
        Some(category) => filter_by_category(pool, category).await,
        None => get_all_prompts(pool).await,
    }
}

pub async fn get_stats(pool: &SqlitePool) -> Result<Stats> {
    let stats = sqlx::query_as::<_, Stats>(
        "SELECT COUNT(*) AS total_prompts,
                COUNT(DISTINCT NULLIF(category, '')) AS total_categories,
                COALESCE(SUM(upvotes), 0) AS total_upvotes
         FROM prompts",
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

/// Escape `LIKE` wildcards so they match literally under `ESCAPE '\'`
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
