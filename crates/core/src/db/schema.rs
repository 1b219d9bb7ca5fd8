pub const SCHEMA: &str = "
-- Core prompts table
CREATE TABLE IF NOT EXISTS prompts (
    id INTEGER PRIMARY KEY AUTOINCREMENT, -- never reused
    title TEXT NOT NULL,                  -- Display title
    description TEXT,                     -- Optional description
    prompt_text TEXT NOT NULL,            -- The prompt itself, may hold [PLACEHOLDERS]
    category TEXT,                        -- Free text, suggested values only
    tags TEXT,                            -- Comma-separated, stored verbatim
    use_case TEXT,                        -- Optional use case
    upvotes INTEGER NOT NULL DEFAULT 0,   -- Increment only
    created_at TEXT NOT NULL              -- RFC 3339 UTC, microsecond precision
);

-- Indexes for browse and filter views
CREATE INDEX IF NOT EXISTS idx_prompts_created ON prompts(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_prompts_category ON prompts(category);
";

/// Individual statements of [`SCHEMA`], blanks dropped
pub fn statements() -> impl Iterator<Item = &'static str> {
    SCHEMA.split(';').filter(|s| !s.trim().is_empty())
}
