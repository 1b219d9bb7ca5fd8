use serde_json::{json, Value};

use crate::{
    db::{
        prompts::{self, NewPrompt, SUGGESTED_CATEGORIES},
        Db,
    },
    errors::{PromptRepoError, Result},
    runtime,
};

fn str_arg<'a>(args: &'a Value, command: &str, name: &str) -> Result<&'a str> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PromptRepoError::invalid_args(command, format!("Missing {}", name)))
}

/// Missing or `null` is `None`; any other non-string is rejected
fn opt_str_arg(args: &Value, command: &str, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PromptRepoError::invalid_args(
            command,
            format!("{} must be a string", name),
        )),
    }
}

pub fn list(_args: Value) -> Result<Value> {
    let prompts = runtime::block_on(async { prompts::get_all_prompts(Db::pool()?).await })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn browse(args: Value) -> Result<Value> {
    let query = args.get("query").and_then(|v| v.as_str());
    let category = args.get("category").and_then(|v| v.as_str());

    let prompts =
        runtime::block_on(async { prompts::browse(Db::pool()?, query, category).await })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn search(args: Value) -> Result<Value> {
    let query = str_arg(&args, "prompts.search", "query")?;

    let prompts = runtime::block_on(async { prompts::search_prompts(Db::pool()?, query).await })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn filter(args: Value) -> Result<Value> {
    let category = str_arg(&args, "prompts.filter", "category")?;

    let prompts =
        runtime::block_on(async { prompts::filter_by_category(Db::pool()?, category).await })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn categories(_args: Value) -> Result<Value> {
    let categories = runtime::block_on(async { prompts::get_categories(Db::pool()?).await })?;
    Ok(json!({ "categories": categories }))
}

pub fn suggested_categories(_args: Value) -> Result<Value> {
    Ok(json!({ "categories": SUGGESTED_CATEGORIES }))
}

pub fn count(_args: Value) -> Result<Value> {
    let count = runtime::block_on(async { prompts::get_prompt_count(Db::pool()?).await })?;
    Ok(json!({ "count": count }))
}

pub fn create(args: Value) -> Result<Value> {
    let title = str_arg(&args, "prompts.create", "title")?;
    let prompt_text = str_arg(&args, "prompts.create", "prompt_text")?;

    let new = NewPrompt {
        title: title.to_string(),
        description: opt_str_arg(&args, "prompts.create", "description")?,
        prompt_text: prompt_text.to_string(),
        category: opt_str_arg(&args, "prompts.create", "category")?,
        tags: opt_str_arg(&args, "prompts.create", "tags")?,
        use_case: opt_str_arg(&args, "prompts.create", "use_case")?,
    };
    new.validate()?;

    let id = runtime::block_on(async { prompts::add_prompt(Db::pool()?, new).await })?;
    Ok(json!({ "success": true, "id": id }))
}

/// Unknown ids succeed with `found: false`
pub fn upvote(args: Value) -> Result<Value> {
    let id = args
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| PromptRepoError::invalid_args("prompts.upvote", "Missing id"))?;

    let found = runtime::block_on(async { prompts::upvote_prompt(Db::pool()?, id).await })?;
    Ok(json!({ "success": true, "found": found }))
}

pub fn stats(_args: Value) -> Result<Value> {
    let stats = runtime::block_on(async { prompts::get_stats(Db::pool()?).await })?;
    Ok(json!(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::init_db;

    fn create_titled(title: &str, category: &str) -> i64 {
        let result = create(json!({
            "title": title,
            "prompt_text": "Analyze [DATA]",
            "category": category,
            "tags": "a, b",
        }))
        .unwrap();
        result["id"].as_i64().unwrap()
    }

    fn titles(value: &Value) -> Vec<String> {
        value["prompts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_create_and_list() {
        init_db();
        let id = create_titled("cmd-create-and-list", "Other");

        let listed = list(json!({})).unwrap();
        let prompt = listed["prompts"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == json!(id))
            .cloned()
            .unwrap();

        assert_eq!(prompt["title"], json!("cmd-create-and-list"));
        assert_eq!(prompt["upvotes"], json!(0));
        assert_eq!(prompt["tags"], json!("a, b"));
        assert!(prompt["created_at"].is_string());
    }

    #[test]
    fn test_create_missing_title_is_invalid_args() {
        init_db();
        let err = create(json!({ "prompt_text": "P" })).unwrap_err();
        assert_eq!(err.category(), "arguments");
    }

    #[test]
    fn test_create_blank_prompt_text_is_validation_error() {
        init_db();
        let err = create(json!({ "title": "T", "prompt_text": "" })).unwrap_err();
        assert!(matches!(err, PromptRepoError::ValidationError(_)));
    }

    #[test]
    fn test_create_rejects_non_string_optional_field() {
        init_db();
        let err = create(json!({
            "title": "cmd-non-string-category",
            "prompt_text": "P",
            "category": 5,
        }))
        .unwrap_err();
        assert_eq!(err.category(), "arguments");
        assert!(err.to_string().contains("category must be a string"));

        let found = search(json!({ "query": "cmd-non-string-category" })).unwrap();
        assert!(titles(&found).is_empty());
    }

    #[test]
    fn test_create_accepts_null_optional_field() {
        init_db();
        let result = create(json!({
            "title": "cmd-null-description",
            "prompt_text": "P",
            "description": null,
        }))
        .unwrap();
        assert_eq!(result["success"], json!(true));

        let found = search(json!({ "query": "cmd-null-description" })).unwrap();
        assert_eq!(found["prompts"][0]["description"], Value::Null);
    }

    #[test]
    fn test_upvote_reports_found() {
        init_db();
        let id = create_titled("cmd-upvote", "");

        let result = upvote(json!({ "id": id })).unwrap();
        assert_eq!(result["found"], json!(true));
        upvote(json!({ "id": id })).unwrap();

        let listed = search(json!({ "query": "cmd-upvote" })).unwrap();
        assert_eq!(listed["prompts"][0]["upvotes"], json!(2));
    }

    #[test]
    fn test_upvote_unknown_id() {
        init_db();
        let result = upvote(json!({ "id": i64::MAX })).unwrap();
        assert_eq!(result["success"], json!(true));
        assert_eq!(result["found"], json!(false));
    }

    #[test]
    fn test_upvote_missing_id() {
        init_db();
        assert!(upvote(json!({ "id": "seven" })).is_err());
    }

    #[test]
    fn test_search_and_filter() {
        init_db();
        create_titled("cmd-filter-one", "cmd-filter-category");
        create_titled("cmd-filter-two", "Cmd-Filter-Category");

        let found = search(json!({ "query": "CMD-FILTER" })).unwrap();
        assert_eq!(titles(&found).len(), 2);

        let filtered = filter(json!({ "category": "cmd-filter-category" })).unwrap();
        assert_eq!(titles(&filtered), vec!["cmd-filter-one".to_string()]);

        let categories = categories(json!({})).unwrap();
        let categories = categories["categories"].as_array().unwrap();
        assert!(categories.contains(&json!("cmd-filter-category")));
        assert!(!categories.contains(&json!("")));

        assert!(search(json!({})).is_err());
        assert!(filter(json!({})).is_err());
    }

    #[test]
    fn test_browse_with_category() {
        init_db();
        create_titled("cmd-browse", "cmd-browse-category");

        let browsed = browse(json!({ "category": "cmd-browse-category" })).unwrap();
        assert_eq!(titles(&browsed), vec!["cmd-browse".to_string()]);

        let everything = browse(json!({ "category": "All" })).unwrap();
        assert!(titles(&everything).contains(&"cmd-browse".to_string()));
    }

    #[test]
    fn test_count_and_stats() {
        init_db();
        let before = count(json!({})).unwrap()["count"].as_i64().unwrap();
        create_titled("cmd-count", "");
        let after = count(json!({})).unwrap()["count"].as_i64().unwrap();
        assert!(after >= before + 1);

        let stats = stats(json!({})).unwrap();
        assert!(stats["total_prompts"].as_i64().unwrap() >= after);
        assert!(stats["total_upvotes"].as_i64().is_some());
        assert!(stats["total_categories"].as_i64().is_some());
    }
}
