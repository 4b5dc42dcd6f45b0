use crate::UiMessages;
use crate::forms::{FormError, FormResult};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load UI message translations from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "Plural equation": "Rovnice plurálu",
///     "Fuzzy": "Nejasný"
/// }
/// ```
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON, or a root that is not an object
pub fn load_messages_from_file(path: &Path) -> FormResult<UiMessages> {
    let content = fs::read_to_string(path).map_err(|e| {
        FormError::Loader(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    parse_messages(&content)
        .map_err(|e| FormError::Loader(format!("Invalid messages in '{}': {}", path.display(), e)))
}

/// Parse UI messages from JSON text.
pub fn parse_messages(content: &str) -> FormResult<UiMessages> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| FormError::Loader(format!("Failed to parse JSON: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| FormError::Loader("root must be an object".to_string()))?;

    let mut messages = UiMessages::new();
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }

        if let Some(message) = value.as_str() {
            messages.with_message(key, message);
        } else {
            warn!("Message '{}' is not a string, skipping", key);
        }
    }

    debug!("Loaded {} UI messages", messages.get_messages().len());
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_metadata_and_non_strings() {
        let messages = parse_messages(
            r#"{
                "@metadata": {"authors": ["someone"]},
                "Fuzzy": "Unscharf",
                "Query": "Suche",
                "broken": 42
            }"#,
        )
        .unwrap();

        assert_eq!(messages.get("Fuzzy"), "Unscharf");
        assert_eq!(messages.get("Query"), "Suche");
        assert!(messages.get_message("@metadata").is_none());
        assert!(messages.get_message("broken").is_none());
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let result = parse_messages(r#"["Fuzzy"]"#);
        assert!(matches!(result, Err(FormError::Loader(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_messages_from_file(Path::new("/nonexistent/messages.json"));
        match result {
            Err(FormError::Loader(msg)) => assert!(msg.contains("Failed to read file")),
            other => panic!("expected loader error, got {:?}", other.map(|_| ())),
        }
    }
}
