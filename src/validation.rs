use crate::error::AppError;
use std::path::{Component, Path, PathBuf};

const MAX_PLAYER_NAME_LEN: usize = 32;

pub fn validate_player_name(name: Option<&str>) -> String {
    let trimmed = name.unwrap_or_default().trim();
    if trimmed.is_empty() {
        "Anonymous".to_string()
    } else {
        trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect()
    }
}

/// Text form of a loosely typed client field, or `None` when it is absent or
/// falsy: empty string, zero, `false`, `null`.
///
/// Whitespace-only strings count as present. Arrays and objects are not
/// usable as names or ids and count as absent.
pub fn truthy_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}

pub fn required_param<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("Missing {} parameter", name))),
    }
}

/// Validates a client-supplied relative path and joins it onto `root`.
///
/// Only plain file/directory names are allowed; `..`, `.`, roots and drive
/// prefixes are rejected.
pub fn safe_join(root: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let relative = Path::new(relative);
    let mut components = relative.components().peekable();
    if components.peek().is_none() {
        return Err(AppError::BadRequest("Invalid path.".into()));
    }
    if !components.all(|c| matches!(c, Component::Normal(_))) || relative.to_string_lossy().contains('\\') {
        return Err(AppError::BadRequest("Invalid path.".into()));
    }
    Ok(root.join(relative))
}

/// A single directory name with no separators or parent references.
pub fn validate_path_segment(segment: &str) -> Result<(), AppError> {
    if segment.is_empty() || segment == "." || segment.contains("..") || segment.contains('/') || segment.contains('\\') {
        Err(AppError::BadRequest("Invalid path.".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_name_defaults_and_truncates() {
        assert_eq!(validate_player_name(None), "Anonymous");
        assert_eq!(validate_player_name(Some("   ")), "Anonymous");
        assert_eq!(validate_player_name(Some("  Alice ")), "Alice");
        assert_eq!(validate_player_name(Some("x".repeat(50).as_str())).len(), 32);
    }

    #[test]
    fn test_truthy_text() {
        assert_eq!(truthy_text(Some(&json!("deck-1"))), Some("deck-1".into()));
        assert_eq!(truthy_text(Some(&json!(42))), Some("42".into()));
        assert_eq!(truthy_text(Some(&json!(1.5))), Some("1.5".into()));
        assert_eq!(truthy_text(Some(&json!("   "))), Some("   ".into()));
        assert_eq!(truthy_text(Some(&json!(true))), Some("true".into()));
        assert_eq!(truthy_text(Some(&json!(""))), None);
        assert_eq!(truthy_text(Some(&json!(0))), None);
        assert_eq!(truthy_text(Some(&json!(0.0))), None);
        assert_eq!(truthy_text(Some(&json!(false))), None);
        assert_eq!(truthy_text(Some(&json!(null))), None);
        assert_eq!(truthy_text(Some(&json!({"id": 1}))), None);
        assert_eq!(truthy_text(Some(&json!([1]))), None);
        assert_eq!(truthy_text(None), None);
    }

    #[test]
    fn test_safe_join() {
        let root = Path::new("decks");
        assert_eq!(
            safe_join(root, "IntroToPharmacy1/groupA.cards").unwrap(),
            PathBuf::from("decks/IntroToPharmacy1/groupA.cards")
        );
        assert!(safe_join(root, "../secrets.json").is_err());
        assert!(safe_join(root, "a/../../b").is_err());
        assert!(safe_join(root, "/etc/passwd").is_err());
        assert!(safe_join(root, "./a").is_err());
        assert!(safe_join(root, "a\\..\\b").is_err());
        assert!(safe_join(root, "").is_err());
    }

    #[test]
    fn test_path_segment() {
        assert!(validate_path_segment("pirate").is_ok());
        assert!(validate_path_segment("..").is_err());
        assert!(validate_path_segment("a/b").is_err());
        assert!(validate_path_segment("").is_err());
    }
}
