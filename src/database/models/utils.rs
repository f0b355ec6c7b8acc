use bson::oid::ObjectId;
use chrono::Utc;

/// Current unix timestamp in seconds
pub fn now_ts() -> u64 {
    Utc::now().timestamp() as u64
}

/// Hex form of an optional ObjectId for response DTOs
pub fn id_to_string(id: Option<ObjectId>) -> String {
    id.map(|oid| oid.to_hex())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Parse a path segment into an ObjectId
pub fn parse_object_id(raw: &str) -> Result<ObjectId, bson::oid::Error> {
    ObjectId::parse_str(raw.trim())
}

/// Loose e-mail shape check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Trim a value and drop it when nothing is left
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email(" jane.doe+rings@mail.example.co.uk "));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@.example.com"));
    }

    #[test]
    fn test_parse_object_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
        assert!(parse_object_id("not-an-id").is_err());
    }

    #[test]
    fn test_id_to_string_unknown() {
        assert_eq!(id_to_string(None), "unknown");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" x ".into())), Some("x".into()));
    }
}
