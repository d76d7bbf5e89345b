use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The account behind the access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub username: String,
    /// Any other fields the API sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A saved bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(deserialize_with = "string_or_number")]
    pub bookmark_id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ids arrive as numbers from the live API and as strings from some fixtures
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number id, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{normalize, RecordKind};

    #[test]
    fn user_from_record() {
        let record = normalize(Ok(json!([
            {"type": "user", "user_id": "12345678", "username": "x"}
        ])
        .into()))
        .unwrap()
        .single(RecordKind::User)
        .unwrap();
        let user: User = record.parse().unwrap();
        assert_eq!(user.user_id, "12345678");
        assert_eq!(user.username, "x");
        assert!(user.extra.is_empty());
    }

    #[test]
    fn bookmark_with_numeric_id_and_extras() {
        let record = normalize(Ok(json!([
            {"type": "meta"},
            {"type": "bookmark", "bookmark_id": 1234, "url": "http://x", "title": "X",
             "progress": 0.5, "starred": "0"}
        ])
        .into()))
        .unwrap()
        .single(RecordKind::Bookmark)
        .unwrap();
        let bookmark: Bookmark = record.parse().unwrap();
        assert_eq!(bookmark.bookmark_id, "1234");
        assert_eq!(bookmark.url, "http://x");
        assert_eq!(bookmark.title.as_deref(), Some("X"));
        assert_eq!(bookmark.description, None);
        assert_eq!(bookmark.progress, Some(0.5));
        assert_eq!(bookmark.extra.get("starred"), Some(&json!("0")));
        assert!(!bookmark.extra.contains_key("type"));
    }

    #[test]
    fn id_must_be_scalar() {
        let record = normalize(Ok(json!([{"type": "user", "user_id": [1], "username": "x"}]).into()))
            .unwrap()
            .single(RecordKind::User)
            .unwrap();
        assert!(record.parse::<User>().is_err());
    }
}
