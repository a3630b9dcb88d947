use serde_json::{Map, Value};

use crate::domain::ArticleRef;

/// Data mapping attached to a delivered notification.
pub type NotificationPayload = Map<String, Value>;

pub const SLUG_KEY: &str = "slug";
pub const POST_SLUG_KEY: &str = "postSlug";

/// What a notification payload points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    Slug(String),
    PostSlug(String),
    Neither,
}

impl NotificationTarget {
    /// `slug` is checked before `postSlug`; the first non-empty string wins.
    /// Values of any other JSON type are skipped.
    pub fn classify(payload: &NotificationPayload) -> Self {
        if let Some(slug) = non_empty_str(payload, SLUG_KEY) {
            return NotificationTarget::Slug(slug.to_string());
        }
        if let Some(slug) = non_empty_str(payload, POST_SLUG_KEY) {
            return NotificationTarget::PostSlug(slug.to_string());
        }
        NotificationTarget::Neither
    }

    /// Classify raw JSON; anything but an object is `Neither`.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(payload)) => Self::classify(&payload),
            _ => NotificationTarget::Neither,
        }
    }

    pub fn article(&self) -> Option<ArticleRef> {
        match self {
            NotificationTarget::Slug(slug) | NotificationTarget::PostSlug(slug) => {
                ArticleRef::new(slug.as_str())
            }
            NotificationTarget::Neither => None,
        }
    }
}

fn non_empty_str<'a>(payload: &'a NotificationPayload, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> NotificationPayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_slug_key() {
        let target = NotificationTarget::classify(&payload(json!({ "slug": "x" })));
        assert_eq!(target, NotificationTarget::Slug("x".into()));
        assert_eq!(target.article().unwrap().slug(), "x");
    }

    #[test]
    fn test_post_slug_key() {
        let target = NotificationTarget::classify(&payload(json!({ "postSlug": "x" })));
        assert_eq!(target, NotificationTarget::PostSlug("x".into()));
        assert_eq!(target.article().unwrap().slug(), "x");
    }

    #[test]
    fn test_neither() {
        let target = NotificationTarget::classify(&payload(json!({})));
        assert_eq!(target, NotificationTarget::Neither);
        assert!(target.article().is_none());
    }

    #[test]
    fn test_slug_preferred() {
        let target = NotificationTarget::classify(&payload(json!({ "slug": "a", "postSlug": "b" })));
        assert_eq!(target, NotificationTarget::Slug("a".into()));
    }

    #[test]
    fn test_falls_back_past_empty_or_non_string_slug() {
        let empty = payload(json!({ "slug": "", "postSlug": "b" }));
        assert_eq!(NotificationTarget::classify(&empty), NotificationTarget::PostSlug("b".into()));

        let number = payload(json!({ "slug": 42, "postSlug": "b" }));
        assert_eq!(NotificationTarget::classify(&number), NotificationTarget::PostSlug("b".into()));

        let only_number = payload(json!({ "slug": 42 }));
        assert_eq!(NotificationTarget::classify(&only_number), NotificationTarget::Neither);
    }

    #[test]
    fn test_unsafe_slug_is_not_an_article() {
        let target = NotificationTarget::classify(&payload(json!({ "slug": "../admin" })));
        assert!(target.article().is_none());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            NotificationTarget::from_json(r#"{"postSlug":"x","title":"Lajm"}"#),
            NotificationTarget::PostSlug("x".into())
        );
        assert_eq!(NotificationTarget::from_json("[1,2]"), NotificationTarget::Neither);
        assert_eq!(NotificationTarget::from_json("{"), NotificationTarget::Neither);
    }
}
