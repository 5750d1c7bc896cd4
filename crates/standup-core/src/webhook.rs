use serde::Deserialize;

/// Inbound GitHub webhook payload.
///
/// Only the fields the classifier consumes are modeled. Everything
/// defaults: GitHub omits fields freely depending on the event kind,
/// and a partial payload must still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebHook {
    pub action: String,
    pub issue: Issue,
    pub assignee: Actor,
    pub sender: Actor,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub url: String,
    pub assignee: Actor,
}

/// A user reference as it appears in webhook payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Actor {
    pub login: String,
    pub id: i64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_deserializes() {
        let json = serde_json::json!({
            "action": "opened",
            "issue": {
                "url": "https://api.github.com/repos/acme/app/issues/1",
                "assignee": {"login": "bob", "id": 2, "url": "https://api.github.com/users/bob"}
            },
            "sender": {"login": "alice", "id": 1, "url": "https://api.github.com/users/alice"}
        });
        let hook: WebHook = serde_json::from_value(json).unwrap();
        assert_eq!(hook.action, "opened");
        assert_eq!(hook.sender.login, "alice");
        assert_eq!(hook.issue.assignee.login, "bob");
    }

    #[test]
    fn partial_payload_defaults_missing_fields() {
        let hook: WebHook = serde_json::from_str(r#"{"action": "created"}"#).unwrap();
        assert_eq!(hook.action, "created");
        assert_eq!(hook.sender.login, "");
        assert_eq!(hook.issue.url, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"action": "opened", "repository": {"full_name": "acme/app"}, "number": 7}"#;
        let hook: WebHook = serde_json::from_str(json).unwrap();
        assert_eq!(hook.action, "opened");
    }
}
