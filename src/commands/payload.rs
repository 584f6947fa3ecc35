//! Typed command payloads.
//!
//! Pages are loose about shapes: ids may come bare or wrapped in an object,
//! and the chrome calls a provider's label `name`. The types here accept both.

use super::Reply;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub(super) fn parse<T: DeserializeOwned>(payload: &Value) -> Result<T, Reply> {
    T::deserialize(payload).map_err(|err| {
        debug!(error = %err, "invalid command payload");
        Reply::invalid()
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdArg {
    Bare(String),
    Wrapped { id: String },
}

impl IdArg {
    pub(super) fn into_id(self) -> String {
        match self {
            IdArg::Bare(id) | IdArg::Wrapped { id } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum UrlArg {
    Bare(String),
    Wrapped { url: String },
}

impl UrlArg {
    pub(super) fn into_url(self) -> String {
        match self {
            UrlArg::Bare(url) | UrlArg::Wrapped { url } => url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum VisibleArg {
    Bare(bool),
    Wrapped { visible: bool },
}

impl VisibleArg {
    pub(super) fn visible(&self) -> bool {
        match self {
            VisibleArg::Bare(visible) | VisibleArg::Wrapped { visible } => *visible,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum HeightArg {
    Bare(f64),
    Wrapped { height: f64 },
}

impl HeightArg {
    pub(super) fn height(&self) -> f64 {
        match self {
            HeightArg::Bare(height) | HeightArg::Wrapped { height } => *height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddPayload {
    #[serde(alias = "name")]
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub set_as_default: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdatePayload {
    pub id: String,
    #[serde(default, alias = "name")]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PinnedPayload {
    pub id: String,
    pub pinned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_parse_bare_or_wrapped() {
        let bare: IdArg = parse(&json!("claude")).expect("bare id");
        let wrapped: IdArg = parse(&json!({"id": "claude"})).expect("wrapped id");
        assert_eq!(bare.into_id(), "claude");
        assert_eq!(wrapped.into_id(), "claude");
        assert!(parse::<IdArg>(&json!(42)).is_err());
        assert!(parse::<IdArg>(&Value::Null).is_err());
    }

    #[test]
    fn add_payload_accepts_name_alias() {
        let add: AddPayload = parse(&json!({
            "name": "Bot",
            "url": "https://bot.example/",
            "setAsDefault": true
        }))
        .expect("add payload");
        assert_eq!(add.label, "Bot");
        assert_eq!(add.set_as_default, Some(true));
        assert_eq!(add.pinned, None);
    }

    #[test]
    fn height_rejects_strings() {
        assert!(parse::<HeightArg>(&json!("48")).is_err());
        let height: HeightArg = parse(&json!({"height": 52.5})).expect("height");
        assert_eq!(height.height(), 52.5);
    }
}
