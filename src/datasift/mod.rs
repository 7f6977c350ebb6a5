//! Raw DataSift envelope, as delivered by the DataSift push API for the
//! `twitter` source.
//!
//! Only the fields the serializer reads are typed. Everything else is kept in
//! the `additional` maps so the envelope can be re-emitted untouched.

mod interaction;
mod twitter;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use interaction::{Author, Interaction};
pub use twitter::{Geo, Retweet, Twitter, User};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Datasift {
    #[serde(default)]
    pub interaction: Interaction,
    #[serde(default)]
    pub twitter: Twitter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Links DataSift extracted from the post body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_url: Option<Vec<Value>>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Links {
    /// Normalized urls when DataSift resolved them, the raw ones otherwise.
    pub fn urls(&self) -> Vec<String> {
        [self.normalized_url.as_ref(), self.url.as_ref()]
            .into_iter()
            .flatten()
            .next()
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::json;

    use super::{Datasift, Links};

    #[test]
    fn parse_envelope() -> Result<()> {
        let event: Datasift = serde_json::from_value(json!({
            "interaction": {
                "id": "1e3a5c2b8f7d",
                "type": "twitter",
                "content": "hello #rust",
                "created_at": "Sat, 01 Jan 2011 00:00:00 +0000",
                "mentions": ["alice"],
                "mention_ids": [17]
            },
            "twitter": {
                "id": "420",
                "hashtags": ["rust"],
                "geo": {"latitude": 51.5, "longitude": -0.12},
                "user": {"id": 17, "id_str": "17", "screen_name": "alice", "lang": "en"}
            },
            "klout": {"score": 40}
        }))?;

        assert_eq!(event.interaction.id.as_deref(), Some("1e3a5c2b8f7d"));
        assert_eq!(
            event.interaction.created_at.map(|ts| ts.to_string()),
            Some("2011-01-01T00:00:00Z".to_string())
        );
        assert!(event.interaction.additional.contains_key("mentions"));
        assert_eq!(event.twitter.hashtags, Some(json!(["rust"])));
        let user = event.twitter.user.as_ref().expect("user");
        assert_eq!(user.screen_name.as_deref(), Some("alice"));
        assert_eq!(user.additional.get("lang"), Some(&json!("en")));
        assert_eq!(event.additional.get("klout"), Some(&json!({"score": 40})));
        Ok(())
    }

    #[test]
    fn unparseable_interaction_date_is_dropped() -> Result<()> {
        let event: Datasift = serde_json::from_value(json!({
            "interaction": {"id": "1", "created_at": "yesterday-ish"},
            "twitter": {}
        }))?;
        assert!(event.interaction.created_at.is_none());
        Ok(())
    }

    #[test]
    fn links_prefer_normalized() -> Result<()> {
        let links: Links = serde_json::from_value(json!({
            "url": ["http://t.co/a"],
            "normalized_url": ["http://example.com/a", 7]
        }))?;
        assert_eq!(links.urls(), vec!["http://example.com/a".to_string()]);

        let links: Links = serde_json::from_value(json!({"url": ["http://t.co/a"]}))?;
        assert_eq!(links.urls(), vec!["http://t.co/a".to_string()]);
        assert!(Links::default().urls().is_empty());
        Ok(())
    }
}
