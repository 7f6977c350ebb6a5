//! Canonical Activity Streams shapes emitted by the serializer.
//!
//! Provider specific data never gets a typed field here, it goes into the
//! `extensions` map which every activity and actor carries, even when empty.

mod actor;
mod mention;

use jiff::Timestamp;
use serde::Serialize;
use serde_json::{Map, Value};

pub use actor::Actor;
pub use mention::UserMention;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Post,
    Share,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Post => "post",
            Verb::Share => "share",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub verb: Verb,
    pub actor: Actor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ActivityObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ActivityObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Generator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub links: Vec<String>,
    pub extensions: Map<String, Value>,
}

impl Activity {
    pub fn new(verb: Verb, id: String, actor: Actor) -> Self {
        Activity {
            id,
            verb,
            actor,
            object: None,
            target: None,
            published: None,
            generator: None,
            icon: None,
            provider: None,
            title: None,
            content: None,
            url: None,
            links: Vec::new(),
            extensions: Map::new(),
        }
    }

    pub fn extensions_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extensions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub object_type: String,
    pub id: String,
    pub display_name: String,
    pub url: String,
}

impl Provider {
    pub fn twitter() -> Self {
        Provider {
            object_type: "service".to_string(),
            id: "id:providers:twitter".to_string(),
            display_name: "Twitter".to_string(),
            url: "http://twitter.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
}

impl From<String> for Image {
    fn from(url: String) -> Self {
        Image { url }
    }
}
