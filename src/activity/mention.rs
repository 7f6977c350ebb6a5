use serde::Serialize;

/// A user referenced from a post.
///
/// Built either from a handle (`name` and `screen_name`) or from a numeric id
/// (`id_str` and `id`), never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserMention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl UserMention {
    pub fn from_handle(handle: &str) -> Self {
        UserMention {
            name: Some(handle.to_string()),
            screen_name: Some(handle.to_string()),
            ..Default::default()
        }
    }

    pub fn from_id(id: i64) -> Self {
        UserMention {
            id_str: Some(crate::id::format_id(id.to_string())),
            id: Some(id),
            ..Default::default()
        }
    }
}
