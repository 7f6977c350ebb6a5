//! DataSift tweet to activity conversion.
//!
//! A conversion only fails when no user can be found to act as the actor.
//! Every other problem costs at most one field: it is logged, recorded as an
//! [`Issue`] on the returned [`Conversion`], and the rest of the record is
//! still produced.

mod actor;
mod extensions;
mod mentions;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::activity::{Activity, ActivityObject, Generator, Image, Provider, Verb};
use crate::datasift::{Datasift, Interaction, Links};
use crate::id::{format_id, format_kind_id};

use self::actor::{build_actor, select_user};
use self::extensions::{add_datasift_extension, add_location_extension, add_twitter_extensions};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("interaction {interaction_id:?} has neither a twitter user nor a retweeted user")]
    MissingActorSource { interaction_id: Option<String> },
}

/// Recoverable problems met while converting one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A timestamp could not be parsed, the field was left unset.
    UnparseableTimestamp { field: &'static str, raw: String },
    /// A hashtag entry was not a string and was dropped.
    NonStringHashtag { found: &'static str },
    /// A `mentions` or `mention_ids` entry had the wrong shape and was dropped.
    MalformedMention { list: &'static str, found: String },
    /// A loose property expected to hold a list held something else and was
    /// ignored.
    MalformedList {
        list: &'static str,
        found: &'static str,
    },
    /// The interaction carried no id, the activity id has an empty tail.
    MissingInteractionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub activity: Activity,
    pub issues: Vec<Issue>,
}

/// Convert one DataSift event into a canonical activity.
pub fn convert(event: &Datasift) -> Result<Conversion, ConvertError> {
    let Datasift {
        interaction,
        twitter,
        links,
        ..
    } = event;
    let mut issues = Vec::new();

    let verb = if twitter.retweet.is_some() {
        Verb::Share
    } else {
        Verb::Post
    };
    let user = select_user(twitter).ok_or_else(|| ConvertError::MissingActorSource {
        interaction_id: interaction.id.clone(),
    })?;
    let actor = build_actor(user, &mut issues);
    let id = match interaction.id.as_deref() {
        Some(raw_id) => format_kind_id(verb.as_str(), raw_id),
        None => {
            warn!(target: "serializer", "interaction has no id");
            issues.push(Issue::MissingInteractionId);
            format_kind_id(verb.as_str(), "")
        }
    };

    let mut activity = Activity::new(verb, id, actor);
    activity.object = Some(build_object(interaction));
    activity.published = interaction.created_at;
    activity.generator = build_generator(interaction);
    activity.icon = interaction
        .author
        .as_ref()
        .and_then(|author| author.avatar.clone())
        .map(Image::from);
    activity.provider = Some(Provider::twitter());
    activity.title = interaction.title.clone();
    activity.content = interaction.content.clone();
    activity.url = interaction.link.clone();
    activity.links = links.as_ref().map(Links::urls).unwrap_or_default();

    add_datasift_extension(&mut activity, event);
    if let Some(geo) = &twitter.geo {
        add_location_extension(&mut activity, geo);
    }
    add_twitter_extensions(&mut activity, twitter, interaction, &mut issues);

    debug!(target: "serializer", id = %activity.id, issues = issues.len(), "converted interaction");
    Ok(Conversion { activity, issues })
}

fn build_object(interaction: &Interaction) -> ActivityObject {
    ActivityObject {
        object_type: interaction
            .contenttype
            .clone()
            .or_else(|| interaction.kind.clone()),
        id: interaction.id.as_deref().map(format_id),
        url: interaction.link.clone(),
        content: interaction.content.clone(),
    }
}

fn build_generator(interaction: &Interaction) -> Option<Generator> {
    let source = interaction.source.as_deref()?;
    Some(Generator {
        id: Some(format_id(source)),
        display_name: Some(source.to_string()),
    })
}

fn malformed_list(list: &'static str, value: &Value, issues: &mut Vec<Issue>) {
    let found = json_type(value);
    warn!(target: "serializer", list, found, "expected a list, ignored");
    issues.push(Issue::MalformedList { list, found });
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
