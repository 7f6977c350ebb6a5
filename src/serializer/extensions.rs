use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::activity::Activity;
use crate::datasift::{Datasift, Geo, Interaction, Twitter};

use super::mentions::create_user_mentions;
use super::{Issue, json_type, malformed_list};

/// Keep the untouched envelope next to the canonical fields.
pub(super) fn add_datasift_extension(activity: &mut Activity, event: &Datasift) {
    if let Some(value) = extension_value("datasift", event) {
        activity.extensions_mut().insert("datasift".into(), value);
    }
}

pub(super) fn add_location_extension(activity: &mut Activity, geo: &Geo) {
    let Some(position) = geo.position() else {
        debug!(target: "serializer", ?geo, "incomplete geo, no location extension");
        return;
    };
    activity.extensions_mut().insert(
        "location".into(),
        json!({
            "coordinates": {
                "type": "point",
                "coordinates": position,
            }
        }),
    );
}

pub(super) fn add_twitter_extensions(
    activity: &mut Activity,
    twitter: &Twitter,
    interaction: &Interaction,
    issues: &mut Vec<Issue>,
) {
    let hashtags = collect_hashtags(twitter, issues);
    let mentions = create_user_mentions(interaction, issues);

    let extensions = activity.extensions_mut();
    extensions.insert("hashtags".into(), json!(hashtags));

    if let Some(retweet) = &twitter.retweet {
        extensions.insert(
            "rebroadcasts".into(),
            json!({
                "perspectival": true,
                "count": retweet.count,
            }),
        );
    }

    if !mentions.is_empty() {
        if let Some(value) = extension_value("user_mentions", &mentions) {
            extensions.insert("user_mentions".into(), value);
        }
    }

    extensions.insert("keywords".into(), json!(interaction.content));
}

/// Hashtags of the tweet itself, or of the retweeted tweet when the former
/// are missing. A candidate that is not a list is reported and skipped. Only
/// string entries survive.
fn collect_hashtags(twitter: &Twitter, issues: &mut Vec<Issue>) -> Vec<String> {
    let candidates = [
        ("hashtags", twitter.hashtags.as_ref()),
        (
            "retweet.hashtags",
            twitter
                .retweet
                .as_ref()
                .and_then(|retweet| retweet.hashtags.as_ref()),
        ),
    ];
    let selected = candidates
        .into_iter()
        .find_map(|(list, candidate)| match candidate? {
            Value::Array(entries) => Some(entries.as_slice()),
            other => {
                malformed_list(list, other, issues);
                None
            }
        })
        .unwrap_or_default();

    let mut hashtags = Vec::with_capacity(selected.len());
    for entry in selected {
        match entry {
            Value::String(tag) => hashtags.push(tag.clone()),
            other => {
                let found = json_type(other);
                warn!(target: "serializer", found, "hashtag is not a string, dropped");
                issues.push(Issue::NonStringHashtag { found });
            }
        }
    }
    hashtags
}

fn extension_value<T: Serialize>(key: &str, value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(target: "serializer", key, %error, "unable to encode extension");
            None
        }
    }
}
