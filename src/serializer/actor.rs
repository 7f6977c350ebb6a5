use serde_json::{Value, json};
use tracing::warn;

use crate::activity::{Actor, Image};
use crate::datasift::{Twitter, User};
use crate::date::parse_to_utc;
use crate::id::format_id;

use super::Issue;

const PROFILE_IMAGE_HTTPS: &str = "profile_image_url_https";
const FAVOURITES_COUNT: &str = "favourites_count";

/// The tweet's own user, or the retweeted user when DataSift left the former
/// out. The two are never merged.
pub(super) fn select_user(twitter: &Twitter) -> Option<&User> {
    [
        twitter.user.as_ref(),
        twitter.retweet.as_ref().and_then(|retweet| retweet.user.as_ref()),
    ]
    .into_iter()
    .flatten()
    .next()
}

pub(super) fn build_actor(user: &User, issues: &mut Vec<Issue>) -> Actor {
    let mut actor = Actor {
        display_name: user.name.clone(),
        id: user
            .id_str
            .clone()
            .or_else(|| user.id.map(|id| id.to_string()))
            .map(format_id),
        summary: user.description.clone(),
        url: user.url.clone(),
        ..Default::default()
    };

    if let Some(raw) = user.created_at.as_deref() {
        match parse_to_utc(raw) {
            Ok(published) => actor.published = Some(published),
            Err(error) => {
                warn!(target: "serializer", %error, "unable to parse user created_at");
                issues.push(Issue::UnparseableTimestamp {
                    field: "actor.published",
                    raw: raw.to_string(),
                });
            }
        }
    }

    let extensions = actor.extensions_mut();
    extensions.insert("location".into(), json!(user.location));
    extensions.insert("posts".into(), json!(user.statuses_count));
    extensions.insert("followers".into(), json!(user.followers_count));
    extensions.insert("screenName".into(), json!(user.screen_name));
    let favorites = user.additional.get(FAVOURITES_COUNT).cloned();
    extensions.insert("favorites".into(), favorites.unwrap_or(Value::Null));

    actor.image = resolve_image(&actor, user);
    actor
}

/// First present candidate wins: an image already on the actor, the https
/// profile image from the loose properties, then the plain profile image.
fn resolve_image(actor: &Actor, user: &User) -> Option<Image> {
    actor
        .image
        .clone()
        .or_else(|| {
            user.additional
                .get(PROFILE_IMAGE_HTTPS)
                .and_then(Value::as_str)
                .map(|url| Image::from(url.to_string()))
        })
        .or_else(|| user.profile_image_url.clone().map(Image::from))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::{Value, json};

    use super::{build_actor, select_user};
    use crate::activity::Image;
    use crate::datasift::{Twitter, User};

    fn user(value: Value) -> Result<User> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn full_user() -> Result<()> {
        let user = user(json!({
            "id": 42,
            "id_str": "42",
            "name": "Bob",
            "screen_name": "bob",
            "description": "writes rust",
            "created_at": "Wed Aug 27 13:08:45 +0000 2008",
            "url": "http://bob.example.com",
            "location": "Berlin",
            "statuses_count": 1200,
            "followers_count": 30,
            "profile_image_url": "http://x/b.png",
            "favourites_count": 9
        }))?;
        let mut issues = Vec::new();
        let actor = build_actor(&user, &mut issues);

        assert!(issues.is_empty());
        assert_eq!(
            serde_json::to_value(&actor)?,
            json!({
                "id": "id:twitter:42",
                "displayName": "Bob",
                "summary": "writes rust",
                "published": "2008-08-27T13:08:45Z",
                "url": "http://bob.example.com",
                "image": {"url": "http://x/b.png"},
                "extensions": {
                    "location": "Berlin",
                    "posts": 1200,
                    "followers": 30,
                    "screenName": "bob",
                    "favorites": 9
                }
            })
        );
        Ok(())
    }

    #[test]
    fn numeric_id_backs_up_id_str() -> Result<()> {
        let actor = build_actor(&user(json!({"id": 77}))?, &mut Vec::new());
        assert_eq!(actor.id.as_deref(), Some("id:twitter:77"));
        Ok(())
    }

    #[test]
    fn favorites_always_present() -> Result<()> {
        let actor = build_actor(&user(json!({"id": 1}))?, &mut Vec::new());
        assert_eq!(actor.extensions.get("favorites"), Some(&Value::Null));

        let actor = build_actor(
            &user(json!({"id": 1, "favourites_count": null}))?,
            &mut Vec::new(),
        );
        assert_eq!(actor.extensions.get("favorites"), Some(&Value::Null));

        let actor = build_actor(
            &user(json!({"id": 1, "favourites_count": 3}))?,
            &mut Vec::new(),
        );
        assert_eq!(actor.extensions.get("favorites"), Some(&json!(3)));
        Ok(())
    }

    #[test]
    fn https_profile_image_preferred() -> Result<()> {
        let actor = build_actor(
            &user(json!({
                "id": 1,
                "profile_image_url": "http://x/b.png",
                "profile_image_url_https": "https://x/a.png"
            }))?,
            &mut Vec::new(),
        );
        assert_eq!(actor.image, Some(Image::from("https://x/a.png".to_string())));
        Ok(())
    }

    #[test]
    fn non_string_https_image_falls_through() -> Result<()> {
        let actor = build_actor(
            &user(json!({
                "id": 1,
                "profile_image_url": "http://x/b.png",
                "profile_image_url_https": false
            }))?,
            &mut Vec::new(),
        );
        assert_eq!(actor.image, Some(Image::from("http://x/b.png".to_string())));

        let actor = build_actor(&user(json!({"id": 1}))?, &mut Vec::new());
        assert_eq!(actor.image, None);
        Ok(())
    }

    #[test]
    fn select_user_falls_back_to_retweet() -> Result<()> {
        let twitter: Twitter = serde_json::from_value(json!({
            "retweet": {"user": {"id_str": "2"}}
        }))?;
        assert_eq!(select_user(&twitter).and_then(|u| u.id_str.as_deref()), Some("2"));
        assert!(select_user(&Twitter::default()).is_none());
        Ok(())
    }
}
