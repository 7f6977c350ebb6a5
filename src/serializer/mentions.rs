//! DataSift reports mentioned handles and mentioned ids as two separate
//! lists. Nothing guarantees they line up, so each entry becomes its own
//! mention: handles first, then ids.

use serde_json::Value;
use tracing::warn;

use crate::activity::UserMention;
use crate::datasift::Interaction;

use super::{Issue, malformed_list};

const MENTIONS: &str = "mentions";
const MENTION_IDS: &str = "mention_ids";

pub(super) fn create_user_mentions(
    interaction: &Interaction,
    issues: &mut Vec<Issue>,
) -> Vec<UserMention> {
    let handles = raw_list(interaction, MENTIONS, issues);
    let ids = raw_list(interaction, MENTION_IDS, issues);
    let mut mentions = Vec::with_capacity(handles.len() + ids.len());

    for entry in handles {
        match entry.as_str() {
            Some(handle) => mentions.push(UserMention::from_handle(handle)),
            None => malformed(MENTIONS, entry, issues),
        }
    }
    for entry in ids {
        match mention_id(entry) {
            Some(id) => mentions.push(UserMention::from_id(id)),
            None => malformed(MENTION_IDS, entry, issues),
        }
    }

    mentions
}

/// Absent or null lists are empty. Anything else that is not a list is
/// reported and treated as empty.
fn raw_list<'a>(
    interaction: &'a Interaction,
    key: &'static str,
    issues: &mut Vec<Issue>,
) -> &'a [Value] {
    match interaction.additional.get(key) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            malformed_list(key, other, issues);
            &[]
        }
    }
}

/// Ids arrive as JSON numbers, or as numeric strings from older feeds.
fn mention_id(entry: &Value) -> Option<i64> {
    match entry {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn malformed(list: &'static str, entry: &Value, issues: &mut Vec<Issue>) {
    warn!(target: "serializer", list, %entry, "dropping malformed mention");
    issues.push(Issue::MalformedMention {
        list,
        found: entry.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use serde_json::{Value, json};

    use super::create_user_mentions;
    use crate::activity::UserMention;
    use crate::datasift::Interaction;
    use crate::serializer::Issue;

    fn interaction(additional: Value) -> Result<Interaction> {
        Ok(serde_json::from_value(additional)?)
    }

    #[test]
    fn same_length_lists_stay_disjoint() -> Result<()> {
        let mentions = create_user_mentions(
            &interaction(json!({"mentions": ["alice", "bob"], "mention_ids": [1, 2]}))?,
            &mut Vec::new(),
        );
        assert_eq!(
            mentions,
            vec![
                UserMention::from_handle("alice"),
                UserMention::from_handle("bob"),
                UserMention::from_id(1),
                UserMention::from_id(2),
            ]
        );
        assert_eq!(mentions[2].id_str.as_deref(), Some("id:twitter:1"));
        assert_eq!(mentions[3].id, Some(2));
        assert!(mentions[0].id.is_none() && mentions[2].name.is_none());
        Ok(())
    }

    #[test]
    fn size_is_sum_of_both_lists() -> Result<()> {
        for (handles, ids) in [(0, 0), (0, 3), (2, 0), (3, 1)] {
            let value = json!({
                "mentions": (0..handles).map(|i| format!("user{i}")).collect::<Vec<_>>(),
                "mention_ids": (0..ids).collect::<Vec<i64>>(),
            });
            let mentions = create_user_mentions(&interaction(value)?, &mut Vec::new());
            assert_eq!(mentions.len(), handles + ids as usize);
        }
        Ok(())
    }

    #[test]
    fn absent_lists_yield_nothing() -> Result<()> {
        let mentions = create_user_mentions(&Interaction::default(), &mut Vec::new());
        assert!(mentions.is_empty());
        Ok(())
    }

    #[test]
    fn non_list_mentions_are_reported() -> Result<()> {
        let mut issues = Vec::new();
        let mentions = create_user_mentions(
            &interaction(json!({"mentions": "alice", "mention_ids": [4]}))?,
            &mut issues,
        );
        assert_eq!(mentions, vec![UserMention::from_id(4)]);
        assert_eq!(
            issues,
            vec![Issue::MalformedList {
                list: "mentions",
                found: "string"
            }]
        );

        let mut issues = Vec::new();
        let mentions =
            create_user_mentions(&interaction(json!({"mention_ids": null}))?, &mut issues);
        assert!(mentions.is_empty() && issues.is_empty());
        Ok(())
    }

    #[test]
    fn string_ids_accepted_junk_dropped() -> Result<()> {
        let mut issues = Vec::new();
        let mentions = create_user_mentions(
            &interaction(json!({"mentions": ["carol", 5], "mention_ids": ["31", "x"]}))?,
            &mut issues,
        );
        assert_eq!(
            mentions,
            vec![UserMention::from_handle("carol"), UserMention::from_id(31)]
        );
        assert_eq!(
            issues,
            vec![
                Issue::MalformedMention {
                    list: "mentions",
                    found: "5".to_string()
                },
                Issue::MalformedMention {
                    list: "mention_ids",
                    found: "\"x\"".to_string()
                },
            ]
        );
        Ok(())
    }
}
