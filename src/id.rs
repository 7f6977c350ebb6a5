//! Canonical identifiers for Twitter sourced objects.

const NAMESPACE: &str = "id:twitter";

/// `id:twitter:<raw_id>`
pub fn format_id(raw_id: impl AsRef<str>) -> String {
    format!("{NAMESPACE}:{}", raw_id.as_ref())
}

/// `<kind>:id:twitter:<raw_id>`, used for activities where the verb
/// qualifies the id.
pub fn format_kind_id(kind: impl AsRef<str>, raw_id: impl AsRef<str>) -> String {
    format!("{}:{NAMESPACE}:{}", kind.as_ref(), raw_id.as_ref())
}

#[cfg(test)]
mod tests {
    use super::{format_id, format_kind_id};

    #[test]
    fn plain_id() {
        assert_eq!(format_id("42"), "id:twitter:42");
        assert_eq!(format_id(42.to_string()), "id:twitter:42");
    }

    #[test]
    fn verb_qualified_id() {
        assert_eq!(format_kind_id("post", "123"), "post:id:twitter:123");
        assert_eq!(format_kind_id("share", "123"), "share:id:twitter:123");
    }
}
