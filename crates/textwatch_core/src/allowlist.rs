//! Component allowlist.

use serde::Serialize;

/// The component every project can render text in.
pub const DEFAULT_TEXT_COMPONENT: &str = "Text";

/// Tag names whose subtrees may contain raw text.
///
/// Always contains [`DEFAULT_TEXT_COMPONENT`]; user-registered names are kept
/// in their configured order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComponentAllowlist {
    custom: Vec<String>,
}

impl ComponentAllowlist {
    /// Creates an allowlist from user-registered names.
    ///
    /// Duplicates and the default component are dropped.
    pub fn new<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in custom {
            let name = name.into();
            if name != DEFAULT_TEXT_COMPONENT && !names.contains(&name) {
                names.push(name);
            }
        }
        Self { custom: names }
    }

    /// Returns true if `tag` is the default component or a registered one.
    pub fn contains(&self, tag: &str) -> bool {
        tag == DEFAULT_TEXT_COMPONENT || self.custom.iter().any(|name| name == tag)
    }

    /// Returns the user-registered names, without the default.
    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Iterates over every allowed name: registered names first, then the
    /// default.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.custom
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(DEFAULT_TEXT_COMPONENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_is_always_allowed() {
        assert!(ComponentAllowlist::default().contains("Text"));
        assert!(ComponentAllowlist::new(["MyText"]).contains("Text"));
    }

    #[test]
    fn test_membership_is_exact() {
        let allowlist = ComponentAllowlist::new(["MyText"]);
        assert!(allowlist.contains("MyText"));
        assert!(!allowlist.contains("mytext"));
        assert!(!allowlist.contains("MyTextInput"));
    }

    #[test]
    fn test_dedup_and_default_removed() {
        let allowlist = ComponentAllowlist::new(["B", "Text", "A", "B"]);
        assert_eq!(allowlist.custom(), &["B".to_string(), "A".to_string()]);
        assert_eq!(allowlist.iter().collect::<Vec<_>>(), vec!["B", "A", "Text"]);
    }
}
