//! Validation of user-entered custom text component names.

use thiserror::Error;

use crate::allowlist::ComponentAllowlist;

/// Why a comma-separated component list was rejected.
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentNameError {
    #[error("You must enter at least one custom text component")]
    EmptyInput,

    #[error("Component name cannot be empty")]
    EmptyName,

    #[error("Component name can only start with a capital alphabet or '_' or '$'")]
    InvalidStart(String),

    #[error("Component name cannot contain white spaces")]
    ContainsWhitespace(String),

    #[error("Component name can only contain alphabets, numbers, '_' and '$'")]
    InvalidCharacter(String),

    #[error("Component \"{0}\" already exists")]
    AlreadyExists(String),
}

/// Returns true if `name` starts with an uppercase ASCII letter, `_` or `$`.
pub fn has_valid_start(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c == '_' || c == '$')
}

fn is_component_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Validates a single trimmed component name.
pub fn validate_component_name(name: &str) -> Result<(), ComponentNameError> {
    if name.is_empty() {
        return Err(ComponentNameError::EmptyName);
    }
    if !has_valid_start(name) {
        return Err(ComponentNameError::InvalidStart(name.to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ComponentNameError::ContainsWhitespace(name.to_string()));
    }
    if !name.chars().all(is_component_char) {
        return Err(ComponentNameError::InvalidCharacter(name.to_string()));
    }
    Ok(())
}

/// Parses a comma-separated list of new component names.
///
/// One trailing comma is accepted. Names are trimmed and checked in input
/// order; the first failure is returned. A name that is already in
/// `existing`, or repeated within `input`, is rejected.
pub fn parse_component_list(
    input: &str,
    existing: &ComponentAllowlist,
) -> Result<Vec<String>, ComponentNameError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ComponentNameError::EmptyInput);
    }

    let input = input.strip_suffix(',').unwrap_or(input);

    let mut names: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let name = raw.trim();
        validate_component_name(name)?;

        if existing.contains(name) || names.iter().any(|n| n == name) {
            return Err(ComponentNameError::AlreadyExists(name.to_string()));
        }
        names.push(name.to_string());
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn none() -> ComponentAllowlist {
        ComponentAllowlist::default()
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_component_list("MyText, StyledText,CustomText", &none()),
            Ok(vec![
                "MyText".to_string(),
                "StyledText".to_string(),
                "CustomText".to_string()
            ])
        );
    }

    #[test]
    fn test_trailing_comma_is_accepted() {
        assert_eq!(
            parse_component_list(" MyText, ", &none()),
            Ok(vec!["MyText".to_string()])
        );
    }

    #[rstest]
    #[case("", ComponentNameError::EmptyInput)]
    #[case("   ", ComponentNameError::EmptyInput)]
    #[case("A,,B", ComponentNameError::EmptyName)]
    #[case(",", ComponentNameError::EmptyName)]
    #[case("myText", ComponentNameError::InvalidStart("myText".into()))]
    #[case("1Text", ComponentNameError::InvalidStart("1Text".into()))]
    #[case("My Text", ComponentNameError::ContainsWhitespace("My Text".into()))]
    #[case("My-Text", ComponentNameError::InvalidCharacter("My-Text".into()))]
    #[case("Animated.Text", ComponentNameError::InvalidCharacter("Animated.Text".into()))]
    #[case("Text", ComponentNameError::AlreadyExists("Text".into()))]
    #[case("A, B, A", ComponentNameError::AlreadyExists("A".into()))]
    fn test_rejects(#[case] input: &str, #[case] expected: ComponentNameError) {
        assert_eq!(parse_component_list(input, &none()), Err(expected));
    }

    #[test]
    fn test_rejects_existing_custom_component() {
        let existing = ComponentAllowlist::new(["MyText"]);
        assert_eq!(
            parse_component_list("Other, MyText", &existing),
            Err(ComponentNameError::AlreadyExists("MyText".into()))
        );
    }

    #[rstest]
    #[case("_Private")]
    #[case("$Styled")]
    #[case("Label2")]
    fn test_accepts_valid_names(#[case] name: &str) {
        assert_eq!(validate_component_name(name), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        // "bad" fails before "Text" would be reported as existing.
        assert_eq!(
            parse_component_list("bad, Text", &none()),
            Err(ComponentNameError::InvalidStart("bad".into()))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ComponentNameError::InvalidStart("x".into()).to_string(),
            "Component name can only start with a capital alphabet or '_' or '$'"
        );
        assert_eq!(
            ComponentNameError::AlreadyExists("MyText".into()).to_string(),
            "Component \"MyText\" already exists"
        );
    }
}
