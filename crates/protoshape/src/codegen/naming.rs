//! Identifier casing.

use crate::diagnostic::CompilerError;

/// Characters that separate the parts of a schema identifier.
const SEPARATORS: [char; 2] = ['_', '-'];

/// Converts a schema identifier to CamelCase.
///
/// Each part between separators gets its first character upper-cased, the
/// rest is kept as written. An empty part (leading, trailing or doubled
/// separator) becomes a single `_` so distinct inputs stay distinct.
///
/// ```
/// use protoshape::codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("phone_number").unwrap(), "PhoneNumber");
/// assert_eq!(to_camel_case("last-seen").unwrap(), "LastSeen");
/// ```
pub fn to_camel_case(name: &str) -> Result<String, CompilerError> {
    if name.is_empty() {
        return Err(CompilerError::empty_name("identifier passed to to_camel_case"));
    }

    let mut result = String::with_capacity(name.len());
    for part in name.split(SEPARATORS) {
        let mut chars = part.chars();
        match chars.next() {
            None => result.push('_'),
            Some(first) => {
                result.extend(first.to_uppercase());
                result.push_str(chars.as_str());
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_separated_parts() {
        assert_eq!(to_camel_case("phone_number").unwrap(), "PhoneNumber");
        assert_eq!(to_camel_case("last-seen-at").unwrap(), "LastSeenAt");
        assert_eq!(to_camel_case("mixed_sep-arators").unwrap(), "MixedSepArators");
    }

    #[test]
    fn test_keeps_inner_casing() {
        assert_eq!(to_camel_case("httpURL").unwrap(), "HttpURL");
        assert_eq!(to_camel_case("Person").unwrap(), "Person");
    }

    #[test]
    fn test_empty_parts_become_underscores() {
        assert_eq!(to_camel_case("_private").unwrap(), "_Private");
        assert_eq!(to_camel_case("double__sep").unwrap(), "Double_Sep");
        assert_eq!(to_camel_case("trailing_").unwrap(), "Trailing_");
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(matches!(
            to_camel_case(""),
            Err(CompilerError::EmptyName { .. })
        ));
    }
}
