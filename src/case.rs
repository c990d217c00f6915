//! Case conversion for routes: camelCase action names -> kebab-case path segments.

/// Convert a camelCase action identifier into a kebab-case route segment.
/// e.g. "updateProfile" -> "update-profile", "findOne" -> "find-one"
///
/// Only the fallback for explicit actions that carry neither a configured
/// route nor a blueprint route.
pub fn to_route_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_separator_before_each_interior_capital() {
        assert_eq!(to_route_segment("updateUserProfile"), "update-user-profile");
        assert_eq!(to_route_segment("findOne"), "find-one");
    }

    #[test]
    fn leading_capital_gets_no_separator() {
        assert_eq!(to_route_segment("Find"), "find");
    }

    #[test]
    fn lowercase_names_pass_through() {
        assert_eq!(to_route_segment("find"), "find");
        assert_eq!(to_route_segment(""), "");
    }
}
