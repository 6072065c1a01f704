//! Slug derivation, run as an explicit pre-write step by the catalog
//! service rather than hidden inside a persistence hook.

/// Derive a URL-safe identifier from a display name: ASCII-lowercased,
/// alphanumeric runs kept, everything else collapsed into single hyphens,
/// no leading or trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slug for a write: a non-blank supplied slug wins verbatim (trimmed),
/// otherwise the slug is derived from the name.
pub fn resolve_slug(supplied: Option<&str>, name: &str) -> String {
    match supplied {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => slugify(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Classic Tee"), "classic-tee");
        assert_eq!(slugify("Men"), "men");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Summer -- Sale!!"), "summer-sale");
        assert_eq!(slugify("  T-Shirts & Tops  "), "t-shirts-tops");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Café Blend"), "caf-blend");
    }

    #[test]
    fn no_leading_or_trailing_hyphen() {
        assert_eq!(slugify("!wow!"), "wow");
        assert_eq!(slugify("...a..."), "a");
    }

    #[test]
    fn derivation_is_idempotent() {
        let once = slugify("Oversized Fit Hoodie 2.0");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn supplied_slug_wins() {
        assert_eq!(resolve_slug(Some("mens-wear"), "Anything"), "mens-wear");
        assert_eq!(resolve_slug(Some("  "), "Classic Tee"), "classic-tee");
        assert_eq!(resolve_slug(None, "Classic Tee"), "classic-tee");
    }
}
