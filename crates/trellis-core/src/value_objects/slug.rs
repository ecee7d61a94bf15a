//! Organization slug validation and generation

use thiserror::Error;

/// Minimum slug length
const SLUG_MIN_LEN: usize = 2;
/// Maximum slug length
const SLUG_MAX_LEN: usize = 48;

/// Errors from slug validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug must be {SLUG_MIN_LEN}-{SLUG_MAX_LEN} characters")]
    Length,

    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    Charset,

    #[error("slug may not start or end with a hyphen")]
    HyphenEdge,
}

/// Validate a client-supplied slug
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if !(SLUG_MIN_LEN..=SLUG_MAX_LEN).contains(&slug.len()) {
        return Err(SlugError::Length);
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(SlugError::Charset);
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(SlugError::HyphenEdge);
    }
    Ok(())
}

/// Derive a slug from an organization name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and truncates. Names with no usable characters get a random slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
        if slug.len() >= SLUG_MAX_LEN {
            break;
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.len() < SLUG_MIN_LEN {
        return format!("org-{}", random_suffix());
    }
    slug
}

/// Append a random suffix for collision retries (`my-org` -> `my-org-x7k2`)
pub fn with_random_suffix(slug: &str) -> String {
    let base_max = SLUG_MAX_LEN - 5;
    let base = if slug.len() > base_max {
        &slug[..base_max]
    } else {
        slug
    };
    format!("{}-{}", base.trim_end_matches('-'), random_suffix())
}

fn random_suffix() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    const SUFFIX_LEN: usize = 4;

    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("acme").is_ok());
        assert!(validate_slug("acme-corp-2").is_ok());
        assert_eq!(validate_slug("a"), Err(SlugError::Length));
        assert_eq!(validate_slug("Acme"), Err(SlugError::Charset));
        assert_eq!(validate_slug("acme corp"), Err(SlugError::Charset));
        assert_eq!(validate_slug("-acme"), Err(SlugError::HyphenEdge));
        assert_eq!(validate_slug("acme-"), Err(SlugError::HyphenEdge));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Acme -- Corp!  "), "acme-corp");
        assert_eq!(slugify("Ωmega Team 42"), "mega-team-42");
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for name in ["Acme Corp", "x y z", "Hello, World!", "A B"] {
            assert!(validate_slug(&slugify(name)).is_ok(), "name: {name}");
        }
    }

    #[test]
    fn test_slugify_degenerate_name_gets_random_slug() {
        let slug = slugify("!!!");
        assert!(slug.starts_with("org-"));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_random_suffix_keeps_slug_valid() {
        let slug = with_random_suffix("acme-corp");
        assert!(slug.starts_with("acme-corp-"));
        assert!(validate_slug(&slug).is_ok());
    }
}
