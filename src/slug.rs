//! URL slugs derived from display names.
//!
//! A slug is lowercase ASCII: letters, digits, `_` and single `-` separators.
//! Uniqueness is scoped by the caller (globally for restaurants, per
//! restaurant for categories, per category for products); collisions get a
//! numeric suffix: `pizza`, `pizza-1`, `pizza-2`, ...

use crate::error::{AppError, AppResult};

/// Longest base slug kept before a collision suffix is appended.
const MAX_BASE_LEN: usize = 80;

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars().flat_map(fold_char) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    if slug.len() > MAX_BASE_LEN {
        slug.truncate(MAX_BASE_LEN);
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Like [`slugify`] but rejects names that produce an empty slug.
pub fn base_slug(name: &str) -> AppResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::bad_request(
            "name must contain at least one letter or digit",
        ));
    }
    Ok(slug)
}

/// Picks `base`, or the first `base-N` (N >= 1) not present in `taken`.
///
/// `taken` only needs to hold the slugs of the scope that start with `base`.
pub fn next_free<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|s| s.as_ref() == candidate);
    if !is_taken(base) {
        return base.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Folds common accented Latin letters to their ASCII base letter.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    let folded: &'static str = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => "a",
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "A",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'É' | 'È' | 'Ê' | 'Ë' => "E",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'Í' | 'Ì' | 'Î' | 'Ï' => "I",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => "o",
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => "O",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'Ú' | 'Ù' | 'Û' | 'Ü' => "U",
        'ñ' => "n",
        'Ñ' => "N",
        'ç' => "c",
        'Ç' => "C",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'ø' => "o",
        'Ø' => "O",
        _ => "",
    };
    let single = if folded.is_empty() { Some(ch) } else { None };
    folded.chars().chain(single)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_joins_words() {
        assert_eq!(slugify("Pizza Place"), "pizza-place");
        assert_eq!(slugify("  Pizza   Place  "), "pizza-place");
        assert_eq!(slugify("Pizza--Place"), "pizza-place");
    }

    #[test]
    fn slugify_drops_punctuation_and_folds_accents() {
        assert_eq!(slugify("Pizza & Pasta!"), "pizza-pasta");
        assert_eq!(slugify("Café Niño"), "cafe-nino");
        assert_eq!(slugify("Rock'n'Roll"), "rocknroll");
        assert_eq!(slugify("-_Bebidas_-"), "bebidas");
        assert_eq!(slugify("寿司"), "");
    }

    #[test]
    fn base_slug_rejects_symbol_only_names() {
        assert!(base_slug("!!!").is_err());
        assert_eq!(base_slug("Tacos 24/7").unwrap(), "tacos-247");
    }

    #[test]
    fn next_free_appends_numeric_suffix() {
        let none: [&str; 0] = [];
        assert_eq!(next_free("pizza", &none), "pizza");
        assert_eq!(next_free("pizza", &["pizza"]), "pizza-1");
        assert_eq!(
            next_free("pizza", &["pizza", "pizza-1", "pizza-2"]),
            "pizza-3"
        );
        assert_eq!(next_free("pizza", &["pizza", "pizza-2"]), "pizza-1");
        assert_eq!(next_free("pizza", &["pizza-1"]), "pizza");
    }

    #[test]
    fn slugify_caps_base_length() {
        let long = "a".repeat(200);
        assert_eq!(slugify(&long).len(), MAX_BASE_LEN);
    }
}
