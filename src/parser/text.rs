//! Name and token normalisation shared by every extractor.

/// Title-case one fragment: first character upper, the rest lower.
fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Turn a constant-style fragment into a display name.
///
/// `SPEED_BOOST` → `Speed Boost`. Empty fragments (doubled underscores)
/// are dropped.
pub fn title_case_constant(token: &str) -> String {
    token
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Humanize a token that may be either a constant or already a display name.
///
/// Tokens containing lowercase letters are assumed to be display text
/// (`Thunder Punch`, `U-turn`) and are returned trimmed. Anything else is
/// treated as a constant: the `prefix` is stripped and the rest title-cased.
pub fn humanize(token: &str, prefix: &str) -> String {
    let token = token.trim();
    if token.chars().any(|c| c.is_ascii_lowercase()) {
        return token.to_string();
    }
    let bare = token.strip_prefix(prefix).unwrap_or(token);
    title_case_constant(bare)
}

/// Key used to match species names across sources.
///
/// Upper-cases and strips everything but ASCII letters and digits, so
/// `Mr. Mime`, `MR_MIME` and `MrMime` all collapse to `MRMIME`.
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Constant-table lookup key for a display token.
///
/// Upper-cases and folds every run of non-alphanumerics into one `_`:
/// `Mr. Mime` → `MR_MIME`.
pub fn constant_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// File-name stem for a species overlay: lower-cased letters only.
pub fn overlay_stem(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The first run of ASCII digits in `s`, parsed.
pub fn first_number(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Collapse every whitespace run into a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_constant() {
        assert_eq!(title_case_constant("SPEED_BOOST"), "Speed Boost");
        assert_eq!(title_case_constant("TACKLE"), "Tackle");
        assert_eq!(title_case_constant("MR__MIME"), "Mr Mime");
    }

    #[test]
    fn test_humanize_constant() {
        assert_eq!(humanize("MOVE_THUNDER_PUNCH", "MOVE_"), "Thunder Punch");
        assert_eq!(humanize("  ITEM_ORAN_BERRY ", "ITEM_"), "Oran Berry");
    }

    #[test]
    fn test_humanize_keeps_display_text() {
        assert_eq!(humanize("Thunder Punch", "MOVE_"), "Thunder Punch");
        assert_eq!(humanize("U-turn", "MOVE_"), "U-turn");
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("Mr. Mime"), "MRMIME");
        assert_eq!(sanitize_key("Porygon2"), "PORYGON2");
        assert_eq!(sanitize_key("Farfetch'd"), "FARFETCHD");
    }

    #[test]
    fn test_constant_key() {
        assert_eq!(constant_key("Mr. Mime"), "MR_MIME");
        assert_eq!(constant_key("Poochyena"), "POOCHYENA");
        assert_eq!(constant_key("Ho-Oh"), "HO_OH");
    }

    #[test]
    fn test_overlay_stem() {
        assert_eq!(overlay_stem("Mr. Mime"), "mrmime");
        assert_eq!(overlay_stem("Porygon-Z"), "porygonz");
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("ROUTE103"), Some(103));
        assert_eq!(first_number("GRANITE_CAVE_1F"), Some(1));
        assert_eq!(first_number("PETALBURG_WOODS"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n  b\tc "), "a b c");
    }
}
