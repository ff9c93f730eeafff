//! Field readers for struct-table blocks.
//!
//! Each reader pulls one `.field = value` out of a block's text and reports
//! absence as `None`; callers apply their own defaults. Conditional
//! compilation is not evaluated. Numeric readers try a fixed list of
//! patterns in priority order and the first one that matches wins, which in
//! practice selects the value from the first textual `#if` branch and the
//! true arm of a ternary.

use regex::Regex;

use super::text::collapse_whitespace;

/// Reader for an integer field.
#[derive(Debug, Clone)]
pub struct NumericField {
    patterns: Vec<Regex>,
}

impl NumericField {
    /// Build the pattern priority list for `.name`:
    ///
    /// 1. `.name = 80,`
    /// 2. `.name = COND ? 80 : 70` (true arm)
    /// 3. `#if ... .name = 80` (first branch)
    /// 4. `.name = 80` anywhere (last field without a trailing comma)
    pub fn new(name: &str) -> Self {
        let field = regex::escape(name);
        let patterns = [
            format!(r"\.{field}\s*=\s*(-?\d+)\s*,"),
            format!(r"\.{field}\s*=\s*[^?,;\n]+\?\s*(-?\d+)\s*:"),
            format!(r"#if[^#]*?\.{field}\s*=\s*(-?\d+)"),
            format!(r"\.{field}\s*=\s*(-?\d+)"),
        ]
        .iter()
        .map(|p| Regex::new(p).expect("escaped field name is a valid pattern"))
        .collect();

        Self { patterns }
    }

    /// Read the field as a signed integer.
    pub fn read(&self, block: &str) -> Option<i64> {
        self.patterns
            .iter()
            .find_map(|p| p.captures(block))
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Read the field as a non-negative integer.
    pub fn read_u32(&self, block: &str) -> Option<u32> {
        self.read(block).and_then(|v| u32::try_from(v).ok())
    }

    pub fn read_i32(&self, block: &str) -> Option<i32> {
        self.read(block).and_then(|v| i32::try_from(v).ok())
    }
}

/// Reader for a string field wrapped in a translation macro.
///
/// Accepts `_("...")`, `COMPOUND_STRING("...")` and the like, with one or
/// more adjacent quoted fragments inside the wrapper.
#[derive(Debug, Clone)]
pub struct StringField {
    pattern: Regex,
}

impl StringField {
    pub fn new(name: &str, wrappers: &[&str]) -> Self {
        let wrappers = wrappers
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r#"\.{}\s*=\s*(?:{})\(\s*((?:"(?:[^"\\]|\\.)*"\s*)+)\)"#,
            regex::escape(name),
            wrappers
        );
        Self {
            pattern: Regex::new(&pattern).expect("escaped field name is a valid pattern"),
        }
    }

    /// Read and clean the field: fragments joined with a space, `\n` escapes
    /// turned into spaces, whitespace collapsed, trimmed.
    pub fn read(&self, block: &str) -> Option<String> {
        let caps = self.pattern.captures(block)?;
        let fragments = quoted_fragments(&caps[1]);
        Some(clean_string(&fragments.join(" ")))
    }
}

/// Reader for a bare symbolic token: `.type = TYPE_FIRE`.
#[derive(Debug, Clone)]
pub struct TokenField {
    pattern: Regex,
}

impl TokenField {
    pub fn new(name: &str) -> Self {
        let pattern = format!(r"\.{}\s*=\s*(\w+)", regex::escape(name));
        Self {
            pattern: Regex::new(&pattern).expect("escaped field name is a valid pattern"),
        }
    }

    pub fn read<'a>(&self, block: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// `.name = TRUE` appears anywhere in the block.
pub fn has_flag(block: &str, name: &str) -> bool {
    block.contains(&format!(".{} = TRUE", name))
}

/// Resolve a token through a fixed display table, falling back to the
/// token itself.
pub fn display(table: &[(&str, &str)], token: &str) -> String {
    table
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Every `"..."` fragment in `s`, without quotes, in source order.
pub fn quoted_fragments(s: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut rest = s;
    while let Some(start) = rest.find('"') {
        let after = &rest[start + 1..];
        let mut end = None;
        let mut escaped = false;
        for (i, c) in after.char_indices() {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    end = Some(i);
                    break;
                }
                _ => escaped = false,
            }
        }
        let Some(end) = end else { break };
        fragments.push(&after[..end]);
        rest = &after[end + 1..];
    }
    fragments
}

/// Unescape line breaks and quotes, then collapse whitespace.
pub fn clean_string(s: &str) -> String {
    let unescaped = s.replace("\\n", " ").replace("\\\"", "\"");
    collapse_whitespace(&unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_simple() {
        let price = NumericField::new("price");
        assert_eq!(price.read("{ .price = 500, }"), Some(500));
    }

    #[test]
    fn test_numeric_ternary_takes_true_arm() {
        let price = NumericField::new("price");
        assert_eq!(price.read("{ .price = P_FLAG ? 300 : 500, }"), Some(300));
    }

    #[test]
    fn test_numeric_ternary_with_parenthesised_condition() {
        let accuracy = NumericField::new("accuracy");
        let block = "{ .accuracy = (B_UPDATED_MOVE_DATA >= GEN_6) ? 100 : 90, }";
        assert_eq!(accuracy.read(block), Some(100));
    }

    #[test]
    fn test_numeric_first_branch_wins() {
        let power = NumericField::new("power");
        let block = "{\n#if B_UPDATED_MOVE_DATA >= GEN_6\n    .power = 90,\n#else\n    .power = 95,\n#endif\n}";
        assert_eq!(power.read(block), Some(90));
    }

    #[test]
    fn test_numeric_first_branch_with_expression_value() {
        let exp = NumericField::new("expYield");
        let block = "{\n#if P_UPDATED_EXP_YIELDS >= GEN_5\n    .expYield = 64\n#else\n    .expYield = 60\n#endif\n}";
        assert_eq!(exp.read(block), Some(64));
    }

    #[test]
    fn test_numeric_negative() {
        let priority = NumericField::new("priority");
        assert_eq!(priority.read("{ .priority = -6, }"), Some(-6));
        assert_eq!(priority.read_u32("{ .priority = -6, }"), None);
        assert_eq!(priority.read_i32("{ .priority = -6, }"), Some(-6));
    }

    #[test]
    fn test_numeric_does_not_match_prefixed_field() {
        let hp = NumericField::new("baseHP");
        assert_eq!(hp.read("{ .baseHPX = 5, }"), None);
    }

    #[test]
    fn test_numeric_absent() {
        let pp = NumericField::new("pp");
        assert_eq!(pp.read("{ .power = 40, }"), None);
    }

    #[test]
    fn test_string_single_fragment() {
        let name = StringField::new("name", &["_"]);
        assert_eq!(name.read(r#"{ .name = _("Stench"), }"#).as_deref(), Some("Stench"));
    }

    #[test]
    fn test_string_multi_fragment() {
        let desc = StringField::new("description", &["COMPOUND_STRING"]);
        let block = "{ .description = COMPOUND_STRING(\n    \"A powerful\\n\"\n    \"attack.\"),\n}";
        assert_eq!(desc.read(block).as_deref(), Some("A powerful attack."));
    }

    #[test]
    fn test_string_unescapes_line_breaks() {
        let desc = StringField::new("description", &["COMPOUND_STRING"]);
        let block = r#"{ .description = COMPOUND_STRING("Helps\nprevent  flinching."), }"#;
        assert_eq!(desc.read(block).as_deref(), Some("Helps prevent flinching."));
    }

    #[test]
    fn test_string_alternate_wrappers() {
        let name = StringField::new("name", &["ITEM_NAME", "COMPOUND_STRING"]);
        assert_eq!(name.read(r#"{ .name = ITEM_NAME("Potion"), }"#).as_deref(), Some("Potion"));
        assert_eq!(name.read(r#"{ .name = COMPOUND_STRING("Potion"), }"#).as_deref(), Some("Potion"));
        assert_eq!(name.read(r#"{ .name = _("Potion"), }"#), None);
    }

    #[test]
    fn test_string_escaped_quote() {
        let name = StringField::new("name", &["_"]);
        assert_eq!(
            name.read(r#"{ .name = _("King\"s"), }"#).as_deref(),
            Some("King\"s")
        );
    }

    #[test]
    fn test_token_field() {
        let ty = TokenField::new("type");
        assert_eq!(ty.read("{ .type = TYPE_FIRE, .types = X }"), Some("TYPE_FIRE"));
        assert_eq!(ty.read("{ .power = 1 }"), None);
    }

    #[test]
    fn test_has_flag() {
        assert!(has_flag("{ .makesContact = TRUE, }", "makesContact"));
        assert!(!has_flag("{ .makesContact = FALSE, }", "makesContact"));
    }

    #[test]
    fn test_display_fallback() {
        let table = [("GROWTH_FAST", "Fast")];
        assert_eq!(display(&table, "GROWTH_FAST"), "Fast");
        assert_eq!(display(&table, "GROWTH_ODD"), "GROWTH_ODD");
    }

    #[test]
    fn test_quoted_fragments() {
        assert_eq!(quoted_fragments(r#" "a" "b c"  "#), vec!["a", "b c"]);
        assert_eq!(quoted_fragments(r#""unterminated"#), Vec::<&str>::new());
    }
}
