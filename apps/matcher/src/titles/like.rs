//! LIKE pattern escaping for callers, plus `ILIKE` semantics for the in-memory store.

/// Escapes `\`, `%` and `_` so `input` only matches itself under LIKE.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Compiles a LIKE pattern to an anchored, case-insensitive regex.
/// `%` matches any run of characters, `_` exactly one, `\` escapes the next character.
#[cfg(test)]
pub fn like_regex(pattern: &str) -> regex::Regex {
    let mut source = String::from("(?is)^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => source.push_str(&regex::escape(&chars.next().unwrap_or('\\').to_string())),
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    regex::Regex::new(&source).expect("escaped LIKE pattern is a valid regex")
}

#[cfg(test)]
pub fn ilike(pattern: &str, text: &str) -> bool {
    like_regex(pattern).is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pattern_is_case_insensitive_equality() {
        assert!(ilike("software engineer", "Software Engineer"));
        assert!(!ilike("software engineer", "Senior Software Engineer"));
        assert!(!ilike("engineer", "Engineers"));
    }

    #[test]
    fn test_percent_matches_any_run() {
        assert!(ilike("%engineer%", "Senior Software Engineer II"));
        assert!(ilike("%", ""));
        assert!(ilike("a%c", "abbbc"));
        assert!(!ilike("a%c", "abbbd"));
    }

    #[test]
    fn test_underscore_matches_single_char() {
        assert!(ilike("c_o", "CEO"));
        assert!(!ilike("c_o", "CO"));
    }

    #[test]
    fn test_repeated_literals_after_wildcards() {
        assert!(ilike("%ab%ab", "xxabyyabzab"));
        assert!(!ilike("%ab%abc", "xxabyyab"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(ilike("c++ (senior)", "C++ (Senior)"));
        assert!(!ilike("a.c", "abc"));
    }

    #[test]
    fn test_escaped_input_matches_only_itself() {
        let raw = "100% Remote_Lead";
        let pattern = escape_like(raw);
        assert_eq!(pattern, r"100\% Remote\_Lead");
        assert!(ilike(&pattern, "100% remote_lead"));
        assert!(!ilike(&pattern, "100 percent Remote Lead"));
        assert!(!ilike(&escape_like("%"), "Manager"));
        assert!(ilike(&escape_like(r"back\slash"), r"Back\Slash"));
    }

    #[test]
    fn test_empty_pattern_only_matches_empty_text() {
        assert!(ilike("", ""));
        assert!(!ilike("", "Manager"));
    }
}
