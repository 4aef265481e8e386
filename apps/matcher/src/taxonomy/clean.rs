use serde::Serialize;

/// Source-taxonomy qualifiers removed before singularising, applied in order.
const REPLACEMENTS: &[(&str, &str)] = &[
    (", Except Gambling", ""),
    (", All Other", ""),
    (", Preschool and Daycare", ""),
    (" and ", " & "),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedTitle {
    pub cleaned: String,
    /// Human-readable record of what happened to the last word.
    pub note: String,
}

/// Turns an occupation label such as "General and Operations Managers" into the
/// canonical "General & Operations Manager".
pub fn clean_job_title(title: &str) -> CleanedTitle {
    let mut working = title.trim().to_string();
    for (pattern, replacement) in REPLACEMENTS {
        working = working.replace(pattern, replacement);
    }

    let mut words: Vec<String> = working.split_whitespace().map(str::to_string).collect();
    let note = match words.last_mut() {
        Some(last) => match singular_noun(last) {
            Some(singular) => {
                let note = format!("plural '{last}' → '{singular}'");
                *last = singular;
                note
            }
            None => "no plural detected".to_string(),
        },
        None => "empty title".to_string(),
    };

    CleanedTitle {
        cleaned: words.join(" "),
        note,
    }
}

/// Singular form of an English plural noun, or `None` if `word` does not look plural.
/// Covers the regular patterns found in occupation titles.
fn singular_noun(word: &str) -> Option<String> {
    let lower = word.to_lowercase();

    if lower.ends_with("men") && lower.len() > 3 {
        return stem(word, 3).map(|s| format!("{s}man"));
    }
    if lower.ends_with("ies") && lower.len() > 4 {
        return stem(word, 3).map(|s| format!("{s}y"));
    }
    if ["sses", "ches", "shes", "xes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return stem(word, 2).map(str::to_string);
    }
    if ["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix)) {
        return None;
    }
    if lower.ends_with('s') && lower.len() > 1 {
        return stem(word, 1).map(str::to_string);
    }
    None
}

/// `word` without its last `suffix_len` bytes, if that is a char boundary.
fn stem(word: &str, suffix_len: usize) -> Option<&str> {
    word.get(..word.len().checked_sub(suffix_len)?)
}
