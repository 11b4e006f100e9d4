use super::rules::GENERATIONAL_SUFFIXES;

/// Collapses whitespace runs to single spaces and trims the ends.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces curly/smart apostrophes with the plain ASCII apostrophe.
pub(crate) fn normalize_apostrophes(value: &str) -> String {
    value.replace(['\u{2018}', '\u{2019}'], "'")
}

/// Rewrites any run of spaces around a comma to exactly ", ".
pub(crate) fn normalize_commas(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ',' {
            while out.ends_with(' ') {
                out.pop();
            }
            out.push_str(", ");
            while matches!(chars.peek(), Some(next) if next.is_whitespace()) {
                chars.next();
            }
        } else {
            out.push(ch);
        }
    }

    out.trim().to_string()
}

/// Trims leading/trailing commas, periods, and whitespace.
pub(crate) fn strip_edge_punctuation(value: &str) -> &str {
    value.trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace())
}

/// Removes generational suffixes (JR, SR, II, III, IV) as whole tokens.
///
/// A trailing comma on a stripped token survives on the previous token so
/// that `LAST Jr., FIRST` still reorders as a comma form.
pub(crate) fn strip_generational_suffixes(value: &str) -> String {
    let mut kept: Vec<String> = Vec::new();

    for token in value.split_whitespace() {
        let core = token.trim_matches(|c| c == '.' || c == ',');
        let is_suffix = GENERATIONAL_SUFFIXES
            .iter()
            .any(|suffix| core.eq_ignore_ascii_case(suffix));

        if is_suffix {
            if token.ends_with(',') {
                if let Some(previous) = kept.last_mut() {
                    if !previous.ends_with(',') {
                        previous.push(',');
                    }
                }
            }
            continue;
        }

        kept.push(token.to_string());
    }

    kept.join(" ")
}

/// First three characters of a token (fewer when the token is shorter).
pub(crate) fn first3(value: &str) -> String {
    value.trim().chars().take(3).collect()
}

/// Final normalization applied to every candidate before it enters the set.
pub(crate) fn scrub(value: &str) -> String {
    normalize_commas(&collapse_whitespace(&normalize_apostrophes(value)))
}
