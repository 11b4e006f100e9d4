//! Party-name variation generation.
//!
//! County record indexes are inconsistent about how names are filed, so each
//! party name is expanded into a set of plausible alternate renderings
//! (reorderings, abbreviations, suffix changes) before being submitted to the
//! scraper. The generator is a pure function: same input, same output, no
//! failure mode — malformed input degrades to fewer variations.

mod classifier;
mod normalizer;
mod rules;

pub use classifier::{classify, NameClass};

use normalizer::{
    collapse_whitespace, first3, normalize_apostrophes, scrub, strip_edge_punctuation,
    strip_generational_suffixes,
};
use rules::{COMPANY_SUFFIXES, STREET_SUFFIXES};

/// Ordered, duplicate-free accumulator for generated variations.
#[derive(Debug, Default)]
struct VariationSet {
    items: Vec<String>,
}

impl VariationSet {
    fn add(&mut self, candidate: String) {
        let value = scrub(&candidate);
        if value.is_empty() || self.items.iter().any(|existing| existing == &value) {
            return;
        }
        self.items.push(value);
    }
}

/// Generates search variations for a raw party name.
///
/// Blank or whitespace-only input yields an empty vec. Output preserves
/// insertion order and contains no duplicates, though no variation is
/// privileged over another.
pub fn generate(raw_name: &str) -> Vec<String> {
    let original = collapse_whitespace(&normalize_apostrophes(raw_name));
    let cleaned = collapse_whitespace(&strip_generational_suffixes(&original));
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut set = VariationSet::default();

    match classify(&cleaned) {
        NameClass::Company => company_variations(&cleaned, &mut set),
        NameClass::Trust => trust_variations(&cleaned, &mut set),
        NameClass::Partnership => partnership_variations(&cleaned, &mut set),
        NameClass::Hyphenated => hyphenated_variations(&cleaned, &mut set),
        NameClass::Alias => {
            let working = strip_parenthetical(&cleaned);
            set.add(working.clone());
            person_variations(&working, &mut set);
        }
        NameClass::Person => {
            let working = reorder_comma_form(&cleaned, &mut set);
            person_variations(&working, &mut set);
        }
    }

    set.items
}

/// Company branch: base/suffix splits plus street-address probes. Terminal —
/// a corporate suffix suppresses every other rule family.
fn company_variations(name: &str, set: &mut VariationSet) {
    let (base, suffix) = split_company_suffix(name);

    if let Some(suffix) = &suffix {
        set.add(format!("{base}, {suffix}"));
    }
    set.add(base.clone());
    set.add(replace_word(&base, "Investments", "Investment"));

    if suffix.as_deref() == Some("LLC") {
        // Probe the alternate corporate form too.
        set.add(format!("{base}, INC"));
    }

    let leads_with_number = base
        .split_whitespace()
        .next()
        .is_some_and(|token| token.chars().all(|c| c.is_ascii_digit()));
    if leads_with_number {
        set.add(replace_word(&base, "Avenue", "Ave"));
        set.add(replace_word(&base, "Ave", "Avenue"));
        set.add(strip_street_suffixes(&base));
    }
}

/// Splits a trailing corporate suffix token (optionally comma-separated,
/// optionally dotted) off the company name.
fn split_company_suffix(name: &str) -> (String, Option<String>) {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    if let Some((last, rest)) = tokens.split_last() {
        let core = last.trim_matches(|c| c == ',' || c == '.');
        let is_suffix = COMPANY_SUFFIXES
            .iter()
            .any(|suffix| core.eq_ignore_ascii_case(suffix));
        if is_suffix && !rest.is_empty() {
            let base = strip_edge_punctuation(&rest.join(" ")).to_string();
            return (base, Some(core.to_ascii_uppercase()));
        }
    }

    (strip_edge_punctuation(name).to_string(), None)
}

/// Replaces the first whole-word, case-insensitive occurrence of `from`.
/// A trailing period on the matched token is consumed, a comma survives.
fn replace_word(value: &str, from: &str, to: &str) -> String {
    let mut replaced = false;
    let tokens: Vec<String> = value
        .split_whitespace()
        .map(|token| {
            if replaced {
                return token.to_string();
            }
            let core = token.trim_end_matches(',').trim_end_matches('.');
            if core.eq_ignore_ascii_case(from) {
                replaced = true;
                if token.ends_with(',') {
                    format!("{to},")
                } else {
                    to.to_string()
                }
            } else {
                token.to_string()
            }
        })
        .collect();

    tokens.join(" ")
}

fn strip_street_suffixes(value: &str) -> String {
    let kept: Vec<&str> = value
        .split_whitespace()
        .filter(|token| {
            let core = token.trim_end_matches(',').trim_end_matches('.');
            !STREET_SUFFIXES
                .iter()
                .any(|suffix| core.eq_ignore_ascii_case(suffix))
        })
        .collect();
    kept.join(" ")
}

/// Trust/estate branch: trustee and family-trust renderings built from the
/// leading two tokens.
fn trust_variations(name: &str, set: &mut VariationSet) {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let Some(first) = tokens.first().copied() else {
        return;
    };
    let last = tokens.get(1).copied().unwrap_or(first);

    set.add(format!("{last}, {first}"));
    set.add(format!("{last}, {first} Trustee"));
    set.add(format!("{first} {last} Trust"));
    set.add(format!("{last} Family Trust"));
    set.add(format!("Estate of {first} {last}"));
}

/// Partnership branch: connector respellings plus an LLP probe.
fn partnership_variations(name: &str, set: &mut VariationSet) {
    set.add(name.to_string());

    let tokens: Vec<&str> = name.split_whitespace().collect();
    let Some(index) = tokens
        .iter()
        .position(|token| *token == "&" || token.eq_ignore_ascii_case("and"))
    else {
        return;
    };

    if tokens[index] == "&" {
        let mut spelled = tokens.clone();
        spelled[index] = "and";
        set.add(spelled.join(" "));
    }

    let mut joined = tokens;
    joined.remove(index);
    set.add(joined.join(" "));

    set.add(format!("{name} LLP"));
}

/// Hyphenated branch: both orderings, joined and comma forms.
fn hyphenated_variations(name: &str, set: &mut VariationSet) {
    set.add(name.to_string());

    let Some((left, right)) = name.split_once('-') else {
        return;
    };
    let p1 = left.trim();
    let p2 = right.trim();
    if p1.is_empty() || p2.is_empty() {
        return;
    }

    set.add(format!("{p1} {p2}"));
    set.add(format!("{p2}, {p1}"));
    set.add(format!("{p2}-{p1}"));
    set.add(format!("{p2} {p1}"));
}

/// Drops a parenthesized alias (maiden name etc.), returning the remainder.
fn strip_parenthetical(name: &str) -> String {
    match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let mut remainder = String::new();
            remainder.push_str(&name[..open]);
            remainder.push(' ');
            remainder.push_str(&name[close + 1..]);
            collapse_whitespace(&remainder)
        }
        _ => name.to_string(),
    }
}

/// Detects a `LAST, FIRST` comma form: the form itself is emitted and the
/// reordered `FIRST LAST` becomes the working name for the person rules.
fn reorder_comma_form(name: &str, set: &mut VariationSet) -> String {
    if let Some((last_raw, first_raw)) = name.split_once(',') {
        let last = strip_edge_punctuation(last_raw);
        let first = strip_edge_punctuation(first_raw);
        if !last.is_empty() && !first.is_empty() {
            set.add(format!("{last}, {first}"));
            return collapse_whitespace(&format!("{first} {last}"));
        }
    }

    set.add(name.to_string());
    name.to_string()
}

/// Person branch, keyed by token count of the working name.
fn person_variations(name: &str, set: &mut VariationSet) {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    match tokens.as_slice() {
        [first, last] => {
            let last_upper = last.to_uppercase();
            set.add(format!("{last_upper} {}", first3(first).to_uppercase()));
            set.add(format!("{last_upper} {}", first.to_uppercase()));
            set.add(last_upper);
        }
        [first, middle, last] => {
            let f3 = first3(first);

            set.add(format!("{first} {middle} {last}"));
            set.add(format!("{last}, {first}"));
            set.add(format!("{last}, {f3}"));
            set.add(format!("{last}, {first} {middle}"));
            if let Some(initial) = middle.chars().next() {
                set.add(format!("{last}, {first} {initial}"));
            }
            set.add(format!("{last}, {middle}"));

            // The county index files this surname under both spellings.
            if last.eq_ignore_ascii_case("rodriguez") {
                set.add(format!("Rodrigues, {first}"));
                set.add(format!("Rodrigues, {f3}"));
            }
        }
        // Four tokens: compound surname; the second token (middle name or
        // initial) is discarded.
        [first, _, last1, last2] => {
            let f3 = first3(first);
            for given in [first.to_string(), f3] {
                set.add(format!("{last1} {last2}, {given}"));
                set.add(format!("{last1}{last2}, {given}"));
                set.add(format!("{last1}, {given}"));
                set.add(format!("{last2}, {given}"));
            }
        }
        _ => {}
    }
}
