use super::rules::{COMPANY_KEYWORDS, TRUST_KEYWORDS};

/// Rule bucket deciding which variation branch applies to a name.
///
/// Exactly one class drives generation; the variants are listed in
/// precedence order and `Company` suppresses everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    Company,
    Trust,
    Partnership,
    Hyphenated,
    Alias,
    Person,
}

/// Classifies a normalized name by scanning its tokens.
pub fn classify(name: &str) -> NameClass {
    if has_keyword(name, COMPANY_KEYWORDS) {
        return NameClass::Company;
    }
    if has_keyword(name, TRUST_KEYWORDS) {
        return NameClass::Trust;
    }
    if name
        .split_whitespace()
        .any(|token| token == "&" || token.eq_ignore_ascii_case("and"))
    {
        return NameClass::Partnership;
    }
    if name
        .split_whitespace()
        .any(|token| token.len() > 1 && token.contains('-'))
    {
        return NameClass::Hyphenated;
    }
    if let (Some(open), Some(close)) = (name.find('('), name.rfind(')')) {
        if open < close {
            return NameClass::Alias;
        }
    }
    NameClass::Person
}

fn has_keyword(name: &str, keywords: &[&str]) -> bool {
    name.split_whitespace().any(|token| {
        let core = token.trim_matches(|c: char| matches!(c, ',' | '.' | '(' | ')'));
        keywords.iter().any(|keyword| core.eq_ignore_ascii_case(keyword))
    })
}
