//! Named rule tables shared by the normalizer, classifier, and branch rules.

/// Generational suffixes stripped before any rule fires.
pub(crate) const GENERATIONAL_SUFFIXES: &[&str] = &["JR", "SR", "II", "III", "IV"];

/// Tokens that mark a name as a company wherever they appear.
pub(crate) const COMPANY_KEYWORDS: &[&str] = &[
    "LLC", "INC", "CORP", "CO", "HOLDINGS", "LTD", "PC", "PLLC", "ORG",
];

/// Corporate suffix tokens recognized at the end of a company name.
pub(crate) const COMPANY_SUFFIXES: &[&str] =
    &["LLC", "INC", "CORP", "CO", "LTD", "PC", "PLLC", "ORG"];

/// Tokens that mark a name as a trust or estate.
pub(crate) const TRUST_KEYWORDS: &[&str] = &["TRUST", "REVOCABLE", "ESTATE"];

/// Street suffix words stripped from address-style company names.
pub(crate) const STREET_SUFFIXES: &[&str] = &[
    "Avenue",
    "Ave",
    "Street",
    "St",
    "Road",
    "Rd",
    "Boulevard",
    "Blvd",
    "Drive",
    "Dr",
    "Lane",
    "Ln",
    "Court",
    "Ct",
    "Way",
    "Place",
    "Pl",
];
