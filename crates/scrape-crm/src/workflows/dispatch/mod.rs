//! Dispatch payload construction for the external scraper service and the
//! batch webhook. Builders only shape the JSON; the transport (and any
//! retry policy) stays with the caller.

use crate::workflows::ingest::{
    party_name_columns, ScrapeItemSeed, PARTY_VARIATIONS_FIELD, PARTY_VARIATION_COUNT_FIELD,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Caller-chosen subsets of generated variations, keyed per record/field.
///
/// When the operator has picked variations in the UI those win; an absent or
/// empty entry means "dispatch everything that was generated."
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationSelection {
    chosen: BTreeMap<String, Vec<String>>,
}

impl VariationSelection {
    pub fn select(&mut self, row_number: usize, column: &str, variations: Vec<String>) {
        self.chosen.insert(Self::key(row_number, column), variations);
    }

    fn get(&self, row_number: usize, column: &str) -> Option<&[String]> {
        self.chosen
            .get(&Self::key(row_number, column))
            .map(Vec::as_slice)
            .filter(|chosen| !chosen.is_empty())
    }

    fn key(row_number: usize, column: &str) -> String {
        format!("{row_number}-{column}")
    }
}

/// Per-county scrape configuration, standing in for the county settings
/// table at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountySetting {
    pub county: String,
    pub search_url: String,
    pub vpn_required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CountyRegistry {
    settings: BTreeMap<String, CountySetting>,
}

impl CountyRegistry {
    pub fn insert(&mut self, setting: CountySetting) {
        self.settings
            .insert(setting.county.to_uppercase(), setting);
    }

    pub fn get(&self, county: &str) -> Option<&CountySetting> {
        self.settings.get(&county.to_uppercase())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no party name available for row {row_number}")]
    MissingPartyName { row_number: usize },
}

// Field spellings and values the webhook consumer expects on every entry,
// filled in only when the row does not already carry them.
const WEBHOOK_STATUS_DEFAULTS: &[(&str, &str)] = &[
    ("Town/Lot/Block User Status", "Out_Couty"),
    ("Party User Status", "Done"),
    ("Town/Lot/Block status", "Out_Couty"),
    ("party status", "Out_Couty"),
    ("party", "Out_Couty"),
    ("Town/Lot/Block", "Out_Couty"),
];

/// Builds the batch webhook payload for one scrape item: one entry per
/// dispatched variation per party column.
///
/// Selection overrides win; otherwise every precomputed variation goes out;
/// a column with no variations at all falls back to its raw value.
pub fn build_webhook_payload(
    item: &ScrapeItemSeed,
    selection: &VariationSelection,
) -> Vec<Map<String, Value>> {
    let mut payload = Vec::new();
    let generated = item
        .data
        .get(PARTY_VARIATIONS_FIELD)
        .and_then(Value::as_object);

    for column in party_name_columns(&item.data) {
        if let Some(chosen) = selection.get(item.row_number, &column) {
            for variation in chosen {
                payload.push(webhook_entry(item, &column, variation));
            }
            continue;
        }

        let precomputed: Vec<&str> = generated
            .and_then(|map| map.get(&column))
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if !precomputed.is_empty() {
            for variation in precomputed {
                payload.push(webhook_entry(item, &column, variation));
            }
        } else if let Some(raw) = item
            .data
            .get(&column)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
        {
            payload.push(webhook_entry(item, &column, raw));
        }
    }

    payload
}

fn webhook_entry(item: &ScrapeItemSeed, party_type: &str, owner_name: &str) -> Map<String, Value> {
    let mut entry = item.data.clone();
    entry.insert("row_number".to_string(), Value::from(item.row_number));
    entry.insert("Party Type".to_string(), Value::from(party_type));
    entry.insert("Owner/Borrower Name".to_string(), Value::from(owner_name));

    for (field, default) in WEBHOOK_STATUS_DEFAULTS {
        entry
            .entry(field.to_string())
            .or_insert_with(|| Value::from(*default));
    }

    entry.remove(PARTY_VARIATIONS_FIELD);
    entry.remove(PARTY_VARIATION_COUNT_FIELD);
    entry
}

/// Request body for the scraper service's lot/block search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotScrapeRequest {
    pub township: String,
    pub lot: String,
    pub block: String,
    /// Lot/block searches never carry a party name.
    pub party_name: String,
    pub file_number: String,
    pub date: String,
    pub site_url: String,
    pub county: String,
    pub vpn_required: bool,
}

/// Request body for the scraper service's party-name document search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyScrapeRequest {
    pub party_name: String,
    pub township: String,
    pub from_date: String,
    pub file_number: String,
    pub site_url: String,
    pub folder_name: String,
    pub county: String,
    pub vpn_required: bool,
}

pub fn build_lot_request(
    item: &ScrapeItemSeed,
    counties: &CountyRegistry,
    default_search_url: &str,
) -> LotScrapeRequest {
    let data = &item.data;
    let county = field(data, &["County", "county"]).to_uppercase();
    let setting = counties.get(&county);

    LotScrapeRequest {
        township: township(data).to_uppercase(),
        lot: field(data, &["Lot"]).to_string(),
        block: field(data, &["Block"]).to_string(),
        party_name: String::new(),
        file_number: field(data, &["File Number"]).to_string(),
        date: field(data, &["Prior Effective Date"]).to_string(),
        site_url: resolve_site_url(data, setting, default_search_url),
        county,
        vpn_required: setting.is_some_and(|s| s.vpn_required),
    }
}

pub fn build_party_request(
    item: &ScrapeItemSeed,
    selection: &VariationSelection,
    counties: &CountyRegistry,
    default_search_url: &str,
) -> Result<PartyScrapeRequest, DispatchError> {
    let data = &item.data;

    let party_name = selected_party_name(item, selection)
        .or_else(|| first_party_column_value(data))
        .ok_or(DispatchError::MissingPartyName {
            row_number: item.row_number,
        })?;

    let county = field(data, &["County", "county"]).to_uppercase();
    let setting = counties.get(&county);
    let folder_name = match field(data, &["folder_name"]) {
        "" => party_name.clone(),
        value => value.to_string(),
    };

    Ok(PartyScrapeRequest {
        township: township(data).to_string(),
        from_date: field(data, &["Prior Effective Date"]).to_string(),
        file_number: field(data, &["File Number"]).to_string(),
        site_url: resolve_site_url(data, setting, default_search_url),
        folder_name,
        county,
        vpn_required: setting.is_some_and(|s| s.vpn_required),
        party_name,
    })
}

fn selected_party_name(item: &ScrapeItemSeed, selection: &VariationSelection) -> Option<String> {
    party_name_columns(&item.data).into_iter().find_map(|column| {
        selection
            .get(item.row_number, &column)
            .and_then(|chosen| chosen.first())
            .cloned()
    })
}

fn first_party_column_value(data: &Map<String, Value>) -> Option<String> {
    party_name_columns(data).into_iter().find_map(|column| {
        data.get(&column)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
    })
}

fn resolve_site_url(
    data: &Map<String, Value>,
    setting: Option<&CountySetting>,
    default_search_url: &str,
) -> String {
    let from_row = field(data, &["site_url"]);
    if !from_row.is_empty() {
        return from_row.to_string();
    }
    setting
        .map(|s| s.search_url.clone())
        .unwrap_or_else(|| default_search_url.to_string())
}

// Some exports misspell the Township header; accept the known spellings.
fn township(data: &Map<String, Value>) -> &str {
    field(data, &["Township", "Townsnhip", "township"])
}

fn field<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> &'a str {
    keys.iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or("")
}
