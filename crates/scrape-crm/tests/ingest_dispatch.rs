use scrape_crm::workflows::dispatch::{
    build_lot_request, build_party_request, build_webhook_payload, CountyRegistry, CountySetting,
    DispatchError, VariationSelection,
};
use scrape_crm::workflows::ingest::{
    ScrapeStatus, SpreadsheetImporter, PARTY_VARIATIONS_FIELD, PARTY_VARIATION_COUNT_FIELD,
};
use serde_json::Value;
use std::io::Cursor;

const SAMPLE_CSV: &str = "\
File Number,State,County,Party Name 1,Party Name 2,Property Address,Lot,Block,Townsnhip,Prior Effective Date
FN-1001,CA,Los Angeles,John Smith,Jane Smith,123 Maple St,12,A,Central,1/1/2023
FN-1002,NY,Kings,Alice Brown,,456 Oak Ave,5,7,North,12/15/2022
FN-1003,NJ,Middlesex,\"574 Main Street, LLC\",,574 Main Street,10,22,Woodbridge,5/20/2023
";

const DEFAULT_SEARCH_URL: &str = "https://clerk.example/records/search/advanced";

#[test]
fn ingestion_seeds_items_with_variations_and_counts() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");
    assert_eq!(items.len(), 3);

    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.row_number, index + 1);
        assert_eq!(item.status, ScrapeStatus::Pending);

        let variations = item
            .data
            .get(PARTY_VARIATIONS_FIELD)
            .and_then(Value::as_object)
            .expect("variations map");
        let counts = item
            .data
            .get(PARTY_VARIATION_COUNT_FIELD)
            .and_then(Value::as_object)
            .expect("count map");

        for (column, generated) in variations {
            let generated = generated.as_array().expect("variation list");
            assert_eq!(
                counts.get(column).and_then(Value::as_u64),
                Some(generated.len() as u64),
                "count mismatch for {column}"
            );
        }
    }

    let company = &items[2];
    let generated = company
        .data
        .get(PARTY_VARIATIONS_FIELD)
        .and_then(Value::as_object)
        .and_then(|map| map.get("Party Name 1"))
        .and_then(Value::as_array)
        .expect("company variations");
    assert!(generated
        .iter()
        .any(|v| v.as_str() == Some("574 Main Street")));
    assert!(generated.iter().any(|v| v.as_str() == Some("574 Main")));
}

#[test]
fn webhook_payload_defaults_to_all_generated_variations() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");
    let smith = &items[0];

    let payload = build_webhook_payload(smith, &VariationSelection::default());

    let expected: usize = smith
        .data
        .get(PARTY_VARIATIONS_FIELD)
        .and_then(Value::as_object)
        .expect("variations map")
        .values()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .sum();
    assert_eq!(payload.len(), expected);

    for entry in &payload {
        assert!(entry.get(PARTY_VARIATIONS_FIELD).is_none());
        assert!(entry.get(PARTY_VARIATION_COUNT_FIELD).is_none());
        assert_eq!(entry.get("row_number").and_then(Value::as_u64), Some(1));
        assert_eq!(
            entry.get("Party User Status").and_then(Value::as_str),
            Some("Done")
        );
        assert_eq!(
            entry.get("Town/Lot/Block").and_then(Value::as_str),
            Some("Out_Couty")
        );
        assert!(entry.get("Owner/Borrower Name").is_some());
    }
}

#[test]
fn webhook_payload_honors_selected_variations() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");
    let smith = &items[0];

    let mut selection = VariationSelection::default();
    selection.select(
        smith.row_number,
        "Party Name 1",
        vec!["SMITH JOH".to_string()],
    );

    let payload = build_webhook_payload(smith, &selection);

    let party_one: Vec<&str> = payload
        .iter()
        .filter(|entry| entry.get("Party Type").and_then(Value::as_str) == Some("Party Name 1"))
        .filter_map(|entry| entry.get("Owner/Borrower Name").and_then(Value::as_str))
        .collect();
    assert_eq!(party_one, vec!["SMITH JOH"]);

    // The unselected column still dispatches everything it generated.
    let party_two = payload
        .iter()
        .filter(|entry| entry.get("Party Type").and_then(Value::as_str) == Some("Party Name 2"))
        .count();
    assert!(party_two > 1);
}

#[test]
fn webhook_payload_falls_back_to_the_raw_name() {
    let csv = "Party Name 1,County\n,Mercer\n";
    let items = SpreadsheetImporter::from_reader(Cursor::new(csv)).expect("ingest");
    let payload = build_webhook_payload(&items[0], &VariationSelection::default());
    assert!(payload.is_empty(), "blank party cells dispatch nothing");

    // A seed without precomputed variations (e.g. posted directly to the
    // API) dispatches the raw cell value.
    let raw = serde_json::json!({
        "row_number": 4,
        "status": "pending",
        "data": { "Party Name 1": "Cher", "County": "Mercer" }
    });
    let item: scrape_crm::workflows::ingest::ScrapeItemSeed =
        serde_json::from_value(raw).expect("seed deserializes");
    let payload = build_webhook_payload(&item, &VariationSelection::default());
    assert_eq!(payload.len(), 1);
    assert_eq!(
        payload[0].get("Owner/Borrower Name").and_then(Value::as_str),
        Some("Cher")
    );
    assert_eq!(payload[0].get("row_number").and_then(Value::as_u64), Some(4));
}

#[test]
fn lot_request_uses_county_settings_and_no_party_name() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");

    let mut counties = CountyRegistry::default();
    counties.insert(CountySetting {
        county: "Middlesex".to_string(),
        search_url: "https://middlesex.example/search".to_string(),
        vpn_required: true,
    });

    let request = build_lot_request(&items[2], &counties, DEFAULT_SEARCH_URL);
    assert_eq!(request.county, "MIDDLESEX");
    assert_eq!(request.township, "WOODBRIDGE");
    assert_eq!(request.lot, "10");
    assert_eq!(request.block, "22");
    assert_eq!(request.party_name, "");
    assert_eq!(request.site_url, "https://middlesex.example/search");
    assert!(request.vpn_required);
    assert_eq!(request.date, "20/05/2023");

    // Unconfigured counties fall back to the default search URL.
    let request = build_lot_request(&items[0], &counties, DEFAULT_SEARCH_URL);
    assert_eq!(request.site_url, DEFAULT_SEARCH_URL);
    assert!(!request.vpn_required);
}

#[test]
fn party_request_prefers_the_selection_override() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");
    let smith = &items[0];

    let mut selection = VariationSelection::default();
    selection.select(
        smith.row_number,
        "Party Name 1",
        vec!["SMITH JOHN".to_string(), "SMITH".to_string()],
    );

    let request = build_party_request(
        smith,
        &selection,
        &CountyRegistry::default(),
        DEFAULT_SEARCH_URL,
    )
    .expect("request builds");

    assert_eq!(request.party_name, "SMITH JOHN");
    assert_eq!(request.folder_name, "SMITH JOHN");
    assert_eq!(request.township, "Central");
    assert_eq!(request.from_date, "01/01/2023");
}

#[test]
fn party_request_falls_back_to_the_first_party_column() {
    let items = SpreadsheetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("ingest");

    let request = build_party_request(
        &items[1],
        &VariationSelection::default(),
        &CountyRegistry::default(),
        DEFAULT_SEARCH_URL,
    )
    .expect("request builds");

    assert_eq!(request.party_name, "Alice Brown");
}

#[test]
fn party_request_without_any_name_is_an_error() {
    let csv = "File Number,County\nFN-9,Mercer\n";
    let items = SpreadsheetImporter::from_reader(Cursor::new(csv)).expect("ingest");

    let error = build_party_request(
        &items[0],
        &VariationSelection::default(),
        &CountyRegistry::default(),
        DEFAULT_SEARCH_URL,
    )
    .expect_err("no party name anywhere");

    match error {
        DispatchError::MissingPartyName { row_number } => assert_eq!(row_number, 1),
    }
}
