//! Form values and date handling
//!
//! Dates live as `%d/%m/%Y` strings everywhere outside the UI's date
//! pickers: in draft records, in the placeholder map, and in the generated
//! document. A stored date that does not parse falls back to today and is
//! never surfaced as an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use draft_store::DraftRecord;

use crate::variant::applicable_fields;

/// Storage format for the three report dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fields holding dates; they default to today instead of counting missing.
pub const DATE_FIELDS: &[&str] = &["UAT_date", "test_date", "mock_date"];

/// Parse a stored date string, if present and well-formed.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Force every date field to a valid `%d/%m/%Y` string, falling back to
/// `today` when the current value is absent or does not parse.
pub fn normalize_dates(values: &mut BTreeMap<String, String>, today: NaiveDate) {
    for field in DATE_FIELDS {
        let normalized = values
            .get(*field)
            .and_then(|raw| parse_stored_date(raw))
            .unwrap_or(today);
        values.insert(
            (*field).to_string(),
            normalized.format(DATE_FORMAT).to_string(),
        );
    }
}

/// Initial form values for a template: empty strings for every applicable
/// field, overlaid with a saved draft when one is selected, dates defaulted.
pub fn prefill_values(
    record: Option<&DraftRecord>,
    template_file_name: &str,
    today: NaiveDate,
) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for field in applicable_fields(template_file_name) {
        let stored = record.map(|r| r.get(field).to_string()).unwrap_or_default();
        values.insert(field.to_string(), stored);
    }
    normalize_dates(&mut values, today);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_stored_date_accepts_day_month_year() {
        assert_eq!(parse_stored_date("05/03/2024"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_stored_date_rejects_garbage_and_empty() {
        assert_eq!(parse_stored_date(""), None);
        assert_eq!(parse_stored_date("2024-03-05"), None);
        assert_eq!(parse_stored_date("31/13/2024"), None);
    }

    #[test]
    fn test_normalize_dates_defaults_absent_fields_to_today() {
        let mut values = BTreeMap::new();
        normalize_dates(&mut values, day(2024, 5, 1));
        assert_eq!(values.get("UAT_date").unwrap(), "01/05/2024");
        assert_eq!(values.get("test_date").unwrap(), "01/05/2024");
        assert_eq!(values.get("mock_date").unwrap(), "01/05/2024");
    }

    #[test]
    fn test_normalize_dates_keeps_valid_values() {
        let mut values = BTreeMap::new();
        values.insert("UAT_date".to_string(), "15/08/2023".to_string());
        normalize_dates(&mut values, day(2024, 5, 1));
        assert_eq!(values.get("UAT_date").unwrap(), "15/08/2023");
    }

    #[test]
    fn test_normalize_dates_recovers_from_malformed_values() {
        let mut values = BTreeMap::new();
        values.insert("mock_date".to_string(), "not a date".to_string());
        normalize_dates(&mut values, day(2024, 5, 1));
        assert_eq!(values.get("mock_date").unwrap(), "01/05/2024");
    }

    #[test]
    fn test_prefill_without_draft_is_empty_defaults() {
        let values = prefill_values(None, "NSE_Report_NNF.docx", day(2024, 5, 1));
        assert_eq!(values.get("member_code").unwrap(), "");
        assert_eq!(values.get("UAT_date").unwrap(), "01/05/2024");
        assert!(!values.contains_key("trader_id"));
    }

    #[test]
    fn test_prefill_overlays_saved_draft_values() {
        let record: DraftRecord = [
            ("member_code".to_string(), "M1".to_string()),
            ("category".to_string(), "CTCL".to_string()),
            ("UAT_date".to_string(), "15/08/2023".to_string()),
        ]
        .into_iter()
        .collect();

        let values = prefill_values(Some(&record), "NSE_Report_NNF.docx", day(2024, 5, 1));

        assert_eq!(values.get("member_code").unwrap(), "M1");
        assert_eq!(values.get("category").unwrap(), "CTCL");
        assert_eq!(values.get("UAT_date").unwrap(), "15/08/2023");
        assert_eq!(values.get("vendor_name").unwrap(), "");
    }

    #[test]
    fn test_prefill_for_ibt_includes_extra_fields() {
        let values = prefill_values(None, "NSE_Report_IBT.docx", day(2024, 5, 1));
        assert_eq!(values.get("trader_id").unwrap(), "");
        assert_eq!(values.get("firewall_name").unwrap(), "");
    }

    proptest! {
        // Formatting a date and parsing it back is lossless.
        #[test]
        fn date_format_round_trips(days in 0i64..20_000) {
            let base = day(1990, 1, 1) + chrono::Duration::days(days);
            let formatted = base.format(DATE_FORMAT).to_string();
            prop_assert_eq!(parse_stored_date(&formatted), Some(base));
        }
    }
}
