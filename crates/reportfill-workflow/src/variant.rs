//! Template variants and their field sets
//!
//! A variant is identified by the template file's base name. Every variant
//! collects the common field set; the IBT report additionally collects
//! network and gateway details. Field order here is form order, and it is
//! also the order placeholder pairs are applied in.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Fields collected for every template variant, in form order.
pub const COMMON_FIELDS: &[&str] = &[
    "member_code",
    "member_name",
    "category",
    "software_name",
    "segment",
    "version",
    "strategy_name",
    "browser_exe_lite",
    "UAT_date",
    "test_date",
    "mock_date",
    "SOR",
    "RMS_name",
    "vendor_name",
];

/// Extra fields collected only for the IBT report variant.
pub const IBT_EXTRA_FIELDS: &[&str] = &[
    "location_ind",
    "net_dig",
    "ogv",
    "fev",
    "trader_id",
    "segment_name",
    "ip_address",
    "leas_id",
    "firewall_name",
];

/// Base name of the template variant that collects the extra fields.
pub const IBT_VARIANT: &str = "NSE_Report_IBT";

/// Identity fields a submission cannot proceed without.
pub const MANDATORY_FIELDS: &[&str] = &["member_code", "member_name"];

/// Metadata about one template variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantInfo {
    /// Variant name (template base name)
    pub name: String,
    /// Template file name as stored in the templates directory
    pub file_name: String,
    /// Fields the variant collects, in form order
    pub required_fields: Vec<String>,
}

/// Base name of a template file (extension stripped).
pub fn variant_name(template_file_name: &str) -> &str {
    Path::new(template_file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(template_file_name)
}

/// Fields that count toward completeness for the given template.
pub fn applicable_fields(template_file_name: &str) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = COMMON_FIELDS.to_vec();
    if variant_name(template_file_name) == IBT_VARIANT {
        fields.extend_from_slice(IBT_EXTRA_FIELDS);
    }
    fields
}

/// Every placeholder key the substitution map carries, regardless of
/// variant. Fields a variant does not collect are still present with empty
/// values so their tokens are cleared from the generated document.
pub fn placeholder_fields() -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = COMMON_FIELDS.to_vec();
    fields.extend_from_slice(IBT_EXTRA_FIELDS);
    fields
}

/// Variant metadata for a template file.
pub fn variant_info(template_file_name: &str) -> VariantInfo {
    VariantInfo {
        name: variant_name(template_file_name).to_string(),
        file_name: template_file_name.to_string(),
        required_fields: applicable_fields(template_file_name)
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ibt_variant_collects_the_extra_fields() {
        let fields = applicable_fields("NSE_Report_IBT.docx");
        assert!(fields.contains(&"trader_id"));
        assert!(fields.contains(&"firewall_name"));
        assert_eq!(fields.len(), COMMON_FIELDS.len() + IBT_EXTRA_FIELDS.len());
    }

    #[test]
    fn test_other_variants_collect_only_common_fields() {
        let fields = applicable_fields("NSE_Report_NNF.docx");
        assert_eq!(fields, COMMON_FIELDS.to_vec());
        assert!(!fields.contains(&"trader_id"));
    }

    #[test]
    fn test_placeholder_fields_cover_every_variant() {
        let fields = placeholder_fields();
        assert_eq!(fields.len(), 23);
        for field in applicable_fields("NSE_Report_IBT.docx") {
            assert!(fields.contains(&field), "missing {}", field);
        }
    }

    #[test]
    fn test_mandatory_fields_are_common_fields() {
        for field in MANDATORY_FIELDS {
            assert!(COMMON_FIELDS.contains(field));
        }
    }

    #[test]
    fn test_variant_name_strips_the_extension() {
        assert_eq!(variant_name("NSE_Report_IBT.docx"), "NSE_Report_IBT");
        assert_eq!(variant_name("NSE_Report_NNF"), "NSE_Report_NNF");
    }

    #[test]
    fn test_variant_info_carries_form_order() {
        let info = variant_info("NSE_Report_IBT.docx");
        assert_eq!(info.name, "NSE_Report_IBT");
        assert_eq!(info.file_name, "NSE_Report_IBT.docx");
        assert_eq!(info.required_fields.first().map(String::as_str), Some("member_code"));
        assert_eq!(
            info.required_fields.last().map(String::as_str),
            Some("firewall_name")
        );
    }
}
