//! Placeholder substitution over the document object model
//!
//! A key is only considered for a paragraph when it occurs somewhere in the
//! paragraph's full visible text, and it is only replaced inside runs that
//! contain the whole key on their own.

use docx_rs::{
    DocumentChild, Docx, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

/// Replace every occurrence of each placeholder key in the document body and
/// in all table cells, nested tables included.
///
/// Pairs are applied in order. A value introduced by one pair is visible to
/// the pairs that follow it, but earlier pairs are never re-applied.
pub fn substitute_document(docx: &mut Docx, replacements: &[(String, String)]) {
    for child in docx.document.children.iter_mut() {
        match child {
            DocumentChild::Paragraph(paragraph) => substitute_paragraph(paragraph, replacements),
            DocumentChild::Table(table) => substitute_table(table, replacements),
            _ => {}
        }
    }
}

/// Replace placeholder keys within a single paragraph's runs.
///
/// A key whose characters straddle a run boundary is not matched; the run
/// split carries the document's formatting and is left untouched. Paragraph
/// children without run structure (hyperlinks, bookmarks) are skipped.
pub fn substitute_paragraph(paragraph: &mut Paragraph, replacements: &[(String, String)]) {
    for (key, value) in replacements {
        if !paragraph_text(paragraph).contains(key.as_str()) {
            continue;
        }
        for child in paragraph.children.iter_mut() {
            if let ParagraphChild::Run(run) = child {
                for run_child in run.children.iter_mut() {
                    if let RunChild::Text(text) = run_child {
                        if text.text.contains(key.as_str()) {
                            text.text = text.text.replace(key.as_str(), value);
                        }
                    }
                }
            }
        }
    }
}

fn substitute_table(table: &mut Table, replacements: &[(String, String)]) {
    for row in table.rows.iter_mut() {
        let TableChild::TableRow(row) = row;
        for cell in row.cells.iter_mut() {
            let TableRowChild::TableCell(cell) = cell;
            for content in cell.children.iter_mut() {
                match content {
                    TableCellContent::Paragraph(paragraph) => {
                        substitute_paragraph(paragraph, replacements)
                    }
                    TableCellContent::Table(nested) => substitute_table(nested, replacements),
                    _ => {}
                }
            }
        }
    }
}

/// Visible text of a paragraph: the concatenation of its runs' text nodes.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Visible text of the whole document, one line per paragraph, table cells
/// included. Intended for assertions and listings, not for layout.
pub fn document_text(docx: &Docx) -> String {
    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => collect_table_text(table, &mut lines),
            _ => {}
        }
    }
    lines.join("\n")
}

fn collect_table_text(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => lines.push(paragraph_text(paragraph)),
                    TableCellContent::Table(nested) => collect_table_text(nested, lines),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn paragraph(runs: &[&str]) -> Paragraph {
        let mut p = Paragraph::new();
        for run in runs {
            p = p.add_run(Run::new().add_text(*run));
        }
        p
    }

    #[test]
    fn test_replaces_key_within_single_run() {
        let mut docx = Docx::new().add_paragraph(paragraph(&["Member member_code signed off"]));
        substitute_document(&mut docx, &pairs(&[("member_code", "M1")]));
        assert_eq!(document_text(&docx), "Member M1 signed off");
    }

    #[test]
    fn test_replaces_every_occurrence_in_a_run() {
        let mut docx = Docx::new().add_paragraph(paragraph(&["member_code/member_code"]));
        substitute_document(&mut docx, &pairs(&[("member_code", "M1")]));
        assert_eq!(document_text(&docx), "M1/M1");
    }

    #[test]
    fn test_key_split_across_runs_is_not_matched() {
        let mut docx = Docx::new().add_paragraph(paragraph(&["member_", "code"]));
        substitute_document(&mut docx, &pairs(&[("member_code", "M1")]));
        assert_eq!(document_text(&docx), "member_code");
    }

    #[test]
    fn test_runs_without_keys_stay_identical() {
        let mut docx = Docx::new()
            .add_paragraph(paragraph(&["nothing to see here"]))
            .add_paragraph(paragraph(&["or", " here"]));
        let before = document_text(&docx);
        substitute_document(&mut docx, &pairs(&[("member_code", "M1"), ("category", "CTCL")]));
        assert_eq!(document_text(&docx), before);
    }

    #[test]
    fn test_empty_value_clears_the_token() {
        let mut docx = Docx::new().add_paragraph(paragraph(&["Category: category"]));
        substitute_document(&mut docx, &pairs(&[("category", "")]));
        assert_eq!(document_text(&docx), "Category: ");
    }

    #[test]
    fn test_replacement_reaches_table_cells() {
        let cell = TableCell::new().add_paragraph(paragraph(&["vendor_name"]));
        let mut docx = Docx::new().add_table(Table::new(vec![TableRow::new(vec![cell])]));
        substitute_document(&mut docx, &pairs(&[("vendor_name", "Acme")]));
        assert_eq!(document_text(&docx), "Acme");
    }

    #[test]
    fn test_replacement_reaches_nested_tables() {
        let inner_cell = TableCell::new().add_paragraph(paragraph(&["segment"]));
        let inner = Table::new(vec![TableRow::new(vec![inner_cell])]);
        let outer_cell = TableCell::new()
            .add_paragraph(paragraph(&["outer"]))
            .add_table(inner);
        let mut docx = Docx::new().add_table(Table::new(vec![TableRow::new(vec![outer_cell])]));
        substitute_document(&mut docx, &pairs(&[("segment", "FO")]));
        assert!(document_text(&docx).contains("FO"));
        assert!(!document_text(&docx).contains("segment"));
    }

    #[test]
    fn test_pairs_apply_in_declared_order() {
        // "alpha" -> "beta" runs first, so the later "beta" pair sees the
        // substituted text as well.
        let mut docx = Docx::new().add_paragraph(paragraph(&["alpha beta"]));
        substitute_document(&mut docx, &pairs(&[("alpha", "beta"), ("beta", "gamma")]));
        assert_eq!(document_text(&docx), "gamma gamma");
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let p = paragraph(&["one ", "two ", "three"]);
        assert_eq!(paragraph_text(&p), "one two three");
    }

    proptest! {
        // Text that cannot contain a placeholder key must come back
        // byte-identical no matter how it is split across runs.
        #[test]
        fn text_without_keys_is_never_modified(text in "[a-z ]{0,40}", split in 0usize..40) {
            let split = split.min(text.len());
            let (left, right) = text.split_at(split);
            let mut docx = Docx::new().add_paragraph(paragraph(&[left, right]));
            let before = document_text(&docx);
            substitute_document(&mut docx, &pairs(&[("member_code", "M1"), ("RMS_name", "omnesys")]));
            prop_assert_eq!(document_text(&docx), before);
        }

        // Replacing a key that is wholly inside one run removes every
        // occurrence of it when the value does not reintroduce the key.
        #[test]
        fn whole_run_keys_are_fully_replaced(copies in 1usize..5) {
            let body = vec!["trader_id"; copies].join(" and ");
            let mut docx = Docx::new().add_paragraph(paragraph(&[body.as_str()]));
            substitute_document(&mut docx, &pairs(&[("trader_id", "T42")]));
            let text = document_text(&docx);
            prop_assert!(!text.contains("trader_id"));
            prop_assert_eq!(text.matches("T42").count(), copies);
        }
    }
}
