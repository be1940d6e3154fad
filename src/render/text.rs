use crate::model::{OptionMap, Record, Selection};
use std::fmt::Write;

/// Label of the synthetic option shown while a field is unfilled.
pub const UNSELECTED: &str = "-- unselected --";

/// Render each field as a dropdown: current value, then its options.
///
/// country = SG
///   * SG
///     IN
///   count: 2
pub fn render_options_text(
    selection: &Selection,
    options: &OptionMap,
    auto_selected: &[String],
) -> String {
    let mut out = String::new();

    for (field, chosen) in selection.iter() {
        let candidates = options.values(field);

        let shown = chosen.map_or(UNSELECTED.to_string(), |v| v.to_string());
        let mut header = format!("{} = {}", field, shown);
        if auto_selected.iter().any(|f| f == field) {
            header.push_str(" (auto-selected)");
        }
        if let Some(v) = chosen {
            if !candidates.contains(&v) {
                header.push_str(" (not available)");
            }
        }
        let _ = writeln!(out, "{}", header);

        if chosen.is_none() {
            let _ = writeln!(out, "  * {}", UNSELECTED);
        }
        for candidate in &candidates {
            let marker = if chosen == Some(*candidate) { '*' } else { ' ' };
            let _ = writeln!(out, "  {} {}", marker, candidate);
        }
        let _ = writeln!(out, "  count: {}", candidates.len());
    }

    out
}

/// Render records as an aligned table with one column per field.
pub fn render_records_text(fields: &[String], records: &[Record]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            fields
                .iter()
                .map(|f| r.get(f).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = fields.iter().map(|f| f.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, fields, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "({} records)", records.len());
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{expand, filter_options};
    use crate::spec::NestedTree;
    use pretty_assertions::assert_eq;

    fn fields() -> Vec<String> {
        vec!["method".to_string(), "currency".to_string()]
    }

    fn records() -> Vec<Record> {
        let tree: NestedTree =
            serde_json::from_str(r#"{ "local": ["SGD", "AED"], "swift": ["USD"] }"#).unwrap();
        expand(&tree, &fields()).unwrap()
    }

    #[test]
    fn dropdowns_show_placeholder_marker_and_count() {
        let selection = Selection::empty(fields()).with("method", "swift");
        let options = filter_options(&records(), &selection);
        let text = render_options_text(&selection, &options, &["currency".to_string()]);
        assert_eq!(
            text,
            "method = swift\n\
             \x20   local\n\
             \x20 * swift\n\
             \x20 count: 2\n\
             currency = -- unselected -- (auto-selected)\n\
             \x20 * -- unselected --\n\
             \x20   USD\n\
             \x20 count: 1\n"
        );
    }

    #[test]
    fn unavailable_choice_is_flagged() {
        let selection = Selection::empty(fields())
            .with("method", "swift")
            .with("currency", "SGD");
        let options = filter_options(&records(), &selection);
        let text = render_options_text(&selection, &options, &[]);
        assert!(text.contains("currency = SGD (not available)"));
    }

    #[test]
    fn records_table_is_aligned() {
        let text = render_records_text(&fields(), &records());
        assert_eq!(
            text,
            "method  currency\n\
             local   SGD\n\
             local   AED\n\
             swift   USD\n\
             (3 records)\n"
        );
    }
}
