use crate::model::{OptionMap, Record, Selection};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OptionsReport<'a> {
    selection: &'a Selection,
    options: &'a OptionMap,
    auto_selected: &'a [String],
}

#[derive(Debug, Serialize)]
struct RecordsReport<'a> {
    fields: &'a [String],
    count: usize,
    records: &'a [Record],
}

pub fn render_options_json(
    selection: &Selection,
    options: &OptionMap,
    auto_selected: &[String],
) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&OptionsReport {
        selection,
        options,
        auto_selected,
    })?)
}

pub fn render_records_json(fields: &[String], records: &[Record]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&RecordsReport {
        fields,
        count: records.len(),
        records,
    })?)
}
