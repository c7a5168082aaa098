use serde::Deserialize;
use std::io::Read;

use super::super::domain::ParameterValue;
use super::RuleSheetImportError;

/// One parameter row, already typed.
#[derive(Debug)]
pub(crate) struct SheetRecord {
    pub(crate) line: usize,
    pub(crate) rule_id: String,
    pub(crate) label: String,
    pub(crate) parameter: String,
    pub(crate) value: ParameterValue,
}

#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(rename = "Rule ID")]
    rule_id: String,
    #[serde(rename = "Label", default)]
    label: String,
    #[serde(rename = "Parameter")]
    parameter: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Value", default)]
    value: String,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<SheetRecord>, RuleSheetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Blank rows are skipped by the reader, so count lines from the record itself.
        let line = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or_default();
        let row: SheetRow = record.deserialize(Some(&headers))?;
        if row.rule_id.is_empty() {
            return Err(RuleSheetImportError::MissingRuleId { line });
        }
        let value = parse_value(&row.kind, &row.value).ok_or_else(|| {
            if kind_is_known(&row.kind) {
                RuleSheetImportError::InvalidValue {
                    line,
                    parameter: row.parameter.clone(),
                    value: row.value.clone(),
                }
            } else {
                RuleSheetImportError::InvalidKind {
                    line,
                    kind: row.kind.clone(),
                }
            }
        })?;

        records.push(SheetRecord {
            line,
            rule_id: row.rule_id,
            label: row.label,
            parameter: row.parameter,
            value,
        });
    }

    Ok(records)
}

fn kind_is_known(kind: &str) -> bool {
    matches!(
        kind.to_ascii_lowercase().as_str(),
        "integer" | "decimal" | "percent" | "flag" | "text"
    )
}

fn parse_value(kind: &str, raw: &str) -> Option<ParameterValue> {
    match kind.to_ascii_lowercase().as_str() {
        "integer" => raw.replace('_', "").parse().ok().map(ParameterValue::Integer),
        "decimal" => parse_finite(raw).map(ParameterValue::Decimal),
        "percent" => parse_percent(raw).map(ParameterValue::Percent),
        "flag" => parse_flag(raw).map(ParameterValue::Flag),
        "text" => Some(ParameterValue::Text(raw.to_string())),
        _ => None,
    }
}

// NaN and infinities have no JSON form.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

// "45%" means 0.45; a bare number is taken as the fraction itself.
fn parse_percent(raw: &str) -> Option<f64> {
    match raw.strip_suffix('%') {
        Some(number) => parse_finite(number.trim()).map(|value| value / 100.0),
        None => parse_finite(raw),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_value_for_tests(kind: &str, raw: &str) -> Option<ParameterValue> {
    parse_value(kind, raw)
}
