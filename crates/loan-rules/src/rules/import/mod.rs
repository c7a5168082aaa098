//! Import of loan parameter sheets exported from spreadsheets.
//!
//! A sheet has one row per parameter with the columns
//! `Rule ID,Label,Parameter,Kind,Value`. Rows that share a rule id are folded
//! into a single rule, keeping the order in which rule ids first appear.

mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::collection::{CollectionError, OrderedRuleCollection};
use super::domain::{Rule, RuleId};

#[derive(Debug)]
pub enum RuleSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingRuleId {
        line: usize,
    },
    InvalidKind {
        line: usize,
        kind: String,
    },
    InvalidValue {
        line: usize,
        parameter: String,
        value: String,
    },
    DuplicateParameter {
        line: usize,
        rule_id: RuleId,
        parameter: String,
    },
    Collection(CollectionError),
}

impl std::fmt::Display for RuleSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSheetImportError::Io(err) => write!(f, "failed to read rule sheet: {}", err),
            RuleSheetImportError::Csv(err) => write!(f, "invalid rule sheet CSV data: {}", err),
            RuleSheetImportError::MissingRuleId { line } => {
                write!(f, "line {line}: Rule ID must not be empty")
            }
            RuleSheetImportError::InvalidKind { line, kind } => write!(
                f,
                "line {line}: unknown parameter kind '{kind}' (expected integer, decimal, percent, flag or text)"
            ),
            RuleSheetImportError::InvalidValue {
                line,
                parameter,
                value,
            } => write!(f, "line {line}: cannot parse '{value}' for parameter {parameter}"),
            RuleSheetImportError::DuplicateParameter {
                line,
                rule_id,
                parameter,
            } => write!(
                f,
                "line {line}: parameter {parameter} appears twice for rule {rule_id}"
            ),
            RuleSheetImportError::Collection(err) => {
                write!(f, "could not build rule collection: {}", err)
            }
        }
    }
}

impl std::error::Error for RuleSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleSheetImportError::Io(err) => Some(err),
            RuleSheetImportError::Csv(err) => Some(err),
            RuleSheetImportError::Collection(err) => Some(err),
            RuleSheetImportError::MissingRuleId { .. }
            | RuleSheetImportError::InvalidKind { .. }
            | RuleSheetImportError::InvalidValue { .. }
            | RuleSheetImportError::DuplicateParameter { .. } => None,
        }
    }
}

impl From<std::io::Error> for RuleSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RuleSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CollectionError> for RuleSheetImportError {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

pub struct RuleSheetImporter;

impl RuleSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OrderedRuleCollection, RuleSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<OrderedRuleCollection, RuleSheetImportError> {
        let mut rules: Vec<Rule> = Vec::new();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();

        for record in parser::parse_records(reader)? {
            let slot = match index_by_id.get(&record.rule_id) {
                Some(slot) => *slot,
                None => {
                    let label = if record.label.is_empty() {
                        record.rule_id.clone()
                    } else {
                        record.label.clone()
                    };
                    rules.push(Rule::new(record.rule_id.clone(), label));
                    index_by_id.insert(record.rule_id.clone(), rules.len() - 1);
                    rules.len() - 1
                }
            };

            let rule = &mut rules[slot];
            if rule.parameters.contains_key(&record.parameter) {
                return Err(RuleSheetImportError::DuplicateParameter {
                    line: record.line,
                    rule_id: rule.id.clone(),
                    parameter: record.parameter,
                });
            }
            rule.parameters.insert(record.parameter, record.value);
        }

        Ok(OrderedRuleCollection::from_rules(rules)?)
    }
}
