use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{Map, Value};

use crate::input::{InputError, read_json};
use crate::model::company::{CompanyRecord, CompanyUniverse};

const ID_FIELDS: [&str; 2] = ["company_id", "id"];
const NAME_FIELDS: [&str; 2] = ["company_name", "name"];

pub fn load_companies(path: &Path) -> Result<CompanyUniverse, InputError> {
    let root: Value = read_json(path)?;
    let universe = parse_companies(root)?;
    tracing::info!(
        path = %path.display(),
        companies = universe.len(),
        generation = universe.generation(),
        "loaded company universe"
    );
    Ok(universe)
}

/// Accepts a bare array of records or an object with a `companies` array.
/// Records without a usable id are skipped.
pub fn parse_companies(root: Value) -> Result<CompanyUniverse, InputError> {
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("companies") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(InputError::InvalidInput(
                    "expected an array of companies or an object with a `companies` array"
                        .to_string(),
                ));
            }
        },
        _ => {
            return Err(InputError::InvalidInput(
                "company dataset must be a JSON array or object".to_string(),
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut seen = BTreeSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(obj) = item else {
            tracing::warn!(index, "company entry is not an object; skipped");
            continue;
        };
        let Some(id) = first_text(&obj, &ID_FIELDS) else {
            tracing::warn!(index, "company entry has no id; skipped");
            continue;
        };
        if !seen.insert(id.clone()) {
            tracing::warn!(id = %id, "duplicate company id");
        }
        let name = first_text(&obj, &NAME_FIELDS).unwrap_or_else(|| id.clone());
        let status = first_text(&obj, &["status"]);
        let mut record = CompanyRecord::new(&id, &name, Value::Object(obj));
        if let Some(status) = status {
            record = record.with_status(&status);
        }
        records.push(record);
    }
    Ok(CompanyUniverse::new(records))
}

fn first_text(obj: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match obj.get(*field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
