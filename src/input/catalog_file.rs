use std::path::Path;

use serde::Deserialize;

use crate::catalog::MetricCatalog;
use crate::input::{InputError, read_text};
use crate::model::metric::{MetricDescriptor, split_path};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    key: String,
    label: String,
    higher_is_better: bool,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

pub fn load_catalog(path: &Path) -> Result<MetricCatalog, InputError> {
    let catalog = parse_catalog(&read_text(path)?)?;
    tracing::info!(path = %path.display(), metrics = catalog.len(), "loaded metric catalog");
    Ok(catalog)
}

pub fn parse_catalog(text: &str) -> Result<MetricCatalog, InputError> {
    catalog_from_entries(serde_json::from_str(text)?)
}

fn catalog_from_entries(entries: Vec<CatalogEntry>) -> Result<MetricCatalog, InputError> {
    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.key.trim();
        if key.is_empty() {
            return Err(InputError::InvalidInput(
                "catalog entry with an empty key".to_string(),
            ));
        }
        let mut descriptor = MetricDescriptor::new(key, &entry.label, entry.higher_is_better);
        if let Some(path) = entry.path {
            descriptor.path = split_path(&path);
        }
        if descriptor.path.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "catalog entry {key} has an empty path"
            )));
        }
        descriptor.unit = entry.unit;
        descriptor.category = entry.category;
        descriptors.push(descriptor);
    }
    let catalog = MetricCatalog::from_descriptors(descriptors);
    if catalog.is_empty() {
        return Err(InputError::InvalidInput("catalog has no metrics".to_string()));
    }
    Ok(catalog)
}
