use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub data: Value,
}

impl CompanyRecord {
    pub fn new(id: &str, name: &str, data: Value) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: None,
            data,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }
}

/// An ordered company collection stamped with a process-unique generation.
///
/// Every construction takes a fresh generation, so caches keyed on it never
/// mistake a re-fetched dataset for the one they were built from.
#[derive(Debug, Clone)]
pub struct CompanyUniverse {
    generation: u64,
    companies: Vec<CompanyRecord>,
}

impl CompanyUniverse {
    pub fn new(companies: Vec<CompanyRecord>) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            companies,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}
