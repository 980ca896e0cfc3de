//! Expense categories and the id-to-name lookup used by reports.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub is_custom: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_custom: true,
        }
    }
}

/// Builds the display-name lookup consumed by the analysis service.
pub fn category_names(categories: &[Category]) -> HashMap<Uuid, String> {
    categories
        .iter()
        .map(|category| (category.id, category.name.clone()))
        .collect()
}
