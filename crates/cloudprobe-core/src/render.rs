//! Turns operation results into presentable output

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::types::Flavor;

/// Presentable form of one operation result
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// A single structured object, logged as pretty JSON
    Document(Value),
    /// Pre-formatted lines, logged one by one
    Lines(Vec<String>),
}

impl Rendered {
    /// Text lines as they will be logged
    pub fn lines(&self) -> Vec<String> {
        match self {
            Rendered::Document(value) => vec![
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ],
            Rendered::Lines(lines) => lines.clone(),
        }
    }
}

pub fn render_document<T: Serialize>(value: &T) -> Result<Rendered> {
    serde_json::to_value(value)
        .map(Rendered::Document)
        .map_err(|e| CoreError::Decode(e.to_string()))
}

/// Order flavors by ascending RAM; equal sizes keep their listing order
pub fn sort_flavors(flavors: &mut [Flavor]) {
    flavors.sort_by_key(|flavor| flavor.ram);
}

/// Sorted flavor listing: the id on one line, the name indented below it
pub fn render_flavors(mut flavors: Vec<Flavor>) -> Rendered {
    sort_flavors(&mut flavors);
    let lines = flavors
        .into_iter()
        .flat_map(|flavor| [flavor.id, format!("\t{}", flavor.name)])
        .collect();
    Rendered::Lines(lines)
}
