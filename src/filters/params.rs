use bson::{doc, Bson, Document};
use std::collections::HashSet;

use super::FilterError;

/// Split a comma-separated query value into trimmed, de-duplicated entries.
/// First occurrence order is preserved; empty entries are dropped.
pub fn split_list(raw: Option<&str>, normalize: fn(&str) -> String) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

pub fn lower(value: &str) -> String {
    value.to_lowercase()
}

pub fn upper(value: &str) -> String {
    value.to_uppercase()
}

/// Insert `{ field: { "$in": values } }` unless `values` is empty
pub fn insert_in(filter: &mut Document, field: &str, values: Vec<String>) {
    if values.is_empty() {
        return;
    }
    filter.insert(field, doc! { "$in": values });
}

/// Insert a `$gte`/`$lte` range on `field`, validating the bounds first.
/// `label` is the name used in error messages (the query parameter stem).
pub fn insert_range(
    filter: &mut Document,
    field: &str,
    label: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), FilterError> {
    for value in [min, max].into_iter().flatten() {
        if !value.is_finite() {
            return Err(FilterError::NotFinite {
                field: label.to_string(),
                value,
            });
        }
        if value < 0.0 {
            return Err(FilterError::NegativeValue {
                field: label.to_string(),
                value,
            });
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(FilterError::InvalidRange {
                field: label.to_string(),
                min,
                max,
            });
        }
    }

    let mut range = Document::new();
    if let Some(min) = min {
        range.insert("$gte", min);
    }
    if let Some(max) = max {
        range.insert("$lte", max);
    }
    if !range.is_empty() {
        filter.insert(field, range);
    }

    Ok(())
}

/// Case-insensitive substring match over several fields; the term is matched literally
pub fn insert_search(filter: &mut Document, fields: &[&str], term: Option<&str>) {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return;
    };

    let pattern = regex::escape(term);
    let clauses: Vec<Bson> = fields
        .iter()
        .map(|field| {
            Bson::Document(doc! {
                *field: { "$regex": pattern.as_str(), "$options": "i" }
            })
        })
        .collect();

    filter.insert("$or", clauses);
}
