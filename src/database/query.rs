use anyhow::Result;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::Collection;
use serde::de::DeserializeOwned;

use crate::filters::PaginationParams;

/// One page of `filter` in `sort` order plus the total match count
pub async fn find_page<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
    params: &PaginationParams,
) -> Result<(Vec<T>, u64)>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let total = collection.count_documents(filter.clone()).await?;

    let cursor = collection
        .find(filter)
        .sort(sort)
        .skip(params.skip())
        .limit(params.limit() as i64)
        .await?;
    let items: Vec<T> = cursor.try_collect().await?;

    Ok((items, total))
}

/// Every document matching `filter` in `sort` order
pub async fn find_all<T>(collection: &Collection<T>, filter: Document, sort: Document) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let cursor = collection.find(filter).sort(sort).await?;
    Ok(cursor.try_collect().await?)
}

/// Distinct string values of `field`, sorted
pub async fn distinct_strings<T>(
    collection: &Collection<T>,
    field: &str,
    filter: Document,
) -> Result<Vec<String>>
where
    T: Send + Sync,
{
    let values = collection.distinct(field, filter).await?;
    Ok(strings_sorted(values))
}

pub fn strings_sorted(values: Vec<Bson>) -> Vec<String> {
    let mut strings: Vec<String> = values
        .into_iter()
        .filter_map(|v| match v {
            Bson::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
        .collect();
    strings.sort();
    strings.dedup();
    strings
}

/// Numeric field of an aggregation result regardless of its BSON width
pub fn number(document: &Document, key: &str) -> Option<f64> {
    match document.get(key)? {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_strings_sorted_drops_non_strings() {
        let values = vec![
            Bson::String("oval".into()),
            Bson::Null,
            Bson::String("cushion".into()),
            Bson::String(String::new()),
            Bson::Int32(3),
            Bson::String("oval".into()),
        ];
        assert_eq!(strings_sorted(values), vec!["cushion", "oval"]);
    }

    #[test]
    fn test_number_accepts_any_width() {
        let document = doc! { "a": 1.5, "b": 2_i32, "c": 3_i64, "d": "x" };
        assert_eq!(number(&document, "a"), Some(1.5));
        assert_eq!(number(&document, "b"), Some(2.0));
        assert_eq!(number(&document, "c"), Some(3.0));
        assert_eq!(number(&document, "d"), None);
        assert_eq!(number(&document, "missing"), None);
    }
}
