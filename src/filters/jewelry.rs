use bson::{doc, Document};
use serde::Deserialize;

use super::pagination::PaginationParams;
use super::params::{insert_in, insert_range, insert_search, lower, split_list};
use super::sort::SortOrder;
use super::FilterError;

/// Query string accepted by `GET /jewelry`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JewelryQuery {
    pub category: Option<String>,
    pub metal: Option<String>,
    pub style: Option<String>,
    pub gender: Option<String>,
    pub stone: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl JewelryQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }

    pub fn sort_order(&self) -> Result<SortOrder, FilterError> {
        SortOrder::for_jewelry(self.sort.as_deref())
    }
}

/// Build the Mongo filter for the jewelry listing
pub fn build_jewelry_filter(query: &JewelryQuery) -> Result<Document, FilterError> {
    let mut filter = doc! {
        "product_type": "jewelry",
        "is_active": true,
    };

    insert_in(
        &mut filter,
        "category",
        split_list(query.category.as_deref(), lower),
    );

    for (field, raw) in [
        ("jewelry.metal", &query.metal),
        ("jewelry.style", &query.style),
        ("jewelry.gender", &query.gender),
        ("jewelry.stone", &query.stone),
    ] {
        insert_in(&mut filter, field, split_list(raw.as_deref(), lower));
    }

    insert_range(&mut filter, "price", "price", query.min_price, query.max_price)?;

    if let Some(featured) = query.featured {
        filter.insert("featured", featured);
    }

    insert_search(
        &mut filter,
        &["name", "sku", "description"],
        query.search.as_deref(),
    );

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_only_scopes_active_jewelry() {
        let filter = build_jewelry_filter(&JewelryQuery::default()).unwrap();
        assert_eq!(
            filter,
            doc! { "product_type": "jewelry", "is_active": true }
        );
    }

    #[test]
    fn test_category_and_attribute_lists() {
        let query = JewelryQuery {
            category: Some("Rings,engagement-rings".into()),
            metal: Some("18K White Gold, Platinum".into()),
            gender: Some("women".into()),
            ..Default::default()
        };
        let filter = build_jewelry_filter(&query).unwrap();
        assert_eq!(
            filter.get_document("category").unwrap(),
            &doc! { "$in": ["rings", "engagement-rings"] }
        );
        assert_eq!(
            filter.get_document("jewelry.metal").unwrap(),
            &doc! { "$in": ["18k white gold", "platinum"] }
        );
        assert_eq!(
            filter.get_document("jewelry.gender").unwrap(),
            &doc! { "$in": ["women"] }
        );
        assert!(!filter.contains_key("jewelry.style"));
    }

    #[test]
    fn test_featured_flag() {
        let query = JewelryQuery {
            featured: Some(false),
            ..Default::default()
        };
        let filter = build_jewelry_filter(&query).unwrap();
        assert!(!filter.get_bool("featured").unwrap());
    }

    #[test]
    fn test_price_range_validation() {
        let query = JewelryQuery {
            min_price: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            build_jewelry_filter(&query),
            Err(FilterError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_search_fields() {
        let query = JewelryQuery {
            search: Some("halo ring".into()),
            ..Default::default()
        };
        let filter = build_jewelry_filter(&query).unwrap();
        let fields: Vec<String> = filter
            .get_array("$or")
            .unwrap()
            .iter()
            .filter_map(|clause| clause.as_document())
            .filter_map(|clause| clause.keys().next().cloned())
            .collect();
        assert_eq!(fields, vec!["name", "sku", "description"]);
    }
}
