use bson::{doc, Document};
use serde::Deserialize;

use super::grades::{GradeScale, CLARITY, COLOR, CUT};
use super::pagination::PaginationParams;
use super::params::{insert_in, insert_range, insert_search, lower, split_list, upper};
use super::sort::SortOrder;
use super::FilterError;

/// Query string accepted by `GET /diamonds`.
///
/// List fields are comma-separated (`shape=round,oval`). Grade ranges
/// (`color_from=D&color_to=G`) are only consulted when the matching list
/// is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiamondQuery {
    pub shape: Option<String>,
    pub color: Option<String>,
    pub clarity: Option<String>,
    pub cut: Option<String>,
    pub polish: Option<String>,
    pub symmetry: Option<String>,
    pub fluorescence: Option<String>,
    pub lab: Option<String>,

    pub color_from: Option<String>,
    pub color_to: Option<String>,
    pub clarity_from: Option<String>,
    pub clarity_to: Option<String>,
    pub cut_from: Option<String>,
    pub cut_to: Option<String>,

    pub min_carat: Option<f64>,
    pub max_carat: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_table: Option<f64>,
    pub max_table: Option<f64>,
    pub min_depth: Option<f64>,
    pub max_depth: Option<f64>,

    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl DiamondQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }

    pub fn sort_order(&self) -> Result<SortOrder, FilterError> {
        SortOrder::for_diamonds(self.sort.as_deref())
    }
}

fn graded_list(
    list: Option<&str>,
    scale: GradeScale,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<String>, FilterError> {
    let values = split_list(list, upper);
    if !values.is_empty() {
        return Ok(values);
    }
    scale.expand(from, to)
}

/// Build the Mongo filter for the diamond listing
pub fn build_diamond_filter(query: &DiamondQuery) -> Result<Document, FilterError> {
    let mut filter = doc! {
        "product_type": "diamond",
        "is_active": true,
    };

    insert_in(
        &mut filter,
        "diamond.shape",
        split_list(query.shape.as_deref(), lower),
    );
    insert_in(
        &mut filter,
        "diamond.color",
        graded_list(
            query.color.as_deref(),
            COLOR,
            query.color_from.as_deref(),
            query.color_to.as_deref(),
        )?,
    );
    insert_in(
        &mut filter,
        "diamond.clarity",
        graded_list(
            query.clarity.as_deref(),
            CLARITY,
            query.clarity_from.as_deref(),
            query.clarity_to.as_deref(),
        )?,
    );
    insert_in(
        &mut filter,
        "diamond.cut",
        graded_list(
            query.cut.as_deref(),
            CUT,
            query.cut_from.as_deref(),
            query.cut_to.as_deref(),
        )?,
    );

    for (field, raw) in [
        ("diamond.polish", &query.polish),
        ("diamond.symmetry", &query.symmetry),
        ("diamond.fluorescence", &query.fluorescence),
        ("diamond.lab", &query.lab),
    ] {
        insert_in(&mut filter, field, split_list(raw.as_deref(), upper));
    }

    insert_range(
        &mut filter,
        "diamond.carat",
        "carat",
        query.min_carat,
        query.max_carat,
    )?;
    insert_range(&mut filter, "price", "price", query.min_price, query.max_price)?;
    insert_range(
        &mut filter,
        "diamond.table_percent",
        "table",
        query.min_table,
        query.max_table,
    )?;
    insert_range(
        &mut filter,
        "diamond.depth_percent",
        "depth",
        query.min_depth,
        query.max_depth,
    )?;

    insert_search(
        &mut filter,
        &["name", "sku", "diamond.certificate_number"],
        query.search.as_deref(),
    );

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_only_scopes_active_diamonds() {
        let filter = build_diamond_filter(&DiamondQuery::default()).unwrap();
        assert_eq!(
            filter,
            doc! { "product_type": "diamond", "is_active": true }
        );
    }

    #[test]
    fn test_lists_become_in_clauses() {
        let query = DiamondQuery {
            shape: Some("Round,OVAL".into()),
            lab: Some("gia, igi".into()),
            ..Default::default()
        };
        let filter = build_diamond_filter(&query).unwrap();
        assert_eq!(
            filter.get_document("diamond.shape").unwrap(),
            &doc! { "$in": ["round", "oval"] }
        );
        assert_eq!(
            filter.get_document("diamond.lab").unwrap(),
            &doc! { "$in": ["GIA", "IGI"] }
        );
        assert!(!filter.contains_key("diamond.polish"));
    }

    #[test]
    fn test_grade_range_expands_when_list_absent() {
        let query = DiamondQuery {
            color_from: Some("E".into()),
            color_to: Some("G".into()),
            ..Default::default()
        };
        let filter = build_diamond_filter(&query).unwrap();
        assert_eq!(
            filter.get_document("diamond.color").unwrap(),
            &doc! { "$in": ["E", "F", "G"] }
        );
    }

    #[test]
    fn test_explicit_list_wins_over_range() {
        let query = DiamondQuery {
            clarity: Some("vs1".into()),
            clarity_from: Some("FL".into()),
            clarity_to: Some("I3".into()),
            ..Default::default()
        };
        let filter = build_diamond_filter(&query).unwrap();
        assert_eq!(
            filter.get_document("diamond.clarity").unwrap(),
            &doc! { "$in": ["VS1"] }
        );
    }

    #[test]
    fn test_numeric_ranges() {
        let query = DiamondQuery {
            min_carat: Some(0.5),
            max_carat: Some(1.5),
            max_price: Some(10000.0),
            min_depth: Some(58.0),
            ..Default::default()
        };
        let filter = build_diamond_filter(&query).unwrap();
        assert_eq!(
            filter.get_document("diamond.carat").unwrap(),
            &doc! { "$gte": 0.5, "$lte": 1.5 }
        );
        assert_eq!(
            filter.get_document("price").unwrap(),
            &doc! { "$lte": 10000.0 }
        );
        assert_eq!(
            filter.get_document("diamond.depth_percent").unwrap(),
            &doc! { "$gte": 58.0 }
        );
        assert!(!filter.contains_key("diamond.table_percent"));
    }

    #[test]
    fn test_non_finite_bounds_are_rejected() {
        let query = serde_urlencoded_query("min_price=NaN");
        assert!(matches!(
            build_diamond_filter(&query),
            Err(FilterError::NotFinite { .. })
        ));

        let query = serde_urlencoded_query("max_carat=inf");
        assert!(matches!(
            build_diamond_filter(&query),
            Err(FilterError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_inverted_carat_range_is_rejected() {
        let query = DiamondQuery {
            min_carat: Some(2.0),
            max_carat: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            build_diamond_filter(&query),
            Err(FilterError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_unknown_grade_is_rejected() {
        let query = DiamondQuery {
            cut_from: Some("SUPER".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_diamond_filter(&query),
            Err(FilterError::UnknownGrade { .. })
        ));
    }

    #[test]
    fn test_search_covers_certificate_number() {
        let query = DiamondQuery {
            search: Some("2141438171".into()),
            ..Default::default()
        };
        let filter = build_diamond_filter(&query).unwrap();
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);
        assert!(clauses[2]
            .as_document()
            .unwrap()
            .contains_key("diamond.certificate_number"));
    }

    #[test]
    fn test_query_string_deserializes() {
        let query: DiamondQuery = serde_urlencoded_query(
            "shape=round&min_carat=1&max_price=5000.5&sort=price_asc&page=2&limit=50",
        );
        assert_eq!(query.shape.as_deref(), Some("round"));
        assert_eq!(query.min_carat, Some(1.0));
        assert_eq!(query.max_price, Some(5000.5));
        assert_eq!(query.sort_order().unwrap(), SortOrder::PriceAsc);
        assert_eq!(query.pagination().skip(), 50);
    }

    fn serde_urlencoded_query(raw: &str) -> DiamondQuery {
        actix_web::web::Query::<DiamondQuery>::from_query(raw)
            .unwrap()
            .into_inner()
    }
}
