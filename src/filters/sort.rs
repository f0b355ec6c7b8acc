use bson::{doc, Document};
use std::str::FromStr;

use super::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    CaratAsc,
    CaratDesc,
    NameAsc,
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            "carat_asc" => Ok(SortOrder::CaratAsc),
            "carat_desc" => Ok(SortOrder::CaratDesc),
            "name_asc" => Ok(SortOrder::NameAsc),
            _ => Err(FilterError::UnknownSort(s.to_string())),
        }
    }
}

impl SortOrder {
    /// Parse a sort parameter for the diamond listing
    pub fn for_diamonds(raw: Option<&str>) -> Result<Self, FilterError> {
        raw.map_or(Ok(SortOrder::default()), str::parse)
    }

    /// Parse a sort parameter for the jewelry listing; carat orders are not meaningful there
    pub fn for_jewelry(raw: Option<&str>) -> Result<Self, FilterError> {
        let order = Self::for_diamonds(raw)?;
        match order {
            SortOrder::CaratAsc | SortOrder::CaratDesc => {
                Err(FilterError::UnknownSort(raw.unwrap_or_default().to_string()))
            }
            other => Ok(other),
        }
    }

    /// Mongo sort document; `_id` breaks ties so pages stay stable
    pub fn to_document(self) -> Document {
        match self {
            SortOrder::Newest => doc! { "created_at": -1, "_id": -1 },
            SortOrder::Oldest => doc! { "created_at": 1, "_id": 1 },
            SortOrder::PriceAsc => doc! { "price": 1, "_id": 1 },
            SortOrder::PriceDesc => doc! { "price": -1, "_id": -1 },
            SortOrder::CaratAsc => doc! { "diamond.carat": 1, "_id": 1 },
            SortOrder::CaratDesc => doc! { "diamond.carat": -1, "_id": -1 },
            SortOrder::NameAsc => doc! { "name": 1, "_id": 1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_newest() {
        assert_eq!(SortOrder::for_diamonds(None).unwrap(), SortOrder::Newest);
        assert_eq!(
            SortOrder::for_diamonds(None).unwrap().to_document(),
            doc! { "created_at": -1, "_id": -1 }
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            SortOrder::for_diamonds(Some("Price_Desc")).unwrap(),
            SortOrder::PriceDesc
        );
    }

    #[test]
    fn test_jewelry_rejects_carat_sort() {
        assert_eq!(
            SortOrder::for_jewelry(Some("carat_asc")).unwrap_err(),
            FilterError::UnknownSort("carat_asc".into())
        );
        assert_eq!(
            SortOrder::for_jewelry(Some("name_asc")).unwrap(),
            SortOrder::NameAsc
        );
    }

    #[test]
    fn test_unknown_sort() {
        assert!(SortOrder::for_diamonds(Some("cheapest")).is_err());
    }
}
