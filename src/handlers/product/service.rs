use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::Database;

use crate::{
    database::{
        collections,
        models::{
            utils::{id_to_string, non_empty, now_ts},
            Category, Product, ProductType, Wishlist,
        },
        query::{distinct_strings, find_page, number},
    },
    errors::ApiError,
    filters::{
        build_diamond_filter, build_jewelry_filter,
        grades::{CLARITY, COLOR, CUT},
        DiamondQuery, JewelryQuery, Paginated, PaginationParams, SortOrder,
    },
    handlers::product::dto::{
        CreateProductRequest, DiamondFacets, JewelryFacets, ProductListQuery, ProductResponse,
        RangeFacet, UpdateProductRequest,
    },
};

/// Service layer for product-related business logic
pub struct ProductService;

impl ProductService {
    /// Paginated diamond search
    pub async fn list_diamonds(
        db: &Database,
        query: &DiamondQuery,
    ) -> anyhow::Result<Paginated<ProductResponse>> {
        let filter = build_diamond_filter(query)?;
        let sort = query.sort_order()?;
        debug!("Diamond filter: {}", filter);

        Self::list_filtered(db, filter, sort, &query.pagination()).await
    }

    /// Paginated jewelry search
    pub async fn list_jewelry(
        db: &Database,
        query: &JewelryQuery,
    ) -> anyhow::Result<Paginated<ProductResponse>> {
        let filter = build_jewelry_filter(query)?;
        let sort = query.sort_order()?;
        debug!("Jewelry filter: {}", filter);

        Self::list_filtered(db, filter, sort, &query.pagination()).await
    }

    /// Admin listing, inactive products included
    pub async fn list_all(
        db: &Database,
        query: &ProductListQuery,
    ) -> anyhow::Result<Paginated<ProductResponse>> {
        let mut filter = doc! {};
        if let Some(product_type) = query.product_type {
            filter.insert("product_type", product_type.as_str());
        }
        let params = PaginationParams::new(query.page, query.limit);

        Self::list_filtered(db, filter, SortOrder::Newest, &params).await
    }

    async fn list_filtered(
        db: &Database,
        filter: Document,
        sort: SortOrder,
        params: &PaginationParams,
    ) -> anyhow::Result<Paginated<ProductResponse>> {
        let collection = db.collection::<Product>(collections::PRODUCTS);
        let (products, total) = find_page(&collection, filter, sort.to_document(), params).await?;

        debug!(
            "Retrieved {} of {} matching products from database",
            products.len(),
            total
        );
        let data = products.into_iter().map(Self::map_to_response).collect();
        Ok(Paginated::new(data, params, total))
    }

    /// Facet values of active diamonds
    pub async fn diamond_facets(db: &Database) -> anyhow::Result<DiamondFacets> {
        let collection = db.collection::<Product>(collections::PRODUCTS);
        let scope = doc! { "product_type": "diamond", "is_active": true };

        let ranges = Self::ranges(
            db,
            scope.clone(),
            doc! {
                "min_carat": { "$min": "$diamond.carat" },
                "max_carat": { "$max": "$diamond.carat" },
                "min_price": { "$min": "$price" },
                "max_price": { "$max": "$price" },
            },
        )
        .await?;

        Ok(DiamondFacets {
            shapes: distinct_strings(&collection, "diamond.shape", scope.clone()).await?,
            colors: distinct_strings(&collection, "diamond.color", scope.clone()).await?,
            clarities: distinct_strings(&collection, "diamond.clarity", scope.clone()).await?,
            cuts: distinct_strings(&collection, "diamond.cut", scope.clone()).await?,
            labs: distinct_strings(&collection, "diamond.lab", scope).await?,
            carat: ranges.as_ref().and_then(|r| range_facet(r, "carat")),
            price: ranges.as_ref().and_then(|r| range_facet(r, "price")),
        })
    }

    /// Facet values of active jewelry
    pub async fn jewelry_facets(db: &Database) -> anyhow::Result<JewelryFacets> {
        let collection = db.collection::<Product>(collections::PRODUCTS);
        let scope = doc! { "product_type": "jewelry", "is_active": true };

        let ranges = Self::ranges(
            db,
            scope.clone(),
            doc! {
                "min_price": { "$min": "$price" },
                "max_price": { "$max": "$price" },
            },
        )
        .await?;

        Ok(JewelryFacets {
            categories: distinct_strings(&collection, "category", scope.clone()).await?,
            metals: distinct_strings(&collection, "jewelry.metal", scope.clone()).await?,
            styles: distinct_strings(&collection, "jewelry.style", scope.clone()).await?,
            genders: distinct_strings(&collection, "jewelry.gender", scope.clone()).await?,
            stones: distinct_strings(&collection, "jewelry.stone", scope).await?,
            price: ranges.as_ref().and_then(|r| range_facet(r, "price")),
        })
    }

    async fn ranges(
        db: &Database,
        scope: Document,
        accumulators: Document,
    ) -> anyhow::Result<Option<Document>> {
        let mut group = doc! { "_id": null };
        for (key, value) in accumulators {
            group.insert(key, value);
        }

        let pipeline = vec![doc! { "$match": scope }, doc! { "$group": group }];
        let mut cursor = db
            .collection::<Document>(collections::PRODUCTS)
            .aggregate(pipeline)
            .await?;

        Ok(cursor.try_next().await?)
    }

    /// Get a product by id
    pub async fn get_by_id(db: &Database, id: ObjectId) -> anyhow::Result<Option<ProductResponse>> {
        debug!("Fetching product {}", id);

        let collection = db.collection::<Product>(collections::PRODUCTS);
        let product = collection.find_one(doc! { "_id": id }).await?;

        Ok(product.map(Self::map_to_response))
    }

    /// Get a product by SKU
    pub async fn get_by_sku(db: &Database, sku: &str) -> anyhow::Result<Option<ProductResponse>> {
        debug!("Fetching product with sku: {}", sku);

        let collection = db.collection::<Product>(collections::PRODUCTS);
        let product = collection.find_one(doc! { "sku": sku.trim() }).await?;

        Ok(product.map(Self::map_to_response))
    }

    pub async fn exists(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Product>(collections::PRODUCTS);
        Ok(collection.count_documents(doc! { "_id": id }).await? > 0)
    }

    /// Create a new product
    pub async fn create(
        db: &Database,
        request: CreateProductRequest,
    ) -> anyhow::Result<ProductResponse> {
        debug!("Creating product with sku: {}", request.sku);

        let mut product = build_product(request);
        validate_product(&product)?;
        Self::ensure_category_exists(db, product.category.as_deref()).await?;

        let collection = db.collection::<Product>(collections::PRODUCTS);
        let result = collection.insert_one(&product).await?;
        product.id = result.inserted_id.as_object_id();

        info!("Created product {} ({})", product.sku, product.product_type);
        Ok(Self::map_to_response(product))
    }

    /// Apply a partial update and re-validate the whole product
    pub async fn update(
        db: &Database,
        id: ObjectId,
        request: UpdateProductRequest,
    ) -> anyhow::Result<ProductResponse> {
        debug!("Updating product {}", id);

        let collection = db.collection::<Product>(collections::PRODUCTS);
        let existing = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))?;

        let category_changed = request.category.is_some();
        let product = apply_update(existing, request);
        validate_product(&product)?;
        if category_changed {
            Self::ensure_category_exists(db, product.category.as_deref()).await?;
        }

        collection
            .replace_one(doc! { "_id": id }, &product)
            .await?;

        info!("Updated product {}", id);
        Ok(Self::map_to_response(product))
    }

    /// Delete a product and drop it from every wishlist
    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Product>(collections::PRODUCTS);
        let result = collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            debug!("Product {} not found", id);
            return Ok(false);
        }

        let pulled = db
            .collection::<Wishlist>(collections::WISHLISTS)
            .update_many(
                doc! { "product_ids": id },
                doc! {
                    "$pull": { "product_ids": id },
                    "$set": { "updated_at": now_ts() as i64 },
                },
            )
            .await?;

        info!(
            "Deleted product {} (removed from {} wishlists)",
            id, pulled.modified_count
        );
        Ok(true)
    }

    async fn ensure_category_exists(db: &Database, slug: Option<&str>) -> anyhow::Result<()> {
        let Some(slug) = slug else {
            return Ok(());
        };

        let count = db
            .collection::<Category>(collections::CATEGORIES)
            .count_documents(doc! { "slug": slug })
            .await?;

        if count == 0 {
            return Err(ApiError::BadRequest(format!("Unknown category '{}'", slug)).into());
        }
        Ok(())
    }

    /// Map Product model to ProductResponse DTO
    pub fn map_to_response(product: Product) -> ProductResponse {
        ProductResponse {
            id: id_to_string(product.id),
            sku: product.sku,
            name: product.name,
            description: product.description,
            product_type: product.product_type,
            category: product.category,
            price: product.price,
            currency: product.currency,
            images: product.images,
            video: product.video,
            featured: product.featured,
            is_active: product.is_active,
            diamond: product.diamond,
            jewelry: product.jewelry,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

fn range_facet(ranges: &Document, stem: &str) -> Option<RangeFacet> {
    Some(RangeFacet {
        min: number(ranges, &format!("min_{}", stem))?,
        max: number(ranges, &format!("max_{}", stem))?,
    })
}

fn normalize_category(category: Option<String>) -> Option<String> {
    non_empty(category).map(|c| c.to_lowercase())
}

/// Build a normalized product from a create request
pub fn build_product(request: CreateProductRequest) -> Product {
    let mut product = Product::new(
        request.sku.trim().to_string(),
        request.name.trim().to_string(),
        request.product_type,
        request.price,
    );
    product.description = non_empty(request.description);
    product.category = normalize_category(request.category);
    if let Some(currency) = non_empty(request.currency) {
        product.currency = currency.to_uppercase();
    }
    product.images = request.images.unwrap_or_default();
    product.video = non_empty(request.video);
    product.featured = request.featured.unwrap_or(false);
    product.is_active = request.is_active.unwrap_or(true);
    product.diamond = request.diamond.map(|d| d.normalize());
    product.jewelry = request.jewelry.map(|j| j.normalize());
    product
}

/// Merge a partial update into an existing product
pub fn apply_update(mut product: Product, request: UpdateProductRequest) -> Product {
    if let Some(sku) = request.sku {
        product.sku = sku.trim().to_string();
    }
    if let Some(name) = request.name {
        product.name = name.trim().to_string();
    }
    if request.description.is_some() {
        product.description = non_empty(request.description);
    }
    if request.category.is_some() {
        product.category = normalize_category(request.category);
    }
    if let Some(price) = request.price {
        product.price = price;
    }
    if let Some(currency) = non_empty(request.currency) {
        product.currency = currency.to_uppercase();
    }
    if let Some(images) = request.images {
        product.images = images;
    }
    if request.video.is_some() {
        product.video = non_empty(request.video);
    }
    if let Some(featured) = request.featured {
        product.featured = featured;
    }
    if let Some(is_active) = request.is_active {
        product.is_active = is_active;
    }
    if let Some(diamond) = request.diamond {
        product.diamond = Some(diamond.normalize());
    }
    if let Some(jewelry) = request.jewelry {
        product.jewelry = Some(jewelry.normalize());
    }
    product.updated_at = now_ts();
    product
}

/// Check the invariants a stored product must satisfy
pub fn validate_product(product: &Product) -> Result<(), ApiError> {
    let bad = |message: String| Err(ApiError::BadRequest(message));

    if product.sku.is_empty() {
        return bad("sku must not be empty".to_string());
    }
    if product.name.is_empty() {
        return bad("name must not be empty".to_string());
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return bad(format!("Invalid price {}", product.price));
    }

    match product.product_type {
        ProductType::Diamond => {
            if product.jewelry.is_some() {
                return bad("A diamond cannot carry jewelry specs".to_string());
            }
            let Some(specs) = &product.diamond else {
                return bad("A diamond requires diamond specs".to_string());
            };
            if !specs.carat.is_finite() || specs.carat <= 0.0 {
                return bad(format!("Invalid carat weight {}", specs.carat));
            }
            if specs.shape.is_empty() {
                return bad("Diamond shape must not be empty".to_string());
            }
            if !COLOR.contains(&specs.color) {
                return bad(format!("Unknown color grade '{}'", specs.color));
            }
            if !CLARITY.contains(&specs.clarity) {
                return bad(format!("Unknown clarity grade '{}'", specs.clarity));
            }
            if let Some(cut) = &specs.cut {
                if !CUT.contains(cut) {
                    return bad(format!("Unknown cut grade '{}'", cut));
                }
            }
            for (label, value) in [
                ("table_percent", specs.table_percent),
                ("depth_percent", specs.depth_percent),
            ] {
                if let Some(value) = value {
                    if !(0.0..=100.0).contains(&value) {
                        return bad(format!("{} must be between 0 and 100", label));
                    }
                }
            }
        }
        ProductType::Jewelry => {
            if product.diamond.is_some() {
                return bad("A jewelry item cannot carry diamond specs".to_string());
            }
            if let Some(weight) = product.jewelry.as_ref().and_then(|j| j.weight_grams) {
                if !weight.is_finite() || weight < 0.0 {
                    return bad(format!("Invalid weight {}", weight));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{DiamondSpecs, JewelrySpecs};

    fn diamond_request() -> CreateProductRequest {
        CreateProductRequest {
            sku: " RD-100 ".into(),
            name: "Round 1.01ct F VS1".into(),
            description: Some("  ".into()),
            product_type: ProductType::Diamond,
            category: Some(" Loose-Diamonds ".into()),
            price: 6400.0,
            currency: Some("eur".into()),
            images: None,
            video: None,
            featured: None,
            is_active: None,
            diamond: Some(DiamondSpecs {
                shape: "Round".into(),
                carat: 1.01,
                color: "f".into(),
                clarity: "vs1".into(),
                cut: Some("ex".into()),
                ..Default::default()
            }),
            jewelry: None,
        }
    }

    #[test]
    fn test_build_product_normalizes() {
        let product = build_product(diamond_request());
        assert_eq!(product.sku, "RD-100");
        assert_eq!(product.description, None);
        assert_eq!(product.category.as_deref(), Some("loose-diamonds"));
        assert_eq!(product.currency, "EUR");
        assert!(product.is_active);
        let specs = product.diamond.as_ref().unwrap();
        assert_eq!(specs.shape, "round");
        assert_eq!(specs.color, "F");
        assert!(validate_product(&product).is_ok());
    }

    #[test]
    fn test_diamond_requires_specs() {
        let mut request = diamond_request();
        request.diamond = None;
        assert!(matches!(
            validate_product(&build_product(request)),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_rejects_mixed_specs() {
        let mut request = diamond_request();
        request.jewelry = Some(JewelrySpecs::default());
        assert!(validate_product(&build_product(request)).is_err());
    }

    #[test]
    fn test_rejects_bad_grades_and_numbers() {
        let mut product = build_product(diamond_request());
        product.diamond.as_mut().unwrap().color = "A".into();
        assert!(validate_product(&product).is_err());

        let mut product = build_product(diamond_request());
        product.diamond.as_mut().unwrap().carat = 0.0;
        assert!(validate_product(&product).is_err());

        let mut product = build_product(diamond_request());
        product.price = f64::NAN;
        assert!(validate_product(&product).is_err());

        let mut product = build_product(diamond_request());
        product.diamond.as_mut().unwrap().depth_percent = Some(140.0);
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_jewelry_without_specs_is_valid() {
        let product = Product::new("JW-1".into(), "Halo ring".into(), ProductType::Jewelry, 1200.0);
        assert!(validate_product(&product).is_ok());
    }

    #[test]
    fn test_apply_update_merges() {
        let product = build_product(diamond_request());
        let updated = apply_update(
            product,
            UpdateProductRequest {
                price: Some(5900.0),
                is_active: Some(false),
                category: Some(" Rings ".into()),
                diamond: Some(DiamondSpecs {
                    shape: "OVAL".into(),
                    carat: 1.2,
                    color: "g".into(),
                    clarity: "si1".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert_eq!(updated.sku, "RD-100");
        assert_eq!(updated.price, 5900.0);
        assert!(!updated.is_active);
        assert_eq!(updated.category.as_deref(), Some("rings"));
        assert_eq!(updated.diamond.as_ref().unwrap().shape, "oval");
        assert_eq!(updated.diamond.as_ref().unwrap().clarity, "SI1");
    }

    #[test]
    fn test_range_facet() {
        let ranges = doc! { "min_price": 300.0, "max_price": 9_i32 };
        assert_eq!(
            range_facet(&ranges, "price"),
            Some(RangeFacet { min: 300.0, max: 9.0 })
        );
        assert_eq!(range_facet(&ranges, "carat"), None);
    }
}
