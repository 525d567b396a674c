use observability::{Outcome, ProductMetrics};
use std::sync::Arc;
use tracing::{error, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::repository::ProductRepository;

pub const FAILED_TO_FETCH_PRODUCTS: &str = "Failed to fetch products";
pub const FAILED_TO_FETCH_PRODUCT: &str = "Failed to fetch product";
pub const FAILED_TO_CREATE_PRODUCT: &str = "Failed to create product";
pub const FAILED_TO_UPDATE_PRODUCT: &str = "Failed to update product";
pub const FAILED_TO_DELETE_PRODUCT: &str = "Failed to delete product";
pub const FAILED_TO_SEARCH_PRODUCTS: &str = "Failed to search products";

/// Product business logic over an injected [`ProductRepository`].
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products ordered by id
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        let result = self
            .repository
            .find_all()
            .await
            .map_err(storage_failure(FAILED_TO_FETCH_PRODUCTS));
        observe("list", result)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        let result = self.load(id, FAILED_TO_FETCH_PRODUCT).await;
        observe("get", result)
    }

    /// Decode `body` as a [`NewProduct`] and insert it.
    #[instrument(skip(self, body))]
    pub async fn create_product(&self, body: &[u8]) -> ProductResult<Product> {
        let result = match NewProduct::from_json(body) {
            Ok(input) => self
                .repository
                .insert(input)
                .await
                .map_err(storage_failure(FAILED_TO_CREATE_PRODUCT)),
            Err(e) => Err(e),
        };
        observe("create", result)
    }

    /// Load the product, then decode `body` and overwrite the fields it
    /// carries. A missing product wins over a malformed body.
    #[instrument(skip(self, body))]
    pub async fn update_product(&self, id: i64, body: &[u8]) -> ProductResult<Product> {
        let result = self.update_inner(id, body).await;
        observe("update", result)
    }

    async fn update_inner(&self, id: i64, body: &[u8]) -> ProductResult<Product> {
        let mut product = self.load(id, FAILED_TO_FETCH_PRODUCT).await?;
        let patch = ProductPatch::from_json(body)?;

        product.apply_patch(patch);

        self.repository
            .save(product)
            .await
            .map_err(storage_failure(FAILED_TO_UPDATE_PRODUCT))
    }

    /// Delete by id. Succeeds whether or not the product existed.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let result = self
            .repository
            .delete_by_id(id)
            .await
            .map(|_| ())
            .map_err(storage_failure(FAILED_TO_DELETE_PRODUCT));
        observe("delete", result)
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let result = self
            .repository
            .query(&filter)
            .await
            .map_err(storage_failure(FAILED_TO_SEARCH_PRODUCTS));
        if let Ok(products) = &result {
            ProductMetrics::record_search_results(products.len());
        }
        observe("search", result)
    }

    async fn load(&self, id: i64, failure: &'static str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_failure(failure))?
            .ok_or(ProductError::NotFound(id))
    }
}

/// Replace storage detail with a client-safe message, logging the detail.
fn storage_failure(message: &'static str) -> impl FnOnce(ProductError) -> ProductError {
    move |err| match err {
        ProductError::Internal(detail) => {
            error!(error = %detail, "{}", message);
            ProductError::Internal(message.to_string())
        }
        other => other,
    }
}

fn observe<T>(operation: &'static str, result: ProductResult<T>) -> ProductResult<T> {
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(ProductError::InvalidArgument(_) | ProductError::NotFound(_)) => Outcome::ClientError,
        Err(ProductError::Internal(_)) => Outcome::Error,
    };
    ProductMetrics::record_operation(operation, outcome);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn product(id: i64, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            description: "desc".to_string(),
            category: "tools".to_string(),
            price: 2.5,
            stock: 4,
            created_at: now,
            updated_at: now,
        }
    }

    fn internal() -> ProductError {
        ProductError::Internal("Database error: connection refused".to_string())
    }

    fn assert_internal(err: ProductError, expected: &str) {
        match err {
            ProductError::Internal(msg) => assert_eq!(msg, expected),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(None));

        let err = ProductService::new(repo).get_product(9).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_list_storage_error_hides_detail() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all().returning(|| Err(internal()));

        let err = ProductService::new(repo).list_products().await.unwrap_err();
        assert_internal(err, FAILED_TO_FETCH_PRODUCTS);
    }

    #[tokio::test]
    async fn test_create_invalid_body_never_touches_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().never();

        let service = ProductService::new(repo);
        let bodies: [&[u8]; 3] = [b"{", br#"{"name":""}"#, br#"{"price":1}"#];
        for body in bodies {
            let err = service.create_product(body).await.unwrap_err();
            assert!(matches!(err, ProductError::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn test_create_insert_failure_is_generic_internal() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().returning(|_| Err(internal()));

        let err = ProductService::new(repo)
            .create_product(br#"{"name":"Widget"}"#)
            .await
            .unwrap_err();
        assert_internal(err, FAILED_TO_CREATE_PRODUCT);
    }

    #[tokio::test]
    async fn test_create_passes_decoded_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|input| input.name == "Widget" && input.category == "tools")
            .returning(|input| Ok(product(1, &input.name)));

        let created = ProductService::new(repo)
            .create_product(br#"{"name":"Widget","category":"tools"}"#)
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_update_checks_existence_before_decoding() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save().never();

        let err = ProductService::new(repo)
            .update_product(3, b"not json")
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_update_invalid_body_after_load() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "old"))));
        repo.expect_save().never();

        let err = ProductService::new(repo)
            .update_product(3, br#"{"stock":"many"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_update_overwrites_loaded_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "old"))));
        repo.expect_save()
            .withf(|p| p.id == 3 && p.name == "new" && p.description == "desc")
            .returning(|p| Ok(p));

        let saved = ProductService::new(repo)
            .update_product(3, br#"{"name":"new","id":100}"#)
            .await
            .unwrap();
        assert_eq!(saved.id, 3);
        assert_eq!(saved.name, "new");
    }

    #[tokio::test]
    async fn test_update_row_vanished_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "old"))));
        repo.expect_save()
            .returning(|p| Err(ProductError::NotFound(p.id)));

        let err = ProductService::new(repo)
            .update_product(3, br#"{"name":"new"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_update_save_failure_is_generic_internal() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "old"))));
        repo.expect_save().returning(|_| Err(internal()));

        let err = ProductService::new(repo)
            .update_product(3, br#"{"name":"new"}"#)
            .await
            .unwrap_err();
        assert_internal(err, FAILED_TO_UPDATE_PRODUCT);
    }

    #[tokio::test]
    async fn test_delete_missing_is_success() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete_by_id()
            .with(eq(42))
            .returning(|_| Ok(false));

        assert!(ProductService::new(repo).delete_product(42).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_failure_is_generic_internal() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete_by_id().returning(|_| Err(internal()));

        let err = ProductService::new(repo).delete_product(1).await.unwrap_err();
        assert_internal(err, FAILED_TO_DELETE_PRODUCT);
    }

    #[tokio::test]
    async fn test_search_forwards_filter() {
        let mut repo = MockProductRepository::new();
        repo.expect_query()
            .withf(|f| f.text() == Some("abc") && f.category().is_none())
            .returning(|_| Ok(vec![product(1, "abc")]));

        let found = ProductService::new(repo)
            .search_products(ProductFilter::new(Some("abc".to_string()), Some(String::new())))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_search_failure_is_generic_internal() {
        let mut repo = MockProductRepository::new();
        repo.expect_query().returning(|_| Err(internal()));

        let err = ProductService::new(repo)
            .search_products(ProductFilter::default())
            .await
            .unwrap_err();
        assert_internal(err, FAILED_TO_SEARCH_PRODUCTS);
    }
}
