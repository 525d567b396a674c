use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductFilter};

/// Storage gateway for products.
///
/// Implementations report storage failures as [`ProductError::Internal`]
/// carrying the underlying detail; the service decides what reaches clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id ascending
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert and return the stored record with its assigned id
    async fn insert(&self, input: NewProduct) -> ProductResult<Product>;

    /// Persist the mutable fields of `product` under its id.
    ///
    /// Returns [`ProductError::NotFound`] if the row no longer exists.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Delete by id; `false` when nothing was deleted
    async fn delete_by_id(&self, id: i64) -> ProductResult<bool>;

    /// Products matching every present predicate, ordered by id ascending
    async fn query(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids come from a monotonic counter and are never reused after delete.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let now = Utc::now();
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name,
            description: input.description,
            category: input.category,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        };
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let stored = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        let created_at = stored.created_at;
        *stored = Product {
            created_at,
            ..product
        };

        tracing::info!(product_id = stored.id, "Updated product");
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        let deleted = products.remove(&id).is_some();
        if deleted {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(deleted)
    }

    async fn query(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}
