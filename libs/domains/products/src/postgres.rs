use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product, ProductFilter},
    repository::ProductRepository,
};

/// Translate a filter into a single AND condition of parameterized
/// predicates. An empty filter yields an empty condition (matches all).
///
/// - text: `name ILIKE $p OR description ILIKE $p` with `$p = %escaped%`
/// - category: `category = $c`
pub fn build_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(pattern) = filter.text_pattern() {
        condition = condition.add(
            Condition::any()
                .add(Expr::col((entity::Entity, entity::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((entity::Entity, entity::Column::Description)).ilike(pattern)),
        );
    }

    if let Some(category) = filter.category() {
        condition = condition.add(entity::Column::Category.eq(category));
    }

    condition
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn insert(&self, input: NewProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel::for_insert(input, Utc::now())
            .insert(&self.db)
            .await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;

        // Zero returned rows means the product was deleted after it was loaded.
        let updated = entity::Entity::update_many()
            .set(entity::ActiveModel::for_update(&product))
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        let model = updated.into_iter().next().ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn query(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(build_condition(filter))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}
