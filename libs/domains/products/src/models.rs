use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ProductResult;

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Storage-assigned identifier
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite every field present in `patch`.
    ///
    /// `id` and `created_at` never change; `updated_at` is bumped.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload for creating a product.
///
/// Any `id` or timestamp supplied by the client is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i32,
}

/// Explicit `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl NewProduct {
    /// Decode and validate a JSON request body.
    pub fn from_json(body: &[u8]) -> ProductResult<Self> {
        let input: Self = serde_json::from_slice(body)?;
        input.validate()?;
        Ok(input)
    }
}

/// Payload for updating a product.
///
/// Fields present overwrite the stored value; absent fields are kept. A
/// payload with every field set is a full replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl ProductPatch {
    /// Decode and validate a JSON request body.
    pub fn from_json(body: &[u8]) -> ProductResult<Self> {
        let patch: Self = serde_json::from_slice(body)?;
        patch.validate()?;
        Ok(patch)
    }
}

/// Query string of `GET /products/search`.
///
/// Built from raw key/value pairs so no query string is ever rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of name or description
    pub q: Option<String>,
    /// Exact category
    pub category: Option<String>,
}

/// Search predicates. Present predicates are AND-ed; an empty filter
/// matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    text: Option<String>,
    category: Option<String>,
}

impl ProductFilter {
    /// Empty strings are treated as absent.
    pub fn new(text: Option<String>, category: Option<String>) -> Self {
        Self {
            text: text.filter(|t| !t.is_empty()),
            category: category.filter(|c| !c.is_empty()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.category.is_none()
    }

    /// `%text%` with LIKE metacharacters backslash-escaped so the text
    /// matches as a literal substring.
    pub fn text_pattern(&self) -> Option<String> {
        self.text.as_deref().map(|text| {
            let mut pattern = String::with_capacity(text.len() + 2);
            pattern.push('%');
            for c in text.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    /// In-process evaluation with the same semantics as the SQL condition.
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = self.text.as_deref().is_none_or(|text| {
            let needle = text.to_lowercase();
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        });
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        text_ok && category_ok
    }
}

impl SearchQuery {
    /// The first value of a repeated parameter wins; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" if query.q.is_none() => query.q = Some(value),
                "category" if query.category.is_none() => query.category = Some(value),
                _ => {}
            }
        }
        query
    }
}

impl From<SearchQuery> for ProductFilter {
    fn from(query: SearchQuery) -> Self {
        Self::new(query.q, query.category)
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price: 0.0,
            stock: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_product_defaults_optional_fields() {
        let input = NewProduct::from_json(br#"{"name":"Widget"}"#).unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.description, "");
        assert_eq!(input.category, "");
        assert_eq!(input.price, 0.0);
        assert_eq!(input.stock, 0);
    }

    #[test]
    fn test_new_product_ignores_client_id() {
        let input = NewProduct::from_json(br#"{"id":99,"name":"Widget","created_at":"x"}"#).unwrap();
        assert_eq!(input.name, "Widget");
    }

    #[test]
    fn test_new_product_rejects_missing_or_empty_name() {
        let missing = NewProduct::from_json(br#"{"description":"no name"}"#).unwrap_err();
        assert!(missing.to_string().contains("name"));

        let empty = NewProduct::from_json(br#"{"name":""}"#).unwrap_err();
        assert!(empty.to_string().contains("name must not be empty"));
    }

    #[test]
    fn test_new_product_treats_null_as_absent() {
        let input = NewProduct::from_json(
            br#"{"name":"Widget","description":null,"category":null,"price":null,"stock":null}"#,
        )
        .unwrap();
        assert_eq!(input, NewProduct::from_json(br#"{"name":"Widget"}"#).unwrap());
    }

    #[test]
    fn test_search_query_first_value_wins() {
        let pairs = [("q", "a"), ("category", "x"), ("q", "b"), ("page", "2"), ("category", "y")]
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let query = SearchQuery::from_pairs(pairs);
        assert_eq!(query.q.as_deref(), Some("a"));
        assert_eq!(query.category.as_deref(), Some("x"));
        assert_eq!(SearchQuery::from_pairs(Vec::new()), SearchQuery::default());
    }

    #[test]
    fn test_new_product_rejects_wrong_types() {
        assert!(NewProduct::from_json(br#"{"name":"Widget","price":"cheap"}"#).is_err());
        assert!(NewProduct::from_json(b"not json").is_err());
    }

    #[test]
    fn test_patch_overwrites_present_fields_only() {
        let mut p = product("Widget", "A small widget", "tools");
        let created_at = p.created_at;
        let patch = ProductPatch::from_json(br#"{"name":"Gadget","stock":5,"id":7}"#).unwrap();

        p.apply_patch(patch);

        assert_eq!(p.id, 1);
        assert_eq!(p.name, "Gadget");
        assert_eq!(p.description, "A small widget");
        assert_eq!(p.stock, 5);
        assert_eq!(p.created_at, created_at);
        assert!(p.updated_at >= created_at);
    }

    #[test]
    fn test_patch_rejects_empty_name() {
        assert!(ProductPatch::from_json(br#"{"name":""}"#).is_err());
        assert!(ProductPatch::from_json(b"{}").is_ok());
    }

    #[test]
    fn test_filter_treats_empty_strings_as_absent() {
        let filter = ProductFilter::new(Some(String::new()), Some(String::new()));
        assert!(filter.is_empty());
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_text_pattern_escapes_like_metacharacters() {
        let filter = ProductFilter::new(Some(r"50%_off\now".to_string()), None);
        assert_eq!(filter.text_pattern().unwrap(), r"%50\%\_off\\now%");
        assert_eq!(ProductFilter::default().text_pattern(), None);
    }

    #[test]
    fn test_matches_text_case_insensitively_in_name_or_description() {
        let filter = ProductFilter::new(Some("WIDGET".to_string()), None);
        assert!(filter.matches(&product("Widget", "", "")));
        assert!(filter.matches(&product("Thing", "a small widget", "")));
        assert!(!filter.matches(&product("Gadget", "shiny", "")));
    }

    #[test]
    fn test_matches_category_exactly_and_ands_predicates() {
        let filter = ProductFilter::new(Some("widget".to_string()), Some("tools".to_string()));
        assert!(filter.matches(&product("Widget", "", "tools")));
        assert!(!filter.matches(&product("Widget", "", "Tools")));
        assert!(!filter.matches(&product("Gadget", "", "tools")));
    }

    #[test]
    fn test_matches_treats_percent_literally() {
        let filter = ProductFilter::new(Some("%".to_string()), None);
        assert!(!filter.matches(&product("Widget", "", "")));
        assert!(filter.matches(&product("100% cotton", "", "")));
    }
}
