//! Product catalog: categories, products and their lookup.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// A product together with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Products whose id is in `ids`, ordered by name. Unknown ids are skipped.
    async fn products_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Product>>;
}
