use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{CatalogRepository, DomainResult, Product};
use crate::infrastructure::database::entities::{product, product_category};

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn product_model_to_domain(
    model: product::Model,
    category: Option<product_category::Model>,
) -> Product {
    Product {
        id: model.id,
        category_id: model.category_id,
        category_name: category.map(|c| c.name).unwrap_or_default(),
        name: model.name,
        description: model.description,
        image: model.image,
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn products_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = product::Entity::find()
            .find_also_related(product_category::Entity)
            .filter(product::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(product::Column::Name)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(p, c)| product_model_to_domain(p, c))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::*;

    #[tokio::test]
    async fn products_come_back_by_name_with_category() {
        let db = memory_db().await;
        let cat = insert_category(&db, "Cardiology").await;
        let widget = insert_product(&db, cat, "Widget").await;
        let gadget = insert_product(&db, cat, "Gadget").await;
        let repo = SeaOrmCatalogRepository::new(db);

        let products = repo.products_by_ids(&[widget, gadget, 999]).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Gadget");
        assert_eq!(products[1].name, "Widget");
        assert_eq!(products[0].category_name, "Cardiology");

        assert!(repo.products_by_ids(&[]).await.unwrap().is_empty());
    }
}
