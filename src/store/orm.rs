use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use sea_orm::sea_query::{Expr, OnConflict, extension::postgres::PgExpr};
use serde_json::{Map, Value};

use super::{CatalogStore, CategoryStore, ProductFilter, ProductOrder, SessionStore, StoreResult};
use crate::{
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{Column as ProductCol, Entity as Products, Model as ProductModel},
        sessions::{ActiveModel as SessionActive, Column as SessionCol, Entity as Sessions},
    },
    models::{Category, CategoryId, Product, ProductId},
    session::SessionId,
};

/// Catalog and category queries over the relational schema.
#[derive(Clone)]
pub struct OrmCatalog {
    conn: DatabaseConnection,
}

impl OrmCatalog {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CatalogStore for OrmCatalog {
    async fn product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let product = Products::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn products(&self, filter: ProductFilter) -> StoreResult<Vec<Product>> {
        let mut condition = Condition::all();
        if let Some(flag) = filter.is_discounted {
            condition = condition.add(ProductCol::IsDiscounted.eq(flag));
        }
        if let Some(flag) = filter.is_latest {
            condition = condition.add(ProductCol::IsLatest.eq(flag));
        }
        if let Some(ids) = filter.category_ids {
            condition = condition.add(ProductCol::CategoryId.is_in(ids));
        }
        if let Some(ids) = filter.product_ids {
            condition = condition.add(ProductCol::Id.is_in(ids));
        }

        let mut finder = Products::find().filter(condition);
        finder = match filter.order {
            ProductOrder::Newest => finder
                .order_by_desc(ProductCol::CreatedAt)
                .order_by_desc(ProductCol::Id),
            ProductOrder::IdDesc => finder.order_by_desc(ProductCol::Id),
        };
        if let Some(limit) = filter.limit {
            finder = finder.limit(limit);
        }

        let products = finder
            .all(&self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Product>> {
        let pattern = format!("%{}%", escape_like(needle));
        let products = Products::find()
            .filter(Expr::col(ProductCol::Name).ilike(pattern))
            .order_by_desc(ProductCol::CreatedAt)
            .order_by_desc(ProductCol::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }
}

#[async_trait]
impl CategoryStore for OrmCatalog {
    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let category = Categories::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(category_from_entity);
        Ok(category)
    }

    async fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let category = Categories::find()
            .filter(CategoryCol::Name.eq(name))
            .one(&self.conn)
            .await?
            .map(category_from_entity);
        Ok(category)
    }

    async fn children_of(&self, id: CategoryId) -> StoreResult<Vec<Category>> {
        let children = Categories::find()
            .filter(CategoryCol::ParentId.eq(id))
            .order_by_asc(CategoryCol::Name)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect();
        Ok(children)
    }

    async fn all(&self) -> StoreResult<Vec<Category>> {
        let categories = Categories::find()
            .order_by_asc(CategoryCol::Name)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect();
        Ok(categories)
    }
}

/// Session values stored as one JSON object per session row.
#[derive(Clone)]
pub struct OrmSessionStore {
    conn: DatabaseConnection,
}

impl OrmSessionStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for OrmSessionStore {
    async fn load(&self, session: SessionId, key: &str) -> StoreResult<Option<Value>> {
        let row = Sessions::find_by_id(session.as_uuid()).one(&self.conn).await?;
        Ok(row.and_then(|row| match row.data {
            Value::Object(mut values) => values.remove(key),
            _ => None,
        }))
    }

    async fn save(&self, session: SessionId, key: &str, value: Value) -> StoreResult<()> {
        let existing = Sessions::find_by_id(session.as_uuid()).one(&self.conn).await?;
        let mut values = match existing.map(|row| row.data) {
            Some(Value::Object(values)) => values,
            _ => Map::new(),
        };
        values.insert(key.to_string(), value);

        let active = SessionActive {
            id: Set(session.as_uuid()),
            data: Set(Value::Object(values)),
            updated_at: Set(Utc::now().into()),
        };
        Sessions::insert(active)
            .on_conflict(
                OnConflict::column(SessionCol::Id)
                    .update_columns([SessionCol::Data, SessionCol::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let result = Sessions::delete_many()
            .filter(SessionCol::UpdatedAt.lt(cutoff))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Escapes `LIKE` wildcards so user input is matched literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        category_id: model.category_id,
        image: model.image,
        description: model.description,
        is_discounted: model.is_discounted,
        is_latest: model.is_latest,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        parent_id: model.parent_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
