use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::cafes;
use crate::models::cafe::{Cafe, NewCafe};

impl From<cafes::Model> for Cafe {
    fn from(model: cafes::Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            name: model.name,
            map_url: model.map_url,
            img_url: model.img_url,
            location: model.location,
            seats: model.seats,
            has_toilet: model.has_toilet,
            has_wifi: model.has_wifi,
            has_sockets: model.has_sockets,
            can_take_calls: model.can_take_calls,
            coffee_price: model.coffee_price,
            created_at: model.created_at,
        }
    }
}

pub struct CafeRepository {
    conn: DatabaseConnection,
}

impl CafeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, cafe: &NewCafe, author_id: Option<i32>) -> Result<Cafe> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = cafes::ActiveModel {
            author_id: Set(author_id),
            name: Set(cafe.name.clone()),
            map_url: Set(cafe.map_url.clone()),
            img_url: Set(cafe.img_url.clone()),
            location: Set(cafe.location.clone()),
            seats: Set(cafe.seats.clone()),
            has_toilet: Set(cafe.has_toilet),
            has_wifi: Set(cafe.has_wifi),
            has_sockets: Set(cafe.has_sockets),
            can_take_calls: Set(cafe.can_take_calls),
            coffee_price: Set(cafe.coffee_price.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert cafe")?;

        Ok(Cafe::from(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Cafe>> {
        let cafe = cafes::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query cafe by ID")?;

        Ok(cafe.map(Cafe::from))
    }

    pub async fn list_all(&self) -> Result<Vec<Cafe>> {
        let rows = cafes::Entity::find()
            .order_by_asc(cafes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list cafes")?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Cafe>> {
        let cafe = cafes::Entity::find()
            .filter(cafes::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query cafe by name")?;

        Ok(cafe.map(Cafe::from))
    }

    /// Exact-match filter on the location column, not a substring search.
    pub async fn find_by_location(&self, location: &str) -> Result<Vec<Cafe>> {
        let rows = cafes::Entity::find()
            .filter(cafes::Column::Location.eq(location))
            .order_by_asc(cafes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to query cafes by location")?;

        Ok(rows.into_iter().map(Cafe::from).collect())
    }

    /// Overwrite the coffee price. Returns the updated record, or None
    /// when the id does not resolve.
    pub async fn update_price(&self, id: i32, new_price: &str) -> Result<Option<Cafe>> {
        let cafe = cafes::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query cafe for price update")?;

        let Some(cafe) = cafe else {
            return Ok(None);
        };

        let mut active: cafes::ActiveModel = cafe.into();
        active.coffee_price = Set(Some(new_price.to_string()));
        let updated = active.update(&self.conn).await?;

        Ok(Some(Cafe::from(updated)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = cafes::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete cafe")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = cafes::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count cafes")?;

        Ok(count)
    }
}
