use async_trait::async_trait;
use database::postgres::ScopedSession;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use tracing::instrument;

use crate::{
    entity,
    error::ItemResult,
    models::{CreateItem, Item, UpdateItem},
    repository::ItemRepository,
};

/// `ItemRepository` over the `items` table.
///
/// Each call runs in its own [`ScopedSession`]; nothing is cached between
/// calls. Update and delete lock the row (`SELECT ... FOR UPDATE`) before
/// writing it, and a row that still disappears under them is reported as
/// absent rather than as a store failure.
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let session = ScopedSession::begin(&self.db).await?;

        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(session.conn())
            .await?;

        session.commit().await?;
        Ok(models.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let session = ScopedSession::begin(&self.db).await?;

        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(session.conn()).await?;

        session.commit().await?;
        tracing::info!(item_id = model.id, "Created item");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let session = ScopedSession::begin(&self.db).await?;

        let model = entity::Entity::find_by_id(id).one(session.conn()).await?;

        session.commit().await?;
        Ok(model.map(Item::from))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i32, input: UpdateItem) -> ItemResult<Option<Item>> {
        let session = ScopedSession::begin(&self.db).await?;

        if entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(session.conn())
            .await?
            .is_none()
        {
            session.commit().await?;
            return Ok(None);
        }

        let model = match entity::ActiveModel::for_update(id, input)
            .update(session.conn())
            .await
        {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => {
                tracing::info!(item_id = id, "Item removed before update");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        session.commit().await?;
        tracing::info!(item_id = id, "Updated item");
        Ok(Some(model.into()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> ItemResult<Option<Item>> {
        let session = ScopedSession::begin(&self.db).await?;

        let Some(model) = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(session.conn())
            .await?
        else {
            session.commit().await?;
            return Ok(None);
        };

        let result = entity::Entity::delete_by_id(id).exec(session.conn()).await?;
        if result.rows_affected == 0 {
            tracing::info!(item_id = id, "Item removed before delete");
            return Ok(None);
        }

        session.commit().await?;
        tracing::info!(item_id = id, "Deleted item");
        Ok(Some(model.into()))
    }
}
