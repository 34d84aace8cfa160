use super::entities::{guest, Guest as GuestEntity};
use super::persistence;
use crate::application::ports::{guest_not_found, GuestStore};
use crate::domain::{Guest, GuestUpdate, RsvpStatus};
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

#[derive(Clone)]
pub struct GuestRepository {
    db: Arc<DatabaseConnection>,
}

impl GuestRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: guest::Model) -> Result<Guest, AppError> {
    let rsvp_status = RsvpStatus::parse(&model.rsvp_status).ok_or_else(|| {
        AppError::Persistence(format!("Unknown RSVP status '{}' in storage", model.rsvp_status))
    })?;

    Ok(Guest {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        rsvp_status,
        plus_one: model.plus_one,
        plus_one_name: model.plus_one_name,
        dietary_restrictions: model.dietary_restrictions,
        table_number: model.table_number.and_then(|t| u32::try_from(t).ok()),
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn to_active(guest_data: &Guest) -> Result<guest::ActiveModel, AppError> {
    let table_number = guest_data
        .table_number
        .map(i32::try_from)
        .transpose()
        .map_err(|_| AppError::Validation("Table number is too large".to_string()))?;

    Ok(guest::ActiveModel {
        id: Set(guest_data.id),
        name: Set(guest_data.name.clone()),
        email: Set(guest_data.email.clone()),
        phone: Set(guest_data.phone.clone()),
        rsvp_status: Set(guest_data.rsvp_status.as_str().to_string()),
        plus_one: Set(guest_data.plus_one),
        plus_one_name: Set(guest_data.plus_one_name.clone()),
        dietary_restrictions: Set(guest_data.dietary_restrictions.clone()),
        table_number: Set(table_number),
        notes: Set(guest_data.notes.clone()),
        created_at: Set(guest_data.created_at),
        updated_at: Set(guest_data.updated_at),
    })
}

#[async_trait]
impl GuestStore for GuestRepository {
    async fn insert(&self, guest_data: &Guest) -> Result<(), AppError> {
        GuestEntity::insert(to_active(guest_data)?)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn insert_many(&self, guests: &[Guest]) -> Result<(), AppError> {
        if guests.is_empty() {
            return Ok(());
        }
        let rows = guests.iter().map(to_active).collect::<Result<Vec<_>, _>>()?;

        // One multi-row INSERT, so a batch lands whole or not at all.
        GuestEntity::insert_many(rows)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Guest>, AppError> {
        let mut guests = GuestEntity::find()
            .order_by_asc(guest::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(persistence)?
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        guests.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(guests)
    }

    async fn update(&self, id: Uuid, update: GuestUpdate) -> Result<Guest, AppError> {
        let txn = self.db.begin().await.map_err(persistence)?;

        let model = GuestEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(persistence)?
            .ok_or_else(|| guest_not_found(id))?;

        let mut guest_data = to_domain(model)?;
        guest_data.apply(update);

        let mut active = to_active(&guest_data)?;
        active.id = Unchanged(id);
        active.created_at = NotSet;
        active.update(&txn).await.map_err(persistence)?;
        txn.commit().await.map_err(persistence)?;

        Ok(guest_data)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = GuestEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(persistence)?;

        if result.rows_affected == 0 {
            return Err(guest_not_found(id));
        }
        Ok(())
    }
}
