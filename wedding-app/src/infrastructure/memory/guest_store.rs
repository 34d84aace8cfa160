use crate::application::ports::{guest_not_found, GuestStore};
use crate::domain::{Guest, GuestUpdate};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

#[derive(Clone, Default)]
pub struct InMemoryGuestStore {
    guests: Arc<DashMap<Uuid, Guest>>,
}

impl InMemoryGuestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestStore for InMemoryGuestStore {
    async fn insert(&self, guest: &Guest) -> Result<(), AppError> {
        self.guests.insert(guest.id, guest.clone());
        Ok(())
    }

    async fn insert_many(&self, guests: &[Guest]) -> Result<(), AppError> {
        for guest in guests {
            self.guests.insert(guest.id, guest.clone());
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Guest>, AppError> {
        let mut guests: Vec<Guest> = self.guests.iter().map(|e| e.value().clone()).collect();
        guests.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(guests)
    }

    async fn update(&self, id: Uuid, update: GuestUpdate) -> Result<Guest, AppError> {
        let mut guest = self.guests.get_mut(&id).ok_or_else(|| guest_not_found(id))?;
        guest.apply(update);
        Ok(guest.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.guests
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| guest_not_found(id))
    }
}
