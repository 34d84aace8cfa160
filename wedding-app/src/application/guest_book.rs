use super::ports::GuestStore;
use crate::domain::{parse_guest_import, Guest, GuestStats, GuestUpdate, NewGuest};
use crate::infrastructure::security::{InputSanitizer, MAX_FIELD_LENGTH};
use std::sync::Arc;
use uuid::Uuid;
use wedding_errors::AppError;

// Column widths of the `guests` table.
const MAX_EMAIL_LENGTH: usize = 320;
const MAX_PHONE_LENGTH: usize = 64;
const MAX_DIETARY_LENGTH: usize = 500;
const MAX_NOTES_LENGTH: usize = 2000;
const MAX_TABLE_NUMBER: u32 = i32::MAX as u32;

fn clean_text(label: &str, value: &str, max_chars: usize) -> Result<String, AppError> {
    Ok(InputSanitizer::optional_text_within(label, value, max_chars)?.unwrap_or_default())
}

fn check_table(table_number: Option<u32>) -> Result<(), AppError> {
    if table_number.is_some_and(|table| table > MAX_TABLE_NUMBER) {
        return Err(AppError::Validation("Table number is too large".to_string()));
    }
    Ok(())
}

fn clean_new_guest(new_guest: NewGuest) -> Result<NewGuest, AppError> {
    check_table(new_guest.table_number)?;

    Ok(NewGuest {
        name: InputSanitizer::require_text("Guest name", &new_guest.name)?,
        email: clean_text("Email", &new_guest.email, MAX_EMAIL_LENGTH)?,
        phone: clean_text("Phone", &new_guest.phone, MAX_PHONE_LENGTH)?,
        plus_one_name: clean_text("Plus-one name", &new_guest.plus_one_name, MAX_FIELD_LENGTH)?,
        dietary_restrictions: clean_text(
            "Dietary restrictions",
            &new_guest.dietary_restrictions,
            MAX_DIETARY_LENGTH,
        )?,
        notes: clean_text("Notes", &new_guest.notes, MAX_NOTES_LENGTH)?,
        ..new_guest
    })
}

fn clean_update(update: GuestUpdate) -> Result<GuestUpdate, AppError> {
    check_table(update.table_number.flatten())?;
    let text = |label: &str, value: Option<&str>, max_chars: usize| {
        value.map(|v| clean_text(label, v, max_chars)).transpose()
    };

    Ok(GuestUpdate {
        name: update
            .name
            .as_deref()
            .map(|name| InputSanitizer::require_text("Guest name", name))
            .transpose()?,
        email: text("Email", update.email.as_deref(), MAX_EMAIL_LENGTH)?,
        phone: text("Phone", update.phone.as_deref(), MAX_PHONE_LENGTH)?,
        plus_one_name: text("Plus-one name", update.plus_one_name.as_deref(), MAX_FIELD_LENGTH)?,
        dietary_restrictions: text(
            "Dietary restrictions",
            update.dietary_restrictions.as_deref(),
            MAX_DIETARY_LENGTH,
        )?,
        notes: text("Notes", update.notes.as_deref(), MAX_NOTES_LENGTH)?,
        ..update
    })
}

/// Admin invite list.
#[derive(Clone)]
pub struct GuestBook {
    store: Arc<dyn GuestStore>,
}

impl GuestBook {
    pub fn new(store: Arc<dyn GuestStore>) -> Self {
        Self { store }
    }

    pub async fn add(&self, new_guest: NewGuest) -> Result<Guest, AppError> {
        let guest = Guest::new(clean_new_guest(new_guest)?);
        self.store.insert(&guest).await?;
        tracing::info!("Guest added: {} ({})", guest.name, guest.id);
        Ok(guest)
    }

    pub async fn update(&self, id: Uuid, update: GuestUpdate) -> Result<Guest, AppError> {
        self.store.update(id, clean_update(update)?).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete(id).await?;
        tracing::info!("Guest {} removed", id);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Guest>, AppError> {
        self.store.list().await
    }

    pub async fn stats(&self) -> Result<GuestStats, AppError> {
        let guests = self.store.list().await?;
        Ok(GuestStats::from_guests(&guests))
    }

    /// Adds every named line of a bulk paste and returns how many were added.
    /// Every line is checked first; one bad line rejects the whole paste.
    pub async fn import(&self, text: &str) -> Result<usize, AppError> {
        let guests = parse_guest_import(text)
            .into_iter()
            .map(|(line, new_guest)| {
                clean_new_guest(new_guest)
                    .map(Guest::new)
                    .map_err(|err| match err {
                        AppError::Validation(message) => {
                            AppError::Validation(format!("Line {}: {}", line, message))
                        }
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.store.insert_many(&guests).await?;
        tracing::info!("Imported {} guests", guests.len());
        Ok(guests.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RsvpStatus;
    use crate::infrastructure::memory::InMemoryGuestStore;

    fn book() -> GuestBook {
        GuestBook::new(Arc::new(InMemoryGuestStore::new()))
    }

    fn named(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            ..NewGuest::default()
        }
    }

    #[tokio::test]
    async fn test_new_guests_are_pending_and_sorted_by_name() {
        let book = book();
        book.add(named("zoe")).await.unwrap();
        book.add(named("Ana")).await.unwrap();
        book.add(named("ben")).await.unwrap();

        let guests = book.list().await.unwrap();
        let names: Vec<&str> = guests.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "ben", "zoe"]);
        assert!(guests.iter().all(|g| g.rsvp_status == RsvpStatus::Pending));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let book = book();
        assert!(matches!(book.add(named("  ")).await, Err(AppError::Validation(_))));

        let guest = book.add(named("Ana")).await.unwrap();
        let rename = GuestUpdate {
            name: Some(String::new()),
            ..GuestUpdate::default()
        };
        assert!(matches!(
            book.update(guest.id, rename).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_rsvp_updates_feed_stats() {
        let book = book();
        let ana = book.add(named("Ana")).await.unwrap();
        let ben = book.add(named("Ben")).await.unwrap();
        book.add(named("Cleo")).await.unwrap();

        book.update(
            ana.id,
            GuestUpdate {
                rsvp_status: Some(RsvpStatus::Attending),
                plus_one: Some(true),
                ..GuestUpdate::default()
            },
        )
        .await
        .unwrap();
        book.update(
            ben.id,
            GuestUpdate {
                rsvp_status: Some(RsvpStatus::Declined),
                ..GuestUpdate::default()
            },
        )
        .await
        .unwrap();

        let stats = book.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.attending, 1);
        assert_eq!(stats.declined, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_attending, 2);
    }

    #[tokio::test]
    async fn test_unknown_guest_is_not_found() {
        let book = book();
        let id = Uuid::new_v4();
        assert!(matches!(
            book.update(id, GuestUpdate::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(book.remove(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_bulk_import() {
        let book = book();
        let imported = book
            .import("Ana, ana@example.com, , yes\n\nBen, ben@example.com\n")
            .await
            .unwrap();

        assert_eq!(imported, 2);
        let stats = book.stats().await.unwrap();
        assert_eq!(stats.pending, 2);
    }

    #[tokio::test]
    async fn test_failed_import_stores_nothing() {
        let book = book();
        let text = format!(
            "Ana, ana@example.com\nBen, ben@example.com\n{}, z@example.com\nDee",
            "Z".repeat(250)
        );

        let err = book.import(&text).await.unwrap_err();

        assert_eq!(
            err,
            AppError::Validation("Line 3: Guest name must be at most 200 characters".to_string())
        );
        assert!(book.list().await.unwrap().is_empty());

        let fixed = text.replace(&"Z".repeat(250), "Zed");
        assert_eq!(book.import(&fixed).await.unwrap(), 4);
        assert_eq!(book.list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_over_long_contact_fields_are_rejected() {
        let book = book();
        let too_long_email = NewGuest {
            email: format!("{}@example.com", "a".repeat(320)),
            ..named("Ana")
        };
        let too_long_phone = NewGuest {
            phone: "5".repeat(65),
            ..named("Ben")
        };
        let too_long_diet = NewGuest {
            dietary_restrictions: "no nuts ".repeat(80),
            ..named("Cleo")
        };

        for new_guest in [too_long_email, too_long_phone, too_long_diet] {
            assert!(matches!(book.add(new_guest).await, Err(AppError::Validation(_))));
        }
        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_updates_are_cleaned_and_bounded() {
        let book = book();
        let guest = book.add(named("Ana")).await.unwrap();

        let too_long = GuestUpdate {
            plus_one_name: Some("P".repeat(201)),
            ..GuestUpdate::default()
        };
        assert!(matches!(
            book.update(guest.id, too_long).await,
            Err(AppError::Validation(_))
        ));

        let updated = book
            .update(
                guest.id,
                GuestUpdate {
                    phone: Some("  555  0100 ".to_string()),
                    table_number: Some(Some(u32::MAX)),
                    ..GuestUpdate::default()
                },
            )
            .await;
        assert!(matches!(updated, Err(AppError::Validation(_))));

        let updated = book
            .update(
                guest.id,
                GuestUpdate {
                    phone: Some("  555  0100 ".to_string()),
                    ..GuestUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone, "555 0100");
    }
}
