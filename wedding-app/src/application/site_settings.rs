use super::ports::SettingsStore;
use crate::domain::{FunFact, Pet, SiteSettings, SiteSettingsUpdate, TimelineEntry};
use crate::infrastructure::security::{InputSanitizer, MAX_FIELD_LENGTH};
use std::sync::Arc;
use wedding_errors::AppError;

const MAX_LIST_ITEMS: usize = 50;
const MAX_PARAGRAPH_LENGTH: usize = 1000;
const MAX_ICON_LENGTH: usize = 16;
const MAX_IMAGE_URL_LENGTH: usize = 500;

fn text(label: &str, value: &str, max_chars: usize) -> Result<String, AppError> {
    Ok(InputSanitizer::optional_text_within(label, value, max_chars)?.unwrap_or_default())
}

fn bounded<T>(label: &str, items: Vec<T>) -> Result<Vec<T>, AppError> {
    if items.len() > MAX_LIST_ITEMS {
        return Err(AppError::Validation(format!(
            "{} can hold at most {} entries",
            label, MAX_LIST_ITEMS
        )));
    }
    Ok(items)
}

fn clean_timeline(entry: TimelineEntry) -> Result<TimelineEntry, AppError> {
    Ok(TimelineEntry {
        year: text("Timeline year", &entry.year, MAX_FIELD_LENGTH)?,
        title: InputSanitizer::require_text("Timeline title", &entry.title)?,
        description: text("Timeline description", &entry.description, MAX_PARAGRAPH_LENGTH)?,
        icon: text("Timeline icon", &entry.icon, MAX_ICON_LENGTH)?,
    })
}

fn clean_fun_fact(fact: FunFact) -> Result<FunFact, AppError> {
    Ok(FunFact {
        emoji: text("Fun fact emoji", &fact.emoji, MAX_ICON_LENGTH)?,
        title: InputSanitizer::require_text("Fun fact title", &fact.title)?,
        bride: text("Fun fact answer", &fact.bride, MAX_FIELD_LENGTH)?,
        groom: text("Fun fact answer", &fact.groom, MAX_FIELD_LENGTH)?,
    })
}

fn clean_pet(pet: Pet) -> Result<Pet, AppError> {
    Ok(Pet {
        name: InputSanitizer::require_text("Pet name", &pet.name)?,
        kind: text("Pet type", &pet.kind, MAX_FIELD_LENGTH)?,
        personality: text("Pet personality", &pet.personality, MAX_PARAGRAPH_LENGTH)?,
        emoji: text("Pet emoji", &pet.emoji, MAX_ICON_LENGTH)?,
        image: pet
            .image
            .as_deref()
            .map(|image| InputSanitizer::optional_text_within("Pet image", image, MAX_IMAGE_URL_LENGTH))
            .transpose()?
            .flatten(),
    })
}

fn clean_update(update: SiteSettingsUpdate) -> Result<SiteSettingsUpdate, AppError> {
    fn each<T>(
        label: &str,
        items: Option<Vec<T>>,
        clean: impl Fn(T) -> Result<T, AppError>,
    ) -> Result<Option<Vec<T>>, AppError> {
        let Some(items) = items else {
            return Ok(None);
        };
        bounded(label, items)?
            .into_iter()
            .map(clean)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    Ok(SiteSettingsUpdate {
        show_dates: update.show_dates,
        timeline: each("Timeline", update.timeline, clean_timeline)?,
        fun_facts: each("Fun facts", update.fun_facts, clean_fun_fact)?,
        pets: each("Pets", update.pets, clean_pet)?,
        quotes: each("Quotes", update.quotes, |quote: String| {
            InputSanitizer::require_text_within("Quote", &quote, MAX_PARAGRAPH_LENGTH)
        })?,
    })
}

/// Reads and edits the site content document.
#[derive(Clone)]
pub struct SiteSettingsEditor {
    store: Arc<dyn SettingsStore>,
}

impl SiteSettingsEditor {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub async fn current(&self) -> Result<SiteSettings, AppError> {
        self.store.load().await
    }

    /// Validates `update` as a whole, then merges it over the stored
    /// document. Fields left out keep their current value.
    pub async fn update(&self, update: SiteSettingsUpdate) -> Result<SiteSettings, AppError> {
        let settings = self.store.update(clean_update(update)?).await?;
        tracing::info!("Site settings updated");
        Ok(settings)
    }
}
