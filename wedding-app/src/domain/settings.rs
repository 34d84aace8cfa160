use serde::{Deserialize, Serialize};

/// Editable site content. Stored documents may be partial; missing fields
/// fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub show_dates: bool,
    pub timeline: Vec<TimelineEntry>,
    pub fun_facts: Vec<FunFact>,
    pub pets: Vec<Pet>,
    pub quotes: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            show_dates: false,
            timeline: Vec::new(),
            fun_facts: Vec::new(),
            pets: Vec::new(),
            quotes: [
                "In all the world, there is no heart for me like yours.",
                "Whatever our souls are made of, his and mine are the same.",
                "I knew I loved you before I met you.",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl SiteSettings {
    /// Top-level merge: every field present in `update` replaces the
    /// current value wholesale, lists included.
    pub fn merge(mut self, update: SiteSettingsUpdate) -> Self {
        if let Some(show_dates) = update.show_dates {
            self.show_dates = show_dates;
        }
        if let Some(timeline) = update.timeline {
            self.timeline = timeline;
        }
        if let Some(fun_facts) = update.fun_facts {
            self.fun_facts = fun_facts;
        }
        if let Some(pets) = update.pets {
            self.pets = pets;
        }
        if let Some(quotes) = update.quotes {
            self.quotes = quotes;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// One "this or that" row comparing the couple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunFact {
    pub emoji: String,
    pub title: String,
    pub bride: String,
    pub groom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub personality: String,
    pub emoji: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettingsUpdate {
    pub show_dates: Option<bool>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub fun_facts: Option<Vec<FunFact>>,
    pub pets: Option<Vec<Pet>>,
    pub quotes: Option<Vec<String>>,
}
