use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Attending,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Attending => "attending",
            Self::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "attending" => Some(Self::Attending),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rsvp_status: RsvpStatus,
    pub plus_one: bool,
    pub plus_one_name: String,
    pub dietary_restrictions: String,
    pub table_number: Option<u32>,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Guest {
    pub fn new(new_guest: NewGuest) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            name: new_guest.name,
            email: new_guest.email,
            phone: new_guest.phone,
            rsvp_status: new_guest.rsvp_status,
            plus_one: new_guest.plus_one,
            plus_one_name: new_guest.plus_one_name,
            dietary_restrictions: new_guest.dietary_restrictions,
            table_number: new_guest.table_number,
            notes: new_guest.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the present fields of `update` and bumps `updated_at`.
    pub fn apply(&mut self, update: GuestUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(status) = update.rsvp_status {
            self.rsvp_status = status;
        }
        if let Some(plus_one) = update.plus_one {
            self.plus_one = plus_one;
        }
        if let Some(plus_one_name) = update.plus_one_name {
            self.plus_one_name = plus_one_name;
        }
        if let Some(dietary) = update.dietary_restrictions {
            self.dietary_restrictions = dietary;
        }
        if let Some(table) = update.table_number {
            self.table_number = table;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.updated_at = chrono::Utc::now();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rsvp_status: RsvpStatus,
    pub plus_one: bool,
    pub plus_one_name: String,
    pub dietary_restrictions: String,
    pub table_number: Option<u32>,
    pub notes: String,
}

/// Partial update. `table_number: Some(None)` clears the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub plus_one: Option<bool>,
    pub plus_one_name: Option<String>,
    pub dietary_restrictions: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub table_number: Option<Option<u32>>,
    pub notes: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestStats {
    pub total: usize,
    pub attending: usize,
    pub declined: usize,
    pub pending: usize,
    pub plus_ones: usize,
    pub total_attending: usize,
}

impl GuestStats {
    pub fn from_guests(guests: &[Guest]) -> Self {
        let count = |status: RsvpStatus| guests.iter().filter(|g| g.rsvp_status == status).count();
        let attending = count(RsvpStatus::Attending);
        let plus_ones = guests
            .iter()
            .filter(|g| g.plus_one && g.rsvp_status == RsvpStatus::Attending)
            .count();

        Self {
            total: guests.len(),
            attending,
            declined: count(RsvpStatus::Declined),
            pending: count(RsvpStatus::Pending),
            plus_ones,
            total_attending: attending + plus_ones,
        }
    }
}

/// Parses the bulk import format: `Name, Email, Phone, PlusOne` per line.
/// Lines without a name are skipped. Each guest comes with its 1-based line.
pub fn parse_guest_import(text: &str) -> Vec<(usize, NewGuest)> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let mut parts = line.split(',').map(str::trim);
            let name = parts.next().filter(|n| !n.is_empty())?;
            let email = parts.next().unwrap_or_default();
            let phone = parts.next().unwrap_or_default();
            let plus_one = parts
                .next()
                .map(|p| p.eq_ignore_ascii_case("yes") || p.eq_ignore_ascii_case("true"))
                .unwrap_or(false);

            Some((
                index + 1,
                NewGuest {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    plus_one,
                    ..NewGuest::default()
                },
            ))
        })
        .collect()
}
