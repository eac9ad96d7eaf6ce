//! Participant and registration status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in fixtures and lookups).
pub type ParticipantId = Uuid;

/// Where a participant stands in the registration flow.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A registered entrant of a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub status: RegistrationStatus,
}

impl Participant {
    /// Create a new pending participant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: RegistrationStatus::Pending,
        }
    }

    /// Only approved participants take part in fixture generation.
    pub fn is_approved(&self) -> bool {
        self.status == RegistrationStatus::Approved
    }

    pub fn approve(&mut self) {
        self.status = RegistrationStatus::Approved;
    }

    pub fn reject(&mut self) {
        self.status = RegistrationStatus::Rejected;
    }
}
