//! Tournament, its format, TournamentState, and FixtureError.

use crate::models::fixture::MatchRecord;
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur while registering entrants or generating fixtures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureError {
    /// Fewer than 2 approved participants.
    InsufficientParticipants { found: usize },
    /// Fixtures already exist for this tournament.
    AlreadyGenerated,
    /// The batch write (or status flip) failed; nothing was persisted.
    PersistenceFailure(String),
    /// No tournament with this id.
    TournamentNotFound(TournamentId),
    /// Participant not registered in this tournament.
    ParticipantNotFound(ParticipantId),
    /// A participant with this name already exists (names are unique, case-insensitive).
    DuplicateParticipantName,
    /// Empty name.
    InvalidName,
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::InsufficientParticipants { found } => {
                write!(f, "Need at least 2 approved participants to generate fixtures (found {})", found)
            }
            FixtureError::AlreadyGenerated => write!(f, "Fixtures have already been generated for this tournament"),
            FixtureError::PersistenceFailure(reason) => write!(f, "Failed to store fixtures: {}", reason),
            FixtureError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            FixtureError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            FixtureError::DuplicateParticipantName => write!(f, "A participant with this name already exists"),
            FixtureError::InvalidName => write!(f, "Name must not be empty"),
            FixtureError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition type: decides which generator builds the fixtures.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    /// Everyone plays everyone (round robin).
    #[default]
    League,
    /// Single elimination bracket.
    Knockout,
}

/// Format descriptor handed to the engine together with the participants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub competition: CompetitionType,
    /// League: home and away round robin. Knockout: two-legged ties.
    #[serde(default)]
    pub double_leg: bool,
}

impl Format {
    pub fn league(double_leg: bool) -> Self {
        Self {
            competition: CompetitionType::League,
            double_leg,
        }
    }

    pub fn knockout(double_leg: bool) -> Self {
        Self {
            competition: CompetitionType::Knockout,
            double_leg,
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Taking registrations; no fixtures yet.
    #[default]
    Upcoming,
    /// Fixtures generated.
    Active,
}

/// Full tournament record: entrants, format, generated fixtures, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: Format,
    pub state: TournamentState,
    /// All registrations, in registration order (the seeding order).
    pub participants: Vec<Participant>,
    /// Generated fixtures; empty until generation commits.
    pub matches: Vec<MatchRecord>,
}

impl Tournament {
    /// Create a new tournament in Upcoming state with no participants.
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            state: TournamentState::Upcoming,
            participants: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Create a tournament with initial participants. Still Upcoming until fixtures are generated.
    pub fn with_participants(name: impl Into<String>, format: Format, participants: Vec<Participant>) -> Self {
        Self {
            participants,
            ..Self::new(name, format)
        }
    }

    /// True once a fixture batch has been committed.
    pub fn has_fixtures(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Approved participant ids in registration order.
    pub fn approved_participants(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|p| p.is_approved())
            .map(|p| p.id)
            .collect()
    }

    /// Register a participant (pending approval). Names must be unique (case-insensitive).
    pub fn register(&mut self, name: impl Into<String>) -> Result<ParticipantId, FixtureError> {
        self.ensure_open()?;
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(FixtureError::InvalidName);
        }
        let is_duplicate = self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(FixtureError::DuplicateParticipantName);
        }
        let participant = Participant::new(name_trimmed);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Approve a registration so it is included in fixture generation.
    pub fn approve(&mut self, participant_id: ParticipantId) -> Result<(), FixtureError> {
        self.ensure_open()?;
        self.get_participant_mut(participant_id)?.approve();
        Ok(())
    }

    /// Reject a registration; it stays listed but never gets fixtures.
    pub fn reject(&mut self, participant_id: ParticipantId) -> Result<(), FixtureError> {
        self.ensure_open()?;
        self.get_participant_mut(participant_id)?.reject();
        Ok(())
    }

    fn get_participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, FixtureError> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FixtureError::ParticipantNotFound(id))
    }

    /// The entrant list is frozen once fixtures exist.
    fn ensure_open(&self) -> Result<(), FixtureError> {
        if self.state != TournamentState::Upcoming || self.has_fixtures() {
            return Err(FixtureError::InvalidState);
        }
        Ok(())
    }
}
