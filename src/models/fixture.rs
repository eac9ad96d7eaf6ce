//! Fixture (a scheduled match), its status, and the persisted MatchRecord.

use crate::models::participant::ParticipantId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Lifecycle of a fixture. Only `Scheduled` is ever produced here; later
/// states belong to match play.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
}

/// Auxiliary payload carried next to the first-class fixture columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureDetails {
    /// 1 or 2 for two-legged knockout ties; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg: Option<u8>,
}

/// A single scheduled match. `None` on either side is an unassigned slot:
/// a bye in knockout round 1, or a TBD slot in later knockout rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub home: Option<ParticipantId>,
    pub away: Option<ParticipantId>,
    /// 1-based.
    pub round: u32,
    pub details: FixtureDetails,
    pub status: FixtureStatus,
}

impl Fixture {
    pub fn new(home: Option<ParticipantId>, away: Option<ParticipantId>, round: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            home,
            away,
            round,
            details: FixtureDetails::default(),
            status: FixtureStatus::Scheduled,
        }
    }

    /// Same as `new`, tagged with a knockout leg.
    pub fn with_leg(
        home: Option<ParticipantId>,
        away: Option<ParticipantId>,
        round: u32,
        leg: u8,
    ) -> Self {
        Self {
            details: FixtureDetails { leg: Some(leg) },
            ..Self::new(home, away, round)
        }
    }

    /// A fresh fixture with home and away exchanged, shifted to `round`.
    /// Details are carried over.
    pub fn reversed(&self, round: u32) -> Self {
        Self {
            details: self.details,
            ..Self::new(self.away, self.home, round)
        }
    }

    pub fn leg(&self) -> Option<u8> {
        self.details.leg
    }

    /// True when at least one side is still unassigned.
    pub fn has_open_slot(&self) -> bool {
        self.home.is_none() || self.away.is_none()
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.home == Some(participant) || self.away == Some(participant)
    }
}

/// A fixture as it is persisted for a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub fixture: Fixture,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Stamp a generated fixture with its tournament and creation time.
    pub fn stamp(tournament_id: TournamentId, fixture: Fixture, created_at: DateTime<Utc>) -> Self {
        Self {
            tournament_id,
            fixture,
            created_at,
        }
    }

    pub fn round(&self) -> u32 {
        self.fixture.round
    }
}
