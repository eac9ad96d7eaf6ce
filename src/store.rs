//! Tournament storage: the persistence seam used by fixture generation, and an in-memory store.

use crate::models::{
    FixtureError, MatchRecord, ParticipantId, Tournament, TournamentId, TournamentState,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// What fixture generation needs from persistence.
pub trait TournamentStore {
    /// Snapshot of a tournament.
    fn load(&self, id: TournamentId) -> Result<Tournament, FixtureError>;

    /// Insert the whole batch and flip the tournament to `Active` as one unit.
    ///
    /// `participants` is the approved list the batch was built from. Must fail with
    /// `AlreadyGenerated` if fixtures exist at commit time, with `InvalidState` if the
    /// approved list has changed since, and must leave the tournament untouched on any failure.
    fn commit_fixtures(
        &self,
        id: TournamentId,
        participants: &[ParticipantId],
        records: Vec<MatchRecord>,
    ) -> Result<(), FixtureError>;
}

/// Tournaments kept in memory behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a tournament.
    pub fn insert(&self, tournament: Tournament) -> Result<(), FixtureError> {
        let mut g = self.tournaments.write().map_err(|_| lock_error())?;
        g.insert(tournament.id, tournament);
        Ok(())
    }

    /// Run `f` against a tournament under the write lock. Changes made by `f` are kept
    /// even when it returns an error, so `f` should validate before mutating.
    pub fn update<T>(
        &self,
        id: TournamentId,
        f: impl FnOnce(&mut Tournament) -> Result<T, FixtureError>,
    ) -> Result<T, FixtureError> {
        let mut g = self.tournaments.write().map_err(|_| lock_error())?;
        let tournament = g.get_mut(&id).ok_or(FixtureError::TournamentNotFound(id))?;
        f(tournament)
    }
}

impl TournamentStore for InMemoryStore {
    fn load(&self, id: TournamentId) -> Result<Tournament, FixtureError> {
        let g = self.tournaments.read().map_err(|_| lock_error())?;
        g.get(&id).cloned().ok_or(FixtureError::TournamentNotFound(id))
    }

    fn commit_fixtures(
        &self,
        id: TournamentId,
        participants: &[ParticipantId],
        records: Vec<MatchRecord>,
    ) -> Result<(), FixtureError> {
        let mut g = self.tournaments.write().map_err(|_| lock_error())?;
        let tournament = g.get_mut(&id).ok_or(FixtureError::TournamentNotFound(id))?;
        if tournament.has_fixtures() {
            return Err(FixtureError::AlreadyGenerated);
        }
        // Approvals or rejections since the batch was built would be left out of it.
        if tournament.approved_participants() != participants {
            return Err(FixtureError::InvalidState);
        }
        if records.iter().any(|r| r.tournament_id != id) {
            return Err(FixtureError::PersistenceFailure(
                "fixture batch belongs to another tournament".to_string(),
            ));
        }
        tournament.matches = records;
        tournament.state = TournamentState::Active;
        Ok(())
    }
}

fn lock_error() -> FixtureError {
    FixtureError::PersistenceFailure("lock error".to_string())
}
