//! Fixture assembly: preconditions, generation, stamping, and the atomic commit.

use crate::logic::schedule::generate_fixtures;
use crate::models::{FixtureError, MatchRecord, TournamentId};
use crate::store::TournamentStore;
use chrono::Utc;
use rand::Rng;

/// Generate and persist the fixtures of a tournament.
///
/// 1. Reject if fixtures already exist (`AlreadyGenerated`).
/// 2. Require at least 2 approved participants, in registration order.
/// 3. Build fixtures for the tournament's format and stamp them.
/// 4. Commit the batch together with the switch to `Active`. The commit fails with
///    `InvalidState` if the approved participants changed in the meantime.
///
/// On any error the tournament is left as it was, so the call can be retried.
pub fn generate_tournament_fixtures<S, R>(
    store: &S,
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<Vec<MatchRecord>, FixtureError>
where
    S: TournamentStore + ?Sized,
    R: Rng + ?Sized,
{
    let tournament = store.load(tournament_id)?;
    if tournament.has_fixtures() {
        log::warn!("Tournament {} already has fixtures; generation rejected", tournament_id);
        return Err(FixtureError::AlreadyGenerated);
    }

    let participants = tournament.approved_participants();
    if participants.len() < 2 {
        log::warn!(
            "Tournament {} has {} approved participant(s); need at least 2",
            tournament_id,
            participants.len()
        );
        return Err(FixtureError::InsufficientParticipants {
            found: participants.len(),
        });
    }

    let created_at = Utc::now();
    let records: Vec<MatchRecord> = generate_fixtures(&participants, tournament.format, rng)?
        .into_iter()
        .map(|fixture| MatchRecord::stamp(tournament_id, fixture, created_at))
        .collect();

    store
        .commit_fixtures(tournament_id, &participants, records.clone())
        .map_err(|e| match e {
            FixtureError::AlreadyGenerated
            | FixtureError::InvalidState
            | FixtureError::TournamentNotFound(_)
            | FixtureError::PersistenceFailure(_) => e,
            other => FixtureError::PersistenceFailure(other.to_string()),
        })
        .inspect_err(|e| log::warn!("Fixture commit for tournament {} failed: {}", tournament_id, e))?;

    log::info!(
        "Generated {} fixture(s) for tournament {} ({:?}, double_leg={})",
        records.len(),
        tournament_id,
        tournament.format.competition,
        tournament.format.double_leg
    );
    Ok(records)
}

/// Persisted fixtures ordered by round, then creation order.
pub fn list_fixtures<S>(store: &S, tournament_id: TournamentId) -> Result<Vec<MatchRecord>, FixtureError>
where
    S: TournamentStore + ?Sized,
{
    let mut matches = store.load(tournament_id)?.matches;
    matches.sort_by_key(MatchRecord::round);
    Ok(matches)
}
