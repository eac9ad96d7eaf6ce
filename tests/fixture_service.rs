//! Integration tests for fixture assembly: preconditions, atomic commit, and listing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixtures::{
    generate_tournament_fixtures, list_fixtures, FixtureError, Format, InMemoryStore, MatchRecord,
    ParticipantId, Tournament, TournamentId, TournamentState, TournamentStore,
};
use uuid::Uuid;

/// Store that accepts reads but fails every commit.
struct FailingStore(InMemoryStore);

impl TournamentStore for FailingStore {
    fn load(&self, id: TournamentId) -> Result<Tournament, FixtureError> {
        self.0.load(id)
    }

    fn commit_fixtures(
        &self,
        _id: TournamentId,
        _participants: &[ParticipantId],
        _records: Vec<MatchRecord>,
    ) -> Result<(), FixtureError> {
        Err(FixtureError::PersistenceFailure("disk full".to_string()))
    }
}

/// Store where `change` runs against the stored tournament right after each load,
/// as another request would between generation and commit.
struct ChangingStore<F: Fn(&mut Tournament)> {
    inner: InMemoryStore,
    change: F,
}

impl<F: Fn(&mut Tournament)> TournamentStore for ChangingStore<F> {
    fn load(&self, id: TournamentId) -> Result<Tournament, FixtureError> {
        let snapshot = self.inner.load(id)?;
        self.inner.update(id, |t| {
            (self.change)(t);
            Ok(())
        })?;
        Ok(snapshot)
    }

    fn commit_fixtures(
        &self,
        id: TournamentId,
        participants: &[ParticipantId],
        records: Vec<MatchRecord>,
    ) -> Result<(), FixtureError> {
        self.inner.commit_fixtures(id, participants, records)
    }
}

fn tournament_with_approved(n: usize, format: Format) -> Tournament {
    let mut t = Tournament::new("Spring Cup", format);
    for i in 0..n {
        let id = t.register(format!("P{i}")).unwrap();
        t.approve(id).unwrap();
    }
    t
}

fn store_with(t: Tournament) -> (InMemoryStore, TournamentId) {
    let store = InMemoryStore::new();
    let id = t.id;
    store.insert(t).unwrap();
    (store, id)
}

#[test]
fn generate_commits_fixtures_and_activates() {
    let (store, id) = store_with(tournament_with_approved(4, Format::league(false)));
    let records = generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.tournament_id == id));

    let t = store.load(id).unwrap();
    assert_eq!(t.state, TournamentState::Active);
    assert_eq!(t.matches, records);
}

#[test]
fn second_generation_is_rejected() {
    let (store, id) = store_with(tournament_with_approved(6, Format::knockout(false)));
    let mut rng = StdRng::seed_from_u64(2);
    generate_tournament_fixtures(&store, id, &mut rng).unwrap();

    assert!(matches!(
        generate_tournament_fixtures(&store, id, &mut rng),
        Err(FixtureError::AlreadyGenerated)
    ));
    assert_eq!(store.load(id).unwrap().matches.len(), 7);
}

#[test]
fn commit_rechecks_existing_fixtures() {
    let (store, id) = store_with(tournament_with_approved(2, Format::league(false)));
    let mut rng = StdRng::seed_from_u64(3);
    let records = generate_tournament_fixtures(&store, id, &mut rng).unwrap();
    let approved = store.load(id).unwrap().approved_participants();

    // A racing caller that loaded before the first commit still loses at commit time.
    assert!(matches!(
        store.commit_fixtures(id, &approved, records),
        Err(FixtureError::AlreadyGenerated)
    ));
    assert_eq!(store.load(id).unwrap().matches.len(), 1);
}

#[test]
fn approval_between_load_and_commit_is_rejected() {
    let mut t = tournament_with_approved(2, Format::league(false));
    let late = t.register("Late").unwrap();
    let (inner, id) = store_with(t);
    let store = ChangingStore {
        inner,
        change: move |t: &mut Tournament| {
            let _ = t.approve(late);
        },
    };

    assert!(matches!(
        generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(10)),
        Err(FixtureError::InvalidState)
    ));
    let t = store.inner.load(id).unwrap();
    assert_eq!(t.state, TournamentState::Upcoming);
    assert!(t.matches.is_empty());
    assert_eq!(t.approved_participants().len(), 3);

    // Retrying sees the approval and schedules everyone.
    let records = generate_tournament_fixtures(&store.inner, id, &mut StdRng::seed_from_u64(10)).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.fixture.involves(late)));
}

#[test]
fn rejection_between_load_and_commit_is_rejected() {
    let t = tournament_with_approved(3, Format::knockout(false));
    let dropped = t.participants[2].id;
    let (inner, id) = store_with(t);
    let store = ChangingStore {
        inner,
        change: move |t: &mut Tournament| {
            let _ = t.reject(dropped);
        },
    };

    assert!(matches!(
        generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(11)),
        Err(FixtureError::InvalidState)
    ));
    let t = store.inner.load(id).unwrap();
    assert_eq!(t.state, TournamentState::Upcoming);
    assert!(t.matches.is_empty());
}

#[test]
fn only_approved_participants_count() {
    let mut t = Tournament::new("Open", Format::league(false));
    let a = t.register("Alice").unwrap();
    let b = t.register("Bob").unwrap();
    let c = t.register("Carol").unwrap();
    t.approve(a).unwrap();
    t.reject(b).unwrap();
    let (store, id) = store_with(t);

    assert!(matches!(
        generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(4)),
        Err(FixtureError::InsufficientParticipants { found: 1 })
    ));
    let untouched = store.load(id).unwrap();
    assert_eq!(untouched.state, TournamentState::Upcoming);
    assert!(untouched.matches.is_empty());

    store.update(id, |t| t.approve(c)).unwrap();
    let records = generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].fixture.involves(a));
    assert!(records[0].fixture.involves(c));
    assert!(!records[0].fixture.involves(b));
}

#[test]
fn persistence_failure_leaves_tournament_unchanged() {
    let (inner, id) = store_with(tournament_with_approved(4, Format::league(true)));
    let store = FailingStore(inner);

    assert!(matches!(
        generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(5)),
        Err(FixtureError::PersistenceFailure(_))
    ));
    let t = store.load(id).unwrap();
    assert_eq!(t.state, TournamentState::Upcoming);
    assert!(t.matches.is_empty());
}

#[test]
fn unknown_tournament_is_not_found() {
    let store = InMemoryStore::new();
    let missing = Uuid::new_v4();
    assert!(matches!(
        generate_tournament_fixtures(&store, missing, &mut StdRng::seed_from_u64(6)),
        Err(FixtureError::TournamentNotFound(id)) if id == missing
    ));
    assert!(matches!(list_fixtures(&store, missing), Err(FixtureError::TournamentNotFound(_))));
}

#[test]
fn listed_fixtures_are_ordered_by_round() {
    let (store, id) = store_with(tournament_with_approved(5, Format::knockout(true)));
    let generated = generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(7)).unwrap();
    let listed = list_fixtures(&store, id).unwrap();
    assert_eq!(listed.len(), 14);
    assert!(listed.windows(2).all(|w| w[0].round() <= w[1].round()));
    // Within a round, creation order is kept.
    assert_eq!(listed, generated);
}

#[test]
fn registration_is_frozen_after_generation() {
    let (store, id) = store_with(tournament_with_approved(3, Format::league(false)));
    generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(8)).unwrap();
    assert!(matches!(
        store.update(id, |t| t.register("Latecomer")),
        Err(FixtureError::InvalidState)
    ));
}

#[test]
fn duplicate_and_empty_names_are_rejected() {
    let mut t = Tournament::new("Names", Format::default());
    t.register("Dana").unwrap();
    assert_eq!(t.register("  dana "), Err(FixtureError::DuplicateParticipantName));
    assert_eq!(t.register("   "), Err(FixtureError::InvalidName));
    assert_eq!(t.participants.len(), 1);
}

#[test]
fn records_serialize_with_flat_fixture_fields() {
    let (store, id) = store_with(tournament_with_approved(3, Format::knockout(true)));
    let records = generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(9)).unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["status"], "scheduled");
    assert_eq!(json["round"], 1);
    assert_eq!(json["details"]["leg"], 1);
    assert_eq!(json["tournament_id"], serde_json::json!(id));

    let (store, id) = store_with(tournament_with_approved(3, Format::league(false)));
    let records = generate_tournament_fixtures(&store, id, &mut StdRng::seed_from_u64(9)).unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert!(json["details"].get("leg").is_none());
}
