//! Tournament fixture generator: library with models, generators, and storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    bracket_size, generate_fixtures, generate_knockout_bracket, generate_round_robin,
    generate_tournament_fixtures, knockout_rounds, list_fixtures, round_robin_rounds,
};
pub use models::{
    CompetitionType, Fixture, FixtureDetails, FixtureError, FixtureId, FixtureStatus, Format,
    MatchRecord, Participant, ParticipantId, RegistrationStatus, Tournament, TournamentId,
    TournamentState,
};
pub use store::{InMemoryStore, TournamentStore};
