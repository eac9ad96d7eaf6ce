//! Data structures for fixture generation: participants, fixtures, tournament state.

mod fixture;
mod participant;
mod tournament;

pub use fixture::{Fixture, FixtureDetails, FixtureId, FixtureStatus, MatchRecord};
pub use participant::{Participant, ParticipantId, RegistrationStatus};
pub use tournament::{
    CompetitionType, FixtureError, Format, Tournament, TournamentId, TournamentState,
};
