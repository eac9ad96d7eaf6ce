//! Format dispatch: one entry point for both generators.

use crate::logic::knockout::generate_knockout_bracket;
use crate::logic::round_robin::generate_round_robin;
use crate::models::{CompetitionType, Fixture, FixtureError, Format, ParticipantId};
use rand::Rng;

/// Build the fixtures for `format`. `rng` is only consulted by the knockout draw,
/// so a league schedule depends on the participant order alone.
pub fn generate_fixtures<R: Rng + ?Sized>(
    participants: &[ParticipantId],
    format: Format,
    rng: &mut R,
) -> Result<Vec<Fixture>, FixtureError> {
    match format.competition {
        CompetitionType::League => generate_round_robin(participants, format.double_leg),
        CompetitionType::Knockout => generate_knockout_bracket(participants, format.double_leg, rng),
    }
}
