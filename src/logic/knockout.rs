//! Knockout format: single-elimination bracket skeleton with byes.

use crate::models::{Fixture, FixtureError, ParticipantId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate every round of a single-elimination bracket.
///
/// 1. Shuffle the participants with `rng` (random seeding).
/// 2. Pad to the next power of two with byes. Byes sit at the front of round 1, each
///    as the away side against a real participant, so no round-1 fixture is bye vs bye.
/// 3. Round 1 pairs consecutive slots. Later rounds are TBD (both sides `None`),
///    halving the count each round.
/// 4. Two-legged ties: each fixture becomes leg 1 plus a swapped leg 2 in the same round.
///
/// A participant facing a bye is not advanced here; that is up to result processing.
pub fn generate_knockout_bracket<R: Rng + ?Sized>(
    participants: &[ParticipantId],
    double_leg: bool,
    rng: &mut R,
) -> Result<Vec<Fixture>, FixtureError> {
    if participants.len() < 2 {
        return Err(FixtureError::InsufficientParticipants {
            found: participants.len(),
        });
    }

    let mut seeded = participants.to_vec();
    seeded.shuffle(rng);

    let size = bracket_size(seeded.len());
    let slots = pad_with_byes(&seeded, size);
    let total_rounds = knockout_rounds(seeded.len());

    let mut ties: Vec<(Option<ParticipantId>, Option<ParticipantId>, u32)> = slots
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1], 1))
        .collect();
    let mut count = size / 2;
    for round in 2..=total_rounds {
        count /= 2;
        ties.extend((0..count).map(|_| (None, None, round as u32)));
    }

    let fixtures: Vec<Fixture> = if double_leg {
        ties.into_iter()
            .flat_map(|(home, away, round)| {
                [
                    Fixture::with_leg(home, away, round, 1),
                    Fixture::with_leg(away, home, round, 2),
                ]
            })
            .collect()
    } else {
        ties.into_iter()
            .map(|(home, away, round)| Fixture::new(home, away, round))
            .collect()
    };

    log::debug!(
        "Knockout: {} participants, bracket of {}, {} rounds, {} byes, {} fixtures",
        seeded.len(),
        size,
        total_rounds,
        size - seeded.len(),
        fixtures.len()
    );
    Ok(fixtures)
}

/// Smallest power of two that holds `participants`.
pub fn bracket_size(participants: usize) -> usize {
    participants.max(1).next_power_of_two()
}

/// Rounds needed to reduce `participants` to one winner: `ceil(log2(n))`.
pub fn knockout_rounds(participants: usize) -> usize {
    bracket_size(participants).trailing_zeros() as usize
}

/// Lay out `size` slots so that the first `size - n` pairs are (participant, bye)
/// and the remaining pairs are two participants. Since `n > size / 2`, no pair
/// ends up with two byes.
fn pad_with_byes(seeded: &[ParticipantId], size: usize) -> Vec<Option<ParticipantId>> {
    let byes = size - seeded.len();
    let mut slots = Vec::with_capacity(size);
    let mut rest = seeded.iter().copied();
    for _ in 0..byes {
        slots.push(rest.next());
        slots.push(None);
    }
    slots.extend(rest.map(Some));
    slots
}
