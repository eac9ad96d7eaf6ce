//! League format: round-robin schedule by the circle method.

use crate::models::{Fixture, FixtureError, ParticipantId};

/// Generate a round-robin schedule (double round robin when `double_leg`).
///
/// 1. Odd count: add a bye slot so the working list has even length `n`.
/// 2. `n - 1` rounds; in each, slot `i` meets slot `n - 1 - i`. Pairs with the bye are dropped.
/// 3. Even round index: second-named slot is home. Odd: first-named slot is home.
/// 4. Slot 0 stays fixed, the rest rotate by one each round.
/// 5. Second leg: every fixture again with sides swapped, rounds offset by `n - 1`.
///
/// Output is round-major, all of leg 1 before leg 2.
pub fn generate_round_robin(
    participants: &[ParticipantId],
    double_leg: bool,
) -> Result<Vec<Fixture>, FixtureError> {
    if participants.len() < 2 {
        return Err(FixtureError::InsufficientParticipants {
            found: participants.len(),
        });
    }

    let mut slots: Vec<Option<ParticipantId>> = participants.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let num_rounds = n - 1;
    let half = n / 2;

    let mut fixtures = Vec::with_capacity(num_rounds * half * if double_leg { 2 } else { 1 });
    for round in 0..num_rounds {
        for i in 0..half {
            let first = slot_at(&slots, i, round);
            let second = slot_at(&slots, n - 1 - i, round);
            let (Some(first), Some(second)) = (first, second) else {
                continue;
            };
            let (home, away) = if round % 2 == 0 {
                (second, first)
            } else {
                (first, second)
            };
            fixtures.push(Fixture::new(Some(home), Some(away), round as u32 + 1));
        }
    }

    if double_leg {
        let offset = num_rounds as u32;
        let second_leg: Vec<Fixture> = fixtures
            .iter()
            .map(|f| f.reversed(f.round + offset))
            .collect();
        fixtures.extend(second_leg);
    }

    log::debug!(
        "Round robin: {} participants, {} rounds per leg, {} fixtures",
        participants.len(),
        num_rounds,
        fixtures.len()
    );
    Ok(fixtures)
}

/// Number of rounds in one leg for `participants` entrants.
pub fn round_robin_rounds(participants: usize) -> usize {
    if participants < 2 {
        return 0;
    }
    participants + participants % 2 - 1
}

/// Slot occupying `position` after `rotations` circle-method rotations.
///
/// Position 0 is fixed. Each rotation moves the last slot to position 1, so
/// position `p >= 1` holds original slot `1 + (p - 1 - rotations) mod (n - 1)`.
fn slot_at(slots: &[Option<ParticipantId>], position: usize, rotations: usize) -> Option<ParticipantId> {
    if position == 0 {
        return slots[0];
    }
    let ring = slots.len() - 1;
    slots[1 + (position - 1 + ring - rotations % ring) % ring]
}
