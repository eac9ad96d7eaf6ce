//! Fixture generation logic: round robin, knockout bracket, format dispatch, assembly.

mod knockout;
mod round_robin;
mod schedule;
mod service;

pub use knockout::{bracket_size, generate_knockout_bracket, knockout_rounds};
pub use round_robin::{generate_round_robin, round_robin_rounds};
pub use schedule::generate_fixtures;
pub use service::{generate_tournament_fixtures, list_fixtures};
