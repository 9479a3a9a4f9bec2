//! Read-only services consulted while replaying delayed actions.
//!
//! Only randomness lives here today: deck shuffling needs rolls that are
//! reproducible across replays of the same log entry.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, shuffle};
