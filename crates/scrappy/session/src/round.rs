//! Round execution.
//!
//! Each round draws from its own RNG, derived from the session seed and the
//! round index, so a round's results depend only on the seed and on what
//! was scheduled into that round.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scrappy_outcome::OutcomeSynthesizer;
use scrappy_types::{ExperimentResult, Idea, RoundIndex, RoundRecord};

use crate::error::SessionResult;

const ROUND_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// RNG for one round of a seeded session.
pub fn round_rng(seed: u64, round: RoundIndex) -> StdRng {
    StdRng::seed_from_u64(seed ^ u64::from(round.0).wrapping_mul(ROUND_STRIDE))
}

/// Draw results for every entry of `record`, in portfolio order.
///
/// Does not touch `record`; the caller commits the results once the rest of
/// the transition has succeeded.
pub fn draw_results(
    record: &RoundRecord,
    idea: &Idea,
    synthesizer: &OutcomeSynthesizer,
    seed: u64,
) -> SessionResult<Vec<ExperimentResult>> {
    let mut rng = round_rng(seed, record.index);
    record
        .portfolio
        .iter()
        .map(|entry| {
            let assumption = idea.assumption(&entry.assumption_id)?;
            let experiment = idea.experiment(&entry.experiment_id)?;
            Ok(synthesizer.synthesize(entry, experiment, assumption, &mut rng))
        })
        .collect()
}
