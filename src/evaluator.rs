//! Round-robin fitness evaluation
//!
//! Every unordered pair of candidates plays one match. The lower index
//! takes the left paddle, the higher index the right. Each side's hit count
//! is added to its candidate's fitness, so a candidate's fitness is its
//! total hits over the N-1 matches it plays in a generation.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::arena::play_match;
use crate::controller::Controller;
use crate::settings::Settings;

/// One member of a generation as seen by the evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<C> {
    pub id: u64,
    pub controller: C,
    /// Accumulated fitness, written by [`evaluate_generation`]
    pub fitness: f64,
}

impl<C> Candidate<C> {
    pub fn new(id: u64, controller: C) -> Self {
        Self {
            id,
            controller,
            fitness: 0.0,
        }
    }
}

/// Summary of one generation's evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationReport {
    /// Matches played, N(N-1)/2
    pub matches: usize,
    /// Hits summed over every match and both sides
    pub total_hits: u64,
    /// Id and fitness of the fittest candidate (first one on ties)
    pub best: Option<(u64, f64)>,
}

/// Number of matches a generation of `n` candidates plays
pub fn match_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Evaluate a generation
///
/// All fitness accumulators are zeroed first. Match `k` (counting pairs in
/// row order) uses RNG stream `k` under `seed`, so a generation replays
/// exactly for the same seed and controllers.
pub fn evaluate_generation<C: Controller>(
    candidates: &mut [Candidate<C>],
    settings: &Settings,
    seed: u64,
) -> GenerationReport {
    for candidate in candidates.iter_mut() {
        candidate.fitness = 0.0;
    }

    let mut report = GenerationReport::default();
    for i in 0..candidates.len() {
        let (head, tail) = candidates.split_at_mut(i + 1);
        let first = &mut head[i];
        for second in tail.iter_mut() {
            let rng = Pcg32::new(seed, report.matches as u64);
            let outcome = play_match(
                &first.controller,
                &second.controller,
                settings,
                settings.eval_stop,
                rng,
            );

            first.fitness += f64::from(outcome.hits[0]);
            second.fitness += f64::from(outcome.hits[1]);
            report.matches += 1;
            report.total_hits += u64::from(outcome.hits[0] + outcome.hits[1]);

            log::debug!(
                "match {}: {} vs {} -> hits {:?}, score {:?}, {} ticks",
                report.matches,
                first.id,
                second.id,
                outcome.hits,
                outcome.scores,
                outcome.ticks
            );
        }
    }

    report.best = candidates
        .iter()
        .fold(None, |best: Option<&Candidate<C>>, c| match best {
            Some(b) if b.fitness >= c.fitness => Some(b),
            _ => Some(c),
        })
        .map(|c| (c.id, c.fitness));

    if let Some((id, fitness)) = report.best {
        log::info!(
            "Evaluated {} candidates in {} matches, {} hits, best {} with fitness {}",
            candidates.len(),
            report.matches,
            report.total_hits,
            id,
            fitness
        );
    }

    report
}
