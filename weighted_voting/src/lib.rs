/*!

Collection of weighted ballots over a fixed set of options, and random selection of candidates.

Each voter submits a ballot: a list of option indices, where repeating an index gives more
weight to that option. Once the vote is closed, all the ballots are merged into a single
multiset and distinct candidates are drawn from it. An option that received twice as many
votes is twice as likely to be drawn.

```
use rand::{rngs::StdRng, SeedableRng};
use weighted_voting::*;

let catalog = OptionCatalog::new(&["Ramen".to_string(), "Tacos".to_string()], 2);
let mut session = Session::new();
session.submit(&catalog, Ballot::new(&[0, 0]))?;
session.submit(&catalog, Ballot::new(&[1]))?;

let mut rng = StdRng::seed_from_u64(42);
let res = run_sampling(session.ballots(), &catalog, &SamplingRules::DEFAULT_RULES, &mut rng)?;
assert_eq!(res.population, vec![0, 0, 1]);
assert_eq!(res.candidates.len(), 2);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

mod catalog;
mod config;
pub mod manual;
mod session;

use log::{debug, info};
use rand::{seq::SliceRandom, Rng};

pub use crate::catalog::*;
pub use crate::config::*;
pub use crate::session::Session;

/// Merges all the ballots into the multiset of indices used for the sampling.
///
/// The result is sorted. If there is no ballot, every option is present exactly
/// once and the returned flag is true.
///
/// The ballots are expected to have been validated against the catalog. Indices that are not
/// in the catalog are dropped.
pub fn weighted_population(ballots: &[Ballot], catalog: &OptionCatalog) -> (Vec<usize>, bool) {
    if ballots.is_empty() {
        debug!("weighted_population: no ballot, using uniform weights");
        return ((0..catalog.len()).collect(), true);
    }
    let mut population: Vec<usize> = ballots
        .iter()
        .flat_map(|b| b.choices.iter())
        .filter_map(|idx| catalog.checked_index(*idx))
        .collect();
    population.sort_unstable();
    (population, false)
}

/// Counts the votes for each option that appears in the population.
pub fn compute_tally(population: &[usize], catalog: &OptionCatalog) -> Tally {
    let mut counts: Vec<u64> = vec![0; catalog.len()];
    for idx in population.iter() {
        if let Some(c) = counts.get_mut(*idx) {
            *c += 1;
        }
    }
    let entries = catalog
        .describe_all()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|((_, name), count)| (name.to_string(), count))
        .collect();
    Tally { entries }
}

/// Draws distinct candidates from the population.
///
/// Every draw picks one element of the population uniformly, so the chance of an option is
/// proportional to its number of votes. Options that were already drawn are ignored. The
/// drawing stops when `rules.num_candidates` candidates were found, or when all the options of
/// the population were found.
pub fn sample_candidates<R: Rng + ?Sized>(
    population: &[usize],
    catalog: &OptionCatalog,
    rules: &SamplingRules,
    rng: &mut R,
) -> Vec<String> {
    let mut distinct: Vec<usize> = population.to_vec();
    distinct.dedup();
    let target = rules.num_candidates.min(distinct.len());

    let mut found: Vec<usize> = Vec::new();
    let mut num_draws: u64 = 0;
    while found.len() < target {
        // The population is not empty, since target > 0.
        let Some(&idx) = population.choose(rng) else {
            break;
        };
        num_draws += 1;
        if !found.contains(&idx) {
            debug!("sample_candidates: draw {}: new candidate {}", num_draws, idx);
            found.push(idx);
        }
    }
    debug!(
        "sample_candidates: {} candidates after {} draws",
        found.len(),
        num_draws
    );
    found
        .iter()
        .filter_map(|idx| catalog.name(*idx).map(|s| s.to_string()))
        .collect()
}

/// Runs the whole selection for the given ballots.
///
/// Arguments:
/// * `ballots` the accepted ballots, in the order they were cast
/// * `catalog` the options of this vote
/// * `rules` the rules for the sampling
/// * `rng` the source of randomness. Use a seeded generator for reproducible outcomes.
pub fn run_sampling<R: Rng + ?Sized>(
    ballots: &[Ballot],
    catalog: &OptionCatalog,
    rules: &SamplingRules,
    rng: &mut R,
) -> Result<SamplingResult, VotingErrors> {
    info!(
        "run_sampling: processing {} ballots over {} options, rules: {:?}",
        ballots.len(),
        catalog.len(),
        rules
    );
    if catalog.is_empty() {
        return Err(VotingErrors::EmptyCatalog);
    }
    let (population, uniform) = weighted_population(ballots, catalog);
    let tally = compute_tally(&population, catalog);
    for (name, count) in tally.entries.iter() {
        info!("run_sampling: {}: {}", name, count);
    }
    let candidates = sample_candidates(&population, catalog, rules, rng);
    info!("run_sampling: candidates: {:?}", candidates);
    Ok(SamplingResult {
        voters: ballots.len(),
        uniform,
        population,
        tally,
        candidates,
    })
}
