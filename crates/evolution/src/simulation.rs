//! The generational selection loop.

use std::collections::{BTreeMap, BTreeSet};

use dilemma_core::{EvolutionConfig, SimulationError};
use dilemma_engine::run_tournament;
use dilemma_strategies::{Strategy, StrategyRegistry};
use rand::Rng;
use tracing::info;

use crate::{EvolutionReport, GenerationSnapshot, Termination, TypeCount};

/// Run a full evolutionary simulation to its terminal state.
///
/// Each generation: evaluate via the interaction engine, cull the
/// bottom `kill_count` actors, clone the top `kill_count` (fresh
/// state, new identity, same type), then check termination before the
/// stability counter advances. That ordering is load-bearing:
/// swapping it shifts termination by a generation.
///
/// Always terminates: the surviving-type set can only shrink, and
/// between shrinks the stability counter climbs toward its threshold.
pub fn run_evolution<R: Rng>(
    registry: &StrategyRegistry,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<EvolutionReport, SimulationError> {
    if registry.is_empty() {
        return Err(SimulationError::EmptyPopulation);
    }
    let mut population = registry.build_population(config.copies_per_type);
    if config.kill_count >= population.len() {
        return Err(SimulationError::KillCountTooLarge {
            kill_count: config.kill_count,
            population: population.len(),
        });
    }

    info!(
        types = registry.len(),
        copies = config.copies_per_type,
        kill_count = config.kill_count,
        stability_threshold = config.stability_threshold,
        "starting evolutionary simulation"
    );

    let mut generation = 0u32;
    let mut stability_counter = 0u32;
    let mut reference_set = surviving_types(&population);
    let mut extinction_log: Vec<&'static str> = Vec::new();
    let mut snapshots = Vec::new();

    loop {
        generation += 1;

        // Evaluate: returns the population ranked by descending score.
        run_tournament(&mut population, &config.tournament, rng)?;

        // Select: cull the tail, clone the head. Population size is
        // invariant across generations.
        let survivors = population.len() - config.kill_count;
        let clones: Vec<Box<dyn Strategy>> = population[..config.kill_count]
            .iter()
            .map(|actor| actor.spawn())
            .collect();
        population.truncate(survivors);
        population.extend(clones);

        let counts = type_counts(&population);
        let surviving: BTreeSet<&'static str> = counts.keys().copied().collect();

        // Extinctions, in deterministic (sorted-name) detection order.
        let newly_extinct: Vec<&'static str> =
            reference_set.difference(&surviving).copied().collect();
        for name in &newly_extinct {
            info!(generation, strategy = *name, "extinction");
            extinction_log.push(name);
        }

        info!(
            generation,
            surviving = surviving.len(),
            stability = stability_counter,
            "generation complete"
        );
        snapshots.push(snapshot(
            generation,
            &counts,
            stability_counter,
            &newly_extinct,
        ));

        // Termination checks come before the counter advances.
        if stability_counter >= config.stability_threshold {
            let ranking = stable_ranking(&counts, &extinction_log);
            return Ok(EvolutionReport {
                termination: Termination::Stable,
                generations: generation,
                ranking,
                snapshots,
            });
        }
        if surviving.len() <= 1 {
            let ranking = monoculture_ranking(&counts, &extinction_log);
            return Ok(EvolutionReport {
                termination: Termination::Monoculture,
                generations: generation,
                ranking,
                snapshots,
            });
        }

        // Advance the stability counter against the reference set.
        if surviving == reference_set {
            stability_counter += 1;
        } else {
            stability_counter = 0;
            reference_set = surviving;
        }
    }
}

fn type_counts(population: &[Box<dyn Strategy>]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for actor in population {
        *counts.entry(actor.name()).or_insert(0) += 1;
    }
    counts
}

fn surviving_types(population: &[Box<dyn Strategy>]) -> BTreeSet<&'static str> {
    population.iter().map(|actor| actor.name()).collect()
}

fn snapshot(
    generation: u32,
    counts: &BTreeMap<&'static str, usize>,
    stability_counter: u32,
    newly_extinct: &[&'static str],
) -> GenerationSnapshot {
    let mut counts: Vec<TypeCount> = counts
        .iter()
        .map(|(name, count)| TypeCount {
            name: (*name).to_string(),
            count: *count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    GenerationSnapshot {
        generation,
        counts,
        stability_counter,
        newly_extinct: newly_extinct.iter().map(|n| n.to_string()).collect(),
    }
}

/// Survivors by descending instance count, then the extinct in
/// reverse extinction order (earliest extinct last).
fn stable_ranking(
    counts: &BTreeMap<&'static str, usize>,
    extinction_log: &[&'static str],
) -> Vec<String> {
    let mut survivors: Vec<(&'static str, usize)> =
        counts.iter().map(|(n, c)| (*n, *c)).collect();
    survivors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    survivors
        .into_iter()
        .map(|(name, _)| name.to_string())
        .chain(extinction_log.iter().rev().map(|n| n.to_string()))
        .collect()
}

/// Remaining type(s) in deterministic name order, then the extinct in
/// reverse extinction order.
fn monoculture_ranking(
    counts: &BTreeMap<&'static str, usize>,
    extinction_log: &[&'static str],
) -> Vec<String> {
    counts
        .keys()
        .map(|name| name.to_string())
        .chain(extinction_log.iter().rev().map(|n| n.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_core::TournamentParams;
    use dilemma_strategies::{AlwaysCheat, AlwaysCooperate, TitForTat};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(
        copies: usize,
        kill: usize,
        stability_threshold: u32,
        noise: f64,
    ) -> EvolutionConfig {
        EvolutionConfig {
            copies_per_type: copies,
            kill_count: kill,
            tournament: TournamentParams {
                rounds_per_game: 5,
                avg_matches_per_strategy: 10,
                noise,
            },
            stability_threshold,
        }
    }

    #[test]
    fn empty_registry_is_rejected() {
        let registry = StrategyRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = run_evolution(&registry, &config(5, 2, 10, 0.0), &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::EmptyPopulation));
    }

    #[test]
    fn kill_count_must_leave_survivors() {
        let mut registry = StrategyRegistry::new();
        registry.register(TitForTat::new);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let err = run_evolution(&registry, &config(3, 3, 10, 0.0), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::KillCountTooLarge {
                kill_count: 3,
                population: 3
            }
        ));
    }

    #[test]
    fn single_type_terminates_monoculture_immediately() {
        let mut registry = StrategyRegistry::new();
        registry.register(AlwaysCheat::new);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // The stability threshold is far away; monoculture must not
        // wait for it.
        let report = run_evolution(&registry, &config(3, 1, 1_000, 0.0), &mut rng).unwrap();
        assert_eq!(report.termination, Termination::Monoculture);
        assert_eq!(report.generations, 1);
        assert_eq!(report.ranking, vec!["Always Cheat".to_string()]);
    }

    #[test]
    fn unchanging_type_set_reaches_stability() {
        let mut registry = StrategyRegistry::new();
        registry.register(AlwaysCooperate::new);
        registry.register(TitForTat::new);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        // Three copies each, one kill per generation: neither type
        // can reach zero before generation 3, so the surviving set is
        // unchanged through generations 1 and 2 and the counter hits
        // the threshold of 2 at the generation-3 check, whatever the
        // sampling does.
        let report = run_evolution(&registry, &config(3, 1, 2, 0.0), &mut rng).unwrap();
        assert_eq!(report.termination, Termination::Stable);
        assert_eq!(report.generations, 3);

        let mut names = report.ranking.clone();
        names.sort();
        assert_eq!(names, vec!["Always Cooperate", "Tit-for-Tat"]);
    }

    #[test]
    fn stability_counter_climbs_while_counts_shift() {
        let mut registry = StrategyRegistry::new();
        registry.register(AlwaysCooperate::new);
        registry.register(TitForTat::new);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let report = run_evolution(&registry, &config(3, 1, 2, 0.0), &mut rng).unwrap();

        // Selection reshuffles per-type counts every generation, but
        // the counter tracks the type *set*, not the counts.
        let counters: Vec<u32> = report
            .snapshots
            .iter()
            .map(|s| s.stability_counter)
            .collect();
        assert_eq!(counters, vec![0, 1, 2]);
    }

    #[test]
    fn population_size_is_invariant_across_generations() {
        let mut registry = StrategyRegistry::new();
        registry.register(AlwaysCheat::new);
        registry.register(AlwaysCooperate::new);
        registry.register(TitForTat::new);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let report = run_evolution(&registry, &config(4, 3, 3, 0.05), &mut rng).unwrap();
        for snapshot in &report.snapshots {
            let total: usize = snapshot.counts.iter().map(|c| c.count).sum();
            assert_eq!(total, 12, "generation {}", snapshot.generation);
        }
    }

    #[test]
    fn ranking_lists_every_type_exactly_once() {
        let mut registry = StrategyRegistry::new();
        registry.register(AlwaysCheat::new);
        registry.register(AlwaysCooperate::new);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let report = run_evolution(&registry, &config(2, 2, 5, 0.0), &mut rng).unwrap();

        let mut names = report.ranking.clone();
        names.sort();
        assert_eq!(names, vec!["Always Cheat", "Always Cooperate"]);

        // Extinctions recorded in the snapshots appear at the back of
        // the ranking.
        let extinct: Vec<String> = report
            .snapshots
            .iter()
            .flat_map(|s| s.newly_extinct.clone())
            .collect();
        for name in &extinct {
            assert!(report.ranking.contains(name));
        }
    }
}
