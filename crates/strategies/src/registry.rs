//! Strategy type registry.

use crate::{
    AlwaysCheat, AlwaysCooperate, Awkward, Bully, ChaoticRedeemer, ForgivingTitForTat,
    GenerousTitForTat, GlobalPavlov, GreedyProber, Grudger, Joss, LimitedPunisher, Pavlov, Random,
    Redeemer, SkepticalRedeemer, SmartEnvious, SmartProber, StochasticPavlov, Statistical,
    Strategy, TitForTat, TitForTwoTats, TolerantGrudger,
};

type Factory = Box<dyn Fn() -> Box<dyn Strategy>>;

/// Ordered collection of strategy types, each default-constructible.
///
/// The simulation core does not discover types itself; whoever drives
/// it assembles a registry and hands it over.
pub struct StrategyRegistry {
    factories: Vec<(&'static str, Factory)>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a strategy type by its constructor.
    pub fn register<S, F>(&mut self, build: F)
    where
        S: Strategy + 'static,
        F: Fn() -> S + 'static,
    {
        let factory: Factory = Box::new(move || Box::new(build()));
        let name = factory().name();
        self.factories.push((name, factory));
    }

    /// Names of all registered types, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.iter().map(|(name, _)| *name).collect()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a fresh instance of the named type, if registered.
    pub fn spawn(&self, name: &str) -> Option<Box<dyn Strategy>> {
        self.factories
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factory)| factory())
    }

    /// Build a population with `copies` fresh instances of every
    /// registered type, in registration order.
    pub fn build_population(&self, copies: usize) -> Vec<Box<dyn Strategy>> {
        let mut population = Vec::with_capacity(self.factories.len() * copies);
        for (_, factory) in &self.factories {
            for _ in 0..copies {
                population.push(factory());
            }
        }
        population
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The full roster of built-in strategies.
pub fn default_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry.register(AlwaysCooperate::new);
    registry.register(AlwaysCheat::new);
    registry.register(Random::new);
    registry.register(Awkward::new);
    registry.register(TitForTat::new);
    registry.register(ForgivingTitForTat::new);
    registry.register(TitForTwoTats::new);
    registry.register(GenerousTitForTat::new);
    registry.register(Joss::new);
    registry.register(Pavlov::new);
    registry.register(GlobalPavlov::new);
    registry.register(StochasticPavlov::new);
    registry.register(Grudger::new);
    registry.register(TolerantGrudger::new);
    registry.register(Redeemer::new);
    registry.register(SkepticalRedeemer::new);
    registry.register(ChaoticRedeemer::new);
    registry.register(LimitedPunisher::new);
    registry.register(SmartProber::new);
    registry.register(GreedyProber::new);
    registry.register(Statistical::new);
    registry.register(Bully::new);
    registry.register(SmartEnvious::new);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_lists_all_strategies() {
        let registry = default_registry();
        assert_eq!(registry.len(), 23);
        assert!(registry.names().contains(&"Tit-for-Tat"));
    }

    #[test]
    fn spawn_builds_independent_instances() {
        let registry = default_registry();
        let a = registry.spawn("Grudger").unwrap();
        let b = registry.spawn("Grudger").unwrap();
        assert_eq!(a.name(), b.name());
        assert_ne!(a.id(), b.id());
        assert!(registry.spawn("No Such Strategy").is_none());
    }

    #[test]
    fn build_population_repeats_each_type() {
        let registry = default_registry();
        let population = registry.build_population(3);
        assert_eq!(population.len(), 3 * registry.len());
        // Instances of the same type are still distinct actors.
        assert_ne!(population[0].id(), population[1].id());
    }
}
