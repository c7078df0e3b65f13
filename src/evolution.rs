use rand::RngCore;
use tracing::{Level, event, trace_span};

use super::dilemma::Dilemma;
use super::errors::{ConfigurationError, SimulationError};
use super::strategy::StrategyGenerator;
use super::tournament::RoundRobinTournament;

/// How the initial population is laid out over the strategy prototypes.
#[derive(Debug, Clone)]
pub enum PopulationInit {
    /// A total population size, split evenly over the prototypes with floor
    /// division. The remainder is dropped, not redistributed.
    Total(usize),
    /// Explicit per-prototype counts, in prototype order.
    PerStrategy(Vec<usize>),
}

impl Default for PopulationInit {
    fn default() -> Self {
        PopulationInit::Total(100)
    }
}

/// Per-generation population counts, one sequence per strategy-type name.
///
/// Every sequence has length `generations + 1`; entry 0 is the initial
/// count and entry `g` the count surviving into generation `g`. This is the
/// hand-off format for an external visualization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationHistory {
    names: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl PopulationHistory {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Simulated generations, i.e. the sequence length minus the initial
    /// entry.
    pub fn generations(&self) -> usize {
        self.counts.first().map_or(0, |seq| seq.len() - 1)
    }

    pub fn counts_for(&self, name: &str) -> Option<&[usize]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.counts[idx].as_slice())
    }

    /// Total population at generation `g`, summed over all strategy types.
    pub fn total_at(&self, generation: usize) -> usize {
        self.counts.iter().map(|seq| seq[generation]).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().map(Vec::as_slice))
    }
}

/// Builder for [`Evolution`]. Strategy generators are required; the rest
/// defaults to the classic dilemma, 100 rounds, no noise, 2 repetitions,
/// 100 generations, 0.05 reproductivity and a population of 100.
#[derive(Default)]
pub struct EvolutionBuilder {
    generators: Option<Vec<Box<dyn StrategyGenerator>>>,
    dilemma: Option<Dilemma>,
    rounds: Option<usize>,
    error: Option<f64>,
    repetitions: Option<usize>,
    generations: Option<usize>,
    reproductivity: Option<f64>,
    initial_population: Option<PopulationInit>,
}

impl EvolutionBuilder {
    /// Set the strategy prototypes. Names must be unique: counts are
    /// aggregated per name, so two prototypes sharing one would silently
    /// merge.
    pub fn generators(mut self, generators: Vec<Box<dyn StrategyGenerator>>) -> Self {
        self.generators = Some(generators);
        self
    }

    pub fn dilemma(mut self, dilemma: Dilemma) -> Self {
        self.dilemma = Some(dilemma);
        self
    }

    /// Rounds per match.
    pub fn rounds(mut self, rounds: usize) -> Self {
        self.rounds = Some(rounds);
        self
    }

    /// Per-action flip probability.
    pub fn error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }

    /// Tournament repetitions within each generation.
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = Some(repetitions);
        self
    }

    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Fraction of the population replaced each generation: the worst
    /// `floor(population * reproductivity)` individuals are removed and the
    /// same number of best individuals duplicated.
    pub fn reproductivity(mut self, reproductivity: f64) -> Self {
        self.reproductivity = Some(reproductivity);
        self
    }

    pub fn initial_population(mut self, initial_population: PopulationInit) -> Self {
        self.initial_population = Some(initial_population);
        self
    }

    /// Validate everything eagerly and build the simulation.
    pub fn build(self) -> Result<Evolution, SimulationError> {
        let generators = self.generators.ok_or(ConfigurationError::NeedStrategies)?;
        if generators.is_empty() {
            return Err(ConfigurationError::NeedStrategies.into());
        }
        for (idx, generator) in generators.iter().enumerate() {
            if generators[..idx].iter().any(|g| g.name() == generator.name()) {
                return Err(
                    ConfigurationError::DuplicateStrategyName(generator.name().to_string()).into(),
                );
            }
        }

        let rounds = self.rounds.unwrap_or(100);
        if rounds == 0 {
            return Err(ConfigurationError::ZeroRounds.into());
        }

        let error = self.error.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&error) {
            return Err(ConfigurationError::ErrorProbabilityOutOfRange(error).into());
        }

        let repetitions = self.repetitions.unwrap_or(2);
        if repetitions == 0 {
            return Err(ConfigurationError::ZeroRepetitions.into());
        }

        let counts = match self.initial_population.unwrap_or_default() {
            PopulationInit::Total(total) => {
                vec![total / generators.len(); generators.len()]
            }
            PopulationInit::PerStrategy(counts) => {
                if counts.len() != generators.len() {
                    return Err(ConfigurationError::PopulationSizeMismatch {
                        counts: counts.len(),
                        strategies: generators.len(),
                    }
                    .into());
                }
                counts
            }
        };
        let population = counts.iter().sum::<usize>();
        if population < 2 {
            return Err(ConfigurationError::NotEnoughParticipants.into());
        }

        let reproductivity = self.reproductivity.unwrap_or(0.05);
        if !(0.0..=1.0).contains(&reproductivity) {
            return Err(ConfigurationError::ReproductivityOutOfRange(reproductivity).into());
        }
        // reproductivity == 0.0 is the explicit no-selection degenerate
        // case; a positive value that floors to zero replacements is a
        // configuration mistake.
        let replaced = (population as f64 * reproductivity).floor() as usize;
        if reproductivity > 0.0 && replaced == 0 {
            return Err(ConfigurationError::ReproductivityTooSmall(reproductivity).into());
        }

        Ok(Evolution {
            generators,
            dilemma: self.dilemma.unwrap_or_default(),
            rounds,
            error,
            repetitions,
            generations: self.generations.unwrap_or(100),
            replaced,
            counts,
            population,
        })
    }
}

/// A natural-selection loop over generations of round-robin tournaments.
///
/// Each generation instantiates a fresh population from the prototypes,
/// plays a full round-robin tournament, then replaces the lowest-ranked
/// individuals with copies of the highest-ranked ones (ranking order breaks
/// ties at the selection boundary). Population size is conserved; only the
/// composition shifts.
pub struct Evolution {
    generators: Vec<Box<dyn StrategyGenerator>>,
    dilemma: Dilemma,
    rounds: usize,
    error: f64,
    repetitions: usize,
    generations: usize,
    replaced: usize,
    counts: Vec<usize>,
    population: usize,
}

impl Evolution {
    pub fn builder() -> EvolutionBuilder {
        EvolutionBuilder::default()
    }

    /// Run all generations and return the per-type population history.
    pub fn run(&mut self, rng: &mut dyn RngCore) -> Result<PopulationHistory, SimulationError> {
        let span = trace_span!(
            "Evolution::run",
            generations = self.generations,
            population = self.population
        );
        let _enter = span.enter();

        let mut counts = self.counts.clone();
        let mut history: Vec<Vec<usize>> = counts.iter().map(|count| vec![*count]).collect();

        for generation in 0..self.generations {
            let gen_span = trace_span!("generation", generation);
            let _gen_enter = gen_span.enter();

            counts = self.next_generation(&counts, rng)?;
            for (type_idx, count) in counts.iter().enumerate() {
                history[type_idx].push(*count);
            }

            event!(Level::INFO, generation, counts = ?counts, "generation complete");
        }

        Ok(PopulationHistory {
            names: self
                .generators
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
            counts: history,
        })
    }

    /// Play one generation's tournament and apply selection, returning the
    /// next per-type counts.
    fn next_generation(
        &self,
        counts: &[usize],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, SimulationError> {
        // Fresh, fully independent instances; participant index maps back
        // to the prototype through type_of.
        let mut strategies = Vec::with_capacity(self.population);
        let mut type_of = Vec::with_capacity(self.population);
        for (type_idx, generator) in self.generators.iter().enumerate() {
            for _ in 0..counts[type_idx] {
                strategies.push(generator.generate());
                type_of.push(type_idx);
            }
        }

        let mut tournament = RoundRobinTournament::builder()
            .strategies(strategies)
            .dilemma(self.dilemma)
            .rounds(self.rounds)
            .error(self.error)
            .repetitions(self.repetitions)
            .build()?;
        let ranking = tournament.run(rng)?;

        // Replacement, not addition: the `replaced` lowest-ranked
        // individuals make way for copies of the `replaced` highest-ranked.
        let survivors = self.population - self.replaced;
        let mut next = vec![0_usize; self.generators.len()];
        for entry in &ranking.entries()[..survivors] {
            next[type_of[entry.participant]] += 1;
        }
        for entry in &ranking.entries()[..self.replaced] {
            next[type_of[entry.participant]] += 1;
        }

        let total = next.iter().sum::<usize>();
        if total != self.population {
            debug_assert_eq!(self.population, total, "selection changed the population size");
            return Err(SimulationError::PopulationNotConserved {
                expected: self.population,
                actual: total,
            });
        }

        Ok(next)
    }
}
