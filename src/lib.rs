//! `dilemma_arena` simulates the Iterated Prisoner's Dilemma: repeated
//! pairwise matches between strategies, aggregated into round-robin
//! tournaments and multi-generation evolutionary competitions.
//!
//! # Single Match
//!
//! The tools allow explicit control over the simulation all the way down to
//! the rng.
//!
//! ## Single Match Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use dilemma_arena::{Dilemma, DilemmaSimulation};
//! use dilemma_arena::strategy::{Cooperator, TitForTat};
//!
//! let mut rng = StdRng::seed_from_u64(420);
//! let mut one = TitForTat::default();
//! let mut two = Cooperator::default();
//!
//! let mut sim = DilemmaSimulation::new(Dilemma::classic(), 100, 0.0, &mut one, &mut two)
//!     .unwrap();
//! sim.run(&mut rng);
//!
//! // Two nice strategies cooperate all the way through.
//! assert_eq!((200.0, 200.0), sim.scores);
//! ```
//!
//! # Tournament Example
//!
//! A `RoundRobinTournament` schedules every unordered pair of participants
//! once per repetition and tabulates cumulative scores into a ranking.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use dilemma_arena::{RoundRobinTournament, Strategy};
//! use dilemma_arena::strategy::{Cooperator, Defector, Detective, Grudger, TitForTat};
//!
//! let strategies: Vec<Box<dyn Strategy>> = vec![
//!     Box::<Cooperator>::default(),
//!     Box::<Defector>::default(),
//!     Box::<TitForTat>::default(),
//!     Box::<Grudger>::default(),
//!     Box::<Detective>::default(),
//! ];
//! let mut rng = StdRng::seed_from_u64(420);
//!
//! let mut tournament = RoundRobinTournament::builder()
//!     .strategies(strategies)
//!     .rounds(10)
//!     .error(0.0)
//!     .repetitions(1)
//!     .build()
//!     .unwrap();
//!
//! let ranking = tournament.run(&mut rng).unwrap();
//! println!("{:?}", ranking.entries());
//! ```
//!
//! # Evolution Example
//!
//! An `Evolution` runs successive generations of round-robin tournaments
//! over a population of strategy instances. After each generation the worst
//! individuals are replaced by copies of the best; the per-type population
//! counts over time are the result.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use dilemma_arena::{CloneStrategyGenerator, Evolution, PopulationInit, StrategyGenerator};
//! use dilemma_arena::strategy::{Cooperator, Defector, TitForTat};
//!
//! let generators: Vec<Box<dyn StrategyGenerator>> = vec![
//!     Box::new(CloneStrategyGenerator::new(Cooperator::default())),
//!     Box::new(CloneStrategyGenerator::new(Defector::default())),
//!     Box::new(CloneStrategyGenerator::new(TitForTat::default())),
//! ];
//! let mut rng = StdRng::seed_from_u64(420);
//!
//! let mut evolution = Evolution::builder()
//!     .generators(generators)
//!     .rounds(10)
//!     .repetitions(1)
//!     .generations(10)
//!     .reproductivity(0.2)
//!     .initial_population(PopulationInit::PerStrategy(vec![15, 5, 5]))
//!     .build()
//!     .unwrap();
//!
//! let history = evolution.run(&mut rng).unwrap();
//!
//! // Population size is conserved; only the composition shifts.
//! assert_eq!(25, history.total_at(10));
//! ```
pub mod dilemma;
pub mod errors;
pub mod evolution;
pub mod simulation;
pub mod strategy;
pub mod tournament;

pub use dilemma::{Action, Dilemma};
pub use errors::{ConfigurationError, SimulationError};
pub use evolution::{Evolution, EvolutionBuilder, PopulationHistory, PopulationInit};
pub use simulation::DilemmaSimulation;
pub use strategy::{CloneStrategy, CloneStrategyGenerator, Strategy, StrategyGenerator};
pub use tournament::{Ranking, RankingEntry, RoundRobinTournament, RoundRobinTournamentBuilder};
