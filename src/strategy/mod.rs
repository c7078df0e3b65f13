//! `Strategy`s are the automatic players in the dilemma simulations. Each one
//! is a decision rule over what the opponent has done so far.
//!
//! The classic strategies are provided as a way of testing baseline value.
mod cooperator;
mod defector;
mod detective;
mod gradual;
mod grudger;
mod pavlov;
mod periodic;
mod tit_for_tat;

use rand::RngCore;

use super::dilemma::Action;

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to implement the logic and state.
///
/// Any per-match state (trust flags, counters, opening sequences) lives
/// inside the implementor and must be cleared by `reset`. The engine calls
/// `reset` at the start of every match, so no state ever leaks between
/// pairings.
pub trait Strategy {
    /// The strategy-type name, used to aggregate population counts in the
    /// evolutionary simulation. Not an identity: two instances of the same
    /// type share a name but are tracked separately.
    fn name(&self) -> &str;

    /// Decide the next action from the two recorded histories. Both
    /// histories hold the actions as they were recorded (after any noise
    /// flip), oldest first. Called once per round, before either history is
    /// extended with this round's actions.
    ///
    /// Randomized strategies draw from `rng` and nothing else, so a match is
    /// reproducible given its rng seed.
    fn decide(
        &mut self,
        rng: &mut dyn RngCore,
        own_history: &[Action],
        opponent_history: &[Action],
    ) -> Action;

    /// Clear all per-match state. Strategies that keep none can rely on the
    /// default.
    fn reset(&mut self) {}
}

/// `StrategyGenerator` is used by the evolutionary simulation, where every
/// generation needs a fresh, fully independent instance per individual.
pub trait StrategyGenerator {
    /// The strategy-type name of the instances this generator produces.
    fn name(&self) -> &str;

    /// Mint a new instance with pristine state.
    fn generate(&self) -> Box<dyn Strategy>;
}

pub trait CloneStrategy: Strategy {
    fn clone_box(&self) -> Box<dyn Strategy>;
}

impl<T> CloneStrategy for T
where
    T: 'static + Strategy + Clone,
{
    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

/// Generator that clones a prototype instance.
pub struct CloneStrategyGenerator<T> {
    prototype: T,
}

impl<T> CloneStrategyGenerator<T>
where
    T: CloneStrategy,
{
    pub fn new(prototype: T) -> Self {
        CloneStrategyGenerator { prototype }
    }
}

impl<T> StrategyGenerator for CloneStrategyGenerator<T>
where
    T: CloneStrategy,
{
    fn name(&self) -> &str {
        self.prototype.name()
    }

    fn generate(&self) -> Box<dyn Strategy> {
        let mut fresh = self.prototype.clone_box();
        fresh.reset();
        fresh
    }
}

pub use cooperator::Cooperator;
pub use defector::Defector;
pub use detective::Detective;
pub use gradual::Gradual;
pub use grudger::Grudger;
pub use pavlov::Pavlov;
pub use periodic::Periodic;
pub use tit_for_tat::TitForTat;
