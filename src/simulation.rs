use rand::{Rng, RngCore};
use tracing::trace_span;

use super::dilemma::{Action, Dilemma};
use super::errors::{ConfigurationError, SimulationError};
use super::strategy::Strategy;

/// One match: a fixed number of rounds between two strategies under an
/// optional per-action error probability.
///
/// Each round both strategies decide simultaneously from the pre-round
/// histories, then each action is independently flipped with probability
/// `error` before being recorded. The recorded (post-flip) action is what
/// the opponent observes and what the strategy itself sees as its own last
/// action; the pre-flip decision is never visible anywhere.
///
/// The engine resets both strategies before the first round, so a strategy
/// instance can be reused across matches without leaking state.
pub struct DilemmaSimulation<'a> {
    dilemma: Dilemma,
    rounds: usize,
    error: f64,
    player_one: &'a mut dyn Strategy,
    player_two: &'a mut dyn Strategy,
    /// Recorded post-flip actions, `(player_one, player_two)`, oldest first.
    pub histories: (Vec<Action>, Vec<Action>),
    /// Cumulative score pair, `(player_one, player_two)`.
    pub scores: (f64, f64),
}

impl<'a> DilemmaSimulation<'a> {
    /// Errors with `InvalidConfiguration` on zero rounds or an error
    /// probability outside [0, 1].
    pub fn new(
        dilemma: Dilemma,
        rounds: usize,
        error: f64,
        player_one: &'a mut dyn Strategy,
        player_two: &'a mut dyn Strategy,
    ) -> Result<DilemmaSimulation<'a>, SimulationError> {
        if rounds == 0 {
            return Err(ConfigurationError::ZeroRounds.into());
        }
        if !(0.0..=1.0).contains(&error) {
            return Err(ConfigurationError::ErrorProbabilityOutOfRange(error).into());
        }

        Ok(DilemmaSimulation {
            dilemma,
            rounds,
            error,
            player_one,
            player_two,
            histories: (Vec::with_capacity(rounds), Vec::with_capacity(rounds)),
            scores: (0.0, 0.0),
        })
    }

    /// Play the match to completion. All randomness (noise and randomized
    /// strategies) comes from `rng`.
    pub fn run(&mut self, rng: &mut dyn RngCore) {
        let span = trace_span!("DilemmaSimulation::run", rounds = self.rounds);
        let _enter = span.enter();

        self.player_one.reset();
        self.player_two.reset();
        self.histories.0.clear();
        self.histories.1.clear();
        self.scores = (0.0, 0.0);

        for _round in 0..self.rounds {
            let one = self
                .player_one
                .decide(rng, &self.histories.0, &self.histories.1);
            let two = self
                .player_two
                .decide(rng, &self.histories.1, &self.histories.0);

            let one = self.perturb(one, rng);
            let two = self.perturb(two, rng);

            self.histories.0.push(one);
            self.histories.1.push(two);

            let (score_one, score_two) = self.dilemma.evaluate(one, two);
            self.scores.0 += score_one;
            self.scores.1 += score_two;
        }

        debug_assert_eq!(
            self.scores,
            self.dilemma
                .score_histories(&self.histories.0, &self.histories.1),
            "accumulated scores diverged from the recorded histories"
        );
    }

    fn perturb(&self, action: Action, rng: &mut dyn RngCore) -> Action {
        if self.error > 0.0 && rng.random_bool(self.error) {
            action.flip()
        } else {
            action
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::strategy::{Cooperator, Defector, Pavlov, TitForTat};

    use super::*;

    #[test_log::test]
    fn test_zero_rounds_is_rejected() {
        let mut one = Cooperator::default();
        let mut two = Defector::default();

        let result = DilemmaSimulation::new(Dilemma::classic(), 0, 0.0, &mut one, &mut two);
        assert_eq!(
            Err(SimulationError::InvalidConfiguration(
                ConfigurationError::ZeroRounds
            )),
            result.map(|_| ())
        );
    }

    #[test_log::test]
    fn test_error_probability_is_range_checked() {
        let mut one = Cooperator::default();
        let mut two = Defector::default();

        let result = DilemmaSimulation::new(Dilemma::classic(), 10, 1.5, &mut one, &mut two);
        assert_eq!(
            Err(SimulationError::InvalidConfiguration(
                ConfigurationError::ErrorProbabilityOutOfRange(1.5)
            )),
            result.map(|_| ())
        );
    }

    #[test_log::test]
    fn test_certain_noise_flips_every_recorded_action() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut one = Cooperator::default();
        let mut two = Cooperator::default();

        let mut sim =
            DilemmaSimulation::new(Dilemma::classic(), 25, 1.0, &mut one, &mut two).unwrap();
        sim.run(&mut rng);

        // Both cooperators are recorded as defecting every round, and score
        // accordingly: the observed action is the post-flip one.
        assert!(sim.histories.0.iter().all(|a| *a == Action::Defect));
        assert!(sim.histories.1.iter().all(|a| *a == Action::Defect));
        assert_relative_eq!(0.0, sim.scores.0);
        assert_relative_eq!(0.0, sim.scores.1);
    }

    #[test_log::test]
    fn test_score_matches_rederivation_under_noise() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut one = TitForTat::default();
        let mut two = Pavlov::default();
        let dilemma = Dilemma::new(13.0, 0.0, 20.0, 4.0);

        let mut sim = DilemmaSimulation::new(dilemma, 200, 0.05, &mut one, &mut two).unwrap();
        sim.run(&mut rng);

        assert_eq!(200, sim.histories.0.len());
        assert_eq!(200, sim.histories.1.len());
        let (one_rederived, two_rederived) =
            dilemma.score_histories(&sim.histories.0, &sim.histories.1);
        assert_relative_eq!(sim.scores.0, one_rederived);
        assert_relative_eq!(sim.scores.1, two_rederived);
    }

    #[test_log::test]
    fn test_rerun_resets_state_and_histories() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut one = TitForTat::default();
        let mut two = Defector::default();

        let mut sim =
            DilemmaSimulation::new(Dilemma::classic(), 10, 0.0, &mut one, &mut two).unwrap();
        sim.run(&mut rng);
        let first_scores = sim.scores;

        // A second run must start from a clean slate: tit-for-tat trusts
        // again and the histories are rebuilt from scratch.
        sim.run(&mut rng);
        assert_eq!(first_scores, sim.scores);
        assert_eq!(10, sim.histories.0.len());
        assert_eq!(Action::Cooperate, sim.histories.0[0]);
    }
}
