use rand::RngCore;
use tracing::{Level, event, trace_span};

use super::dilemma::Dilemma;
use super::errors::{ConfigurationError, SimulationError};
use super::simulation::DilemmaSimulation;
use super::strategy::Strategy;

/// One row of a [`Ranking`]: a participant, its strategy-type name and its
/// cumulative score.
///
/// `participant` is the index the strategy had in the tournament's
/// participant list. That index is the identity; names may repeat when the
/// same strategy type enters a tournament more than once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingEntry {
    pub participant: usize,
    pub name: String,
    pub score: f64,
}

/// The outcome of a tournament: entries sorted descending by score.
///
/// The sort is stable, so participants with equal scores keep their original
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    fn from_scores(names: Vec<String>, scores: Vec<f64>) -> Ranking {
        let mut entries: Vec<RankingEntry> = names
            .into_iter()
            .zip(scores)
            .enumerate()
            .map(|(participant, (name, score))| RankingEntry {
                participant,
                name,
                score,
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ranking { entries }
    }

    /// Entries in descending score order.
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn winner(&self) -> Option<&RankingEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankingEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankingEntry;
    type IntoIter = std::slice::Iter<'a, RankingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builder for [`RoundRobinTournament`]. Participants are required, the
/// rest defaults to 100 rounds, no noise and 2 repetitions.
#[derive(Default)]
pub struct RoundRobinTournamentBuilder {
    strategies: Option<Vec<Box<dyn Strategy>>>,
    dilemma: Option<Dilemma>,
    rounds: Option<usize>,
    error: Option<f64>,
    repetitions: Option<usize>,
}

impl RoundRobinTournamentBuilder {
    /// Set the participants. Order matters: it is the participant identity
    /// in the resulting ranking and the tie-break order.
    pub fn strategies(mut self, strategies: Vec<Box<dyn Strategy>>) -> Self {
        self.strategies = Some(strategies);
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

    /// How many times the full pairing schedule is played.
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = Some(repetitions);
        self
    }

    /// Validate the configuration and build the tournament. Every
    /// configuration problem surfaces here, never mid-run.
    pub fn build(self) -> Result<RoundRobinTournament, SimulationError> {
        let strategies = self.strategies.ok_or(ConfigurationError::NeedStrategies)?;
        if strategies.len() < 2 {
            return Err(ConfigurationError::NotEnoughParticipants.into());
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

        Ok(RoundRobinTournament {
            strategies,
            dilemma: self.dilemma.unwrap_or_default(),
            rounds,
            error,
            repetitions,
        })
    }
}

/// An all-against-all tournament: every unordered pair of distinct
/// participants plays one match per repetition (no self-play), and the
/// per-match score pairs accumulate into a [`Ranking`].
///
/// Strategies are reset by the match engine at the start of every pairing,
/// so nothing carries over from one match to the next except the running
/// totals.
pub struct RoundRobinTournament {
    strategies: Vec<Box<dyn Strategy>>,
    dilemma: Dilemma,
    rounds: usize,
    error: f64,
    repetitions: usize,
}

impl RoundRobinTournament {
    pub fn builder() -> RoundRobinTournamentBuilder {
        RoundRobinTournamentBuilder::default()
    }

    /// Play the whole schedule and return the final ranking.
    pub fn run(&mut self, rng: &mut dyn RngCore) -> Result<Ranking, SimulationError> {
        let span = trace_span!(
            "RoundRobinTournament::run",
            participants = self.strategies.len(),
            repetitions = self.repetitions
        );
        let _enter = span.enter();

        let mut scores = vec![0.0_f64; self.strategies.len()];

        for _repetition in 0..self.repetitions {
            for first in 0..self.strategies.len() {
                for second in (first + 1)..self.strategies.len() {
                    let (left, right) = self.strategies.split_at_mut(second);
                    let mut sim = DilemmaSimulation::new(
                        self.dilemma,
                        self.rounds,
                        self.error,
                        left[first].as_mut(),
                        right[0].as_mut(),
                    )?;
                    sim.run(rng);

                    event!(
                        Level::DEBUG,
                        first,
                        second,
                        score_first = sim.scores.0,
                        score_second = sim.scores.1,
                        "match complete"
                    );

                    scores[first] += sim.scores.0;
                    scores[second] += sim.scores.1;
                }
            }
        }

        let names = self
            .strategies
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        Ok(Ranking::from_scores(names, scores))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::strategy::{Cooperator, Defector, Detective, Grudger, TitForTat};

    use super::*;

    fn classic_lineup() -> Vec<Box<dyn Strategy>> {
        vec![
            Box::<Cooperator>::default(),
            Box::<Defector>::default(),
            Box::<TitForTat>::default(),
            Box::<Grudger>::default(),
            Box::<Detective>::default(),
        ]
    }

    #[test_log::test]
    fn test_hand_computed_scores() {
        let mut rng = StdRng::seed_from_u64(420);
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::<Defector>::default(),
            Box::<Cooperator>::default(),
            Box::<Cooperator>::default(),
        ];

        let mut tournament = RoundRobinTournament::builder()
            .strategies(strategies)
            .rounds(4)
            .error(0.0)
            .repetitions(2)
            .build()
            .unwrap();
        let ranking = tournament.run(&mut rng).unwrap();

        // Defector takes 3.0 per round off each cooperator: 4 * 3 * 2 pairs
        // * 2 repetitions. Each cooperator loses 1.0 per round to the
        // defector and earns 2.0 per round against the other cooperator.
        let entries = ranking.entries();
        assert_eq!(0, entries[0].participant);
        assert_relative_eq!(48.0, entries[0].score);
        assert_relative_eq!(8.0, entries[1].score);
        assert_relative_eq!(8.0, entries[2].score);

        // Equal scores keep participant order: the tie between the two
        // cooperator instances breaks toward the earlier index.
        assert_eq!(1, entries[1].participant);
        assert_eq!(2, entries[2].participant);
    }

    #[test_log::test]
    fn test_same_seed_same_ranking() {
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tournament = RoundRobinTournament::builder()
                .strategies(classic_lineup())
                .rounds(10)
                .repetitions(1)
                .build()
                .unwrap();
            tournament.run(&mut rng).unwrap()
        };

        assert_eq!(run(420), run(420));
    }

    #[test_log::test]
    fn test_needs_at_least_two_participants() {
        let result = RoundRobinTournament::builder()
            .strategies(vec![Box::<Cooperator>::default()])
            .build();
        assert!(matches!(
            result.err(),
            Some(SimulationError::InvalidConfiguration(
                ConfigurationError::NotEnoughParticipants
            ))
        ));

        let result = RoundRobinTournament::builder().build();
        assert!(matches!(
            result.err(),
            Some(SimulationError::InvalidConfiguration(
                ConfigurationError::NeedStrategies
            ))
        ));
    }

    #[test_log::test]
    fn test_zero_repetitions_is_rejected() {
        let result = RoundRobinTournament::builder()
            .strategies(classic_lineup())
            .repetitions(0)
            .build();
        assert!(matches!(
            result.err(),
            Some(SimulationError::InvalidConfiguration(
                ConfigurationError::ZeroRepetitions
            ))
        ));
    }

    #[test_log::test]
    fn test_winner_is_first_entry() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut tournament = RoundRobinTournament::builder()
            .strategies(classic_lineup())
            .rounds(10)
            .repetitions(1)
            .build()
            .unwrap();
        let ranking = tournament.run(&mut rng).unwrap();

        let winner = ranking.winner().unwrap();
        for entry in &ranking {
            assert!(winner.score >= entry.score);
        }
    }
}
