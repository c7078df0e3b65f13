//! The atomic move of a round and the 2x2 payoff table that scores a pair of
//! moves.

/// One move in one round of the dilemma.
///
/// Cooperate is index 0 and Defect is index 1 in the payoff table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// The opposite action. Used for noise flips and for the
    /// lose-shift half of win-stay/lose-shift strategies.
    pub fn flip(self) -> Action {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    fn index(self) -> usize {
        match self {
            Action::Cooperate => 0,
            Action::Defect => 1,
        }
    }
}

/// A 2x2 symmetric dilemma.
///
/// The table is transpose-symmetric by construction: the payoff the row
/// player gets for `(a, b)` is the payoff the column player gets for
/// `(b, a)`. It is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dilemma {
    matrix: [[f64; 2]; 2],
}

impl Dilemma {
    /// Build a dilemma from its four payoffs:
    ///
    /// * `cc` — both cooperate
    /// * `cd` — we cooperate, the opponent defects
    /// * `dc` — we defect, the opponent cooperates
    /// * `dd` — both defect
    pub const fn new(cc: f64, cd: f64, dc: f64, dd: f64) -> Dilemma {
        Dilemma {
            matrix: [[cc, cd], [dc, dd]],
        }
    }

    /// The (2, -1, 3, 0) prisoner's dilemma used in most teaching material.
    pub const fn classic() -> Dilemma {
        Dilemma::new(2.0, -1.0, 3.0, 0.0)
    }

    /// Score one round. Returns `(payoff_self, payoff_other)`.
    ///
    /// Pure table lookup, no error conditions: every `Action` pair is a
    /// valid index.
    pub fn evaluate(&self, action_self: Action, action_other: Action) -> (f64, f64) {
        (
            self.matrix[action_self.index()][action_other.index()],
            self.matrix[action_other.index()][action_self.index()],
        )
    }

    /// Re-derive the cumulative score pair of a whole match from the two
    /// recorded histories. Rounds past the shorter history are ignored.
    pub fn score_histories(&self, own: &[Action], opponent: &[Action]) -> (f64, f64) {
        own.iter()
            .zip(opponent.iter())
            .map(|(a, b)| self.evaluate(*a, *b))
            .fold((0.0, 0.0), |acc, round| (acc.0 + round.0, acc.1 + round.1))
    }
}

impl Default for Dilemma {
    fn default() -> Self {
        Dilemma::classic()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const ACTIONS: [Action; 2] = [Action::Cooperate, Action::Defect];

    #[test]
    fn test_evaluate_all_pairs() {
        let dilemma = Dilemma::classic();

        assert_eq!(
            (2.0, 2.0),
            dilemma.evaluate(Action::Cooperate, Action::Cooperate)
        );
        assert_eq!(
            (-1.0, 3.0),
            dilemma.evaluate(Action::Cooperate, Action::Defect)
        );
        assert_eq!(
            (3.0, -1.0),
            dilemma.evaluate(Action::Defect, Action::Cooperate)
        );
        assert_eq!((0.0, 0.0), dilemma.evaluate(Action::Defect, Action::Defect));
    }

    #[test]
    fn test_evaluate_transpose_symmetric() {
        let dilemma = Dilemma::new(13.0, 0.0, 20.0, 4.0);

        for a in ACTIONS {
            for b in ACTIONS {
                let (sa, sb) = dilemma.evaluate(a, b);
                assert_eq!((sb, sa), dilemma.evaluate(b, a));
            }
        }
    }

    #[test]
    fn test_score_histories_sums_rounds() {
        let dilemma = Dilemma::classic();
        let own = vec![Action::Cooperate, Action::Defect, Action::Defect];
        let opponent = vec![Action::Defect, Action::Cooperate, Action::Defect];

        let (own_score, opponent_score) = dilemma.score_histories(&own, &opponent);
        assert_relative_eq!(-1.0 + 3.0 + 0.0, own_score);
        assert_relative_eq!(3.0 + -1.0 + 0.0, opponent_score);
    }

    #[test]
    fn test_flip_is_involution() {
        for a in ACTIONS {
            assert_eq!(a, a.flip().flip());
            assert_ne!(a, a.flip());
        }
    }
}
