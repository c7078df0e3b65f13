use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// Cooperates until the opponent's first defection, then mirrors the
/// opponent's previous action every subsequent round.
///
/// The trust flag means the scan over the opponent's history happens at most
/// once per match.
#[derive(Debug, Clone, Copy)]
pub struct TitForTat {
    trusting: bool,
}

impl Default for TitForTat {
    fn default() -> Self {
        TitForTat { trusting: true }
    }
}

impl Strategy for TitForTat {
    fn name(&self) -> &str {
        "tit-for-tat"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], opponent: &[Action]) -> Action {
        if self.trusting {
            if opponent.contains(&Action::Defect) {
                self.trusting = false;
            } else {
                // Covers the empty history of round 0.
                return Action::Cooperate;
            }
        }
        *opponent.last().unwrap_or(&Action::Cooperate)
    }

    fn reset(&mut self) {
        self.trusting = true;
    }
}
