use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// Cooperates until the opponent's first defection, then defects for the
/// remainder of the match, permanently.
#[derive(Debug, Clone, Copy)]
pub struct Grudger {
    trusting: bool,
}

impl Default for Grudger {
    fn default() -> Self {
        Grudger { trusting: true }
    }
}

impl Strategy for Grudger {
    fn name(&self) -> &str {
        "grudger"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], opponent: &[Action]) -> Action {
        if self.trusting && opponent.contains(&Action::Defect) {
            self.trusting = false;
        }
        if self.trusting {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }

    fn reset(&mut self) {
        self.trusting = true;
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test_log::test]
    fn test_never_forgives() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut grudger = Grudger::default();

        // The opponent defects exactly once, at round 2, then cooperates
        // forever.
        let mut opponent = vec![Action::Cooperate, Action::Cooperate, Action::Defect];
        opponent.extend(std::iter::repeat_n(Action::Cooperate, 20));

        for round in 0..opponent.len() {
            let action = grudger.decide(&mut rng, &[], &opponent[..round]);
            if round <= 2 {
                assert_eq!(Action::Cooperate, action, "round {round}");
            } else {
                assert_eq!(Action::Defect, action, "round {round}");
            }
        }
    }

    #[test_log::test]
    fn test_reset_restores_trust() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut grudger = Grudger::default();

        assert_eq!(
            Action::Defect,
            grudger.decide(&mut rng, &[], &[Action::Defect])
        );
        grudger.reset();
        assert_eq!(Action::Cooperate, grudger.decide(&mut rng, &[], &[]));
    }
}
