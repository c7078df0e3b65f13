use rand::{Rng, RngCore};

use crate::dilemma::Action;

use super::Strategy;

/// Win-stay/lose-shift. Opens with two cooperations; afterwards it repeats
/// its own previous action when it matched the opponent's, otherwise flips
/// it. A small per-round chance overrides the rule with a coin flip biased
/// toward defection.
///
/// "Own previous action" is the recorded one, so a noise flip in the match
/// carries into the next decision.
#[derive(Debug, Clone, Copy)]
pub struct Pavlov {
    noise: f64,
    defect_bias: f64,
}

impl Pavlov {
    /// `noise` is the per-round chance the rule is overridden, `defect_bias`
    /// the probability that the override defects. Both must be in [0, 1].
    pub fn new(noise: f64, defect_bias: f64) -> Pavlov {
        assert!((0.0..=1.0).contains(&noise), "noise must be in [0, 1]");
        assert!(
            (0.0..=1.0).contains(&defect_bias),
            "defect_bias must be in [0, 1]"
        );
        Pavlov { noise, defect_bias }
    }
}

impl Default for Pavlov {
    fn default() -> Self {
        Pavlov::new(0.01, 0.75)
    }
}

impl Strategy for Pavlov {
    fn name(&self) -> &str {
        "pavlov"
    }

    fn decide(&mut self, rng: &mut dyn RngCore, own: &[Action], opponent: &[Action]) -> Action {
        if own.len() < 2 || opponent.is_empty() {
            return Action::Cooperate;
        }

        if self.noise > 0.0 && rng.random_bool(self.noise) {
            return if rng.random_bool(self.defect_bias) {
                Action::Defect
            } else {
                Action::Cooperate
            };
        }

        let last_own = own[own.len() - 1];
        let last_opponent = opponent[opponent.len() - 1];
        if last_own == last_opponent {
            last_own
        } else {
            last_own.flip()
        }
    }
}
