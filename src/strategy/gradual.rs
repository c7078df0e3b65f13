use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// A gradual forgiveness strategy.
///
/// Cooperates on round 0. Every opponent defection bumps a defection counter
/// and is answered with an immediate defection plus a countdown of that many
/// further defections. Five consecutive opponent cooperations clear the
/// counter, so an opponent that mends its ways is treated as a first
/// offender again.
#[derive(Default, Debug, Clone, Copy)]
pub struct Gradual {
    defection_count: u32,
    cooperation_streak: u32,
    punishment_left: u32,
}

const FORGIVENESS_STREAK: u32 = 5;

impl Strategy for Gradual {
    fn name(&self) -> &str {
        "gradual"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, own: &[Action], opponent: &[Action]) -> Action {
        if own.is_empty() {
            return Action::Cooperate;
        }

        if self.punishment_left > 0 {
            self.punishment_left -= 1;
            return Action::Defect;
        }

        match opponent.last() {
            Some(Action::Defect) => {
                self.defection_count += 1;
                self.cooperation_streak = 0;
                self.punishment_left = self.defection_count;
                Action::Defect
            }
            _ => {
                self.cooperation_streak += 1;
                if self.cooperation_streak >= FORGIVENESS_STREAK {
                    self.defection_count = 0;
                    self.cooperation_streak = 0;
                }
                Action::Cooperate
            }
        }
    }

    fn reset(&mut self) {
        *self = Gradual::default();
    }
}
