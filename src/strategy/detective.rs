use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

const OPENING: [Action; 4] = [
    Action::Cooperate,
    Action::Defect,
    Action::Cooperate,
    Action::Cooperate,
];

/// Probes the opponent with a fixed C, D, C, C opening. Afterwards, if the
/// opponent ever defected it mirrors their last action; if they never pushed
/// back it defects to exploit them.
#[derive(Default, Debug, Clone, Copy)]
pub struct Detective {
    iteration: usize,
}

impl Strategy for Detective {
    fn name(&self) -> &str {
        "detective"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], opponent: &[Action]) -> Action {
        if self.iteration < OPENING.len() {
            let action = OPENING[self.iteration];
            self.iteration += 1;
            return action;
        }
        if opponent.contains(&Action::Defect) {
            // Mirror. The history is non-empty, a defection is in it.
            *opponent.last().unwrap_or(&Action::Cooperate)
        } else {
            Action::Defect
        }
    }

    fn reset(&mut self) {
        self.iteration = 0;
    }
}
