use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// A simple strategy that defects no matter what.
#[derive(Default, Debug, Clone, Copy)]
pub struct Defector {}

impl Strategy for Defector {
    fn name(&self) -> &str {
        "defector"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], _opponent: &[Action]) -> Action {
        Action::Defect
    }
}
