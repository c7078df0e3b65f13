use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// A simple strategy that cooperates no matter what.
#[derive(Default, Debug, Clone, Copy)]
pub struct Cooperator {}

impl Strategy for Cooperator {
    fn name(&self) -> &str {
        "cooperator"
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], _opponent: &[Action]) -> Action {
        Action::Cooperate
    }
}
