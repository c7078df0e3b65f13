use rand::RngCore;

use crate::dilemma::Action;

use super::Strategy;

/// Cycles deterministically through a fixed pattern of actions, indexed by
/// round number modulo the pattern length. The opponent is ignored.
#[derive(Debug, Clone)]
pub struct Periodic {
    name: String,
    pattern: Vec<Action>,
    iteration: usize,
}

impl Periodic {
    /// A periodic strategy over an arbitrary non-empty pattern.
    pub fn new(pattern: Vec<Action>) -> Periodic {
        assert!(!pattern.is_empty(), "pattern must be non-empty");

        let name = pattern
            .iter()
            .map(|action| match action {
                Action::Cooperate => 'c',
                Action::Defect => 'd',
            })
            .collect::<String>();

        Periodic {
            name: format!("periodic-{name}"),
            pattern,
            iteration: 0,
        }
    }

    /// Alternates cooperation and defection, cooperating first.
    pub fn cd() -> Periodic {
        Periodic::new(vec![Action::Cooperate, Action::Defect])
    }

    /// Alternates defection and cooperation, defecting first.
    pub fn dc() -> Periodic {
        Periodic::new(vec![Action::Defect, Action::Cooperate])
    }

    /// Two cooperations then a defection.
    pub fn ccd() -> Periodic {
        Periodic::new(vec![Action::Cooperate, Action::Cooperate, Action::Defect])
    }

    /// One cooperation then two defections.
    pub fn cdd() -> Periodic {
        Periodic::new(vec![Action::Cooperate, Action::Defect, Action::Defect])
    }
}

impl Strategy for Periodic {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _rng: &mut dyn RngCore, _own: &[Action], _opponent: &[Action]) -> Action {
        let action = self.pattern[self.iteration % self.pattern.len()];
        self.iteration += 1;
        action
    }

    fn reset(&mut self) {
        self.iteration = 0;
    }
}
