use thiserror::Error;

/// Configuration problems. All of these are detected eagerly when a
/// simulation, tournament or evolution is constructed, never mid-run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("round count must be greater than zero")]
    ZeroRounds,
    #[error("repetitions must be greater than zero")]
    ZeroRepetitions,
    #[error("error probability {0} is outside [0, 1]")]
    ErrorProbabilityOutOfRange(f64),
    #[error("at least two individuals are required")]
    NotEnoughParticipants,
    #[error("reproductivity {0} is outside [0, 1]")]
    ReproductivityOutOfRange(f64),
    #[error("reproductivity {0} floors to zero replacements per generation")]
    ReproductivityTooSmall(f64),
    #[error("initial population has {counts} counts for {strategies} strategies")]
    PopulationSizeMismatch { counts: usize, strategies: usize },
    #[error("duplicate strategy name {0:?} in the prototype set")]
    DuplicateStrategyName(String),
    #[error("no strategies were given")]
    NeedStrategies,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// The selection step produced a population of the wrong size. This is a
    /// logic bug in the engine, not a user error.
    #[error("population not conserved after selection: expected {expected}, got {actual}")]
    PopulationNotConserved { expected: usize, actual: usize },
}
