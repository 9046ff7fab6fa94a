use thiserror::Error;

/// Malformed generation parameters. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("at least one division is required")]
    NoDivisions,

    #[error("round robin needs an even number of clubs per division, got {0}")]
    OddClubCount(usize),

    #[error("a division needs at least 2 clubs, got {0}")]
    TooFewClubs(usize),

    #[error("squad size bounds invalid: min {min}, max {max} (legal minimum is {legal_min})")]
    SquadBounds { min: u8, max: u8, legal_min: u8 },

    #[error("promotion places ({promotion}) and relegation places ({relegation}) must match")]
    UnbalancedExchange { promotion: usize, relegation: usize },

    #[error("{places} exchange places do not fit a division of {clubs} clubs")]
    ExchangeTooWide { places: usize, clubs: usize },

    #[error("days between rounds must be positive")]
    ZeroRoundInterval,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("could not read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("could not parse config: {0}")]
    Parse(String),
}

/// An intent dispatched from a state (or by an actor) that forbids it.
///
/// The engine treats this as a no-op: the live state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{intent} rejected: {reason}")]
pub struct IllegalIntent {
    pub intent: &'static str,
    pub reason: String,
}

impl IllegalIntent {
    pub fn new(intent: &'static str, reason: impl Into<String>) -> Self {
        Self {
            intent,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Illegal(#[from] IllegalIntent),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_intent_message() {
        let err = IllegalIntent::new("SELECT_CLUB", "a club is already bound");
        let message = "SELECT_CLUB rejected: a club is already bound";
        assert_eq!(err.to_string(), message);

        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Illegal(_)));
    }

    #[test]
    fn test_config_error_converts_transparently() {
        let core: CoreError = ConfigError::OddClubCount(5).into();
        assert!(core.to_string().contains("even number"));
    }
}
