/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*             Error types             */
/***************************************/
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("floor {floor} is outside the served range {min}..={max}")]
    FloorOutOfRange { floor: i32, min: i32, max: i32 },

    #[error("'{0}' is not a floor number")]
    InvalidFloor(String),

    #[error("'{0}' is not a direction, expected 'up' or 'down'")]
    InvalidDirection(String),

    #[error("'{0}' is not a request, expected FLOOR:DIR")]
    MalformedRequest(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("dispatcher runtime has stopped")]
    Stopped,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
