use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FleetboardError {
    SignalError(String),
    ClassificationError(String),
    NotificationError(String),
    ConfigurationError(String),
}

impl fmt::Display for FleetboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetboardError::SignalError(msg) => write!(f, "Signal error: {msg}"),
            FleetboardError::ClassificationError(msg) => write!(f, "Classification error: {msg}"),
            FleetboardError::NotificationError(msg) => write!(f, "Notification error: {msg}"),
            FleetboardError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for FleetboardError {}

pub type Result<T> = std::result::Result<T, FleetboardError>;
