use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Invalid message: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Message has no value")]
    MissingValue,
    #[error("Message value is not a finite number: {0}")]
    NotFinite(f64),
}

/// A single measurement as delivered to a profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Message {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Message {
            name: name.into(),
            timestamp: 0,
            value: Some(value),
        }
    }

    pub fn parse(line: &[u8]) -> Result<Self, MessageError> {
        Ok(serde_json::from_slice(line)?)
    }

    pub fn value(&self) -> Result<f64, MessageError> {
        match self.value {
            None => Err(MessageError::MissingValue),
            Some(value) if !value.is_finite() => Err(MessageError::NotFinite(value)),
            Some(value) => Ok(value),
        }
    }
}
