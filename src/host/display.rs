use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum HostError {
    #[error("Unknown display slot: '{0}'")]
    UnknownSlot(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Title,
    Description,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::Description => "description",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Slot::Title),
            "description" => Ok(Slot::Description),
            other => Err(HostError::UnknownSlot(other.to_owned())),
        }
    }
}

/// What a profile currently shows. Slots keep their text until overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Display {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Display {
    pub fn display(&mut self, slot: Slot, text: impl Into<String>) {
        let text = text.into();
        match slot {
            Slot::Title => self.title = Some(text),
            Slot::Description => self.description = Some(text),
        }
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.display(Slot::Title, text);
    }

    pub fn description(&mut self, text: impl Into<String>) {
        self.display(Slot::Description, text);
    }
}
