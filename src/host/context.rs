use super::display::{Display, HostError, Slot};
use super::store::Store;
use crate::message::Message;

/// Everything a script can reach during one evaluation.
pub struct Context<'a> {
    store: &'a mut Store,
    display: &'a mut Display,
    message: &'a Message,
    actions: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut Store, display: &'a mut Display, message: &'a Message) -> Self {
        Self {
            store,
            display,
            message,
            actions: Vec::new(),
        }
    }

    pub fn message(&self) -> &Message {
        self.message
    }

    pub fn get(&self, key: &str, default: f64) -> f64 {
        self.store.get(key, default)
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.store.set(key, value);
    }

    pub fn display(&mut self, slot: Slot, text: impl Into<String>) {
        self.display.display(slot, text);
    }

    /// Same as [`Context::display`] with the slot given by name.
    pub fn display_named(&mut self, slot: &str, text: impl Into<String>) -> Result<(), HostError> {
        self.display(slot.parse()?, text);
        Ok(())
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.display.title(text);
    }

    pub fn description(&mut self, text: impl Into<String>) {
        self.display.description(text);
    }

    pub fn action(&mut self, text: impl Into<String>) {
        self.actions.push(text.into());
    }

    pub fn into_actions(self) -> Vec<String> {
        self.actions
    }
}
