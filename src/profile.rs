use crate::host::{Context, Display, Store};
use crate::message::Message;
use crate::script::{Script, ScriptError};
use serde::{Deserialize, Serialize};

/// Message names a profile listens to. An empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameFilter {
    pub names: Vec<String>,
}

impl NameFilter {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }
}

#[derive(Debug)]
pub enum Evaluation {
    Skipped,
    Evaluated { actions: Vec<String> },
    Failed(ScriptError),
}

/// A script together with the state and display it owns.
pub struct Profile {
    id: usize,
    filter: NameFilter,
    script: Box<dyn Script>,
    store: Store,
    display: Display,
}

impl Profile {
    pub fn new(id: usize, script: Box<dyn Script>, filter: NameFilter) -> Self {
        Self {
            id,
            filter,
            script,
            store: Store::new(),
            display: Display::default(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.script.name()
    }

    pub fn value(&self) -> &Display {
        &self.display
    }

    pub fn eval(&mut self, message: &Message) -> Evaluation {
        if !self.filter.accepts(&message.name) {
            log::debug!("Profile {} ({}) skips message '{}'", self.id, self.name(), message.name);
            return Evaluation::Skipped;
        }

        // Scripts run against scratch copies so a failure leaves nothing half-written
        let mut store = self.store.clone();
        let mut display = self.display.clone();
        let mut ctx = Context::new(&mut store, &mut display, message);
        match self.script.eval(&mut ctx) {
            Ok(()) => {
                let actions = ctx.into_actions();
                self.store = store;
                self.display = display;
                Evaluation::Evaluated { actions }
            }
            Err(e) => {
                log::warn!(
                    "Profile {} ({}) failed on message '{}': {}",
                    self.id,
                    self.name(),
                    message.name,
                    e
                );
                Evaluation::Failed(e)
            }
        }
    }
}

#[cfg(test)]
impl Profile {
    pub fn store(&self) -> &Store {
        &self.store
    }
}
