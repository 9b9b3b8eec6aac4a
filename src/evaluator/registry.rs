use super::callback::Callback;
use crate::number::Number;
use crate::tokenizer::is_identifier;
use log::warn;
use std::collections::HashMap;

/// What an identifier in an expression refers to.
#[derive(Debug)]
pub enum Symbol<'a, N> {
    Function(&'a Callback<N>),
    Constant(N),
}

/// Names known to an evaluator. A name is either a function or a constant, never both.
///
/// Only identifiers (a letter or `_`, then letters, digits or `_`) can be
/// registered; anything else could never be referenced from an expression.
#[derive(Debug, Clone)]
pub struct Registry<N> {
    functions: HashMap<String, Callback<N>>,
    constants: HashMap<String, N>,
}

impl<N: Number> Registry<N> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// Registers `callback` under `name`, returning the registration it replaced.
    ///
    /// A name that is not an identifier is rejected with a warning.
    pub fn connect(&mut self, name: &str, callback: Callback<N>) -> Option<Callback<N>> {
        if !accepts(name) {
            return None;
        }
        self.constants.remove(name);
        self.functions.insert(name.to_string(), callback)
    }

    pub fn disconnect(&mut self, name: &str) -> Option<Callback<N>> {
        self.functions.remove(name)
    }

    pub fn set_constant(&mut self, name: &str, value: N) -> Option<N> {
        if !accepts(name) {
            return None;
        }
        self.functions.remove(name);
        self.constants.insert(name.to_string(), value)
    }

    pub fn remove_constant(&mut self, name: &str) -> Option<N> {
        self.constants.remove(name)
    }

    pub fn function(&self, name: &str) -> Option<&Callback<N>> {
        self.functions.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<N> {
        self.constants.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol<'_, N>> {
        self.function(name)
            .map(Symbol::Function)
            .or_else(|| self.constant(name).map(Symbol::Constant))
    }

    pub fn function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn constant_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constants.keys().cloned().collect();
        names.sort();
        names
    }
}

fn accepts(name: &str) -> bool {
    let valid = is_identifier(name);
    if !valid {
        warn!("Ignoring registration of `{}`, which is not an identifier", name);
    }
    valid
}

impl<N: Number> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}
