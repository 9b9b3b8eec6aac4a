mod callback;
mod executor;
mod registry;

pub use callback::{Callback, Function, IntoCallback};
pub use registry::{Registry, Symbol};

use crate::error::Result;
use crate::number::Number;
use crate::shunting_yard::to_postfix;
use crate::token::Token;
use crate::tokenizer::tokenize;
use executor::Executor;
use log::debug;
use rayon::prelude::*;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Evaluates expressions against a registry of host functions and constants.
///
/// Every evaluation holds the registry read lock while it runs, callbacks included.
/// A callback must not call back into the evaluator that is running it: the
/// mutating methods deadlock on the write lock, and a nested `evaluate` or `parse`
/// can deadlock as soon as another thread is waiting to write.
#[derive(Debug)]
pub struct Evaluator<N> {
    registry: RwLock<Registry<N>>,
}

impl<N: Number> Evaluator<N> {
    /// Creates an evaluator with no functions or constants.
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry<N>) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// Registers a function under `name`, replacing any function or constant of that name.
    /// Names that are not identifiers are ignored with a warning.
    ///
    /// The arity is inferred from the closure's parameter count, or taken from an
    /// explicit [`Callback`].
    ///
    /// ```
    /// use mathexpr_rs::Evaluator;
    ///
    /// let evaluator = Evaluator::<f64>::new();
    /// evaluator.connect("f", |x: f64, y: f64| x + y);
    /// assert_eq!(evaluator.evaluate("f(2, 3)"), Ok(5.0));
    /// ```
    pub fn connect<M>(&self, name: &str, callback: impl IntoCallback<N, M>) {
        let callback = callback.into_callback();
        debug!("Connecting `{}` with arity {}", name, callback.arity());
        self.write().connect(name, callback);
    }

    /// Removes the function registered under `name`; unknown names are ignored.
    pub fn disconnect(&self, name: &str) {
        if self.write().disconnect(name).is_some() {
            debug!("Disconnected `{}`", name);
        }
    }

    pub fn set_constant(&self, name: &str, value: N) {
        debug!("Setting constant `{}` = {}", name, value);
        self.write().set_constant(name, value);
    }

    pub fn remove_constant(&self, name: &str) {
        if self.write().remove_constant(name).is_some() {
            debug!("Removed constant `{}`", name);
        }
    }

    pub fn is_connected(&self, name: &str) -> bool {
        self.read().function(name).is_some()
    }

    pub fn function_names(&self) -> Vec<String> {
        self.read().function_names()
    }

    pub fn constant_names(&self) -> Vec<String> {
        self.read().constant_names()
    }

    /// Tokenizes `expression` and reorders it into postfix form.
    ///
    /// The result can be run any number of times with [`Evaluator::evaluate_postfix`].
    pub fn parse(&self, expression: &str) -> Result<Vec<Token<N>>> {
        let registry = self.read();
        to_postfix(tokenize(expression, &registry)?)
    }

    /// Runs a postfix token sequence, such as one produced by [`Evaluator::parse`].
    pub fn evaluate_postfix(&self, postfix: &[Token<N>]) -> Result<N> {
        let registry = self.read();
        Executor::new(&registry).execute(postfix)
    }

    pub fn evaluate(&self, expression: &str) -> Result<N> {
        let registry = self.read();
        let postfix = to_postfix(tokenize(expression, &registry)?)?;
        let value = Executor::new(&registry).execute(&postfix)?;
        debug!("Evaluated `{}` = {}", expression, value);
        Ok(value)
    }

    /// Evaluates independent expressions in parallel, preserving their order.
    pub fn evaluate_batch(&self, expressions: &[&str]) -> Vec<Result<N>> {
        debug!("Evaluating a batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate(expression))
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry<N>> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<N>> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N: Number> Default for Evaluator<N> {
    fn default() -> Self {
        Self::new()
    }
}
