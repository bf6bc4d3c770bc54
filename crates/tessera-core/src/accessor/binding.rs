//! Write-once cache for legacy accessor bindings.

use std::sync::OnceLock;

use tracing::{error, warn};

use super::legacy::BoxedAccessor;
use crate::error::{AccessError, AccessResult};
use crate::foundation::Subject;

/// Result of binding an operation's legacy strategy.
pub enum Binding<T> {
    /// The accessor was resolved and can be invoked per subject.
    Bound(BoxedAccessor<T>),
    /// Binding failed; the operation returns its sentinel from now on.
    Unavailable(AccessError),
}

/// Observable state of a [`BindingCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
    Unavailable,
}

/// Holds at most one [`Binding`] for an operation, for the process lifetime.
///
/// Concurrent first uses converge on a single binding: the factory runs
/// once and other callers wait for its result.
pub struct BindingCell<T> {
    operation: &'static str,
    cell: OnceLock<Binding<T>>,
}

impl<T> BindingCell<T> {
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            cell: OnceLock::new(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn state(&self) -> BindingState {
        match self.cell.get() {
            None => BindingState::Unbound,
            Some(Binding::Bound(_)) => BindingState::Bound,
            Some(Binding::Unavailable(_)) => BindingState::Unavailable,
        }
    }

    /// Returns the cached binding, running `factory` only on first use.
    pub fn get_or_bind<F>(&self, factory: F) -> &Binding<T>
    where
        F: FnOnce() -> AccessResult<BoxedAccessor<T>>,
    {
        self.cell.get_or_init(|| match factory() {
            Ok(accessor) => Binding::Bound(accessor),
            Err(e) => {
                error!(
                    operation = self.operation,
                    error = %e,
                    "Could not bind legacy accessor, operation permanently falls back"
                );
                Binding::Unavailable(e)
            }
        })
    }

    /// Binds if needed and reads the value for `subject`.
    ///
    /// Returns `None` when the binding is unavailable or this particular
    /// read failed. A failed read leaves the binding intact.
    pub fn read<F>(&self, subject: &dyn Subject, factory: F) -> Option<T>
    where
        F: FnOnce() -> AccessResult<BoxedAccessor<T>>,
    {
        match self.get_or_bind(factory) {
            Binding::Bound(accessor) => match accessor.read(subject) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(
                        operation = self.operation,
                        subject = subject.name(),
                        error = %e,
                        "Legacy read failed, using fallback"
                    );
                    None
                }
            },
            Binding::Unavailable(_) => None,
        }
    }
}

impl<T> std::fmt::Debug for BindingCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingCell")
            .field("operation", &self.operation)
            .field("state", &self.state())
            .finish()
    }
}
