//! Live-or-fallback results.

use crate::domain::Source;

/// A value produced either by the live upstream or by a local fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<T> {
    Live(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Live(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    pub fn source(&self) -> Source {
        match self {
            Outcome::Live(_) => Source::Live,
            Outcome::Fallback(_) => Source::Fallback,
        }
    }
}
