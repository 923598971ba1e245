use std::fmt::Debug;

/// An average over a stream of terms which is updated one term at a time.
pub trait MovingAverage<Term>: Debug {
    fn add_term(&mut self, new_term: Term);

    /// Returns the average; by convention this is 0 when no terms have been added.
    fn value(&self) -> f64;
}
