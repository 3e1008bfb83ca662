//! Transforming machine output.

use crate::{machine::Machine, step::Step};

/// Transforms each element emitted by the wrapped machine.
///
/// `Skip` and `Stop` pass through unchanged.
pub struct Map<M, F> {
    machine: M,
    f: F,
}

/// Create a machine that applies `f` to every element of `machine`.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let mut m = map(from_iter(1..=2), |x| x * 10);
/// assert_eq!(m.uncons(&()), Some(10));
/// assert_eq!(m.uncons(&()), Some(20));
/// assert_eq!(m.uncons(&()), None);
/// ```
pub fn map<M, F>(machine: M, f: F) -> Map<M, F> {
    Map { machine, f }
}

impl<C, B, M, F> Machine<C> for Map<M, F>
where
    M: Machine<C>,
    F: FnMut(M::Item) -> B,
{
    type Item = B;

    fn step(&mut self, ctx: &C) -> Step<B> {
        self.machine.step(ctx).map(&mut self.f)
    }
}
