//! Functions for driving a machine against a fold.
//!
//! This module provides the evaluator: [`fold`] runs a machine to
//! completion, [`fold_break`] additionally returns the unconsumed remainder,
//! and [`drive`] is the shared stepping loop both are expressed over.

use crate::{
    fold::{Fold, FoldStep},
    machine::Machine,
    step::Step,
};

/// Drive `machine` against `fold` until one of them finishes.
///
/// The shared primitive under [`fold`] and [`fold_break`]. Returns
/// `Done(b)` if the fold completed first — the machine is positioned exactly
/// after the last element it consumed — or `Partial` if the source stopped
/// first, in which case the fold is still live and `finish` has not been
/// called.
///
/// The loop is iterative; unbounded `Skip` runs cost no stack.
pub fn drive<C, M, F>(ctx: &C, machine: &mut M, fold: &mut F) -> FoldStep<F::Output>
where
    M: Machine<C>,
    F: Fold<M::Item>,
{
    if let FoldStep::Done(b) = fold.start() {
        return FoldStep::Done(b);
    }
    loop {
        match machine.step(ctx) {
            Step::Yield(a) => {
                if let FoldStep::Done(b) = fold.step(a) {
                    return FoldStep::Done(b);
                }
            }
            Step::Skip => continue,
            Step::Stop => return FoldStep::Partial,
        }
    }
}

/// Drive `machine` fully against `fold` and return the fold's result.
///
/// If the fold reaches `Done` first, its result is returned immediately and
/// the remaining input is not drained. If the machine stops first, the
/// fold's `finish` runs on the still-partial accumulator.
///
/// ```rust
/// use rill::prelude::*;
///
/// let total = fold(&(), from_iter(1..=100), sum::<i64>());
/// assert_eq!(total, 5050);
/// ```
pub fn fold<C, M, F>(ctx: &C, mut machine: M, mut fold: F) -> F::Output
where
    M: Machine<C>,
    F: Fold<M::Item>,
{
    match drive(ctx, &mut machine, &mut fold) {
        FoldStep::Done(b) => b,
        FoldStep::Partial => fold.finish(),
    }
}

/// As [`fold`], but also return the unconsumed remainder machine.
///
/// If the fold finished early the remainder resumes exactly at the element
/// after the last one consumed; if the source exhausted first the remainder
/// is empty (all machines built by this crate are fused, so stepping it
/// keeps returning `Stop`).
///
/// ```rust
/// use rill::prelude::*;
///
/// let (got, rest) = fold_break(&(), from_iter(1..=5), first());
/// assert_eq!(got, Some(1));
/// let rest: Vec<_> = rest.into_iter(()).collect();
/// assert_eq!(rest, vec![2, 3, 4, 5]);
/// ```
pub fn fold_break<C, M, F>(ctx: &C, mut machine: M, mut fold: F) -> (F::Output, M)
where
    M: Machine<C>,
    F: Fold<M::Item>,
{
    let out = match drive(ctx, &mut machine, &mut fold) {
        FoldStep::Done(b) => b,
        FoldStep::Partial => fold.finish(),
    };
    (out, machine)
}
