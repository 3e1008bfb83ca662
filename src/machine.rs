//! Core trait for pull-based step machines.
//!
//! This module defines the [`Machine`] trait, the fundamental producer
//! abstraction in this library. A [`Machine`] represents a sequence as a
//! piece of state plus a transition function: each call to `step` either
//! yields one element, skips (advancing state without output), or stops.
//!
//! # The Machine Trait
//!
//! [`Machine<C>`] represents a producer that:
//! - Emits elements of type `Item`
//! - Is driven by repeated calls to `step(&mut self, ctx)`
//! - Receives an immutable context value `&C` on every transition
//!
//! Drivers must treat `Skip` as "call `step` again" using an iterative loop,
//! never recursion: Skip runs are unbounded.
//!
//! # Examples
//!
//! ```rust
//! use rill::prelude::*;
//!
//! let mut m = from_iter([1, 2, 3]).map(|x| x * 10);
//! assert_eq!(m.uncons(&()), Some(10));
//! assert_eq!(m.uncons(&()), Some(20));
//! assert_eq!(m.uncons(&()), Some(30));
//! assert_eq!(m.uncons(&()), None);
//! ```

use crate::{
    combinators::{
        concat_map, fold_many, fold_many_post, map, take, take_end_by, take_while, ConcatMap,
        FoldMany, Map, Take, TakeEndBy, TakeWhile,
    },
    fold::Fold,
    iter::MachineIter,
    step::Step,
};

/// Core trait for pull-based producers.
///
/// Each call to `step` yields one element, skips, or stops. The machine's
/// state lives in its own fields behind `&mut self`; callers never inspect
/// it directly.
///
/// Once `Stop` has been observed the machine must not be stepped again.
/// All machines built by this crate are fused and keep returning `Stop`,
/// but the contract is on the caller.
///
/// ```rust
/// use rill::prelude::*;
///
/// let mut m = from_iter(1..=3);
/// assert_eq!(m.step(&()), Step::Yield(1));
/// assert_eq!(m.step(&()), Step::Yield(2));
/// assert_eq!(m.step(&()), Step::Yield(3));
/// assert_eq!(m.step(&()), Step::Stop);
/// ```
pub trait Machine<C = ()> {
    /// Type of the elements this machine emits.
    type Item;

    /// Perform one transition under the context `ctx`.
    fn step(&mut self, ctx: &C) -> Step<Self::Item>;

    /// Pull the next element, discarding any number of `Skip`s.
    ///
    /// Returns `None` once the machine stops. The Skip-discard loop is
    /// iterative; arbitrarily long Skip runs cost no stack.
    ///
    /// ```rust
    /// use rill::prelude::*;
    ///
    /// let mut m = from_iter(1..=4).take_while(|x| *x < 3);
    /// assert_eq!(m.uncons(&()), Some(1));
    /// assert_eq!(m.uncons(&()), Some(2));
    /// assert_eq!(m.uncons(&()), None);
    /// ```
    fn uncons(&mut self, ctx: &C) -> Option<Self::Item> {
        loop {
            match self.step(ctx) {
                Step::Yield(a) => return Some(a),
                Step::Skip => continue,
                Step::Stop => return None,
            }
        }
    }

    /// Transform each emitted element.
    ///
    /// `Skip` and `Stop` pass through unchanged.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> B,
    {
        map(self, f)
    }

    /// Emit at most `n` elements, then stop.
    ///
    /// Strict: the source is never pulled again after the `n`th yield, even
    /// if it could produce more.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        take(self, n)
    }

    /// Emit elements while the predicate holds; the first failing element is
    /// dropped.
    fn take_while<P>(self, pred: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        take_while(self, pred)
    }

    /// Emit elements up to and including the first one matching the
    /// predicate, then stop.
    ///
    /// The dual of [`take_while`](Machine::take_while): the terminating
    /// element is part of the output. Used for delimiter-terminated
    /// segmentation where the marker belongs to the segment.
    fn take_end_by<P>(self, pred: P) -> TakeEndBy<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        take_end_by(self, pred)
    }

    /// Map each element to a sub-machine and flatten, in order.
    ///
    /// Every element of the sub-machine produced from element `k` precedes
    /// every element of the sub-machine produced from element `k + 1`.
    fn concat_map<F, Inner>(self, f: F) -> ConcatMap<Self, Inner, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> Inner,
    {
        concat_map(self, f)
    }

    /// Apply a fold repeatedly across this machine, emitting each result.
    ///
    /// A new fold run begins whenever the previous one completes; a run cut
    /// short by the source stopping emits its `finish` value. Empty input
    /// emits nothing. See [`fold_many_post`](Machine::fold_many_post) for
    /// the variant that always emits a trailing result.
    fn fold_many<F>(self, f: F) -> FoldMany<Self, F, Self::Item>
    where
        Self: Sized,
        F: Fold<Self::Item>,
    {
        fold_many(self, f)
    }

    /// Like [`fold_many`](Machine::fold_many), but an empty trailing segment
    /// still produces one result: on empty input this emits exactly one
    /// element, the fold's `finish` of a freshly `start`ed run.
    fn fold_many_post<F>(self, f: F) -> FoldMany<Self, F, Self::Item>
    where
        Self: Sized,
        F: Fold<Self::Item>,
    {
        fold_many_post(self, f)
    }

    /// Box this machine behind a trait object.
    fn boxed(self) -> Box<dyn Machine<C, Item = Self::Item>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    /// Turn this machine into a fused [`Iterator`] owning the context.
    ///
    /// ```rust
    /// use rill::prelude::*;
    ///
    /// let items: Vec<_> = from_iter(1..=3).map(|x| x + 1).into_iter(()).collect();
    /// assert_eq!(items, vec![2, 3, 4]);
    /// ```
    fn into_iter(self, ctx: C) -> MachineIter<C, Self>
    where
        Self: Sized,
    {
        MachineIter::new(ctx, self)
    }
}

impl<C, M> Machine<C> for &mut M
where
    M: Machine<C> + ?Sized,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<Self::Item> {
        (**self).step(ctx)
    }
}

impl<C, M> Machine<C> for Box<M>
where
    M: Machine<C> + ?Sized,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<Self::Item> {
        (**self).step(ctx)
    }
}

/// `None` is the empty machine.
impl<C, M> Machine<C> for Option<M>
where
    M: Machine<C>,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<Self::Item> {
        match self {
            Some(m) => m.step(ctx),
            None => Step::Stop,
        }
    }
}

impl<C, L, R> Machine<C> for either::Either<L, R>
where
    L: Machine<C>,
    R: Machine<C, Item = L::Item>,
{
    type Item = L::Item;

    fn step(&mut self, ctx: &C) -> Step<Self::Item> {
        match self {
            either::Either::Left(l) => l.step(ctx),
            either::Either::Right(r) => r.step(ctx),
        }
    }
}
