//! Core trait for incremental consumers.
//!
//! This module defines the [`Fold`] trait, the consumer abstraction paired
//! with [`Machine`](crate::Machine). A [`Fold`] owns an accumulator and is
//! fed one element at a time, with the option of terminating early.
//!
//! # The Fold Trait
//!
//! [`Fold<A>`] represents a consumer that:
//! - Accepts elements of type `A`
//! - Produces a result of type `Output`
//! - May declare itself done before the input runs out
//!
//! A fold run is: one `start`, any number of `step`s until either `Done` is
//! observed or the input runs out, then (in the latter case) exactly one
//! `finish`. `start` resets the accumulator, so a single fold value can be
//! run many times — [`fold_many`](crate::Machine::fold_many) depends on
//! this.
//!
//! # Examples
//!
//! ```rust
//! use rill::prelude::*;
//!
//! let total = fold(&(), from_iter(1..=10), sum::<i32>());
//! assert_eq!(total, 55);
//! ```

mod build;
mod tee;

pub use build::{collect, collect_n, count, first, sum, Collect, CollectN, Count, First, Sum};
pub use tee::{tee_with, TeeWith};

/// Result of feeding a fold: still accumulating, or done with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldStep<B> {
    /// The fold wants more input.
    Partial,
    /// The fold has terminated with its result; it must not be stepped
    /// again until restarted.
    Done(B),
}

impl<B> FoldStep<B> {
    /// Returns `true` if the step is `Done`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rill::FoldStep;
    ///
    /// let x: FoldStep<i32> = FoldStep::Done(3);
    /// assert!(x.is_done());
    /// assert!(!FoldStep::<i32>::Partial.is_done());
    /// ```
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, FoldStep::Done(_))
    }

    /// Converts from `FoldStep<B>` to `Option<B>`, discarding `Partial`.
    #[inline]
    pub fn into_done(self) -> Option<B> {
        match self {
            FoldStep::Done(b) => Some(b),
            FoldStep::Partial => None,
        }
    }

    /// Maps a `FoldStep<B>` to `FoldStep<C>` by applying a function to the
    /// result of a `Done`.
    #[inline]
    pub fn map<C, F>(self, f: F) -> FoldStep<C>
    where
        F: FnOnce(B) -> C,
    {
        match self {
            FoldStep::Done(b) => FoldStep::Done(f(b)),
            FoldStep::Partial => FoldStep::Partial,
        }
    }
}

/// Core trait for incremental consumers with early termination.
///
/// # Contract
///
/// - `start` initializes (or resets) the accumulator and must be called
///   before the first `step` of each run. It may already return `Done` for
///   folds that need no input.
/// - Once `Done` has been observed from `start` or `step`, the fold must not
///   be stepped again within the run; the carried value is the result and
///   `finish` is not called.
/// - If the input runs out while the fold is still `Partial`, `finish` is
///   called exactly once to produce the result.
/// - `extract` is a non-terminal peek at the current accumulator (it may
///   clone). It must not be called on a concurrently evaluated fold — see
///   [`ChannelFold`](crate::concurrent::ChannelFold).
///
/// ```rust
/// use rill::prelude::*;
///
/// let mut f = sum::<i32>();
/// assert_eq!(f.start(), FoldStep::Partial);
/// assert_eq!(f.step(2), FoldStep::Partial);
/// assert_eq!(f.step(3), FoldStep::Partial);
/// assert_eq!(f.extract(), 5);
/// assert_eq!(f.finish(), 5);
/// ```
pub trait Fold<A> {
    /// Type of the final result.
    type Output;

    /// Initialize or reset the accumulator, beginning a new run.
    fn start(&mut self) -> FoldStep<Self::Output>;

    /// Feed one element.
    fn step(&mut self, item: A) -> FoldStep<Self::Output>;

    /// Peek at the result the current accumulator would produce.
    fn extract(&mut self) -> Self::Output;

    /// Terminate the run, producing the result from a still-partial
    /// accumulator. The accumulator is left unspecified; call `start`
    /// before reusing the fold.
    fn finish(&mut self) -> Self::Output;
}

impl<A, F> Fold<A> for &mut F
where
    F: Fold<A> + ?Sized,
{
    type Output = F::Output;

    fn start(&mut self) -> FoldStep<Self::Output> {
        (**self).start()
    }

    fn step(&mut self, item: A) -> FoldStep<Self::Output> {
        (**self).step(item)
    }

    fn extract(&mut self) -> Self::Output {
        (**self).extract()
    }

    fn finish(&mut self) -> Self::Output {
        (**self).finish()
    }
}

impl<A, F> Fold<A> for Box<F>
where
    F: Fold<A> + ?Sized,
{
    type Output = F::Output;

    fn start(&mut self) -> FoldStep<Self::Output> {
        (**self).start()
    }

    fn step(&mut self, item: A) -> FoldStep<Self::Output> {
        (**self).step(item)
    }

    fn extract(&mut self) -> Self::Output {
        (**self).extract()
    }

    fn finish(&mut self) -> Self::Output {
        (**self).finish()
    }
}

impl<A, L, R> Fold<A> for either::Either<L, R>
where
    L: Fold<A>,
    R: Fold<A, Output = L::Output>,
{
    type Output = L::Output;

    fn start(&mut self) -> FoldStep<Self::Output> {
        match self {
            either::Either::Left(l) => l.start(),
            either::Either::Right(r) => r.start(),
        }
    }

    fn step(&mut self, item: A) -> FoldStep<Self::Output> {
        match self {
            either::Either::Left(l) => l.step(item),
            either::Either::Right(r) => r.step(item),
        }
    }

    fn extract(&mut self) -> Self::Output {
        match self {
            either::Either::Left(l) => l.extract(),
            either::Either::Right(r) => r.extract(),
        }
    }

    fn finish(&mut self) -> Self::Output {
        match self {
            either::Either::Left(l) => l.finish(),
            either::Either::Right(r) => r.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_step_is_done_and_into_done() {
        let d: FoldStep<i32> = FoldStep::Done(7);
        let p: FoldStep<i32> = FoldStep::Partial;

        assert!(d.is_done());
        assert!(!p.is_done());
        assert_eq!(d.into_done(), Some(7));
        assert_eq!(p.into_done(), None);
    }

    #[test]
    fn test_fold_step_map() {
        let d: FoldStep<i32> = FoldStep::Done(7);
        assert_eq!(d.map(|x| x * 2), FoldStep::Done(14));
        assert_eq!(FoldStep::<i32>::Partial.map(|x| x * 2), FoldStep::Partial);
    }

    #[test]
    fn test_start_resets_for_reuse() {
        let mut f = sum::<i32>();
        assert_eq!(f.start(), FoldStep::Partial);
        f.step(5);
        assert_eq!(f.finish(), 5);

        assert_eq!(f.start(), FoldStep::Partial);
        f.step(2);
        assert_eq!(f.finish(), 2);
    }

    #[test]
    fn test_mut_ref_fold_delegates() {
        let mut f = sum::<i32>();
        {
            let r = &mut f;
            let total = crate::drive::fold(&(), crate::build::from_iter(1..=3), r);
            assert_eq!(total, 6);
        }
        // reusable afterwards through a fresh start
        let total = crate::drive::fold(&(), crate::build::from_iter(1..=4), &mut f);
        assert_eq!(total, 10);
    }

    #[test]
    fn test_either_fold_selects_branch() {
        let mut left: either::Either<Sum<i32>, Sum<i32>> = either::Either::Left(sum());
        assert_eq!(left.start(), FoldStep::Partial);
        left.step(4);
        left.step(5);
        assert_eq!(left.finish(), 9);

        let mut right: either::Either<Sum<i32>, Sum<i32>> = either::Either::Right(sum());
        assert_eq!(right.start(), FoldStep::Partial);
        right.step(1);
        assert_eq!(right.finish(), 1);
    }
}
