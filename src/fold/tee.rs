//! Duplicating one input stream into two folds.
//!
//! This module provides the [`TeeWith`] combinator: every element is fed to
//! both inner folds, and their results are combined once both have
//! terminated. Each side may complete early and independently; the overall
//! fold is done only when both sides are.

use crate::fold::{Fold, FoldStep};

/// Create a fold that feeds every element to both `left` and `right` and
/// combines their results.
///
/// Elements are cloned only while both sides are still accepting input; once
/// one side is done the other receives the original value.
///
/// # Examples
///
/// ```rust
/// use rill::prelude::*;
///
/// let avg = fold(
///     &(),
///     from_iter([1.0f64, 2.0, 3.0]),
///     tee_with(|total, n: usize| total / n as f64, sum::<f64>(), count()),
/// );
/// assert_eq!(avg, 2.0);
/// ```
pub fn tee_with<A, R, F1, F2, FN, B1, B2>(
    combine: FN,
    left: F1,
    right: F2,
) -> TeeWith<F1, F2, FN, B1, B2>
where
    A: Clone,
    F1: Fold<A, Output = B1>,
    F2: Fold<A, Output = B2>,
    FN: FnMut(B1, B2) -> R,
{
    TeeWith {
        left,
        right,
        combine,
        left_done: None,
        right_done: None,
    }
}

/// Feeds each element to two inner folds and combines their results.
///
/// Created via [`tee_with`]. Completion of one side is recorded in an
/// `Option` slot while the other side keeps consuming; the combined result
/// is produced once both slots are filled (or at `finish`).
pub struct TeeWith<F1, F2, FN, B1, B2> {
    left: F1,
    right: F2,
    combine: FN,
    left_done: Option<B1>,
    right_done: Option<B2>,
}

impl<F1, F2, FN, B1, B2> TeeWith<F1, F2, FN, B1, B2> {
    fn combined<R>(&mut self) -> FoldStep<R>
    where
        FN: FnMut(B1, B2) -> R,
    {
        match (self.left_done.take(), self.right_done.take()) {
            (Some(b1), Some(b2)) => FoldStep::Done((self.combine)(b1, b2)),
            (l, r) => {
                self.left_done = l;
                self.right_done = r;
                FoldStep::Partial
            }
        }
    }
}

impl<A, R, F1, F2, FN, B1, B2> Fold<A> for TeeWith<F1, F2, FN, B1, B2>
where
    A: Clone,
    F1: Fold<A, Output = B1>,
    F2: Fold<A, Output = B2>,
    FN: FnMut(B1, B2) -> R,
    B1: Clone,
    B2: Clone,
{
    type Output = R;

    fn start(&mut self) -> FoldStep<R> {
        self.left_done = self.left.start().into_done();
        self.right_done = self.right.start().into_done();
        self.combined()
    }

    fn step(&mut self, item: A) -> FoldStep<R> {
        match (self.left_done.is_some(), self.right_done.is_some()) {
            (false, false) => {
                self.left_done = self.left.step(item.clone()).into_done();
                self.right_done = self.right.step(item).into_done();
            }
            (false, true) => {
                self.left_done = self.left.step(item).into_done();
            }
            (true, false) => {
                self.right_done = self.right.step(item).into_done();
            }
            (true, true) => {}
        }
        self.combined()
    }

    fn extract(&mut self) -> R {
        let b1 = match &self.left_done {
            Some(b) => b.clone(),
            None => self.left.extract(),
        };
        let b2 = match &self.right_done {
            Some(b) => b.clone(),
            None => self.right.extract(),
        };
        (self.combine)(b1, b2)
    }

    fn finish(&mut self) -> R {
        let b1 = match self.left_done.take() {
            Some(b) => b,
            None => self.left.finish(),
        };
        let b2 = match self.right_done.take() {
            Some(b) => b,
            None => self.right.finish(),
        };
        (self.combine)(b1, b2)
    }
}
