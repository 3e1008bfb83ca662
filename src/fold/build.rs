//! Building folds from scratch.
//!
//! The small catalogue of concrete consumers the evaluator is typically run
//! with. Each is a plain struct with a lowercase constructor; all of them
//! reset on `start` and are reusable across runs.

use std::marker::PhantomData;
use std::ops::AddAssign;

use crate::fold::{Fold, FoldStep};

/// Sums every element it is fed.
pub struct Sum<T> {
    total: T,
}

/// Create a fold that sums its input.
///
/// ```rust
/// use rill::prelude::*;
///
/// assert_eq!(fold(&(), from_iter(1..=100), sum::<i64>()), 5050);
/// ```
pub fn sum<T: Default>() -> Sum<T> {
    Sum {
        total: T::default(),
    }
}

impl<T> Fold<T> for Sum<T>
where
    T: Default + AddAssign<T> + Clone,
{
    type Output = T;

    fn start(&mut self) -> FoldStep<T> {
        self.total = T::default();
        FoldStep::Partial
    }

    fn step(&mut self, item: T) -> FoldStep<T> {
        self.total += item;
        FoldStep::Partial
    }

    fn extract(&mut self) -> T {
        self.total.clone()
    }

    fn finish(&mut self) -> T {
        std::mem::take(&mut self.total)
    }
}

/// Counts elements, ignoring their values.
pub struct Count {
    n: usize,
}

/// Create a fold that counts its input.
pub fn count() -> Count {
    Count { n: 0 }
}

impl<A> Fold<A> for Count {
    type Output = usize;

    fn start(&mut self) -> FoldStep<usize> {
        self.n = 0;
        FoldStep::Partial
    }

    fn step(&mut self, _item: A) -> FoldStep<usize> {
        self.n += 1;
        FoldStep::Partial
    }

    fn extract(&mut self) -> usize {
        self.n
    }

    fn finish(&mut self) -> usize {
        std::mem::take(&mut self.n)
    }
}

/// Collects every element into a `Vec`.
pub struct Collect<T> {
    items: Vec<T>,
}

/// Create a fold that collects its input into a `Vec`.
///
/// ```rust
/// use rill::prelude::*;
///
/// let items = fold(&(), from_iter("ab".chars()), collect());
/// assert_eq!(items, vec!['a', 'b']);
/// ```
pub fn collect<T>() -> Collect<T> {
    Collect { items: Vec::new() }
}

impl<T: Clone> Fold<T> for Collect<T> {
    type Output = Vec<T>;

    fn start(&mut self) -> FoldStep<Vec<T>> {
        self.items.clear();
        FoldStep::Partial
    }

    fn step(&mut self, item: T) -> FoldStep<Vec<T>> {
        self.items.push(item);
        FoldStep::Partial
    }

    fn extract(&mut self) -> Vec<T> {
        self.items.clone()
    }

    fn finish(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

/// Collects up to `n` elements, completing as soon as it has them.
pub struct CollectN<T> {
    cap: usize,
    items: Vec<T>,
}

/// Create a fold that is done after collecting `n` elements.
///
/// The early-termination workhorse: run under
/// [`fold_many`](crate::Machine::fold_many) it segments its input into
/// chunks of `n`. A short final chunk is produced by `finish` when the
/// source runs out first.
///
/// ```rust
/// use rill::prelude::*;
///
/// let (chunk, rest) = fold_break(&(), from_iter(1..=5), collect_n(2));
/// assert_eq!(chunk, vec![1, 2]);
/// let rest: Vec<_> = rest.into_iter(()).collect();
/// assert_eq!(rest, vec![3, 4, 5]);
/// ```
pub fn collect_n<T>(n: usize) -> CollectN<T> {
    CollectN {
        cap: n,
        items: Vec::new(),
    }
}

impl<T: Clone> Fold<T> for CollectN<T> {
    type Output = Vec<T>;

    fn start(&mut self) -> FoldStep<Vec<T>> {
        self.items.clear();
        if self.cap == 0 {
            FoldStep::Done(Vec::new())
        } else {
            FoldStep::Partial
        }
    }

    fn step(&mut self, item: T) -> FoldStep<Vec<T>> {
        self.items.push(item);
        if self.items.len() == self.cap {
            FoldStep::Done(std::mem::take(&mut self.items))
        } else {
            FoldStep::Partial
        }
    }

    fn extract(&mut self) -> Vec<T> {
        self.items.clone()
    }

    fn finish(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

/// Completes with the first element it sees.
pub struct First<T> {
    _marker: PhantomData<T>,
}

/// Create a fold that is done after its first input.
///
/// Produces `None` if the input is empty.
pub fn first<T>() -> First<T> {
    First {
        _marker: PhantomData,
    }
}

impl<T> Fold<T> for First<T> {
    type Output = Option<T>;

    fn start(&mut self) -> FoldStep<Option<T>> {
        FoldStep::Partial
    }

    fn step(&mut self, item: T) -> FoldStep<Option<T>> {
        FoldStep::Done(Some(item))
    }

    fn extract(&mut self) -> Option<T> {
        None
    }

    fn finish(&mut self) -> Option<T> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::from_iter;
    use crate::drive::fold;

    #[test]
    fn test_sum_matches_iterator_sum() {
        let total = fold(&(), from_iter(1..=10), sum::<i32>());
        assert_eq!(total, (1..=10).sum());
    }

    #[test]
    fn test_count_ignores_values() {
        let n = fold(&(), from_iter(["a", "b", "c"]), count());
        assert_eq!(n, 3);
    }

    #[test]
    fn test_collect_preserves_order() {
        let items = fold(&(), from_iter([3, 1, 2]), collect());
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn test_collect_n_completes_early() {
        let mut f = collect_n(2);
        assert_eq!(f.start(), FoldStep::Partial);
        assert_eq!(f.step(1), FoldStep::Partial);
        assert_eq!(f.step(2), FoldStep::Done(vec![1, 2]));
    }

    #[test]
    fn test_collect_n_zero_is_done_at_start() {
        let mut f = collect_n::<i32>(0);
        assert_eq!(f.start(), FoldStep::Done(vec![]));
    }

    #[test]
    fn test_first_is_done_on_first_input() {
        let got = fold(&(), from_iter(5..100), first());
        assert_eq!(got, Some(5));

        let none = fold(&(), crate::build::empty::<i32>(), first());
        assert_eq!(none, None);
    }

    #[test]
    fn test_extract_is_a_peek() {
        let mut f = sum::<i32>();
        f.start();
        f.step(1);
        f.step(2);
        assert_eq!(f.extract(), 3);
        // extract does not consume the run
        f.step(3);
        assert_eq!(f.finish(), 6);
    }
}
