//! Bounding machine output.

use crate::{machine::Machine, step::Step};

/// Emits at most `n` elements from the wrapped machine.
///
/// Carries the remaining count in its state. Strict: once the count hits
/// zero the source is never pulled again, so an infinite or effectful source
/// sees exactly `n` successful pulls.
pub struct Take<M> {
    machine: M,
    remaining: usize,
}

/// Create a machine that emits at most `n` elements of `machine`.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// // bounded view of an infinite source
/// let items: Vec<_> = take(repeat(1), 4).into_iter(()).collect();
/// assert_eq!(items, vec![1, 1, 1, 1]);
/// ```
pub fn take<M>(machine: M, n: usize) -> Take<M> {
    Take {
        machine,
        remaining: n,
    }
}

impl<C, M> Machine<C> for Take<M>
where
    M: Machine<C>,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<M::Item> {
        if self.remaining == 0 {
            return Step::Stop;
        }
        match self.machine.step(ctx) {
            Step::Yield(a) => {
                self.remaining -= 1;
                Step::Yield(a)
            }
            Step::Skip => Step::Skip,
            Step::Stop => {
                self.remaining = 0;
                Step::Stop
            }
        }
    }
}

/// Emits elements while a predicate holds.
///
/// The first failing element is evaluated but not emitted; the machine is
/// fused afterwards and never pulls the source again.
pub struct TakeWhile<M, P> {
    machine: M,
    pred: P,
    done: bool,
}

/// Create a machine that emits elements of `machine` while `pred` holds.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let items: Vec<_> = take_while(from_iter([1, 2, 9, 3]), |x: &i32| *x < 5)
///     .into_iter(())
///     .collect();
/// assert_eq!(items, vec![1, 2]); // 9 fails the predicate and is dropped
/// ```
pub fn take_while<M, P>(machine: M, pred: P) -> TakeWhile<M, P> {
    TakeWhile {
        machine,
        pred,
        done: false,
    }
}

impl<C, M, P> Machine<C> for TakeWhile<M, P>
where
    M: Machine<C>,
    P: FnMut(&M::Item) -> bool,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<M::Item> {
        if self.done {
            return Step::Stop;
        }
        match self.machine.step(ctx) {
            Step::Yield(a) => {
                if (self.pred)(&a) {
                    Step::Yield(a)
                } else {
                    self.done = true;
                    Step::Stop
                }
            }
            Step::Skip => Step::Skip,
            Step::Stop => {
                self.done = true;
                Step::Stop
            }
        }
    }
}

/// Emits elements up to and including the first one matching a predicate.
///
/// The dual of [`TakeWhile`]: the terminating element is emitted before the
/// machine stops. Used for delimiter-terminated segmentation where the
/// marker is part of the segment.
pub struct TakeEndBy<M, P> {
    machine: M,
    pred: P,
    done: bool,
}

/// Create a machine that emits elements of `machine` up to and including the
/// first one matching `pred`.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let items: Vec<_> = take_end_by(from_iter("ab;cd".chars()), |c: &char| *c == ';')
///     .into_iter(())
///     .collect();
/// assert_eq!(items, vec!['a', 'b', ';']); // the marker is emitted
/// ```
pub fn take_end_by<M, P>(machine: M, pred: P) -> TakeEndBy<M, P> {
    TakeEndBy {
        machine,
        pred,
        done: false,
    }
}

impl<C, M, P> Machine<C> for TakeEndBy<M, P>
where
    M: Machine<C>,
    P: FnMut(&M::Item) -> bool,
{
    type Item = M::Item;

    fn step(&mut self, ctx: &C) -> Step<M::Item> {
        if self.done {
            return Step::Stop;
        }
        match self.machine.step(ctx) {
            Step::Yield(a) => {
                if (self.pred)(&a) {
                    self.done = true;
                }
                Step::Yield(a)
            }
            Step::Skip => Step::Skip,
            Step::Stop => {
                self.done = true;
                Step::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_iter, repeat_with};

    #[test]
    fn test_take_exactly_n_from_infinite_source() {
        let mut pulls = 0;
        let src = repeat_with(move || {
            pulls += 1;
            pulls
        });
        let items: Vec<_> = take(src, 5).into_iter(()).collect();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_take_never_pulls_past_n() {
        use std::cell::Cell;
        use std::rc::Rc;

        let pulls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&pulls);
        let src = repeat_with(move || {
            counter.set(counter.get() + 1);
            0
        });
        let mut m = take(src, 2);
        while m.uncons(&()).is_some() {}
        // stepping a drained Take must not touch the source
        assert_eq!(m.step(&()), Step::Stop);
        assert_eq!(pulls.get(), 2);
    }

    #[test]
    fn test_take_shorter_source_stops_early() {
        let items: Vec<_> = take(from_iter(1..=2), 10).into_iter(()).collect();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_take_while_drops_failing_element() {
        let mut m = take_while(from_iter([1, 5, 2]), |x: &i32| *x < 5);
        assert_eq!(m.uncons(&()), Some(1));
        assert_eq!(m.uncons(&()), None);
        assert_eq!(m.step(&()), Step::Stop);
    }

    #[test]
    fn test_take_while_all_pass() {
        let items: Vec<_> = take_while(from_iter(1..=3), |_: &i32| true).into_iter(()).collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_take_end_by_yields_terminator_then_stops() {
        let mut m = take_end_by(from_iter([1, 2, 7, 3]), |x: &i32| *x == 7);
        assert_eq!(m.uncons(&()), Some(1));
        assert_eq!(m.uncons(&()), Some(2));
        assert_eq!(m.uncons(&()), Some(7));
        assert_eq!(m.uncons(&()), None);
    }

    #[test]
    fn test_take_end_by_without_terminator_drains_source() {
        let items: Vec<_> = take_end_by(from_iter(1..=3), |x: &i32| *x == 9)
            .into_iter(())
            .collect();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
