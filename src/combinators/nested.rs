//! Flattening nested machines and repeated sub-folding.
//!
//! Every combinator here performs at most one inner transition per `step`
//! call, reporting `Skip` for the bookkeeping moves (switching between the
//! outer and inner machine, feeding a partial fold). That keeps the driver's
//! loop the only loop: arbitrarily long runs cost no stack.

use crate::{
    fold::{Fold, FoldStep},
    machine::Machine,
    step::Step,
};

/// Maps each outer element to a sub-machine and flattens, in order.
///
/// Two-phase state: when `inner` is `None` the outer machine is pulled for
/// the next sub-machine; otherwise the current sub-machine is driven to
/// `Stop` before the outer is consulted again. Every element of sub-machine
/// `k` therefore precedes every element of sub-machine `k + 1`.
pub struct ConcatMap<M, Inner, F> {
    outer: M,
    make: F,
    inner: Option<Inner>,
}

/// Create a machine that flattens the sub-machines produced by `f`.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let items: Vec<_> = concat_map(from_iter(1..=3), |n| from_iter(0..n))
///     .into_iter(())
///     .collect();
/// assert_eq!(items, vec![0, 0, 1, 0, 1, 2]);
/// ```
pub fn concat_map<M, Inner, F>(machine: M, f: F) -> ConcatMap<M, Inner, F> {
    ConcatMap {
        outer: machine,
        make: f,
        inner: None,
    }
}

impl<C, M, Inner, F> Machine<C> for ConcatMap<M, Inner, F>
where
    M: Machine<C>,
    F: FnMut(M::Item) -> Inner,
    Inner: Machine<C>,
{
    type Item = Inner::Item;

    fn step(&mut self, ctx: &C) -> Step<Inner::Item> {
        match &mut self.inner {
            Some(inner) => match inner.step(ctx) {
                Step::Yield(b) => Step::Yield(b),
                Step::Skip => Step::Skip,
                Step::Stop => {
                    self.inner = None;
                    Step::Skip
                }
            },
            None => match self.outer.step(ctx) {
                Step::Yield(a) => {
                    self.inner = Some((self.make)(a));
                    Step::Skip
                }
                Step::Skip => Step::Skip,
                Step::Stop => Step::Stop,
            },
        }
    }
}

/// Flattens seed-and-step sub-streams without boxing machine values.
///
/// Semantically identical to [`ConcatMap`]; the sub-stream is a seed plus a
/// shared step closure instead of a machine value, which avoids per-element
/// allocation on hot paths.
pub struct UnfoldMany<M, I, St, S> {
    outer: M,
    inject: I,
    unfold: St,
    seed: Option<S>,
}

/// Create a machine that expands each outer element into a seeded sub-stream.
///
/// `inject` turns an outer element into a seed; `step` advances the seed,
/// returning `Stop` when that sub-stream is exhausted.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// // countdown from each element
/// let items: Vec<_> = unfold_many(
///     from_iter([2, 3]),
///     |n| n,
///     |_: &(), n: &mut i32| {
///         if *n == 0 {
///             Step::Stop
///         } else {
///             *n -= 1;
///             Step::Yield(*n)
///         }
///     },
/// )
/// .into_iter(())
/// .collect();
/// assert_eq!(items, vec![1, 0, 2, 1, 0]);
/// ```
pub fn unfold_many<M, I, St, S>(machine: M, inject: I, step: St) -> UnfoldMany<M, I, St, S> {
    UnfoldMany {
        outer: machine,
        inject,
        unfold: step,
        seed: None,
    }
}

impl<C, B, M, I, St, S> Machine<C> for UnfoldMany<M, I, St, S>
where
    M: Machine<C>,
    I: FnMut(M::Item) -> S,
    St: FnMut(&C, &mut S) -> Step<B>,
{
    type Item = B;

    fn step(&mut self, ctx: &C) -> Step<B> {
        match &mut self.seed {
            Some(seed) => match (self.unfold)(ctx, seed) {
                Step::Yield(b) => Step::Yield(b),
                Step::Skip => Step::Skip,
                Step::Stop => {
                    self.seed = None;
                    Step::Skip
                }
            },
            None => match self.outer.step(ctx) {
                Step::Yield(a) => {
                    self.seed = Some((self.inject)(a));
                    Step::Skip
                }
                Step::Skip => Step::Skip,
                Step::Stop => Step::Stop,
            },
        }
    }
}

enum Seg {
    /// No run in progress; nothing consumed toward the next one.
    Fresh,
    /// A run is in progress with at least one element consumed.
    Mid,
    /// Terminal.
    Ended,
}

/// Applies a fold repeatedly across a machine, emitting each run's result.
///
/// Created via [`fold_many`] or [`fold_many_post`]; the two differ only on
/// segment boundaries at the end of input (see the constructors).
pub struct FoldMany<M, F, A> {
    machine: M,
    fold: F,
    seg: Seg,
    pending: Option<A>,
    post: bool,
}

/// Create a machine that emits the results of running `fold` repeatedly over
/// `machine`.
///
/// Each run consumes input until the fold completes; a run cut short by the
/// source stopping emits the fold's `finish` value. Empty input emits
/// nothing, and no run is started after the source stops at a segment
/// boundary.
///
/// A fold that completes without consuming any input (such as
/// [`collect_n(0)`](crate::fold::collect_n)) produces an infinite stream of
/// results.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let chunks: Vec<_> = fold_many(from_iter(1..=5), collect_n(2))
///     .into_iter(())
///     .collect();
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn fold_many<M, F, A>(machine: M, fold: F) -> FoldMany<M, F, A> {
    FoldMany {
        machine,
        fold,
        seg: Seg::Fresh,
        pending: None,
        post: false,
    }
}

/// Like [`fold_many`], but the source stopping at a segment boundary still
/// produces one more result from an input-less run.
///
/// On empty input this emits exactly one element: the fold's `finish` of a
/// freshly started run.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// let chunks: Vec<_> = fold_many_post(from_iter(1..=4), collect_n(2))
///     .into_iter(())
///     .collect();
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![]]);
/// ```
pub fn fold_many_post<M, F, A>(machine: M, fold: F) -> FoldMany<M, F, A> {
    FoldMany {
        machine,
        fold,
        seg: Seg::Fresh,
        pending: None,
        post: true,
    }
}

impl<C, A, M, F> Machine<C> for FoldMany<M, F, A>
where
    M: Machine<C, Item = A>,
    F: Fold<A>,
{
    type Item = F::Output;

    fn step(&mut self, ctx: &C) -> Step<F::Output> {
        match self.seg {
            Seg::Ended => Step::Stop,
            Seg::Fresh => {
                let a = match self.pending.take() {
                    Some(a) => a,
                    None => match self.machine.step(ctx) {
                        Step::Yield(a) => a,
                        Step::Skip => return Step::Skip,
                        Step::Stop => {
                            self.seg = Seg::Ended;
                            if !self.post {
                                return Step::Stop;
                            }
                            let out = match self.fold.start() {
                                FoldStep::Done(b) => b,
                                FoldStep::Partial => self.fold.finish(),
                            };
                            return Step::Yield(out);
                        }
                    },
                };
                if let FoldStep::Done(b) = self.fold.start() {
                    // zero-input fold: emit, retry the element next round
                    self.pending = Some(a);
                    return Step::Yield(b);
                }
                match self.fold.step(a) {
                    FoldStep::Done(b) => Step::Yield(b),
                    FoldStep::Partial => {
                        self.seg = Seg::Mid;
                        Step::Skip
                    }
                }
            }
            Seg::Mid => match self.machine.step(ctx) {
                Step::Yield(a) => match self.fold.step(a) {
                    FoldStep::Done(b) => {
                        self.seg = Seg::Fresh;
                        Step::Yield(b)
                    }
                    FoldStep::Partial => Step::Skip,
                },
                Step::Skip => Step::Skip,
                Step::Stop => {
                    self.seg = Seg::Ended;
                    Step::Yield(self.fold.finish())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{empty, from_iter};
    use crate::fold::{collect_n, sum};
    use crate::machine::Machine as _;

    #[test]
    fn test_concat_map_preserves_order() {
        let items: Vec<_> = concat_map(from_iter([10, 20]), |n| from_iter(n..n + 2))
            .into_iter(())
            .collect();
        assert_eq!(items, vec![10, 11, 20, 21]);
    }

    #[test]
    fn test_concat_map_empty_sub_machines() {
        let items: Vec<_> = concat_map(from_iter(0..3), |_| empty::<i32>())
            .into_iter(())
            .collect();
        assert_eq!(items, Vec::<i32>::new());
    }

    #[test]
    fn test_concat_map_empty_outer() {
        let items: Vec<_> = concat_map(empty::<i32>(), |n| from_iter(0..n))
            .into_iter(())
            .collect();
        assert_eq!(items, Vec::<i32>::new());
    }

    #[test]
    fn test_unfold_many_matches_concat_map() {
        let via_unfold: Vec<_> = unfold_many(
            from_iter([2i32, 3]),
            |n| 0..n,
            |_: &(), range: &mut std::ops::Range<i32>| match range.next() {
                Some(v) => Step::Yield(v),
                None => Step::Stop,
            },
        )
        .into_iter(())
        .collect();
        let via_concat: Vec<_> = concat_map(from_iter([2i32, 3]), |n| from_iter(0..n))
            .into_iter(())
            .collect();
        assert_eq!(via_unfold, via_concat);
    }

    #[test]
    fn test_fold_many_chunks() {
        let chunks: Vec<_> = fold_many(from_iter(1..=6), collect_n(2))
            .into_iter(())
            .collect();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_fold_many_short_final_chunk_uses_finish() {
        let chunks: Vec<_> = fold_many(from_iter(1..=5), collect_n(3))
            .into_iter(())
            .collect();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_fold_many_empty_input_emits_nothing() {
        let chunks: Vec<_> = fold_many(empty::<i32>(), collect_n(2))
            .into_iter(())
            .collect();
        assert_eq!(chunks, Vec::<Vec<i32>>::new());
    }

    #[test]
    fn test_fold_many_post_empty_input_emits_one_result() {
        let chunks: Vec<_> = fold_many_post(empty::<i32>(), collect_n(2))
            .into_iter(())
            .collect();
        assert_eq!(chunks, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_fold_many_post_boundary_end_emits_trailing_empty() {
        let chunks: Vec<_> = fold_many_post(from_iter(1..=4), collect_n(2))
            .into_iter(())
            .collect();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![]]);
    }

    #[test]
    fn test_fold_many_post_partial_end_has_no_trailing_empty() {
        let chunks: Vec<_> = fold_many_post(from_iter(1..=5), collect_n(2))
            .into_iter(())
            .collect();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_fold_many_reuses_one_fold_value() {
        // sums never complete on their own, so the whole input is one run
        let sums: Vec<_> = fold_many(from_iter(1..=4), sum::<i32>())
            .into_iter(())
            .collect();
        assert_eq!(sums, vec![10]);
    }
}
