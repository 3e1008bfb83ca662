//! # Rill: Composable Pull-Based Stream Processing
//!
//! Build high-throughput pipelines from step machines (producers) and folds
//! (consumers), with an optional concurrency layer that decouples production
//! from consumption.
//!
//! ## Core Traits
//!
//! - **[`Machine<C>`](Machine)**: pull-based producers; each `step` yields an
//!   element, skips, or stops, under an immutable context `&C`
//! - **[`Fold<A>`](Fold)**: incremental consumers with their own accumulator
//!   and an early-termination signal
//!
//! ## Key Features
//!
//! - **Composable**: chain machines with `.map()`, `.take()`,
//!   `.concat_map()`, `.fold_many()`; combine folds with [`tee_with`]
//! - **Skip-safe**: every driver is an iterative loop, so unbounded `Skip`
//!   runs never grow the stack
//! - **Zero-cost**: machines and folds are plain generic structs,
//!   monomorphized and inlined; no boxing on hot paths
//! - **Concurrent**: [`concurrent::par_eval`] moves any fold onto a worker
//!   thread behind the identical `Fold` contract
//!
//! ## Example
//!
//! ```
//! use rill::prelude::*;
//!
//! // square, keep while under fifty, sum
//! let m = from_iter(1..).map(|x| x * x).take_while(|x| *x < 50);
//! let total = fold(&(), m, sum::<i32>());
//! assert_eq!(total, 1 + 4 + 9 + 16 + 25 + 36 + 49);
//! ```
//!
//! Evaluating a fold on its own worker thread:
//!
//! ```
//! use rill::prelude::*;
//!
//! let mut f = par_eval(Config::new(), count()).unwrap();
//! for word in ["step", "machines", "fold"] {
//!     f.step(word);
//! }
//! assert_eq!(f.finish(), 3);
//! ```
//!
//! ## Common Functions
//!
//! **Building Machines:**
//! - [`from_iter(it)`](from_iter) - emit every element of an iterator
//! - [`once(a)`](once) / [`once_with(f)`](once_with) - one-shot machines
//! - [`cons(a, m)`](cons) - prepend an element ahead of a machine
//! - [`from_fn(f)`](from_fn) - machine from a transition closure
//!
//! **Execution:**
//! - [`fold(ctx, machine, fold)`](fold()) - run a machine against a fold
//! - [`fold_break(ctx, machine, fold)`](fold_break) - as `fold`, also
//!   returning the unconsumed remainder
//! - [`concurrent::par_eval(config, fold)`](concurrent::par_eval) - evaluate
//!   a fold on a dedicated worker

mod build;
mod combinators;
pub mod concurrent;
mod drive;
mod fold;
mod iter;
mod machine;
pub mod prelude;
mod step;

pub use build::{
    cons, cons_with, empty, from_fn, from_iter, once, once_with, repeat, repeat_with, Cons,
    ConsWith, Empty, FromFn, FromIter, Once, OnceWith, Repeat, RepeatWith,
};
pub use combinators::{
    cmp_by, concat_map, eq_by, fold_many, fold_many_post, map, take, take_end_by, take_while,
    unfold_many, ConcatMap, FoldMany, Map, Take, TakeEndBy, TakeWhile, UnfoldMany,
};
pub use drive::{drive, fold, fold_break};
pub use fold::{
    collect, collect_n, count, first, sum, tee_with, Collect, CollectN, Count, First, Fold,
    FoldStep, Sum, TeeWith,
};
pub use iter::MachineIter;
pub use machine::Machine;
pub use step::Step;
