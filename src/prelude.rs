//! Commonly used imports
//!
//! Use `use rill::prelude::*;` for quick access to the most common types and
//! functions.

// Core types
pub use crate::{Fold, FoldStep, Machine, Step};

// Most common constructors
pub use crate::build::{
    cons, cons_with, empty, from_fn, from_iter, once, once_with, repeat, repeat_with,
};

// Folds
pub use crate::fold::{collect, collect_n, count, first, sum, tee_with};

// Transformations
pub use crate::combinators::{map, take, take_end_by, take_while};

// Flattening and comparison
pub use crate::combinators::{cmp_by, concat_map, eq_by, fold_many, fold_many_post, unfold_many};

// Execution
pub use crate::drive::{drive, fold, fold_break};

// Concurrency
pub use crate::concurrent::{par_eval, par_tee_with, Config};
