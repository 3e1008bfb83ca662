//! Building machines from scratch.
//!
//! This module provides functions and types for creating new step machines.

mod source;

// Re-export building blocks
pub use source::{
    cons, cons_with, empty, from_fn, from_iter, once, once_with, repeat, repeat_with, Cons,
    ConsWith, Empty, FromFn, FromIter, Once, OnceWith, Repeat, RepeatWith,
};
