//! Concurrent fold evaluation.
//!
//! This module decouples production from consumption: [`par_eval`] wraps any
//! [`Fold`](crate::Fold) in a channel driven by a dedicated worker thread,
//! and the wrapper satisfies the identical `Fold` contract, so it composes
//! transparently with every combinator that accepts a fold.

mod channel;
mod config;

pub use channel::{par_eval, par_tee_with, ChannelError, ChannelFold, ChannelSnapshot};
pub use config::{Config, ConfigError, DEFAULT_BUFFER_CAPACITY};
