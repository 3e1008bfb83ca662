//! Transforming and flattening machines.

mod compare;
mod map;
mod nested;
mod take;

pub use compare::{cmp_by, eq_by};
pub use map::{map, Map};
pub use nested::{
    concat_map, fold_many, fold_many_post, unfold_many, ConcatMap, FoldMany, UnfoldMany,
};
pub use take::{take, take_end_by, take_while, Take, TakeEndBy, TakeWhile};
