//! Lexicographic comparison of two machines.

use std::cmp::Ordering;

use crate::machine::Machine;

/// Compare two machines element-wise under `eq`, without materializing
/// either side.
///
/// Short-circuits on the first mismatch; any length difference makes the
/// machines unequal.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
///
/// assert!(eq_by(&(), from_iter(1..=3), from_iter([1, 2, 3]), |a, b| a == b));
/// assert!(!eq_by(&(), from_iter(1..=3), from_iter(1..=4), |a, b| a == b));
/// ```
pub fn eq_by<C, L, R, F>(ctx: &C, mut left: L, mut right: R, mut eq: F) -> bool
where
    L: Machine<C>,
    R: Machine<C>,
    F: FnMut(&L::Item, &R::Item) -> bool,
{
    loop {
        match (left.uncons(ctx), right.uncons(ctx)) {
            (Some(a), Some(b)) => {
                if !eq(&a, &b) {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Order two machines lexicographically under `cmp`.
///
/// Short-circuits on the first non-equal pair; a machine that is a strict
/// prefix of the other orders before it.
///
/// # Examples
///
/// ```
/// use rill::prelude::*;
/// use std::cmp::Ordering;
///
/// let ord = cmp_by(&(), from_iter([1, 2]), from_iter([1, 2, 3]), |a, b| a.cmp(b));
/// assert_eq!(ord, Ordering::Less); // shorter prefix orders first
/// ```
pub fn cmp_by<C, L, R, F>(ctx: &C, mut left: L, mut right: R, mut cmp: F) -> Ordering
where
    L: Machine<C>,
    R: Machine<C>,
    F: FnMut(&L::Item, &R::Item) -> Ordering,
{
    loop {
        match (left.uncons(ctx), right.uncons(ctx)) {
            (Some(a), Some(b)) => match cmp(&a, &b) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_iter, repeat_with};
    use crate::machine::Machine as _;

    #[test]
    fn test_eq_by_equal_sequences() {
        assert!(eq_by(&(), from_iter(1..=5), from_iter(1..=5), |a, b| a == b));
    }

    #[test]
    fn test_eq_by_mismatched_element() {
        assert!(!eq_by(
            &(),
            from_iter([1, 2, 3]),
            from_iter([1, 9, 3]),
            |a, b| a == b
        ));
    }

    #[test]
    fn test_eq_by_length_mismatch_is_unequal() {
        assert!(!eq_by(&(), from_iter(1..=2), from_iter(1..=3), |a, b| a == b));
        assert!(!eq_by(&(), from_iter(1..=3), from_iter(1..=2), |a, b| a == b));
    }

    #[test]
    fn test_eq_by_short_circuits_on_mismatch() {
        // right side is infinite; the first mismatch must end the comparison
        let mut n = 0;
        let infinite = repeat_with(move || {
            n += 1;
            n
        });
        assert!(!eq_by(&(), from_iter([1, 0]), infinite, |a, b| a == b));
    }

    #[test]
    fn test_cmp_by_orderings() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(
            cmp_by(&(), from_iter([1, 2]), from_iter([1, 3]), cmp),
            Ordering::Less
        );
        assert_eq!(
            cmp_by(&(), from_iter([2]), from_iter([1, 9]), cmp),
            Ordering::Greater
        );
        assert_eq!(
            cmp_by(&(), from_iter([1, 2]), from_iter([1, 2]), cmp),
            Ordering::Equal
        );
    }

    #[test]
    fn test_cmp_by_prefix_orders_first() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(
            cmp_by(&(), from_iter([1, 2]), from_iter([1, 2, 0]), cmp),
            Ordering::Less
        );
    }

    #[test]
    fn test_comparison_respects_skips() {
        let lhs = crate::machine::Machine::<()>::take_while(from_iter(0..10), |x: &i32| *x < 3);
        let rhs = from_iter([0, 1, 2]);
        assert!(eq_by(&(), lhs, rhs, |a, b| a == b));
    }
}
