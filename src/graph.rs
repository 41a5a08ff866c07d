//! Protocol graph capability.

use core::cmp::Ordering;

/// Order and inheritance information over protocol handles.
///
/// The rewrite engine never inspects protocols itself;
/// it defers to a graph maintained by its caller,
/// which must remain unchanged for the lifetime of a rewrite system.
///
/// The order must be total and respect inheritance:
/// ancestors compare smaller than their descendants.
pub trait ProtocolGraph<P> {
    /// Compare two protocols under the graph's total order.
    fn compare_protocols(&self, p: &P, q: &P) -> Ordering;

    /// Return whether `sub` transitively inherits from `sup`.
    fn inherits_from(&self, sub: &P, sup: &P) -> bool;
}

/// The trivial graph:
/// protocols are ordered by `Ord` and unrelated by inheritance.
impl<P: Ord> ProtocolGraph<P> for () {
    fn compare_protocols(&self, p: &P, q: &P) -> Ordering {
        p.cmp(q)
    }

    fn inherits_from(&self, _sub: &P, _sup: &P) -> bool {
        false
    }
}
