//! Atoms of the rewriting alphabet.

use crate::ProtocolGraph;
use alloc::{string::String, vec::Vec};
use core::cmp::Ordering;
use core::fmt::{self, Display};

/// Atom of the rewriting alphabet.
///
/// Atoms are immutable value objects; equality is structural.
/// The protocol handle type `P` and the layout constraint type `L`
/// are supplied by the caller;
/// the engine only ever compares and clones them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Atom<P, L> {
    /// unqualified member name
    Name(String),
    /// reference to a protocol
    Protocol(P),
    /// associated type, qualified by the protocols declaring it
    ///
    /// The protocol list is non-empty,
    /// sorted ascending under the graph order, and
    /// inheritance-minimal (no protocol inherits from another one).
    AssociatedType(Vec<P>, String),
    /// generic parameter, given by depth and index within its signature
    GenericParam(usize, usize),
    /// layout constraint, ordered by `Ord`
    Layout(L),
}

impl<P, L> Atom<P, L> {
    /// Rank of the atom's kind in the atom order.
    fn kind(&self) -> u8 {
        match self {
            Self::Name(_) => 0,
            Self::Protocol(_) => 1,
            Self::AssociatedType(..) => 2,
            Self::GenericParam(..) => 3,
            Self::Layout(_) => 4,
        }
    }
}

impl<P, L: Ord> Atom<P, L> {
    /// Compare two atoms under the order induced by a protocol graph.
    ///
    /// Atoms of different kinds compare by kind:
    /// names before protocols before associated types
    /// before generic parameters before layout constraints.
    ///
    /// Associated types qualified by more protocols come first.
    /// This makes the atom produced by an associated type merge
    /// sort below both of its parents,
    /// so rule insertion always orients rules towards the merged atom.
    pub fn compare(&self, other: &Self, graph: &impl ProtocolGraph<P>) -> Ordering {
        match (self, other) {
            (Self::Name(name), Self::Name(other_name)) => name.cmp(other_name),
            (Self::Protocol(p), Self::Protocol(q)) => graph.compare_protocols(p, q),
            (Self::AssociatedType(protos, name), Self::AssociatedType(other_protos, other_name)) => {
                other_protos
                    .len()
                    .cmp(&protos.len())
                    .then_with(|| lexicographic(protos, other_protos, graph))
                    .then_with(|| name.cmp(other_name))
            }
            (Self::GenericParam(depth, index), Self::GenericParam(other_depth, other_index)) => {
                depth.cmp(other_depth).then_with(|| index.cmp(other_index))
            }
            (Self::Layout(l), Self::Layout(other_l)) => l.cmp(other_l),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

/// Compare two equally long protocol lists pointwise.
fn lexicographic<P>(ps: &[P], qs: &[P], graph: &impl ProtocolGraph<P>) -> Ordering {
    ps.iter()
        .zip(qs)
        .map(|(p, q)| graph.compare_protocols(p, q))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl<P: Display, L: Display> Display for Atom<P, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(name) => name.fmt(f),
            Self::Protocol(p) => write!(f, "[{}]", p),
            Self::AssociatedType(protos, name) => {
                write!(f, "[")?;
                let mut first = true;
                for proto in protos {
                    if !first {
                        write!(f, "&")?;
                    } else {
                        first = false;
                    }
                    write!(f, "{}", proto)?;
                }
                write!(f, ":{}]", name)
            }
            Self::GenericParam(depth, index) => write!(f, "τ_{}_{}", depth, index),
            Self::Layout(l) => write!(f, "[layout: {}]", l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    type At = Atom<char, &'static str>;

    #[test]
    fn kinds() {
        let atoms: [At; 5] = [
            Atom::Name("A".into()),
            Atom::Protocol('P'),
            Atom::AssociatedType(vec!['P'], "T".into()),
            Atom::GenericParam(0, 0),
            Atom::Layout("class"),
        ];
        for (i, a) in atoms.iter().enumerate() {
            for (j, b) in atoms.iter().enumerate() {
                assert_eq!(a.compare(b, &()), i.cmp(&j));
            }
        }
    }

    #[test]
    fn more_protocols_first() {
        let small: At = Atom::AssociatedType(vec!['P', 'Q'], "T".into());
        let large: At = Atom::AssociatedType(vec!['P'], "T".into());
        assert_eq!(small.compare(&large, &()), Ordering::Less);
        assert_eq!(large.compare(&small, &()), Ordering::Greater);
    }

    #[test]
    fn equal_cardinality() {
        let a: At = Atom::AssociatedType(vec!['P'], "T".into());
        let b: At = Atom::AssociatedType(vec!['Q'], "T".into());
        let c: At = Atom::AssociatedType(vec!['Q'], "U".into());
        assert_eq!(a.compare(&b, &()), Ordering::Less);
        assert_eq!(b.compare(&c, &()), Ordering::Less);
        assert_eq!(a.compare(&a, &()), Ordering::Equal);
    }

    #[test]
    fn generic_params() {
        let a = At::GenericParam(0, 1);
        assert_eq!(a.compare(&At::GenericParam(1, 0), &()), Ordering::Less);
        assert_eq!(a.compare(&At::GenericParam(0, 0), &()), Ordering::Greater);
    }

    #[test]
    fn display() {
        assert_eq!(At::Name("foo".into()).to_string(), "foo");
        assert_eq!(At::Protocol('P').to_string(), "[P]");
        let at: At = Atom::AssociatedType(vec!['P', 'Q'], "T".into());
        assert_eq!(at.to_string(), "[P&Q:T]");
        assert_eq!(At::GenericParam(1, 2).to_string(), "τ_1_2");
        assert_eq!(At::Layout("class").to_string(), "[layout: class]");
    }
}
