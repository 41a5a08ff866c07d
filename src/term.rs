//! Terms: non-empty sequences of atoms.

use crate::{Atom, ProtocolGraph};
use alloc::{vec, vec::Vec};
use core::cmp::Ordering;
use core::fmt::{self, Display};

/// Non-empty sequence of atoms.
///
/// A term stands for a chain of member references;
/// the engine treats it as a plain string over the atom alphabet.
/// Terms are ordered by length first, and
/// equally long terms compare atom by atom from the left.
/// Every rewrite replaces a subterm by a strictly smaller one,
/// so rewriting under this order terminates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Term<P, L>(Vec<Atom<P, L>>);

/// Errors arising when constructing a term.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// the empty atom sequence
    Empty,
}

impl<P, L> Term<P, L> {
    /// Return the number of atoms of the term.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Obtain the nth atom of the term.
    pub fn get(&self, n: usize) -> Option<&Atom<P, L>> {
        self.0.get(n)
    }

    /// Obtain the last atom of the term.
    pub fn last(&self) -> Option<&Atom<P, L>> {
        self.0.last()
    }

    /// Obtain a mutable reference to the last atom of the term.
    pub fn last_mut(&mut self) -> Option<&mut Atom<P, L>> {
        self.0.last_mut()
    }

    /// Add an atom at the end of the term.
    pub fn push(&mut self, atom: Atom<P, L>) {
        self.0.push(atom)
    }

    /// Iterate over the atoms of the term.
    pub fn iter(&self) -> impl Iterator<Item = &Atom<P, L>> {
        self.0.iter()
    }
}

impl<P, L: Ord> Term<P, L> {
    /// Compare two terms under the order induced by a protocol graph.
    ///
    /// Shorter terms come first; equally long terms compare pointwise.
    pub fn compare(&self, other: &Self, graph: &impl ProtocolGraph<P>) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| {
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a.compare(b, graph))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl<P: Eq, L: Eq> Term<P, L> {
    /// Return the position of the first occurrence of `other` in this term.
    pub fn find_subterm(&self, other: &Self) -> Option<usize> {
        if other.len() > self.len() {
            return None;
        }
        (0..=self.len() - other.len()).find(|&i| self.0[i..i + other.len()] == other.0[..])
    }
}

impl<P: Clone + Eq, L: Clone + Eq> Term<P, L> {
    /// Replace the first occurrence of `lhs` in this term by `rhs`.
    ///
    /// The replacement must not be longer than the replaced subterm,
    /// so the term shrinks by `lhs.len() - rhs.len()` atoms.
    /// Return whether a replacement took place.
    pub fn rewrite_subterm(&mut self, lhs: &Self, rhs: &Self) -> bool {
        debug_assert!(rhs.len() <= lhs.len());
        match self.find_subterm(lhs) {
            Some(i) => {
                let mut atoms = self.0[..i].to_vec();
                atoms.extend_from_slice(&rhs.0);
                atoms.extend_from_slice(&self.0[i + lhs.len()..]);
                self.0 = atoms;
                true
            }
            None => false,
        }
    }

    /// Return a term witnessing an overlap of this term with another.
    ///
    /// Two terms overlap if one contains the other, or if a proper suffix of
    /// the first equals an equally long proper prefix of the second.
    /// In the first case the witness is this term itself; in the second,
    /// it is this term extended by the unmatched rest of the other.
    /// Containment is checked first, so two equal terms overlap by
    /// containment; the boundary scan then shortens the window from
    /// the longest proper suffix downwards.
    ///
    /// The other term must not be longer than this one. To find the overlaps
    /// of two rules, this function is called twice, with the arguments
    /// swapped on the second call.
    ///
    /// ~~~
    /// use kompletigo::{Atom, Term};
    ///
    /// let name = |n: &str| Atom::<&str, &str>::Name(n.into());
    /// let t = Term::try_from(vec![name("A"), name("B")])?;
    /// let u = Term::try_from(vec![name("B"), name("C")])?;
    /// assert_eq!(t.check_for_overlap(&u).unwrap().to_string(), "A.B.C");
    /// assert_eq!(u.check_for_overlap(&t), None);
    /// # Ok::<_, kompletigo::Error>(())
    /// ~~~
    pub fn check_for_overlap(&self, other: &Self) -> Option<Self> {
        if other.len() > self.len() {
            return None;
        }

        // containment: slide `other` across this term
        if self.find_subterm(other).is_some() {
            return Some(self.clone());
        }

        // boundary: a proper suffix matching a proper prefix of `other`
        for start in self.len() - other.len() + 1..self.len() {
            let len = self.len() - start;
            if self.0[start..] == other.0[..len] {
                let mut atoms = self.0[..start].to_vec();
                atoms.extend_from_slice(&other.0);
                return Some(Self(atoms));
            }
        }

        None
    }
}

impl<P, L> From<Atom<P, L>> for Term<P, L> {
    fn from(atom: Atom<P, L>) -> Self {
        Self(vec![atom])
    }
}

impl<P, L> TryFrom<Vec<Atom<P, L>>> for Term<P, L> {
    type Error = Error;

    fn try_from(atoms: Vec<Atom<P, L>>) -> Result<Self, Self::Error> {
        if atoms.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self(atoms))
    }
}

impl<P: Display, L: Display> Display for Term<P, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for atom in self.iter() {
            if !first {
                write!(f, ".")?;
            } else {
                first = false;
            }
            atom.fmt(f)?;
        }
        Ok(())
    }
}
