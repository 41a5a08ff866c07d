#![no_std]
#![forbid(unsafe_code)]

//! Confluent completion of rewrite systems over generic signature terms.
//!
//! This library implements a specialised Knuth-Bendix completion procedure:
//! given rewrite rules derived from the requirements of a generic signature
//! (same-type, conformance, layout, and associated type requirements),
//! it computes a confluent rule set in which
//! reducing a term to its normal form
//! answers equivalence and subtyping queries over generic parameters.
//!
//! # Usage
//!
//! A [`RewriteSystem`] is seeded with pairs of [`Term`]s via
//! [`initialize`](RewriteSystem::initialize), which orients every pair into a
//! rule whose left-hand side is the larger side under the term order.
//! [`complete`](RewriteSystem::complete) then resolves all critical pairs
//! between rules, inserting new rules until the system is locally confluent
//! or a budget runs out.
//! Afterwards, [`simplify`](RewriteSystem::simplify) reduces any term to its
//! unique normal form.
//!
//! The atom order, and with it the orientation of rules, is parametrised by a
//! [`ProtocolGraph`]; the unit graph `()` serves when no protocol inheritance
//! is at play.
//! (By the way, this example, just as all other code examples in this library,
//! can be executed by running `cargo test`.)
//!
//! ~~~
//! use kompletigo::{Atom, Completion, RewriteSystem, Term};
//!
//! let name = |n: &str| Atom::<&str, &str>::Name(n.into());
//!
//! // X.Y => Z and Y.W => V; their left-hand sides overlap in X.Y.W
//! let seeds = vec![
//!     (Term::try_from(vec![name("X"), name("Y")])?, Term::from(name("Z"))),
//!     (Term::try_from(vec![name("Y"), name("W")])?, Term::from(name("V"))),
//! ];
//!
//! let mut system = RewriteSystem::new(());
//! system.initialize(seeds);
//! assert_eq!(system.complete(10, 10), Completion::Success);
//!
//! // completion has added the bridging rule Z.W => X.V
//! let mut term = Term::try_from(vec![name("Z"), name("W")])?;
//! assert!(system.simplify(&mut term));
//! assert_eq!(term.to_string(), "X.V");
//! # Ok::<_, kompletigo::Error>(())
//! ~~~
//!
//! # Organisation
//!
//! The modules of this library follow the layers of the engine:
//! [`Atom`]s form the alphabet and obtain their total order from a
//! [`ProtocolGraph`],
//! [`Term`]s are non-empty sequences of atoms,
//! [`Rule`]s are oriented pairs of terms, and
//! the [`RewriteSystem`] owns the rules together with
//! the bookkeeping that completion needs.
//! Completion itself lives in its own module and
//! reports its outcome as a [`Completion`] value;
//! running out of budget is an ordinary outcome there, not an error.
//!
//! All data is owned by the [`RewriteSystem`] instance;
//! there is no global state, and the library performs no I/O.
//! Diagnostics are emitted through the `log` crate and are switched on
//! per instance with [`DebugFlags`].

extern crate alloc;
#[macro_use]
extern crate log;

mod atom;
mod completion;
pub mod error;
mod graph;
#[cfg(test)]
mod parse;
mod rule;
mod system;
pub mod term;

pub use atom::Atom;
pub use completion::Completion;
pub use error::Error;
pub use graph::ProtocolGraph;
pub use rule::Rule;
pub use system::{DebugFlags, RewriteSystem};
pub use term::Term;
