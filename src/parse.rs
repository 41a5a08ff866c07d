//! Parser for the textual rendering of terms and rules. Used for testing.

use crate::{Atom, Term};
use alloc::string::String;
use alloc::vec::Vec;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::char;
use nom::combinator::{fail, map, map_res, opt};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded};
use nom::IResult;

type PAtom = Atom<String, String>;
type PTerm = Term<String, String>;

fn ident(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(i)
}

fn number(i: &str) -> IResult<&str, usize> {
    map_res(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
        s.parse()
    })(i)
}

fn generic_param(i: &str) -> IResult<&str, PAtom> {
    let (i, _) = tag("τ_")(i)?;
    let (i, depth) = number(i)?;
    let (i, _) = char('_')(i)?;
    let (i, index) = number(i)?;
    Ok((i, Atom::GenericParam(depth, index)))
}

fn layout(i: &str) -> IResult<&str, PAtom> {
    let constraint = take_while1(|c: char| c != ']');
    map(delimited(tag("[layout: "), constraint, char(']')), |l| {
        Atom::Layout(String::from(l))
    })(i)
}

/// Parse a protocol `[P]` or an associated type `[P1&P2:name]`.
fn bracket(i: &str) -> IResult<&str, PAtom> {
    let (i, _) = char('[')(i)?;
    let (i, protos) = separated_list1(char('&'), ident)(i)?;
    let (i, name) = opt(preceded(char(':'), ident))(i)?;
    let (i, _) = char(']')(i)?;

    let mut protos: Vec<String> = protos.into_iter().map(String::from).collect();
    let atom = match name {
        Some(name) => Atom::AssociatedType(protos, String::from(name)),
        // a bare protocol carries exactly one name
        None if protos.len() == 1 => Atom::Protocol(protos.remove(0)),
        None => return fail(i),
    };
    Ok((i, atom))
}

fn atom(i: &str) -> IResult<&str, PAtom> {
    let name = map(ident, |name| Atom::Name(String::from(name)));
    alt((layout, bracket, generic_param, name))(i)
}

pub fn term(i: &str) -> IResult<&str, PTerm> {
    map_res(separated_list1(char('.'), atom), Term::try_from)(i)
}

pub fn rule(i: &str) -> IResult<&str, (PTerm, PTerm, bool)> {
    let (i, lhs) = term(i)?;
    let (i, _) = tag(" => ")(i)?;
    let (i, rhs) = term(i)?;
    let (i, deleted) = opt(tag(" [deleted]"))(i)?;
    Ok((i, (lhs, rhs, deleted.is_some())))
}

pub fn system(i: &str) -> IResult<&str, Vec<(PTerm, PTerm, bool)>> {
    delimited(
        tag("Rewrite system: {\n"),
        many0(delimited(tag("- "), rule, char('\n'))),
        tag("}\n"),
    )(i)
}

mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn roundtrip(s: &str) {
        let (rest, t) = term(s).unwrap();
        assert_eq!(rest, "");
        assert_eq!(t.to_string(), s);
    }

    #[test]
    fn atoms() {
        roundtrip("foo");
        roundtrip("[P]");
        roundtrip("[P&Q:T]");
        roundtrip("τ_0_1");
        roundtrip("[layout: class]");
    }

    #[test]
    fn rejects_nameless_protocol_list() {
        // several protocols in one bracket only occur in associated types
        assert!(term("[P&Q]").is_err());
        assert!(rule("[P&Q] => x").is_err());
    }

    #[test]
    fn terms() {
        roundtrip("x.[P].τ_1_0.[P&Q:T].[layout: class]");
    }

    #[test]
    fn rules() {
        let (rest, (lhs, rhs, deleted)) = rule("x.[P:T] => x [deleted]").unwrap();
        assert_eq!(rest, "");
        assert!(deleted);
        assert_eq!(lhs.to_string(), "x.[P:T]");
        assert_eq!(rhs.to_string(), "x");

        let (_, (_, _, deleted)) = rule("x.[P:T] => x").unwrap();
        assert!(!deleted);
    }

    #[test]
    fn whole_system() {
        use crate::{Completion, RewriteSystem};

        fn name_term(s: &str) -> PTerm {
            let atoms: Vec<_> = s.split('.').map(|n| Atom::Name(n.into())).collect();
            Term::try_from(atoms).unwrap()
        }

        let mut sys = RewriteSystem::new(());
        sys.initialize(vec![
            (name_term("X.Y"), name_term("Z")),
            (name_term("Y.W"), name_term("V")),
        ]);
        assert_eq!(sys.complete(10, 10), Completion::Success);

        // the dump parses back and re-renders identically
        let dump = sys.to_string();
        let (rest, rules) = system(&dump).unwrap();
        assert_eq!(rest, "");
        assert_eq!(rules.len(), sys.rules().len());
        for (rule, (lhs, rhs, deleted)) in sys.rules().iter().zip(&rules) {
            assert_eq!(rule.lhs.to_string(), lhs.to_string());
            assert_eq!(rule.rhs.to_string(), rhs.to_string());
            assert_eq!(rule.is_deleted(), *deleted);
        }
    }
}
