/*!
Clauses, as duplicate-free sorted collections of literals.

Literals are kept sorted by variable and then polarity, so the positive and negative literals of a variable are adjacent.
This gives a canonical representation --- two clauses are equal iff their literal vectors are equal --- and a linear scan for trivial truth.

A clause *may* contain both a literal and its negation.
Such clauses are trivially true, and the places which discard them ([resolve], preprocessing for the DP procedure, and the clausal lowerings) do so explicitly.
*/

use crate::structures::literal::{variable_of, Literal};

/// A clause, as a sorted duplicate-free vector of literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// A clause from the given literals, sorted and with duplicates removed.
    pub fn from_literals(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable_by_key(|l| (variable_of(*l), *l));
        literals.dedup();
        Clause { literals }
    }

    /// The empty clause.
    pub fn empty() -> Self {
        Clause {
            literals: Vec::default(),
        }
    }

    /// A unit clause.
    pub fn unit(literal: Literal) -> Self {
        Clause {
            literals: vec![literal],
        }
    }

    /// The literals of the clause, in canonical order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// The count of literals in the clause.
    pub fn size(&self) -> usize {
        self.literals.len()
    }

    /// True iff the clause contains no literals.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literal of a unit clause, if the clause is a unit.
    pub fn unit_literal(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    /// True iff the clause contains the literal.
    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    /// True iff the clause contains some literal and its negation.
    pub fn is_trivially_true(&self) -> bool {
        // Canonical order places the two polarities of a variable side by side.
        self.literals
            .windows(2)
            .any(|pair| variable_of(pair[0]) == variable_of(pair[1]))
    }

    /// The clause without every occurrence of the given literal.
    pub fn without(&self, literal: Literal) -> Clause {
        Clause {
            literals: self
                .literals
                .iter()
                .copied()
                .filter(|l| *l != literal)
                .collect(),
        }
    }

    /// Removes every occurrence of the given literal, in place.
    pub fn remove(&mut self, literal: Literal) {
        self.literals.retain(|l| *l != literal);
    }

    /// True iff every literal of the clause occurs in the other clause.
    pub fn subsumes(&self, other: &Clause) -> bool {
        self.literals.iter().all(|l| other.contains(*l))
    }
}

/// The resolvent of two clauses on a variable, if resolution applies.
///
/// Resolution applies when exactly one of the clauses contains the positive literal of the variable and the other the negative literal.
/// A trivially true resolvent is discarded.
pub fn resolve(left: &Clause, right: &Clause, variable: u32) -> Option<Clause> {
    let positive = variable as Literal;
    let negative = -positive;

    let (drop_left, drop_right) = match (
        left.contains(positive),
        left.contains(negative),
        right.contains(positive),
        right.contains(negative),
    ) {
        (true, false, false, true) => (positive, negative),
        (false, true, true, false) => (negative, positive),
        _ => return None,
    };

    let mut literals = Vec::with_capacity(left.size() + right.size() - 2);
    literals.extend(left.literals().iter().copied().filter(|l| *l != drop_left));
    literals.extend(
        right
            .literals()
            .iter()
            .copied()
            .filter(|l| *l != drop_right),
    );

    let resolvent = Clause::from_literals(literals);
    match resolvent.is_trivially_true() {
        true => None,
        false => Some(resolvent),
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut literals = self.literals.iter();
        if let Some(first) = literals.next() {
            write!(f, "{first}")?;
            for literal in literals {
                write!(f, " {literal}")?;
            }
        }
        write!(f, "}}")
    }
}
