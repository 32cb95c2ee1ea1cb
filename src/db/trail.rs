/*!
The trail --- the ordered log of assignments made during a CDCL solve.

Each entry is a [Rule]: a literal, whether the literal was decided (rather than propagated), and the genealogy of the assignment --- the indicies of the last two decisions the assignment transitively depends on.

Alongside the rules sit two views kept in lockstep:

- `fixed` --- from an assigned literal to the index of its rule.
- `free` --- the variables no rule assigns.

So, at every index *i*, `fixed[rules[i].literal] = i`, the variable of `rules[i].literal` is not free, and the active variables are partitioned by `free` and the variables of `fixed`.
*/

use std::collections::{BTreeSet, HashMap};

use crate::structures::{
    cnf::Assignment,
    literal::{polarity_of, variable_of, Literal, Variable},
};

/// An entry of the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    /// The literal assigned.
    pub literal: Literal,

    /// True iff the literal was decided rather than propagated.
    pub decide: bool,

    /// The index of the last decision the assignment depends on.
    ///
    /// A decision depends on itself, and an assignment forced by the formula alone depends on nothing.
    pub decide_a: Option<usize>,

    /// The index of the second last decision the assignment depends on, always below `decide_a`.
    pub decide_b: Option<usize>,
}

/// The trail of a solve, with its `fixed` and `free` views.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    /// The rules, in order of assignment.
    pub rules: Vec<Rule>,

    /// From an assigned literal to the index of its rule.
    pub fixed: HashMap<Literal, usize>,

    /// The variables no rule assigns.
    pub free: BTreeSet<Variable>,
}

impl Trail {
    /// An empty trail over the given variables, all free.
    pub fn from_variables(variables: &BTreeSet<Variable>) -> Self {
        Trail {
            rules: Vec::default(),
            fixed: HashMap::default(),
            free: variables.clone(),
        }
    }

    /// Appends a rule, updating `fixed` and `free`.
    pub fn push(&mut self, rule: Rule) {
        self.fixed.insert(rule.literal, self.rules.len());
        self.free.remove(&variable_of(rule.literal));
        self.rules.push(rule);
    }

    /// True iff the literal is assigned.
    pub fn is_fixed(&self, literal: Literal) -> bool {
        self.fixed.contains_key(&literal)
    }

    /// The index of the rule assigning the literal, if assigned.
    pub fn index_of(&self, literal: Literal) -> Option<usize> {
        self.fixed.get(&literal).copied()
    }

    /// Removes every rule at or above the given index, restoring `fixed` and `free`.
    pub fn truncate(&mut self, from: usize) {
        for rule in self.rules.split_off(from) {
            self.fixed.remove(&rule.literal);
            self.free.insert(variable_of(rule.literal));
        }
    }

    /// The assignment recorded by the trail.
    pub fn assignment(&self) -> Assignment {
        self.rules
            .iter()
            .map(|rule| (variable_of(rule.literal), polarity_of(rule.literal)))
            .collect()
    }
}
