/*!
Error types used in the library.

- Most of these arise from malformed input, and are reported with enough detail to locate the problem in the source text.
- None are recoverable inside the core: every error propagates upward to the caller, and no operation retries or partially succeeds.
- Satisfiability results are values, not errors.

Names of the error enums --- for the most part --- overlap with corresponding stages of the pipeline.
*/
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::language::tokenizer::Location;

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error while splitting source text into tokens.
    Tokenizer(TokenizerError),

    /// An error while building terms from tokens.
    Parse(ParseError),

    /// An error during macro expansion.
    Macro(MacroError),

    /// An error while lowering a term to a boolean expression.
    Shape(ShapeError),

    /// An error while building a solver input from clauses.
    Domain(DomainError),

    /// An invariant of the CDCL trail failed while checks were enabled.
    Invariant(InvariantError),
}

/// Errors while splitting source text into tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenizerError {
    /// A name of zero characters.
    EmptyName(Location),

    /// A run of digits which does not fit the number representation.
    NumberRange(Location),
}

impl From<TokenizerError> for ErrorKind {
    fn from(e: TokenizerError) -> Self {
        ErrorKind::Tokenizer(e)
    }
}

/// Errors while building terms from tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A close brace with no matching open brace.
    UnbalancedClose(Location),

    /// An open brace with no matching close brace at the end of input.
    UnterminatedTuple(Location),

    /// A tuple with no sub-terms.
    EmptyTuple(Location),

    /// A tuple whose first sub-term is not a name.
    TupleHead(Location),

    /// A program with no terms at all.
    EmptyProgram,

    /// A top-level term before the last which is not a macro definition.
    UnexpectedTopLevelTerm,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors during macro expansion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MacroError {
    /// A macro definition which is not one of the two accepted forms.
    MalformedDefinition,

    /// Two macro definitions with the same name.
    DuplicateDefinition(String),

    /// A macro applied to the wrong number of arguments.
    Arity {
        name: String,
        expected: usize,
        given: usize,
    },

    /// A reference to a macro which was never defined.
    UnknownReference(String),

    /// A tuple substituted for a segment of a compound name.
    TupleIntoCompoundName(String),

    /// A range bound of an indexed expansion which is not a number.
    RangeBound(String),

    /// A range index of an indexed expansion which is not a name.
    RangeIndex(String),

    /// The calc stack held too few values for an operation, or did not end with exactly one value.
    CalcStack,

    /// A calc argument which is neither a number nor a known operation.
    CalcOperand(String),

    /// An if condition which did not evaluate to a number.
    IfCondition,
}

impl From<MacroError> for ErrorKind {
    fn from(e: MacroError) -> Self {
        ErrorKind::Macro(e)
    }
}

/// Errors while lowering a term to a boolean expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShapeError {
    /// An operator applied to the wrong number of arguments.
    Arity { operator: String, given: usize },

    /// A tuple headed by a name which is neither an operator nor a surviving meta form.
    UnknownOperator(String),

    /// An argument of an indexed variable which is not a name or a number.
    IndexedArgument,

    /// A query `(? v)` on a variable with no recorded assignment.
    UnassignedQuery(String),

    /// An empty term in a position where a boolean expression is required.
    EmptyTerm,
}

impl From<ShapeError> for ErrorKind {
    fn from(e: ShapeError) -> Self {
        ErrorKind::Shape(e)
    }
}

/// Errors while building a solver input from clauses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DomainError {
    /// A clause of more than three literals where a 3-CNF is required.
    ClauseTooWide(usize),
}

impl From<DomainError> for ErrorKind {
    fn from(e: DomainError) -> Self {
        ErrorKind::Domain(e)
    }
}

/// Failed invariants of the CDCL trail, observed only when checks are enabled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// `fixed` does not map the literal of a rule to the index of the rule.
    FixedIndex(usize),

    /// The variable of a trail rule is still recorded as free.
    FreeOverlap(usize),

    /// The active variables are not partitioned by `free` and `fixed`.
    VariablePartition,

    /// A genealogy reference of a rule does not index a decision.
    GenealogyReference(usize),

    /// The genealogy of a rule is not ordered.
    GenealogyOrder(usize),
}

impl From<InvariantError> for ErrorKind {
    fn from(e: InvariantError) -> Self {
        ErrorKind::Invariant(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenizer(e) => write!(f, "tokenizer error: {e:?}"),
            Self::Parse(e) => write!(f, "parse error: {e:?}"),
            Self::Macro(e) => write!(f, "macro error: {e:?}"),
            Self::Shape(e) => write!(f, "shape error: {e:?}"),
            Self::Domain(e) => write!(f, "domain error: {e:?}"),
            Self::Invariant(e) => write!(f, "invariant error: {e:?}"),
        }
    }
}
