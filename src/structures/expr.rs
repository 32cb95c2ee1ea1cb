/*!
Boolean expressions, the target of lowering the constraint language.

An expression is a tree over variables, negation, conjunction, disjunction, implication, and equivalence.
Conjunction, disjunction, and equivalence take ordered argument lists of at least two expressions after normalisation, implication is binary, and negation is unary.

Variables are either named --- carrying the label written in (or assembled from) the source --- or auxiliary, carrying an index assigned during the Tseytin transformation.
*/

/// A variable of an expression.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Var {
    /// A variable with a source label.
    Named(String),

    /// An auxiliary variable introduced by the Tseytin transformation.
    Aux(u32),
}

/// A boolean expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A variable.
    Variable(Var),

    /// The negation of an expression.
    Not(Box<Expr>),

    /// The conjunction of a list of expressions.
    And(Vec<Expr>),

    /// The disjunction of a list of expressions.
    Or(Vec<Expr>),

    /// An implication between two expressions.
    Imply(Box<Expr>, Box<Expr>),

    /// A chain of equivalences over a list of expressions.
    Iff(Vec<Expr>),
}

impl Expr {
    /// A named variable, from anything string-like.
    pub fn named(label: impl Into<String>) -> Self {
        Expr::Variable(Var::Named(label.into()))
    }

    /// The negation of the expression.
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// True iff the expression is a variable or a negated variable.
    pub fn is_literal(&self) -> bool {
        match self {
            Expr::Variable(_) => true,
            Expr::Not(inner) => matches!(inner.as_ref(), Expr::Variable(_)),
            _ => false,
        }
    }

    /// The truth value of the expression under an assignment of values to variables.
    ///
    /// Nothing, if some variable of the expression has no value.
    pub fn evaluate(&self, values: &impl Fn(&Var) -> Option<bool>) -> Option<bool> {
        match self {
            Expr::Variable(v) => values(v),

            Expr::Not(inner) => Some(!inner.evaluate(values)?),

            Expr::And(arguments) => {
                let mut all = true;
                for argument in arguments {
                    all &= argument.evaluate(values)?;
                }
                Some(all)
            }

            Expr::Or(arguments) => {
                let mut any = false;
                for argument in arguments {
                    any |= argument.evaluate(values)?;
                }
                Some(any)
            }

            Expr::Imply(antecedent, consequent) => {
                Some(!antecedent.evaluate(values)? | consequent.evaluate(values)?)
            }

            // A chain holds when every adjacent link holds.
            Expr::Iff(arguments) => {
                let mut all = true;
                for link in arguments.windows(2) {
                    all &= link[0].evaluate(values)? == link[1].evaluate(values)?;
                }
                Some(all)
            }
        }
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::Named(label) => write!(f, "{label}"),
            Var::Aux(index) => write!(f, "${index}"),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_list(
            f: &mut std::fmt::Formatter<'_>,
            operator: &str,
            arguments: &[Expr],
        ) -> std::fmt::Result {
            write!(f, "({operator}")?;
            for argument in arguments {
                write!(f, " {argument}")?;
            }
            write!(f, ")")
        }

        match self {
            Expr::Variable(v) => write!(f, "{v}"),
            Expr::Not(e) => write!(f, "(~ {e})"),
            Expr::And(es) => write_list(f, "/\\", es),
            Expr::Or(es) => write_list(f, "\\/", es),
            Expr::Imply(a, c) => write!(f, "(-> {a} {c})"),
            Expr::Iff(es) => write_list(f, "<->", es),
        }
    }
}

#[cfg(test)]
mod expr_tests {
    use super::*;

    #[test]
    fn display() {
        let e = Expr::Imply(
            Box::new(Expr::named("p")),
            Box::new(Expr::Or(vec![
                Expr::named("q"),
                Expr::named("r").negate(),
            ])),
        );
        assert_eq!(e.to_string(), "(-> p (\\/ q (~ r)))");
    }

    #[test]
    fn literal_shapes() {
        assert!(Expr::named("p").is_literal());
        assert!(Expr::named("p").negate().is_literal());
        assert!(!Expr::named("p").negate().negate().is_literal());
        assert!(!Expr::And(vec![Expr::named("p"), Expr::named("q")]).is_literal());
    }

    #[test]
    fn evaluation() {
        let values = |v: &Var| match v {
            Var::Named(label) if label == "p" => Some(true),
            Var::Named(label) if label == "q" => Some(false),
            _ => None,
        };

        let e = Expr::Imply(Box::new(Expr::named("p")), Box::new(Expr::named("q")));
        assert_eq!(e.evaluate(&values), Some(false));

        let e = Expr::Iff(vec![Expr::named("p"), Expr::named("q").negate()]);
        assert_eq!(e.evaluate(&values), Some(true));

        let e = Expr::Or(vec![Expr::named("p"), Expr::named("missing")]);
        assert_eq!(e.evaluate(&values), None);
    }
}
