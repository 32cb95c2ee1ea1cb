//! A library for determining the satisfiability of boolean formulas written in a small s-expression constraint language.
//!
//! cpl_sat compiles constraint-language source --- names, numbers, tuples, user macros, and a fixed set of arithmetic/meta macros --- down to clauses, and decides satisfiability with a choice of three complete procedures: Davis--Putnam resolution, DPLL splitting, and conflict-driven clause learning over an interned 3-CNF.
//!
//! # Orientation
//!
//! The library is designed around a pipeline.
//!
//! Source text is [tokenized](language::tokenizer), [parsed to terms](language::parser), [macro expanded](language::macros), and [lowered](language::lower) to a [boolean expression](structures::expr).
//! An expression is then lowered to clauses [by distribution](transform::distributive) or [by subformula naming](transform::tseytin), and the clauses are interned for a solver by the [compile] module.
//!
//! Useful starting points may be:
//! - The [compile] module, which strings the pipeline together.
//! - The [procedures], for the decision procedures themselves.
//! - The [context], within which a CDCL solve takes place.
//!
//! # Examples
//!
//! + Compile and solve a formula with each procedure.
//!
//! ```rust
//! # use cpl_sat::compile::{compile_cpl_to_clauses, convert_clauses_to_cnf, convert_clauses_to_cdcl_input};
//! # use cpl_sat::config::Config;
//! # use cpl_sat::context::Context;
//! # use cpl_sat::procedures::{dp::check_sat_by_dp, dpll::check_sat_by_dpll};
//! # use cpl_sat::reports::Report;
//! let source = "(/\\ (\\/ p q) (-> p r) (~ r))";
//!
//! let flat = convert_clauses_to_cnf(&compile_cpl_to_clauses(source, None, false).unwrap());
//! assert_eq!(check_sat_by_dp(&flat), Report::Satisfiable);
//!
//! let model = check_sat_by_dpll(&flat).unwrap();
//! assert!(flat.evaluate(&model));
//!
//! let narrow = compile_cpl_to_clauses(source, None, true).unwrap();
//! let mut ctx = Context::from_input(convert_clauses_to_cdcl_input(&narrow).unwrap(), Config::default());
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//! ```
//!
//! + Write constraints with macros.
//!
//! ```rust
//! # use cpl_sat::compile::{compile_cpl_to_clauses, convert_clauses_to_cnf};
//! # use cpl_sat::procedures::dpll::check_sat_by_dpll;
//! // At most one of q_1 … q_4 holds.
//! let source = "(/\\** 1 i j 4 (\\/ (~ q_i) (~ q_j)))";
//! let cnf = convert_clauses_to_cnf(&compile_cpl_to_clauses(source, None, false).unwrap());
//! assert!(check_sat_by_dpll(&cnf).is_some());
//! ```
//!
//! # Logs
//!
//! To help diagnose issues (somewhat) detailed calls to [log!](log) are made, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
//! The targets are listed in [misc::log].

pub mod compile;
pub mod procedures;

pub mod config;
pub mod context;
pub mod language;
pub mod structures;
pub mod theory;
pub mod transform;
pub mod types;

pub mod generic;

pub mod db;

pub mod misc;
pub mod reports;
