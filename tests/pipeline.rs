//! Scenario tests, from source text through each procedure.

use std::collections::BTreeMap;

use cpl_sat::{
    compile::{
        compile_cpl_to_clauses, convert_clauses_to_cdcl_input, convert_clauses_to_cnf,
    },
    config::Config,
    context::Context,
    procedures::{dp::check_sat_by_dp, dpll::check_sat_by_dpll},
    reports::Report,
    structures::cnf::{Assignment, Cnf},
};

fn flat(source: &str) -> Cnf {
    convert_clauses_to_cnf(&compile_cpl_to_clauses(source, None, false).expect("clauses"))
}

fn cdcl_context(source: &str) -> Context {
    let clauses = compile_cpl_to_clauses(source, None, true).expect("clauses");
    let input = convert_clauses_to_cdcl_input(&clauses).expect("narrow clauses");
    let config = Config {
        trail_checks: true,
        ..Config::default()
    };
    Context::from_input(input, config)
}

fn labelled_values(cnf: &Cnf, model: &Assignment) -> BTreeMap<String, bool> {
    cnf.labels
        .iter()
        .filter_map(|(id, label)| model.get(id).map(|value| (label.clone(), *value)))
        .collect()
}

mod advisors {
    use super::*;

    /// Four students, each requiring a non-smoking advisor from among themselves, all of whom smoke.
    const SOURCE: &str = r"
        (macro advised (j) (\/* i 1 4 (/\ v_i_j (~ s_i))))
        (/\ (/\* j 1 4 (advised j))
            (/\* j 1 4 s_j))";

    #[test]
    fn unsatisfiable_by_resolution() {
        assert_eq!(check_sat_by_dp(&flat(SOURCE)), Report::Unsatisfiable);
    }

    #[test]
    fn unsatisfiable_by_splitting() {
        // The disjunctions of conjunctions distribute to a full Cartesian product.
        let cnf = flat(SOURCE);
        assert!(cnf.clauses.len() > 64);
        assert!(check_sat_by_dpll(&cnf).is_none());
    }

    #[test]
    fn unsatisfiable_by_learning() {
        assert_eq!(cdcl_context(SOURCE).solve(), Ok(Report::Unsatisfiable));
    }
}

mod binary_adder {
    use super::*;

    /// An eight-bit adder, bits indexed most significant first, with carries `c_2 … c_9`
    /// threading between positions and `c_1` the (forbidden) overflow.
    const RELATION: &str = r"
        (macro sum (i) (<-> d_i (<-> (<-> a_i b_i) (_ c (calc i 1 +)))))
        (macro carry (i) (<-> c_i (\/ (/\ a_i b_i)
                                    (/\ a_i (_ c (calc i 1 +)))
                                    (/\ b_i (_ c (calc i 1 +))))))";

    /// a = 42, b = 24.
    const OPERANDS: &str = r"
            (~ a_1) (~ a_2) a_3 (~ a_4) a_5 (~ a_6) a_7 (~ a_8)
            (~ b_1) (~ b_2) (~ b_3) b_4 b_5 (~ b_6) (~ b_7) (~ b_8)";

    fn adder_source() -> String {
        format!(
            r"{RELATION}
        (/\ (/\* i 1 8 (sum i))
            (/\* i 1 8 (carry i))
            (~ c_1) (~ c_9)
            {OPERANDS})"
        )
    }

    fn negated_adder_source() -> String {
        format!(
            r"{RELATION}
        (/\ (/\* i 1 8 (sum i))
            (/\* i 1 8 (carry i))
            (~ c_1) (~ c_9)
            {OPERANDS}
            (~ (/\ (~ d_1) d_2 (~ d_3) (~ d_4) (~ d_5) (~ d_6) d_7 (~ d_8))))"
        )
    }

    fn read_sum(values: &BTreeMap<String, bool>) -> u32 {
        (1..=8).fold(0, |sum, position| {
            let bit = values
                .get(&format!("d_{position}"))
                .copied()
                .unwrap_or(false);
            (sum << 1) | bit as u32
        })
    }

    #[test]
    fn forty_two_plus_twenty_four_by_splitting() {
        let cnf = flat(&adder_source());
        let model = check_sat_by_dpll(&cnf).expect("a model");
        assert!(cnf.evaluate(&model));
        assert_eq!(read_sum(&labelled_values(&cnf, &model)), 66);
    }

    #[test]
    fn forty_two_plus_twenty_four_by_learning() {
        let mut ctx = cdcl_context(&adder_source());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(read_sum(&ctx.model().expect("a model")), 66);
    }

    #[test]
    fn no_other_sum_by_splitting() {
        assert!(check_sat_by_dpll(&flat(&negated_adder_source())).is_none());
    }

    #[test]
    fn no_other_sum_by_learning() {
        assert_eq!(
            cdcl_context(&negated_adder_source()).solve(),
            Ok(Report::Unsatisfiable)
        );
    }
}

mod queens {
    use super::*;

    /// One queen in every row and column, and no two queens on a diagonal.
    fn queens_source(n: usize) -> String {
        format!(
            r"(/\ (/\* r 1 {n} (\/* c 1 {n} q_r_c))
                  (/\* c 1 {n} (\/* r 1 {n} q_r_c))
                  (/\* r 1 {n} (/\** 1 c1 c2 {n} (\/ (~ q_r_c1) (~ q_r_c2))))
                  (/\* c 1 {n} (/\** 1 r1 r2 {n} (\/ (~ q_r1_c) (~ q_r2_c))))
                  (/\** 1 r1 r2 {n} (/\** 1 c1 c2 {n}
                      (if (calc r2 r1 - c2 c1 - =)
                          (/\ (\/ (~ q_r1_c1) (~ q_r2_c2))
                              (\/ (~ q_r1_c2) (~ q_r2_c1)))))))"
        )
    }

    fn queen_positions(n: usize, values: &BTreeMap<String, bool>) -> Vec<(usize, usize)> {
        let mut positions = Vec::default();
        for row in 1..=n {
            for column in 1..=n {
                if values.get(&format!("q_{row}_{column}")) == Some(&true) {
                    positions.push((row, column));
                }
            }
        }
        positions
    }

    fn assert_valid_placement(n: usize, positions: &[(usize, usize)]) {
        assert_eq!(positions.len(), n, "one queen per row");

        for row in 1..=n {
            assert_eq!(positions.iter().filter(|(r, _)| *r == row).count(), 1);
        }
        for column in 1..=n {
            assert_eq!(positions.iter().filter(|(_, c)| *c == column).count(), 1);
        }
        for (index, (r1, c1)) in positions.iter().enumerate() {
            for (r2, c2) in &positions[index + 1..] {
                assert_ne!(
                    r1.abs_diff(*r2),
                    c1.abs_diff(*c2),
                    "queens share a diagonal"
                );
            }
        }
    }

    #[test]
    fn eight_queens_by_splitting() {
        let cnf = flat(&queens_source(8));
        let model = check_sat_by_dpll(&cnf).expect("a model");
        assert!(cnf.evaluate(&model));
        assert_valid_placement(8, &queen_positions(8, &labelled_values(&cnf, &model)));
    }

    #[test]
    fn five_queens_by_learning() {
        let mut ctx = cdcl_context(&queens_source(5));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_valid_placement(5, &queen_positions(5, &ctx.model().expect("a model")));
    }

    #[test]
    #[ignore = "expensive"]
    fn eight_queens_by_learning() {
        let mut ctx = cdcl_context(&queens_source(8));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_valid_placement(8, &queen_positions(8, &ctx.model().expect("a model")));
    }
}
