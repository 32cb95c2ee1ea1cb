//! Pigeonhole instances, written with the pairwise expansion macros.

use cpl_sat::{
    compile::{
        compile_cpl_to_clauses, convert_clauses_to_cdcl_input, convert_clauses_to_cnf,
    },
    config::Config,
    context::Context,
    procedures::{dp::check_sat_by_dp, dpll::check_sat_by_dpll},
    reports::Report,
};

/// Every pigeon in some hole, no hole with two pigeons.
fn phole_source(pigeons: usize, holes: usize) -> String {
    format!(
        r"(/\ (/\* p 1 {pigeons} (\/* h 1 {holes} o_p_h))
             (/\* h 1 {holes} (/\** 1 p1 p2 {pigeons} (\/ (~ o_p1_h) (~ o_p2_h)))))"
    )
}

mod phole {
    use super::*;

    #[test]
    fn four_into_three_by_resolution() {
        let clauses = compile_cpl_to_clauses(&phole_source(4, 3), None, false).expect("clauses");
        assert_eq!(
            check_sat_by_dp(&convert_clauses_to_cnf(&clauses)),
            Report::Unsatisfiable
        );
    }

    #[test]
    fn four_into_three_by_splitting() {
        let clauses = compile_cpl_to_clauses(&phole_source(4, 3), None, false).expect("clauses");
        assert!(check_sat_by_dpll(&convert_clauses_to_cnf(&clauses)).is_none());
    }

    #[test]
    fn four_into_three_by_learning() {
        let clauses = compile_cpl_to_clauses(&phole_source(4, 3), None, true).expect("clauses");
        let input = convert_clauses_to_cdcl_input(&clauses).expect("narrow clauses");
        let config = Config {
            trail_checks: true,
            ..Config::default()
        };
        let mut ctx = Context::from_input(input, config);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn three_into_three_places_every_pigeon() {
        let clauses = compile_cpl_to_clauses(&phole_source(3, 3), None, true).expect("clauses");
        let input = convert_clauses_to_cdcl_input(&clauses).expect("narrow clauses");
        let mut ctx = Context::from_input(input, Config::default());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let model = ctx.model().expect("a model");
        for pigeon in 1..=3 {
            let holes = (1..=3)
                .filter(|hole| model.get(&format!("o_{pigeon}_{hole}")) == Some(&true))
                .count();
            assert!(holes >= 1, "pigeon {pigeon} has no hole");
        }
        for hole in 1..=3 {
            let pigeons = (1..=3)
                .filter(|pigeon| model.get(&format!("o_{pigeon}_{hole}")) == Some(&true))
                .count();
            assert!(pigeons <= 1, "hole {hole} is shared");
        }
    }
}
