// ======== Tests ==============================================

use crate::scalar::{integer, is_near_zero, parse_scalar, scalar_to_f64};
use crate::{Hyperplane, LinearSystem, LinsysError, Vector};

use super::{Parametrization, Solution};

fn line(normal: &[i64], constant: i64) -> Hyperplane {
    Hyperplane::line(
        Some(Vector::from_integers(normal).unwrap()),
        Some(integer(constant)),
    )
    .unwrap()
}

fn plane(normal: &[i64], constant: i64) -> Hyperplane {
    Hyperplane::plane(
        Some(Vector::from_integers(normal).unwrap()),
        Some(integer(constant)),
    )
    .unwrap()
}

fn decimal_plane(normal: &[&str], constant: &str) -> Hyperplane {
    Hyperplane::plane(
        Some(Vector::parse(normal).unwrap()),
        Some(parse_scalar(constant).unwrap()),
    )
    .unwrap()
}

fn system(planes: Vec<Hyperplane>) -> LinearSystem {
    LinearSystem::new(planes).unwrap()
}

fn satisfies(point: &Vector, s: &LinearSystem) -> bool {
    s.iter().all(|p| {
        is_near_zero(&(p.normal_vector().dot_product(point).unwrap() - p.constant_term()))
    })
}

// ======== Construction and row operations ====================

#[test]
fn test_construction_checks_dimension() {
    assert_eq!(
        LinearSystem::new(vec![line(&[1, 1], 1), plane(&[1, 1, 1], 1)]).unwrap_err(),
        LinsysError::DimensionMismatch {
            expected: 2,
            found: 3
        }
    );
    assert_eq!(
        LinearSystem::new(vec![]).unwrap_err(),
        LinsysError::EmptySystem
    );

    let mut s = system(vec![line(&[1, 1], 1), line(&[1, -1], 1)]);
    assert_eq!(s.dimension(), 2);
    assert_eq!(s.len(), 2);
    assert_eq!(
        s.set_row(0, plane(&[1, 0, 0], 0)),
        Err(LinsysError::DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
    assert_eq!(
        s.set_row(2, line(&[1, 0], 0)),
        Err(LinsysError::RowOutOfBounds { row: 2, len: 2 })
    );
    s.set_row(1, line(&[0, 1], 5)).unwrap();
    assert_eq!(s[1].normal_vector(), &Vector::from_integers(&[0, 1]).unwrap());
}

#[test]
fn test_row_operations() {
    let p0 = plane(&[1, 1, 1], 1);
    let p1 = plane(&[0, 1, 0], 2);
    let p2 = plane(&[1, 1, -1], 3);
    let p3 = plane(&[1, 0, -2], 2);
    let mut s = system(vec![p0.clone(), p1.clone(), p2.clone(), p3.clone()]);

    s.swap_rows(0, 1).unwrap();
    s.swap_rows(1, 3).unwrap();
    s.swap_rows(3, 1).unwrap();
    let expected = [&p1, &p0, &p2, &p3];
    for (actual, expected) in s.iter().zip(expected) {
        assert_eq!(actual.normal_vector(), expected.normal_vector());
        assert_eq!(actual.constant_term(), expected.constant_term());
    }

    s.multiply_coefficient_and_row(&integer(-1), 2).unwrap();
    assert_eq!(s[2].normal_vector(), &Vector::from_integers(&[-1, -1, 1]).unwrap());
    assert_eq!(s[2].constant_term(), &integer(-3));

    s.multiply_coefficient_and_row(&integer(10), 1).unwrap();
    assert_eq!(s[1].normal_vector(), &Vector::from_integers(&[10, 10, 10]).unwrap());
    assert_eq!(s[1].constant_term(), &integer(10));

    s.add_multiple_times_row_to_row(&integer(1), 0, 1).unwrap();
    assert_eq!(s[1].normal_vector(), &Vector::from_integers(&[10, 11, 10]).unwrap());
    assert_eq!(s[1].constant_term(), &integer(12));

    s.add_multiple_times_row_to_row(&integer(-1), 1, 0).unwrap();
    assert_eq!(s[0].normal_vector(), &Vector::from_integers(&[-10, -10, -10]).unwrap());
    assert_eq!(s[0].constant_term(), &integer(-10));

    assert_eq!(
        s.multiply_coefficient_and_row(&integer(0), 0),
        Err(LinsysError::ZeroCoefficient)
    );
    assert_eq!(
        s.swap_rows(0, 4),
        Err(LinsysError::RowOutOfBounds { row: 4, len: 4 })
    );
    assert_eq!(
        s.add_multiple_times_row_to_row(&integer(1), 7, 0),
        Err(LinsysError::RowOutOfBounds { row: 7, len: 4 })
    );
}

#[test]
fn test_pivot_indices() {
    let s = system(vec![
        plane(&[1, 1, 1], 1),
        plane(&[0, 0, 0], 2),
        decimal_plane(&["0", "0.00000000001", "3"], "1"),
    ]);
    assert_eq!(
        s.indices_of_first_nonzero_terms_in_each_row().unwrap(),
        vec![Some(0), None, Some(2)]
    );
}

#[test]
fn test_display() {
    let s = system(vec![line(&[1, 1], 1), line(&[1, -1], 1), line(&[0, 0], 0)]);
    assert_eq!(
        s.to_string(),
        "Linear System:\nEquation 1: x_1 + x_2 = 1\nEquation 2: x_1 - x_2 = 1\nEquation 3: 0 = 0"
    );
}

// ======== Classification =====================================

#[test]
fn test_crossing_lines_have_unique_solution() {
    let s = system(vec![line(&[1, 1], 1), line(&[1, -1], 1)]);
    assert_eq!(
        s.solve().unwrap(),
        Solution::Unique(Vector::from_integers(&[1, 0]).unwrap())
    );
}

#[test]
fn test_coincident_lines_have_infinitely_many_solutions() {
    let s = system(vec![line(&[1, 1], 1), line(&[2, 2], 2)]);
    let Solution::Infinite(parametrization) = s.solve().unwrap() else {
        panic!("coincident lines should have infinitely many solutions");
    };
    assert_eq!(
        parametrization,
        Parametrization::new(
            Vector::from_integers(&[1, 0]).unwrap(),
            vec![Vector::from_integers(&[-1, 1]).unwrap()]
        )
        .unwrap()
    );
}

#[test]
fn test_parallel_lines_have_no_solution() {
    let s = system(vec![line(&[1, 1], 1), line(&[1, 1], 2)]);
    assert_eq!(s.solve().unwrap(), Solution::NoSolution);
}

#[test]
fn test_three_by_three_reduces_to_identity() {
    let s = system(vec![
        plane(&[1, 1, 1], 6),
        plane(&[0, 2, 5], -4),
        plane(&[2, 5, -1], 27),
    ]);
    let rref = s.compute_rref().unwrap();
    let pivots = rref.indices_of_first_nonzero_terms_in_each_row().unwrap();
    assert_eq!(pivots, vec![Some(0), Some(1), Some(2)]);
    for (row, col) in pivots.iter().enumerate() {
        let col = col.unwrap();
        for k in 0..rref.len() {
            let expected = if k == row { integer(1) } else { integer(0) };
            assert_eq!(rref[k].normal_vector()[col], expected);
        }
    }
    assert_eq!(
        s.solve().unwrap(),
        Solution::Unique(Vector::from_integers(&[5, 3, -2]).unwrap())
    );
}

#[test]
fn test_contradiction_means_no_solution() {
    let s = system(vec![
        plane(&[1, 1, 1], 1),
        plane(&[1, -1, 0], 0),
        plane(&[0, 0, 0], 5),
    ]);
    assert_eq!(s.solve().unwrap(), Solution::NoSolution);

    // Reduces to 0 = 5 only after elimination
    let s = system(vec![
        plane(&[1, 1, 1], 1),
        plane(&[0, 1, 1], 2),
        plane(&[1, 2, 2], 8),
    ]);
    assert_eq!(s.solve().unwrap(), Solution::NoSolution);

    // Coefficients below the tolerance on every variable
    let s = system(vec![decimal_plane(
        &["0.00000000009", "0.00000000009", "0"],
        "5",
    )]);
    assert_eq!(
        s.indices_of_first_nonzero_terms_in_each_row().unwrap(),
        vec![None]
    );
    assert_eq!(s.solve().unwrap(), Solution::NoSolution);
    assert_eq!(s[0], s[0].clone());

    let s = system(vec![
        decimal_plane(&["1", "0", "0"], "1"),
        decimal_plane(&["0.00000000009", "0.00000000009", "0"], "0"),
    ]);
    assert!(matches!(s.solve().unwrap(), Solution::Infinite(_)));
}

#[test]
fn test_decimal_systems() {
    let s = system(vec![
        decimal_plane(&["5.862", "1.178", "-10.366"], "-8.15"),
        decimal_plane(&["-2.931", "-0.589", "5.183"], "-4.075"),
    ]);
    assert_eq!(s.solve().unwrap(), Solution::NoSolution);

    let s = system(vec![
        decimal_plane(&["8.631", "5.112", "-1.816"], "-5.113"),
        decimal_plane(&["4.315", "11.132", "-5.27"], "-6.775"),
        decimal_plane(&["-2.158", "3.01", "-1.727"], "-0.831"),
    ]);
    let Solution::Infinite(parametrization) = s.solve().unwrap() else {
        panic!("dependent planes should have infinitely many solutions");
    };
    assert_eq!(parametrization.direction_vectors().len(), 1);
    for t in ["0", "1", "-2.5", "1000"] {
        let point = parametrization
            .point_at(&[parse_scalar(t).unwrap()])
            .unwrap();
        assert!(satisfies(&point, &s), "t = {t}");
    }

    let s = system(vec![
        decimal_plane(&["5.262", "2.739", "-9.878"], "-3.441"),
        decimal_plane(&["5.111", "6.358", "7.638"], "-2.152"),
        decimal_plane(&["2.016", "-9.924", "-1.367"], "-9.278"),
        decimal_plane(&["2.167", "-13.543", "-18.883"], "-10.567"),
    ]);
    let Solution::Unique(point) = s.solve().unwrap() else {
        panic!("system should have a unique solution");
    };
    assert!(satisfies(&point, &s));
    for (actual, expected) in point.coordinates().iter().zip([-1.177, 0.707, -0.083]) {
        assert!((scalar_to_f64(actual) - expected).abs() < 1e-3);
    }
}

#[test]
fn test_free_variables_in_parametrization() {
    let s = system(vec![plane(&[1, 1, 1], 1), plane(&[0, 1, 1], 2)]);
    let Solution::Infinite(parametrization) = s.solve().unwrap() else {
        panic!("two planes in three unknowns cannot pin down a point");
    };
    assert_eq!(
        parametrization.basepoint(),
        &Vector::from_integers(&[-1, 2, 0]).unwrap()
    );
    assert_eq!(
        parametrization.direction_vectors(),
        &[Vector::from_integers(&[0, -1, 1]).unwrap()]
    );
    assert_eq!(
        parametrization.to_string(),
        "x_1 = -1\nx_2 = 2 - t_1\nx_3 = 0 + t_1"
    );

    let s = system(vec![plane(&[0, 0, 0], 0)]);
    let Solution::Infinite(parametrization) = s.solve().unwrap() else {
        panic!("0 = 0 is satisfied everywhere");
    };
    assert_eq!(parametrization.direction_vectors().len(), 3);
    assert_eq!(
        parametrization.point_at(&[integer(1), integer(2)]),
        Err(LinsysError::DimensionMismatch {
            expected: 3,
            found: 2
        })
    );
}

// ======== Properties =========================================

fn sample_systems() -> Vec<LinearSystem> {
    vec![
        system(vec![line(&[1, 1], 1), line(&[1, -1], 1)]),
        system(vec![line(&[1, 1], 1), line(&[2, 2], 2)]),
        system(vec![line(&[1, 1], 1), line(&[1, 1], 2)]),
        system(vec![
            plane(&[0, 1, 1], 1),
            plane(&[1, -1, 1], 2),
            plane(&[1, 2, -5], 3),
        ]),
        system(vec![
            plane(&[0, 0, 1], 1),
            plane(&[0, 0, 0], 0),
            plane(&[0, 2, 0], 2),
            plane(&[0, 4, 3], 7),
        ]),
        system(vec![
            plane(&[1, 1, 1], 1),
            plane(&[0, 1, 0], 2),
            plane(&[1, 1, -1], 3),
            plane(&[1, 0, -2], 2),
        ]),
        system(vec![
            plane(&[2, 4, -2], 2),
            plane(&[1, 2, 0], 3),
            plane(&[3, 6, -1], 7),
        ]),
    ]
}

#[test]
fn test_pivot_columns_increase_after_triangular_form() {
    for s in sample_systems() {
        let pivots: Vec<usize> = s
            .compute_triangular_form()
            .unwrap()
            .indices_of_first_nonzero_terms_in_each_row()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(pivots.windows(2).all(|w| w[0] < w[1]), "{s}: {pivots:?}");
    }
}

#[test]
fn test_rref_is_idempotent() {
    for s in sample_systems() {
        let once = s.compute_rref().unwrap();
        let twice = once.compute_rref().unwrap();
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.normal_vector(), b.normal_vector(), "{s}");
            assert_eq!(a.constant_term(), b.constant_term(), "{s}");
        }
    }
}

#[test]
fn test_row_operations_preserve_solutions() {
    for s in sample_systems() {
        let before = s.solve().unwrap();

        let mut t = s.clone();
        let last = t.len() - 1;
        t.swap_rows(0, last).unwrap();
        t.multiply_coefficient_and_row(&parse_scalar("-2.5").unwrap(), 0)
            .unwrap();
        t.add_multiple_times_row_to_row(&parse_scalar("3/7").unwrap(), 0, last)
            .unwrap();
        t.add_multiple_times_row_to_row(&integer(-4), last, 0)
            .unwrap();

        assert_eq!(t.solve().unwrap(), before, "{s}");
    }
}

#[test]
fn test_rref_rows_describe_the_same_solutions() {
    for s in sample_systems() {
        if let Solution::Unique(point) = s.solve().unwrap() {
            assert!(satisfies(&point, &s.compute_rref().unwrap()));
            assert!(satisfies(&point, &s));
        }
    }
}
