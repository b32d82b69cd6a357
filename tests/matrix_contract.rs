//! Contract suite shared by the sequential and thread-parallel containers.
//!
//! Every check is written once against [`DenseMatrix`] and instantiated for
//! both implementations, so the two engines cannot drift apart in observable
//! behavior.

use densemat::{DenseMatrix, Matrix, MatrixOp, ParMatrix};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fill<M: DenseMatrix<i64>>(rows: usize, cols: usize, values: &[i64]) -> M {
    M::from_vec(rows, cols, values.to_vec()).expect("buffer covers the shape")
}

fn default_is_single_zero<M: DenseMatrix<i64>>() {
    let m = M::default();
    assert_eq!(m.nrows(), 1);
    assert_eq!(m.ncols(), 1);
    assert_eq!(m.get(0, 0), 0);
}

fn fresh_matrices_are_zero<M: DenseMatrix<i64>>() {
    for &(rows, cols) in &[(1, 1), (2, 3), (4, 4), (0, 5), (3, 0)] {
        let m = M::zeros(rows, cols);
        assert_eq!(m.nrows(), rows);
        assert_eq!(m.ncols(), cols);
        for r in 0..rows {
            for c in 0..cols {
                assert_eq!(m.get(r, c), 0);
            }
        }
    }
}

fn set_get_round_trip<M: DenseMatrix<i64>>() {
    let mut m = M::zeros(3, 4);
    for r in 0..3 {
        for c in 0..4 {
            let v = (r * 4 + c) as i64 + 1;
            assert!(m.set(r, c, v));
            assert_eq!(m.get(r, c), v);
        }
    }
}

fn out_of_range_access_is_tolerated<M: DenseMatrix<i64>>() {
    let mut m = M::zeros(2, 2);
    m.set(0, 0, 9);

    assert_eq!(m.get(2, 0), 0);
    assert_eq!(m.get(0, 2), 0);
    assert!(!m.set(2, 0, 5));
    assert!(!m.set(0, 2, 5));
    assert_eq!(m.get(0, 0), 9);
}

fn resize_discards_and_rezeroes<M: DenseMatrix<i64>>() {
    init_logs();
    let mut m = M::zeros(2, 2);
    m.set(1, 1, 42);

    assert!(m.resize(3, 2));
    assert_eq!(m.nrows(), 3);
    assert_eq!(m.ncols(), 2);
    for r in 0..3 {
        for c in 0..2 {
            assert_eq!(m.get(r, c), 0);
        }
    }
}

fn equality_is_shape_sensitive<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 3, &[1, 2, 3, 4, 5, 6]);
    let b: M = fill(3, 2, &[1, 2, 3, 4, 5, 6]);
    let c: M = fill(2, 3, &[1, 2, 3, 4, 5, 6]);

    assert_eq!(a, a);
    assert_eq!(a, c);
    assert_eq!(c, a);
    assert_ne!(a, b);
}

fn clone_is_deep<M: DenseMatrix<i64>>() {
    let mut a = M::zeros(2, 2);
    a.set(0, 0, 1);
    let b = a.clone();
    a.set(0, 0, 5);

    assert_eq!(b.get(0, 0), 1);
    assert_eq!(a.get(0, 0), 5);
}

fn addition_and_subtraction<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 2, &[1, 2, 3, 4]);
    let b: M = fill(2, 2, &[5, 6, 7, 8]);

    let sum = a.add(&b).expect("matching shapes");
    assert_eq!(sum, fill(2, 2, &[6, 8, 10, 12]));

    let diff = a.sub(&b).expect("matching shapes");
    assert_eq!(diff, fill(2, 2, &[-4, -4, -4, -4]));
}

fn multiplication<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 2, &[1, 2, 3, 4]);
    let b: M = fill(2, 2, &[5, 6, 7, 8]);

    let prod = a.matmul(&b).expect("compatible shapes");
    assert_eq!(prod, fill(2, 2, &[19, 22, 43, 50]));
}

fn scalar_broadcasts<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 2, &[1, 2, 3, 4]);

    assert_eq!(a.add_scalar(5), fill(2, 2, &[6, 7, 8, 9]));
    assert_eq!(M::scalar_add(5, &a), fill(2, 2, &[6, 7, 8, 9]));
    assert_eq!(a.sub_scalar(5), fill(2, 2, &[-4, -3, -2, -1]));
    assert_eq!(M::scalar_sub(5, &a), fill(2, 2, &[4, 3, 2, 1]));
    assert_eq!(a.mul_scalar(5), fill(2, 2, &[5, 10, 15, 20]));
    assert_eq!(M::scalar_mul(5, &a), fill(2, 2, &[5, 10, 15, 20]));
}

fn shape_mismatch_names_the_operation<M: DenseMatrix<i64>>() {
    let a = M::zeros(2, 2);
    let b = M::zeros(2, 1);

    let err = a.add(&b).unwrap_err();
    assert_eq!(err.op(), MatrixOp::Addition);
    assert!(err.to_string().contains("addition"));

    let err = a.sub(&b).unwrap_err();
    assert_eq!(err.op(), MatrixOp::Subtraction);

    // 2x2 by 3x2: inner dimensions 2 and 3 disagree
    let c = M::zeros(3, 2);
    let err = a.matmul(&c).unwrap_err();
    assert_eq!(err.op(), MatrixOp::Multiplication);
    assert!(err.to_string().contains("multiplication"));
}

fn operators_do_not_mutate<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 2, &[1, 2, 3, 4]);
    let b: M = fill(2, 2, &[5, 6, 7, 8]);
    let a_before = a.clone();
    let b_before = b.clone();

    let _ = a.add(&b).unwrap();
    let _ = a.sub(&b).unwrap();
    let _ = a.matmul(&b).unwrap();
    let _ = a.add_scalar(5);
    let _ = M::scalar_sub(5, &b);

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

fn product_associativity<M: DenseMatrix<i64>>() {
    let a: M = fill(2, 3, &[1, 2, 3, 4, 5, 6]);
    let b: M = fill(3, 2, &[7, 8, 9, 10, 11, 12]);
    let c: M = fill(2, 4, &[1, 0, 2, 0, 0, 3, 0, 4]);

    let left = a.matmul(&b).unwrap().matmul(&c).unwrap();
    let right = a.matmul(&b.matmul(&c).unwrap()).unwrap();

    assert_eq!(left, right);
    assert_eq!(left.nrows(), 2);
    assert_eq!(left.ncols(), 4);
}

#[test]
fn matrix_default_is_single_zero() {
    default_is_single_zero::<Matrix<i64>>();
}

#[test]
fn par_matrix_default_is_single_zero() {
    default_is_single_zero::<ParMatrix<i64>>();
}

#[test]
fn matrix_fresh_matrices_are_zero() {
    fresh_matrices_are_zero::<Matrix<i64>>();
}

#[test]
fn par_matrix_fresh_matrices_are_zero() {
    fresh_matrices_are_zero::<ParMatrix<i64>>();
}

#[test]
fn matrix_set_get_round_trip() {
    set_get_round_trip::<Matrix<i64>>();
}

#[test]
fn par_matrix_set_get_round_trip() {
    set_get_round_trip::<ParMatrix<i64>>();
}

#[test]
fn matrix_out_of_range_access_is_tolerated() {
    out_of_range_access_is_tolerated::<Matrix<i64>>();
}

#[test]
fn par_matrix_out_of_range_access_is_tolerated() {
    out_of_range_access_is_tolerated::<ParMatrix<i64>>();
}

#[test]
fn matrix_resize_discards_and_rezeroes() {
    resize_discards_and_rezeroes::<Matrix<i64>>();
}

#[test]
fn par_matrix_resize_discards_and_rezeroes() {
    resize_discards_and_rezeroes::<ParMatrix<i64>>();
}

#[test]
fn matrix_equality_is_shape_sensitive() {
    equality_is_shape_sensitive::<Matrix<i64>>();
}

#[test]
fn par_matrix_equality_is_shape_sensitive() {
    equality_is_shape_sensitive::<ParMatrix<i64>>();
}

#[test]
fn matrix_clone_is_deep() {
    clone_is_deep::<Matrix<i64>>();
}

#[test]
fn par_matrix_clone_is_deep() {
    clone_is_deep::<ParMatrix<i64>>();
}

#[test]
fn matrix_addition_and_subtraction() {
    addition_and_subtraction::<Matrix<i64>>();
}

#[test]
fn par_matrix_addition_and_subtraction() {
    addition_and_subtraction::<ParMatrix<i64>>();
}

#[test]
fn matrix_multiplication() {
    multiplication::<Matrix<i64>>();
}

#[test]
fn par_matrix_multiplication() {
    multiplication::<ParMatrix<i64>>();
}

#[test]
fn matrix_scalar_broadcasts() {
    scalar_broadcasts::<Matrix<i64>>();
}

#[test]
fn par_matrix_scalar_broadcasts() {
    scalar_broadcasts::<ParMatrix<i64>>();
}

#[test]
fn matrix_shape_mismatch_names_the_operation() {
    shape_mismatch_names_the_operation::<Matrix<i64>>();
}

#[test]
fn par_matrix_shape_mismatch_names_the_operation() {
    shape_mismatch_names_the_operation::<ParMatrix<i64>>();
}

#[test]
fn matrix_operators_do_not_mutate() {
    operators_do_not_mutate::<Matrix<i64>>();
}

#[test]
fn par_matrix_operators_do_not_mutate() {
    operators_do_not_mutate::<ParMatrix<i64>>();
}

#[test]
fn matrix_product_associativity() {
    product_associativity::<Matrix<i64>>();
}

#[test]
fn par_matrix_product_associativity() {
    product_associativity::<ParMatrix<i64>>();
}
