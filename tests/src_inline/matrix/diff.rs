use super::*;
use crate::matrix::gap::insert_gap;

#[test]
fn test_difference_propagates_missing() {
    let a = SquareMatrix::from_rows(vec![
        vec![Some(5.0), None],
        vec![Some(2.0), Some(8.0)],
    ])
    .unwrap();
    let b = SquareMatrix::from_rows(vec![
        vec![Some(1.0), Some(1.0)],
        vec![None, Some(3.0)],
    ])
    .unwrap();
    let d = difference(&a, &b).unwrap();
    assert_eq!(d.cells(), &[Some(4.0), None, None, Some(5.0)]);
}

#[test]
fn test_difference_requires_equal_dims() {
    let a = SquareMatrix::missing(2);
    let b = SquareMatrix::missing(3);
    assert_eq!(
        difference(&a, &b).unwrap_err(),
        MatrixError::DimensionMismatch { left: 2, right: 3 }
    );
}

#[test]
fn test_identical_realigned_matrices_diff_to_zero() {
    let m = SquareMatrix::from_dense(&[
        vec![0.5, 4.0, 9.0],
        vec![3.5, 0.25, 7.0],
        vec![8.0, 6.5, 0.75],
    ])
    .unwrap();
    let realigned = insert_gap(&m, 1).unwrap();
    let d = difference(&realigned, &realigned).unwrap();
    for (out, src) in d.cells().iter().zip(realigned.cells()) {
        match src {
            Some(_) => assert_eq!(*out, Some(0.0)),
            None => assert_eq!(*out, None),
        }
    }
}

#[test]
fn test_reference_truncated_to_realigned_size() {
    let mutant = SquareMatrix::from_dense(&[vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
    let realigned = insert_gap(&mutant, 2).unwrap();
    let wt = SquareMatrix::from_dense(&[
        vec![1.0, 1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0],
    ])
    .unwrap();
    let (d, fit) = difference_against_reference(&realigned, &wt).unwrap();
    assert_eq!(d.dim(), 3);
    assert!(fit.truncated);
    assert_eq!(fit.reference_dim, 4);
    assert_eq!(fit.target_dim, 3);
    assert_eq!(d.get(0, 0), Some(1.0));
    assert_eq!(d.get(1, 1), Some(4.0));
    assert_eq!(d.get(2, 2), None);
}

#[test]
fn test_reference_of_matching_size_is_not_truncated() {
    let mutant = SquareMatrix::from_dense(&[vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
    let realigned = insert_gap(&mutant, 0).unwrap();
    let wt = SquareMatrix::from_dense(&[
        vec![1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
    ])
    .unwrap();
    let (_, fit) = difference_against_reference(&realigned, &wt).unwrap();
    assert!(!fit.truncated);
}

#[test]
fn test_reference_smaller_than_realigned_fails() {
    let realigned = SquareMatrix::missing(4);
    let wt = SquareMatrix::missing(3);
    assert!(matches!(
        difference_against_reference(&realigned, &wt),
        Err(MatrixError::TruncateBeyondDim { requested: 4, dim: 3 })
    ));
}

#[test]
fn test_difference_stats_and_residue_ranking() {
    let d = SquareMatrix::from_rows(vec![
        vec![None, Some(-4.0), Some(2.0)],
        vec![None, None, None],
        vec![Some(1.0), Some(-1.0), Some(0.0)],
    ])
    .unwrap();
    let stats = difference_stats(&d);
    assert_eq!(stats.present, 5);
    assert_eq!(stats.min, Some(-4.0));
    assert_eq!(stats.max, Some(2.0));
    assert!((stats.mean.unwrap() - (-0.4)).abs() < 1e-6);
    assert!((stats.mean_abs.unwrap() - 1.6).abs() < 1e-6);

    let deltas = residue_deltas(&d);
    assert_eq!(deltas.len(), 3);
    assert_eq!(deltas[1].present, 0);
    assert_eq!(deltas[1].mean_abs, None);
    assert!((deltas[0].mean.unwrap() - (-1.0)).abs() < 1e-6);

    let top = top_residues(&deltas, 5);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].index, 0);
    assert_eq!(top[1].index, 2);
}
