use super::*;

#[test]
fn test_sequential_autoscales_to_present_values() {
    let m = SquareMatrix::from_rows(vec![
        vec![Some(2.0), None],
        vec![Some(12.0), Some(7.0)],
    ])
    .unwrap();
    let scale = ColorScale::sequential(&m, None);
    assert_eq!(scale.bounds(), (2.0, 12.0));
    assert_eq!(scale.color(2.0), VIRIDIS[0]);
    assert_eq!(scale.color(12.0), VIRIDIS[8]);
    assert_eq!(scale.color(7.0), VIRIDIS[4]);
    assert_eq!(scale.color(-100.0), VIRIDIS[0]);
}

#[test]
fn test_sequential_fixed_max() {
    let m = SquareMatrix::from_dense(&[vec![3.0]]).unwrap();
    let scale = ColorScale::sequential(&m, Some(31.75));
    assert_eq!(scale.bounds(), (0.0, 31.75));
}

#[test]
fn test_degenerate_ranges_are_widened() {
    let flat = SquareMatrix::from_dense(&[vec![4.0, 4.0], vec![4.0, 4.0]]).unwrap();
    assert_eq!(ColorScale::sequential(&flat, None).bounds(), (3.5, 4.5));

    let empty = SquareMatrix::missing(2);
    assert_eq!(ColorScale::sequential(&empty, None).bounds(), (0.0, 1.0));
    assert_eq!(
        ColorScale::diverging(&empty),
        ColorScale::Diverging { limit: 1.0 }
    );
}

#[test]
fn test_diverging_is_centered_on_zero() {
    let m = SquareMatrix::from_dense(&[vec![-3.0, 1.0], vec![0.0, 6.0]]).unwrap();
    let scale = ColorScale::diverging(&m);
    assert_eq!(scale.bounds(), (-6.0, 6.0));
    assert_eq!(scale.normalize(0.0), 0.5);
    assert_eq!(scale.color(0.0), COOLWARM[2]);
    assert_eq!(scale.color(6.0), COOLWARM[4]);
    assert_eq!(scale.color(-6.0), COOLWARM[0]);
}

#[test]
fn test_missing_cells_use_missing_color() {
    let m = SquareMatrix::from_rows(vec![vec![Some(1.0), None], vec![None, Some(2.0)]]).unwrap();
    let scale = ColorScale::sequential(&m, None);
    let px = rasterize(&m, &scale, WHITE);
    assert_eq!(px.len(), 4);
    assert_eq!(px[1], WHITE);
    assert_eq!(px[2], WHITE);
    assert_eq!(px[0], VIRIDIS[0]);
    assert_eq!(px[3], VIRIDIS[8]);
    assert_eq!(scale.cell_color(None, Rgb(0, 0, 0)), Rgb(0, 0, 0));
}

#[test]
fn test_gradient_runs_from_max_to_min() {
    let scale = ColorScale::Diverging { limit: 2.0 };
    let g = gradient(&scale, 5);
    assert_eq!(g.len(), 5);
    assert_eq!(g[0], COOLWARM[4]);
    assert_eq!(g[2], COOLWARM[2]);
    assert_eq!(g[4], COOLWARM[0]);
}
