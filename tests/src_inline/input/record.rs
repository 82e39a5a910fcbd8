use super::*;
use serde_json::json;

fn path() -> &'static Path {
    Path::new("fixture.json")
}

#[test]
fn test_extract_pae_field() {
    let value = json!({"pae": [[0.5, 1.0], [2.0, 0.25]], "max_pae": 31.75, "atom_plddts": [90.0]});
    let out = extract_pae(value, path()).unwrap();
    assert_eq!(out.layout, PaeLayout::Pae);
    assert_eq!(out.max_pae, Some(31.75));
    assert_eq!(out.rows, vec![vec![Some(0.5), Some(1.0)], vec![Some(2.0), Some(0.25)]]);
}

#[test]
fn test_extract_alphafold_db_array() {
    let value = json!([{
        "predicted_aligned_error": [[0, 3], [4, 0]],
        "max_predicted_aligned_error": 31.75
    }]);
    let out = extract_pae(value, path()).unwrap();
    assert_eq!(out.layout, PaeLayout::PredictedAlignedError);
    assert_eq!(out.max_pae, Some(31.75));
    assert_eq!(out.rows[1][0], Some(4.0));
}

#[test]
fn test_null_cells_are_missing() {
    let value = json!({"pae": [[1.0, null], [null, 1.0]]});
    let out = extract_pae(value, path()).unwrap();
    assert_eq!(out.rows[0][1], None);
    assert_eq!(out.rows[1][1], Some(1.0));
}

#[test]
fn test_extract_flattened_layout() {
    let value = json!({
        "residue1": [1, 1, 2, 2],
        "residue2": [1, 2, 1, 2],
        "distance": [0.1, 5.0, 6.0, 0.2]
    });
    let out = extract_pae(value, path()).unwrap();
    assert_eq!(out.layout, PaeLayout::Flattened);
    assert_eq!(out.rows, vec![vec![Some(0.1), Some(5.0)], vec![Some(6.0), Some(0.2)]]);
}

#[test]
fn test_flattened_length_mismatch_is_invalid() {
    let value = json!({"residue1": [1, 2], "residue2": [1], "distance": [0.1, 0.2]});
    assert!(matches!(
        extract_pae(value, path()),
        Err(InputError::InvalidInput { .. })
    ));
}

#[test]
fn test_missing_field_and_empty_array() {
    assert!(matches!(
        extract_pae(json!({"plddt": [1.0]}), path()),
        Err(InputError::MissingPae { .. })
    ));
    assert!(matches!(
        extract_pae(json!([]), path()),
        Err(InputError::InvalidInput { .. })
    ));
    assert!(matches!(
        extract_pae(json!(42), path()),
        Err(InputError::InvalidInput { .. })
    ));
}

#[test]
fn test_wrong_cell_type_is_json_error() {
    let value = json!({"pae": [["a"]]});
    assert!(matches!(
        extract_pae(value, path()),
        Err(InputError::Json { .. })
    ));
}

#[test]
fn test_flattened_oversized_residue_is_invalid() {
    let value = json!({"residue1": [4_000_000_000u64], "residue2": [1], "distance": [1.0]});
    assert!(matches!(
        extract_pae(value, path()),
        Err(InputError::InvalidInput { .. })
    ));
}

#[test]
fn test_flattened_incomplete_matrix_is_invalid() {
    let value = json!({"residue1": [1, 2], "residue2": [1, 2], "distance": [0.1, 0.2]});
    assert!(matches!(
        extract_pae(value, path()),
        Err(InputError::InvalidInput { .. })
    ));
}

#[test]
fn test_out_of_range_value_is_invalid() {
    let value = json!({"pae": [[1e39, 1.0], [1.0, 1.0]]});
    match extract_pae(value, path()) {
        Err(InputError::InvalidInput { msg, .. }) => assert!(msg.contains("row 1, column 1")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_non_finite_max_pae_is_dropped() {
    let value = json!({"pae": [[0.0]], "max_pae": 1e39});
    let out = extract_pae(value, path()).unwrap();
    assert_eq!(out.max_pae, None);
}
