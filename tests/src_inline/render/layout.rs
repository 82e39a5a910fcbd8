use super::*;

#[test]
fn test_residue_ticks_every_interval() {
    let ticks = residue_ticks(404, 50);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["1", "51", "101", "151", "201", "251", "301", "351", "401"]
    );
    assert!((ticks[0].offset - 0.5 / 404.0).abs() < 1e-6);
    assert!(ticks.iter().all(|t| t.offset > 0.0 && t.offset < 1.0));
}

#[test]
fn test_residue_ticks_small_and_empty() {
    assert!(residue_ticks(0, 50).is_empty());
    let ticks = residue_ticks(3, 50);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].label, "1");
    assert_eq!(residue_ticks(3, 0).len(), 3);
}

#[test]
fn test_value_ticks_are_round_numbers() {
    let ticks = value_ticks(0.0, 30.0);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "5", "10", "15", "20", "25", "30"]);
    assert_eq!(ticks[0].offset, 0.0);
    assert_eq!(ticks[6].offset, 1.0);
}

#[test]
fn test_value_ticks_symmetric_diverging_range() {
    let ticks = value_ticks(-1.2, 1.2);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert!(labels.contains(&"0.0"));
    assert!(labels.contains(&"-1.0"));
    assert!(labels.contains(&"1.0"));
    assert!(!labels.iter().any(|l| *l == "-0.0"));
}

#[test]
fn test_value_ticks_empty_range() {
    assert!(value_ticks(1.0, 1.0).is_empty());
    assert!(value_ticks(f32::NAN, 1.0).is_empty());
}

#[test]
fn test_layout_panels_fit_inside_figure() {
    let params = RenderParams::default();
    let layout = figure_layout(&params, 3);
    assert_eq!(layout.width, 24.0 * 72.0);
    assert_eq!(layout.height, 8.0 * 72.0);
    assert_eq!(layout.panels.len(), 3);
    let panel_w = layout.width / 3.0;
    for (k, p) in layout.panels.iter().enumerate() {
        assert_eq!(p.heatmap.w, p.heatmap.h);
        assert!(p.heatmap.x > k as f32 * panel_w);
        assert!(p.colorbar.right() < (k + 1) as f32 * panel_w);
        assert!(p.heatmap.bottom() < layout.height);
        assert!(p.colorbar.x > p.heatmap.right());
        assert!(p.x_label_at.1 < layout.height);
    }
}
