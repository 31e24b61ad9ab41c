use bizpulse_layout::honeycomb::grid_dimensions;
use bizpulse_layout::matrix::spread_offsets;
use bizpulse_layout::{layout_honeycomb, layout_matrix, HexItem, HoneycombConfig, MatrixConfig, MatrixView};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_spread_offsets_distinct_for_any_crowd() {
    for bandwidth in [0.0, 12.5, 80.0, 400.0] {
        for count in 2..=60 {
            let offsets = spread_offsets(count, bandwidth, 0.8, 40.0);
            assert_eq!(offsets.len(), count);
            for pair in offsets.windows(2) {
                assert!(pair[1] > pair[0], "count={} bandwidth={}", count, bandwidth);
            }
            let sum: f64 = offsets.iter().sum();
            assert!(sum.abs() < 1e-6);
        }
    }
}

#[test]
fn test_spread_capped_by_band() {
    let offsets = spread_offsets(10, 100.0, 0.8, 40.0);
    let width = offsets[9] - offsets[0];
    assert!((width - 80.0).abs() < 1e-9);

    let offsets = spread_offsets(2, 1000.0, 0.8, 40.0);
    assert!((offsets[1] - offsets[0] - 80.0).abs() < 1e-9);
}

#[test]
fn test_every_point_placed_once() {
    let columns = ["A", "B", "C"];
    let items: Vec<(u64, &str, usize, f64)> = (0..90u64)
        .map(|i| (i, columns[(i % 3) as usize], (i % 4) as usize, (i % 7) as f64))
        .collect();
    let view = MatrixView::new(4, items.iter().copied());

    let mut rng = StdRng::seed_from_u64(21);
    let layout = layout_matrix(&view, &MatrixConfig::default(), &mut rng);

    assert_eq!(layout.placements.len(), 90);
    let keys: Vec<u64> = layout.placements.iter().map(|p| p.key).collect();
    assert_eq!(keys, (0..90).collect::<Vec<_>>());
    assert_eq!(layout.collision_groups, 12);
}

#[test]
fn test_grid_is_near_square() {
    for n in 1..500 {
        let (cols, rows) = grid_dimensions(n);
        assert!(cols * rows >= n);
        assert!(cols >= rows);
        assert!(cols * (rows - 1) < n);
    }
    assert_eq!(grid_dimensions(0), (0, 0));
}

#[test]
fn test_honeycomb_coverage_and_stagger() {
    let types = ["server", "middleware", "application-service", "database"];
    let items: Vec<HexItem> = (0..50u64).map(|i| HexItem::new(i, types[(i % 4) as usize])).collect();
    let config = HoneycombConfig::default();
    let layout = layout_honeycomb(&items, &config);

    assert_eq!(layout.placements.len(), items.len());
    for placement in &layout.placements {
        let band = &layout.bands[placement.band.index()];
        assert!(placement.center.x >= band.x_range.0 && placement.center.x <= band.x_range.1);
        assert_eq!(layout.band_of(placement.center.x), Some(placement.band));
    }

    // Odd columns sit half a spacing lower than their even neighbours in the same row
    let infra = &layout.bands[0];
    let first = layout.placements.iter().find(|p| p.band == infra.band && p.row == 0 && p.col == 0).unwrap();
    let second = layout.placements.iter().find(|p| p.band == infra.band && p.row == 0 && p.col == 1).unwrap();
    assert!((second.center.y - first.center.y - infra.spacing * 0.5).abs() < 1e-9);
}
