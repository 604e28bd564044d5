// Tests for the full-rebuild spatial hash: adjacency guarantees,
// exactly-once bucketing, and order independence.

use fx_core::spatial::SpatialGrid;
use glam::Vec2;

#[test]
fn points_in_same_cell_see_each_other() {
    let mut grid = SpatialGrid::new(100.0);
    let points = vec![Vec2::new(10.0, 10.0), Vec2::new(90.0, 90.0)];
    grid.rebuild(&points);

    assert!(grid.neighbors(points[0]).contains(&1));
    assert!(grid.neighbors(points[1]).contains(&0));
}

#[test]
fn points_in_adjacent_cells_see_each_other() {
    let mut grid = SpatialGrid::new(100.0);
    // Straddling the x = 100 cell boundary.
    let points = vec![Vec2::new(95.0, 50.0), Vec2::new(105.0, 50.0)];
    grid.rebuild(&points);

    assert!(grid.neighbors(points[0]).contains(&1));
    assert!(grid.neighbors(points[1]).contains(&0));
}

#[test]
fn far_points_are_not_neighbors() {
    let mut grid = SpatialGrid::new(100.0);
    // More than 2 cells apart on the x axis.
    let points = vec![Vec2::new(50.0, 50.0), Vec2::new(350.0, 50.0)];
    grid.rebuild(&points);

    assert!(!grid.neighbors(points[0]).contains(&1));
    assert!(!grid.neighbors(points[1]).contains(&0));
}

#[test]
fn neighbor_query_may_include_self() {
    let mut grid = SpatialGrid::new(100.0);
    let points = vec![Vec2::new(50.0, 50.0)];
    grid.rebuild(&points);

    assert!(grid.neighbors(points[0]).contains(&0));
}

#[test]
fn every_index_bucketed_exactly_once() {
    let mut grid = SpatialGrid::new(64.0);
    let points: Vec<Vec2> = (0..137)
        .map(|i| Vec2::new((i * 37 % 500) as f32, (i * 61 % 400) as f32))
        .collect();
    grid.rebuild(&points);

    assert_eq!(grid.indexed_len(), points.len());
}

#[test]
fn rebuild_is_order_independent() {
    let points: Vec<Vec2> = (0..50)
        .map(|i| Vec2::new((i * 83 % 300) as f32, (i * 29 % 300) as f32))
        .collect();
    let mut reversed = points.clone();
    reversed.reverse();

    let mut a = SpatialGrid::new(75.0);
    let mut b = SpatialGrid::new(75.0);
    a.rebuild(&points);
    b.rebuild(&reversed);

    let n = points.len();
    for (i, p) in points.iter().enumerate() {
        let mut na: Vec<u32> = a.neighbors(*p).to_vec();
        // Map reversed indices back to the original numbering.
        let mut nb: Vec<u32> = b
            .neighbors(*p)
            .iter()
            .map(|&j| (n - 1 - j as usize) as u32)
            .collect();
        na.sort_unstable();
        nb.sort_unstable();
        assert_eq!(na, nb, "membership differs for point {i}");
    }
}

#[test]
fn rebuild_clears_previous_contents() {
    let mut grid = SpatialGrid::new(100.0);
    grid.rebuild(&[Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)]);
    grid.rebuild(&[Vec2::new(500.0, 500.0)]);

    assert_eq!(grid.indexed_len(), 1);
    assert!(grid.neighbors(Vec2::new(10.0, 10.0)).is_empty());
}
