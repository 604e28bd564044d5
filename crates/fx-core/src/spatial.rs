//! Fixed-cell spatial hash for cheap neighbor queries.
//!
//! The grid is rebuilt from scratch every frame; there is deliberately no
//! insert/remove API. Particle counts are small (~150), so a full rebuild
//! is cheaper and simpler than incremental maintenance.

use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

pub type NeighborList = SmallVec<[u32; 64]>;

pub struct SpatialGrid {
    cell_size: f32,
    buckets: FnvHashMap<(i32, i32), Vec<u32>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            buckets: FnvHashMap::default(),
        }
    }

    #[inline]
    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Clear and repartition all points. Bucket membership depends only on
    /// each point's position, so iteration order cannot change the result.
    pub fn rebuild(&mut self, points: &[Vec2]) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
        for (i, p) in points.iter().enumerate() {
            let key = self.cell_of(*p);
            self.buckets.entry(key).or_default().push(i as u32);
        }
    }

    /// Indices in the 3x3 block of cells centered on `p`'s cell, unordered.
    /// May include the index of `p` itself when it was part of the rebuild.
    pub fn neighbors(&self, p: Vec2) -> NeighborList {
        let (cx, cy) = self.cell_of(p);
        let mut out = NeighborList::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.buckets.get(&(cx + dx, cy + dy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out
    }

    /// Total number of indices currently bucketed. Equals the point count
    /// after a rebuild: every index lives in exactly one bucket.
    pub fn indexed_len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
}
