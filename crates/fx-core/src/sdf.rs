//! Signed-distance-field scene state and a CPU mirror of the shader math.
//!
//! The fragment shader owns the actual rendering; these functions reproduce
//! its distance field exactly (same uv conventions, same smooth-minimum)
//! so the blend behavior is testable off-GPU. Shape positions live in
//! viewport fractions so they stay anchored across resizes.

use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Box,
    Triangle,
}

#[derive(Clone, Copy, Debug)]
pub struct DraggableShape {
    /// Viewport-fraction position, invariant across resize.
    pub frac: Vec2,
    /// Absolute position in CSS px, recomputed on resize and during drag.
    pub pos: Vec2,
    pub kind: ShapeKind,
}

/// The three fixed shapes and the drag state. Shapes are never created or
/// destroyed after init; identity is their index.
pub struct ShapeSet {
    pub shapes: [DraggableShape; 3],
    dragged: Option<usize>,
    width: f32,
    height: f32,
}

impl ShapeSet {
    pub fn new() -> Self {
        let at = |x: f32, y: f32, kind| DraggableShape {
            frac: Vec2::new(x, y),
            pos: Vec2::ZERO,
            kind,
        };
        Self {
            shapes: [
                at(0.05, 0.05, ShapeKind::Circle),
                at(0.95, 0.5, ShapeKind::Box),
                at(0.05, 0.95, ShapeKind::Triangle),
            ],
            dragged: None,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    /// Recompute absolute positions from the stored fractions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        for s in &mut self.shapes {
            s.pos = s.frac * Vec2::new(width, height);
        }
    }

    /// First shape (in index order) whose center is within the hit radius.
    pub fn hit_test(&self, p: Vec2) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| s.pos.distance_squared(p) < SDF_HIT_RADIUS * SDF_HIT_RADIUS)
    }

    /// Grab the shape under `p`, if any.
    pub fn begin_drag(&mut self, p: Vec2) -> Option<usize> {
        self.dragged = self.hit_test(p);
        self.dragged
    }

    /// The dragged shape follows the pointer exactly; its fraction is
    /// recomputed each move so it stays anchored after a later resize.
    pub fn drag_to(&mut self, p: Vec2) {
        if let Some(i) = self.dragged {
            let s = &mut self.shapes[i];
            s.pos = p;
            if self.width > 0.0 && self.height > 0.0 {
                s.frac = p / Vec2::new(self.width, self.height);
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.dragged = None;
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------- Distance functions (shader mirror) ----------------

#[inline]
pub fn sd_circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

#[inline]
pub fn sd_box(p: Vec2, b: Vec2) -> f32 {
    let d = p.abs() - b;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

pub fn sd_equilateral_triangle(p: Vec2) -> f32 {
    let k = 3.0_f32.sqrt();
    let mut p = Vec2::new(p.x.abs() - 1.0, p.y + 1.0 / k);
    if p.x + k * p.y > 0.0 {
        p = Vec2::new(p.x - k * p.y, -k * p.x - p.y) / 2.0;
    }
    p.x -= p.x.clamp(-2.0, 0.0);
    -p.length() * p.y.signum()
}

/// Rotation matching the shader's `rotate2d` (clockwise for positive angle).
#[inline]
pub fn rotate(p: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * p.x + s * p.y, -s * p.x + c * p.y)
}

/// Polynomial smooth minimum. Returns the blended distance and the mix
/// factor `h` (1 = fully `d1`), which the shader reuses to blend colors.
#[inline]
pub fn smin_blend(d1: f32, d2: f32, k: f32) -> (f32, f32) {
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    let d = d2 + (d1 - d2) * h - k * h * (1.0 - h);
    (d, h)
}

/// Map a shape position in GL pixel coords (bottom-left origin) to the
/// shader's uv space: `(px - 0.5*res) / res.y`.
#[inline]
pub fn shape_uv(pos_px: Vec2, resolution: Vec2) -> Vec2 {
    (pos_px - 0.5 * resolution) / resolution.y
}

/// The scene's blended distance field at `uv`, identical to the fragment
/// shader: circle, spinning box, counter-spinning triangle, blended
/// pairwise with `SDF_BLEND_K`.
pub fn scene_distance(uv: Vec2, shapes_uv: [Vec2; 3], time: f32) -> f32 {
    let d1 = sd_circle(uv - shapes_uv[0], SDF_CIRCLE_RADIUS);

    let p2 = rotate(uv - shapes_uv[1], time * SDF_BOX_SPIN);
    let d2 = sd_box(p2, Vec2::splat(SDF_BOX_HALF));

    let p3 = rotate(uv - shapes_uv[2], time * SDF_TRIANGLE_SPIN);
    let d3 = sd_equilateral_triangle(p3 * SDF_TRIANGLE_SCALE) / SDF_TRIANGLE_SCALE;

    let (d12, _) = smin_blend(d1, d2, SDF_BLEND_K);
    let (d, _) = smin_blend(d12, d3, SDF_BLEND_K);
    d
}
