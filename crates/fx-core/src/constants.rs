// Tuning constants shared by the simulation layer and the web front end.

// ---------------- Signal grid ----------------

// Pointer injection radius (CSS px)
pub const SIGNAL_POINTER_RADIUS: f32 = 250.0;

// Per-node decay sampled as MIN + rng * SPAN (per frame)
pub const SIGNAL_DECAY_MIN: f32 = 0.02;
pub const SIGNAL_DECAY_SPAN: f32 = 0.03;

// Chance per frame of an ambient node lighting up (circuit layout only)
pub const SIGNAL_AMBIENT_CHANCE: f64 = 0.05;

// Averaged signal below this draws no edge
pub const SIGNAL_EDGE_FLOOR: f32 = 0.05;

// Circuit layout overrides the configured spacing
pub const CIRCUIT_SPACING: f32 = 32.0;

// Dither square sizing (grid layout); squares below the draw floor are
// skipped entirely
pub const DITHER_BASE_SIZE: f32 = 6.0;
pub const DITHER_MIN_DRAW_SIZE: f32 = 0.5;

// Circuit node dot: base diameter plus signal-scaled growth
pub const CIRCUIT_DOT_BASE: f32 = 2.0;
pub const CIRCUIT_DOT_SPAN: f32 = 4.0;
pub const CIRCUIT_DOT_ALPHA_BASE: f32 = 0.1;
pub const CIRCUIT_DOT_ALPHA_SPAN: f32 = 0.5;
pub const CIRCUIT_EDGE_ALPHA: f32 = 0.4;

// ---------------- Particle field ----------------

// Spatial hash cell size; also the link distance cutoff
pub const FIELD_CELL_SIZE: f32 = 120.0;
pub const FIELD_LINK_DIST: f32 = 120.0;

// Max alpha of a link at zero distance
pub const FIELD_LINK_MAX_ALPHA: f32 = 0.25;

// Hard cap on links drawn per particle
pub const FIELD_LINKS_PER_PARTICLE: usize = 4;

// Pool bounds; the budget never leaves this range on a non-empty viewport
pub const FIELD_MIN_PARTICLES: usize = 30;
pub const FIELD_MAX_PARTICLES: usize = 150;

// Particle speed range (px per frame, per axis)
pub const FIELD_SPEED_MAX: f32 = 0.3;

// ---------------- Particle burst ----------------

pub const BURST_SPEED_MIN: f32 = 4.0;
pub const BURST_SPEED_SPAN: f32 = 6.0;
pub const BURST_DRAG: f32 = 0.95;
pub const BURST_DECAY_MIN: f32 = 0.015;
pub const BURST_DECAY_SPAN: f32 = 0.015;
pub const BURST_SIZE_MIN: f32 = 4.0;
pub const BURST_SIZE_SPAN: f32 = 4.0;

// ---------------- Marquee ----------------

// Cruising and slowed scroll speeds (px per frame)
pub const MARQUEE_BASE_SPEED: f32 = 0.5;
pub const MARQUEE_SLOW_SPEED: f32 = 0.05;

// Exponential smoothing factor toward the target speed
pub const MARQUEE_SPEED_EASE: f32 = 0.02;

// Pixel distance from the visual center that triggers a pop
pub const MARQUEE_DETECT_THRESHOLD: f32 = 40.0;

// The visual center sits slightly left of the geometric one
pub const MARQUEE_CENTER_BIAS: f32 = 40.0;

// Phase deadlines (ms)
pub const MARQUEE_FLOAT_MS: f64 = 3000.0;
pub const MARQUEE_RETURN_MS: f64 = 600.0;
pub const MARQUEE_COOLDOWN_MS: f64 = 2000.0;
pub const MARQUEE_RETRIGGER_CLEAR_MS: f64 = 5000.0;

// Clone float transform
pub const MARQUEE_FLOAT_DISTANCE: f32 = 40.0;
pub const MARQUEE_BURST_COUNT: usize = 40;

// ---------------- SDF scene ----------------

// Hit-test radius around a shape center (CSS px)
pub const SDF_HIT_RADIUS: f32 = 60.0;

// Smooth-minimum blend radius (uv units)
pub const SDF_BLEND_K: f32 = 0.15;

// Shape sizes in uv units
pub const SDF_CIRCLE_RADIUS: f32 = 0.12;
pub const SDF_BOX_HALF: f32 = 0.1;
pub const SDF_TRIANGLE_SCALE: f32 = 6.0;

// Angular rates (rad/s); box and triangle spin in opposite directions
pub const SDF_BOX_SPIN: f32 = 0.1;
pub const SDF_TRIANGLE_SPIN: f32 = -0.15;

// Glow falloff coefficient
pub const SDF_GLOW_K: f32 = 20.0;
