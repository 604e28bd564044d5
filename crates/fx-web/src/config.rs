//! Per-instance effect configuration for this site's layout.
//!
//! Layout modes arrive as strings (mirroring the data attributes the page
//! uses) and are parsed once at init into `SignalLayout`.

pub struct SectionConfig {
    pub selector: &'static str,
    pub color: &'static str,
    pub spacing: f32,
    pub fade_margin: f32,
    pub z_index: i32,
    pub layout: &'static str,
}

pub const SECTIONS: &[SectionConfig] = &[
    // Hero: circuit-board traces instead of the dither grid.
    SectionConfig {
        selector: ".hero",
        color: "rgba(0, 217, 255, 0.15)",
        spacing: 32.0,
        fade_margin: 120.0,
        z_index: 1,
        layout: "circuit",
    },
    // Other sections: vignette-faded dither grid.
    SectionConfig {
        selector: ".about",
        color: "rgba(168, 85, 247, 0.15)",
        spacing: 32.0,
        fade_margin: 120.0,
        z_index: 1,
        layout: "grid",
    },
    SectionConfig {
        selector: ".sketches-section",
        color: "rgba(255, 107, 107, 0.15)",
        spacing: 32.0,
        fade_margin: 120.0,
        z_index: 1,
        layout: "grid",
    },
    SectionConfig {
        selector: ".programs",
        color: "rgba(255, 255, 255, 0.12)",
        spacing: 32.0,
        fade_margin: 120.0,
        z_index: 1,
        layout: "grid",
    },
    SectionConfig {
        selector: ".contact",
        color: "rgba(0, 217, 255, 0.15)",
        spacing: 32.0,
        fade_margin: 120.0,
        z_index: 1,
        layout: "grid",
    },
    SectionConfig {
        selector: ".project-hero",
        color: "rgba(0, 217, 255, 0.18)",
        spacing: 28.0,
        fade_margin: 180.0,
        z_index: 1,
        layout: "grid",
    },
    SectionConfig {
        selector: ".project-article",
        color: "rgba(168, 85, 247, 0.12)",
        spacing: 32.0,
        fade_margin: 100.0,
        z_index: 1,
        layout: "grid",
    },
];

// Ambient particle field container and palette.
pub const FIELD_SELECTOR: &str = ".particle-field";
pub const FIELD_PALETTE: &[&str] = &["#00d9ff", "#a855f7", "#ffffff"];

// Circuit trace/dot color components, formatted into rgba() per draw.
pub const CIRCUIT_RGB: &str = "0, 217, 255";

// Marquee selectors and start delay (entry animation must settle first).
pub const MARQUEE_TRACK_SELECTOR: &str = ".marquee-track";
pub const MARQUEE_CONTAINER_SELECTOR: &str = ".logo-marquee";
pub const MARQUEE_START_DELAY_MS: f64 = 2000.0;

// SDF scene canvas.
pub const SDF_CANVAS_ID: &str = "sdf-canvas";
