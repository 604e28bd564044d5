pub mod burst;
pub mod constants;
pub mod field;
pub mod marquee;
pub mod sdf;
pub mod signal;
pub mod spatial;

pub use burst::*;
pub use constants::*;
pub use field::*;
pub use marquee::*;
pub use sdf::*;
pub use signal::*;
pub use spatial::*;
