//! Invitation FX - decorative particle effects behind an invitation card
//!
//! An [`AnimationSurface`] renders one of six particle effects (or nothing)
//! into a femtovg canvas sized to its host container at native resolution.
//! Simulation runs in logical pixels; the device pixel ratio is applied only
//! by the draw transform.

pub mod color;
pub mod config;
pub mod effects;
pub mod error;
pub mod host;
pub mod painter;
pub mod particle;
pub mod persistence;
pub mod scene;
pub mod surface;

pub use color::Rgba;
pub use effects::{EffectKind, ParticleEffect};
pub use error::{FxError, FxResult};
pub use host::{BufferSize, HeadlessHost, LogicalSize, SurfaceHost};
pub use painter::Painter;
pub use particle::{Particle, Shape};
pub use scene::SceneConfig;
pub use surface::AnimationSurface;
