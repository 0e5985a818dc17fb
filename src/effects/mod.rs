//! Built-in particle effects
//!
//! Each effect is a stateless strategy implementing [`ParticleEffect`]:
//! a factory (`spawn`), a per-frame physics step and a draw routine.
//! [`EffectKind::behavior`] is the dispatch table keyed by kind.

mod balloons;
mod confetti;
mod fireworks;
mod hearts;
mod sparkles;
mod stars;

use std::fmt;
use std::str::FromStr;

use femtovg::Path;
use rand::{Rng, RngCore};

use crate::error::FxError;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub use balloons::BalloonsEffect;
pub use confetti::ConfettiEffect;
pub use fireworks::FireworksEffect;
pub use hearts::HeartsEffect;
pub use sparkles::SparklesEffect;
pub use stars::StarsEffect;

/// Which particle behavior a surface runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectKind {
    Confetti,
    Hearts,
    Balloons,
    Sparkles,
    Stars,
    Fireworks,
    #[default]
    None,
}

impl EffectKind {
    pub const ALL: [EffectKind; 7] = [
        EffectKind::Confetti,
        EffectKind::Hearts,
        EffectKind::Balloons,
        EffectKind::Sparkles,
        EffectKind::Stars,
        EffectKind::Fireworks,
        EffectKind::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Confetti => "confetti",
            EffectKind::Hearts => "hearts",
            EffectKind::Balloons => "balloons",
            EffectKind::Sparkles => "sparkles",
            EffectKind::Stars => "stars",
            EffectKind::Fireworks => "fireworks",
            EffectKind::None => "none",
        }
    }

    /// Parse a kind name; anything unrecognized is `None` (idle)
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or(EffectKind::None)
    }

    /// Strategy implementing this kind, or `None` for the idle kind
    pub fn behavior(self) -> Option<&'static dyn ParticleEffect> {
        match self {
            EffectKind::Confetti => Some(&ConfettiEffect),
            EffectKind::Hearts => Some(&HeartsEffect),
            EffectKind::Balloons => Some(&BalloonsEffect),
            EffectKind::Sparkles => Some(&SparklesEffect),
            EffectKind::Stars => Some(&StarsEffect),
            EffectKind::Fireworks => Some(&FireworksEffect),
            EffectKind::None => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == EffectKind::None
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FxError::UnknownEffect(s.to_string()))
    }
}

/// Per-frame inputs shared by every particle of a step
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub bounds: LogicalSize,
    /// Frames since the effect started; the first step sees 1
    pub frame: u64,
    /// Seconds since the effect started
    pub elapsed: f32,
}

/// What the surface does with a particle after its step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    /// Overwrite the slot with a freshly spawned particle
    Recycle,
    /// Drop the particle from the population
    Expired,
}

pub trait ParticleEffect {
    fn kind(&self) -> EffectKind;

    /// Particles created when the effect starts
    fn population(&self) -> usize;

    /// Shapes this effect may produce
    fn shapes(&self) -> &'static [Shape];

    /// Whether a resize should rebuild the population
    fn reseeds_on_resize(&self) -> bool {
        true
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle;

    fn seed(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Vec<Particle> {
        (0..self.population()).map(|_| self.spawn(bounds, rng)).collect()
    }

    /// Runs once per frame before the particles are stepped
    fn before_step(&self, _particles: &mut Vec<Particle>, _ctx: &FrameContext, _rng: &mut dyn RngCore) {}

    fn step(
        &self,
        particle: &mut Particle,
        index: usize,
        ctx: &FrameContext,
        rng: &mut dyn RngCore,
    ) -> StepOutcome;

    /// Draw in logical pixels; global alpha is already set to the particle's opacity
    fn draw(&self, painter: &mut dyn Painter, particle: &Particle);
}

/// Uniform draw in `[min, max)`
fn uniform(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + rng.r#gen::<f32>() * (max - min)
}

/// Uniform draw in `[-amplitude, amplitude)`
fn jitter(rng: &mut dyn RngCore, amplitude: f32) -> f32 {
    (rng.r#gen::<f32>() - 0.5) * 2.0 * amplitude
}

fn pick<T: Copy>(rng: &mut dyn RngCore, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Closed star outline alternating between outer and inner radius, centered at the origin
fn star_path(points: usize, outer: f32, inner: f32, start_angle: f32) -> Path {
    let mut path = Path::new();
    let step = std::f32::consts::TAU / points as f32;
    for i in 0..points {
        let angle = start_angle + step * i as f32;
        let inner_angle = angle + step / 2.0;
        let (ox, oy) = (angle.cos() * outer, angle.sin() * outer);
        if i == 0 {
            path.move_to(ox, oy);
        } else {
            path.line_to(ox, oy);
        }
        path.line_to(inner_angle.cos() * inner, inner_angle.sin() * inner);
    }
    path.close();
    path
}
