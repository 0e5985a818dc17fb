//! Four-pointed sparkles that blink in and out where they stand

use femtovg::Paint;
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, star_path, uniform};
use crate::color::{AMBER, GOLD, Rgba};
use crate::config::population;
use crate::config::sparkles as cfg;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct SparklesEffect;

/// Triangular envelope: 0 at birth, 1 at half life, 0 at death
pub fn envelope(progress: f32) -> f32 {
    if progress < 0.5 {
        progress * 2.0
    } else {
        (1.0 - progress) * 2.0
    }
}

impl ParticleEffect for SparklesEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Sparkles
    }

    fn population(&self) -> usize {
        population::SPARKLES
    }

    fn shapes(&self) -> &'static [Shape] {
        &[Shape::Sparkle]
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let x = uniform(rng, 0.0, bounds.width);
        let y = uniform(rng, 0.0, bounds.height);
        let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
        let mut p = Particle::at(x, y, Shape::Sparkle, GOLD, size)
            // Random starting age so the field does not blink in unison
            .with_lifetime(uniform(rng, 0.0, cfg::MAX_LIFE), cfg::MAX_LIFE);
        p.rotation = uniform(rng, 0.0, 360.0);
        p.rotation_speed = cfg::SPIN;
        p.opacity = 0.0;
        p
    }

    fn step(
        &self,
        p: &mut Particle,
        _index: usize,
        _ctx: &FrameContext,
        _rng: &mut dyn RngCore,
    ) -> StepOutcome {
        p.rotation += p.rotation_speed;
        let Some(progress) = p.age_one_frame() else {
            return StepOutcome::Recycle;
        };
        if p.is_expired() {
            return StepOutcome::Recycle;
        }
        p.opacity = envelope(progress);
        StepOutcome::Alive
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        let size = p.size * (0.5 + p.opacity * 0.5);
        painter.translate(p.x, p.y);
        painter.rotate(p.rotation_radians());

        let path = star_path(4, size, size * cfg::INNER_RATIO, 0.0);
        let body = Paint::radial_gradient(0.0, 0.0, 0.0, size, GOLD.to_femtovg(), AMBER.to_femtovg());
        painter.fill_path(&path, &body);

        let core = Paint::radial_gradient(
            0.0,
            0.0,
            0.0,
            size * 0.5,
            Rgba::WHITE.to_femtovg(),
            Rgba::WHITE.faded(0.0).to_femtovg(),
        );
        painter.fill_path(&path, &core);
    }
}
