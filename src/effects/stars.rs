//! Five-pointed stars pulsing gently in place

use std::f32::consts::{FRAC_PI_2, PI};

use femtovg::Paint;
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, star_path, uniform};
use crate::color::{DARK_ORANGE, GOLD, Rgba};
use crate::config::population;
use crate::config::stars as cfg;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct StarsEffect;

/// Half-sine pulse over a lifetime, 0 at both ends and 1 at half life
pub fn pulse(progress: f32) -> f32 {
    (progress * PI).sin()
}

impl ParticleEffect for StarsEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Stars
    }

    fn population(&self) -> usize {
        population::STARS
    }

    fn shapes(&self) -> &'static [Shape] {
        &[Shape::Star]
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let x = uniform(rng, 0.0, bounds.width);
        let y = uniform(rng, 0.0, bounds.height);
        let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
        let mut p = Particle::at(x, y, Shape::Star, GOLD, size)
            .with_lifetime(uniform(rng, 0.0, cfg::MAX_LIFE), cfg::MAX_LIFE);
        p.rotation = uniform(rng, 0.0, 360.0);
        p.rotation_speed = cfg::SPIN;
        p.opacity = uniform(rng, cfg::MIN_OPACITY, 1.0);
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
        p.opacity = cfg::MIN_OPACITY + pulse(progress) * (1.0 - cfg::MIN_OPACITY);
        StepOutcome::Alive
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        let progress = p.lifetime.map_or(0.5, |l| l.progress());
        let size = p.size * (0.7 + pulse(progress) * 0.3);
        painter.translate(p.x, p.y);
        painter.rotate(p.rotation_radians());

        // First point straight up
        let path = star_path(5, size, size * cfg::INNER_RATIO, -FRAC_PI_2);
        let body = Paint::radial_gradient(0.0, 0.0, size * 0.3, size, GOLD.to_femtovg(), DARK_ORANGE.to_femtovg());
        painter.fill_path(&path, &body);

        let core = Paint::radial_gradient(
            0.0,
            0.0,
            0.0,
            size * 0.3,
            Rgba::WHITE.to_femtovg(),
            Rgba::WHITE.faded(0.0).to_femtovg(),
        );
        painter.fill_path(&path, &core);
    }
}
