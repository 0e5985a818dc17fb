//! Hearts floating up from below the bottom edge

use femtovg::{Paint, Path};
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, jitter, pick, uniform};
use crate::color::{HEART_PALETTE, Rgba};
use crate::config::hearts as cfg;
use crate::config::population;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct HeartsEffect;

/// Heart silhouette of height `size`, notch at `(0, 0.3 * size)` and tip at `(0, size)`
fn heart_path(size: f32) -> Path {
    let mut path = Path::new();
    path.move_to(0.0, size * 0.3);
    path.bezier_to(-size / 2.0, -size * 0.3, -size, size * 0.1, 0.0, size);
    path.bezier_to(size, size * 0.1, size / 2.0, -size * 0.3, 0.0, size * 0.3);
    path.close();
    path
}

impl ParticleEffect for HeartsEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Hearts
    }

    fn population(&self) -> usize {
        population::HEARTS
    }

    fn shapes(&self) -> &'static [Shape] {
        &[Shape::Heart]
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let color = pick(rng, &HEART_PALETTE);
        let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
        let mut p = Particle::at(
            uniform(rng, 0.0, bounds.width),
            bounds.height + cfg::SPAWN_OFFSET + uniform(rng, 0.0, cfg::SPAWN_SPREAD),
            Shape::Heart,
            color,
            size,
        );
        p.vx = jitter(rng, cfg::DRIFT_MAX);
        p.vy = -uniform(rng, cfg::RISE_SPEED_MIN, cfg::RISE_SPEED_MAX);
        p.opacity = uniform(rng, cfg::OPACITY_MIN, 1.0);
        p
    }

    fn step(
        &self,
        p: &mut Particle,
        _index: usize,
        _ctx: &FrameContext,
        _rng: &mut dyn RngCore,
    ) -> StepOutcome {
        p.x += p.vx + (p.y * cfg::SWAY_FREQUENCY).sin() * cfg::SWAY_AMPLITUDE;
        p.y += p.vy;

        if p.y < -cfg::TOP_MARGIN {
            StepOutcome::Recycle
        } else {
            StepOutcome::Alive
        }
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        let size = p.size;
        painter.translate(p.x, p.y);

        let path = heart_path(size);
        painter.fill_path(&path, &Paint::color(p.color.to_femtovg()));

        // Soft highlight toward the upper left lobe
        let shine = Paint::radial_gradient(
            -size * 0.2,
            -size * 0.1,
            0.0,
            size,
            Rgba::WHITE.faded(0.3).to_femtovg(),
            Rgba::WHITE.faded(0.0).to_femtovg(),
        );
        painter.fill_path(&path, &shine);
    }
}
