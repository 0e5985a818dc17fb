//! Balloons drifting upward on their strings

use femtovg::{Paint, Path};
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, jitter, pick, uniform};
use crate::color::{BALLOON_PALETTE, BALLOON_STRING, Rgba};
use crate::config::balloons as cfg;
use crate::config::population;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct BalloonsEffect;

impl ParticleEffect for BalloonsEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Balloons
    }

    fn population(&self) -> usize {
        population::BALLOONS
    }

    fn shapes(&self) -> &'static [Shape] {
        &[Shape::Balloon]
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let color = pick(rng, &BALLOON_PALETTE);
        let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
        let mut p = Particle::at(
            uniform(rng, 0.0, bounds.width),
            bounds.height + cfg::SPAWN_OFFSET + uniform(rng, 0.0, cfg::SPAWN_SPREAD),
            Shape::Balloon,
            color,
            size,
        );
        p.vx = jitter(rng, cfg::DRIFT_MAX);
        p.vy = -uniform(rng, cfg::RISE_SPEED_MIN, cfg::RISE_SPEED_MAX);
        p.rotation = jitter(rng, cfg::TILT_MAX);
        p.rotation_speed = jitter(rng, cfg::SPIN_MAX);
        p.opacity = cfg::OPACITY;
        p
    }

    fn step(
        &self,
        p: &mut Particle,
        index: usize,
        ctx: &FrameContext,
        _rng: &mut dyn RngCore,
    ) -> StepOutcome {
        // Phase offset by slot so neighbours do not sway in lockstep
        let phase = ctx.elapsed + index as f32;
        p.x += p.vx + phase.sin() * cfg::SWAY_AMPLITUDE;
        p.y += p.vy;
        p.rotation += p.rotation_speed;

        if p.y < -cfg::TOP_MARGIN {
            StepOutcome::Recycle
        } else {
            StepOutcome::Alive
        }
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        let size = p.size;
        painter.translate(p.x, p.y);
        painter.rotate(p.rotation_radians());

        let fill = Paint::color(p.color.to_femtovg());

        let mut body = Path::new();
        body.ellipse(0.0, 0.0, size * 0.4, size * 0.5);
        painter.fill_path(&body, &fill);

        let mut knot = Path::new();
        knot.move_to(-size * 0.08, size * 0.5);
        knot.line_to(size * 0.08, size * 0.5);
        knot.line_to(0.0, size * 0.6);
        knot.close();
        painter.fill_path(&knot, &fill);

        let mut string = Path::new();
        string.move_to(0.0, size * 0.6);
        string.quad_to(size * 0.1, size * 0.8, 0.0, size);
        let mut string_paint = Paint::color(BALLOON_STRING.to_femtovg());
        string_paint.set_line_width(1.0);
        painter.stroke_path(&string, &string_paint);

        // Tilted highlight on the upper left of the body
        painter.save();
        painter.translate(-size * 0.15, -size * 0.15);
        painter.rotate(-0.5);
        let mut shine = Path::new();
        shine.ellipse(0.0, 0.0, size * 0.1, size * 0.15);
        painter.fill_path(&shine, &Paint::color(Rgba::WHITE.faded(0.4).to_femtovg()));
        painter.restore();
    }
}
