//! Confetti flakes tumbling down from above the top edge

use femtovg::{Paint, Path};
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, jitter, pick, uniform};
use crate::color::CONFETTI_PALETTE;
use crate::config::confetti as cfg;
use crate::config::population;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct ConfettiEffect;

impl ParticleEffect for ConfettiEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Confetti
    }

    fn population(&self) -> usize {
        population::CONFETTI
    }

    fn shapes(&self) -> &'static [Shape] {
        &Shape::CONFETTI
    }

    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let shape = pick(rng, &Shape::CONFETTI);
        let color = pick(rng, &CONFETTI_PALETTE);
        let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
        let mut p = Particle::at(
            uniform(rng, 0.0, bounds.width),
            -cfg::SPAWN_OFFSET - uniform(rng, 0.0, cfg::SPAWN_SPREAD),
            shape,
            color,
            size,
        );
        p.vx = jitter(rng, cfg::DRIFT_MAX);
        p.vy = uniform(rng, cfg::FALL_SPEED_MIN, cfg::FALL_SPEED_MAX);
        p.rotation = uniform(rng, 0.0, 360.0);
        p.rotation_speed = jitter(rng, cfg::SPIN_MAX);
        p
    }

    fn step(
        &self,
        p: &mut Particle,
        _index: usize,
        ctx: &FrameContext,
        rng: &mut dyn RngCore,
    ) -> StepOutcome {
        p.x += p.vx;
        p.y += p.vy;
        p.rotation += p.rotation_speed;
        // Unclamped random walk on the drift
        p.vx += jitter(rng, cfg::JITTER);

        if p.y > ctx.bounds.height + cfg::BOTTOM_MARGIN {
            StepOutcome::Recycle
        } else {
            StepOutcome::Alive
        }
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        painter.translate(p.x, p.y);
        painter.rotate(p.rotation_radians());

        let half = p.size / 2.0;
        let mut path = Path::new();
        match p.shape {
            Shape::ConfettiCircle => path.circle(0.0, 0.0, half),
            Shape::ConfettiTriangle => {
                path.move_to(0.0, -half);
                path.line_to(half, half);
                path.line_to(-half, half);
                path.close();
            }
            // Flat strip, twice as wide as tall
            _ => path.rect(-half, -p.size / 4.0, p.size, half),
        }
        painter.fill_path(&path, &Paint::color(p.color.to_femtovg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_support::ctx;

    #[test]
    fn test_spawn_above_top_edge() {
        let mut rng = rand::thread_rng();
        let bounds = LogicalSize::new(400.0, 600.0);
        for _ in 0..200 {
            let p = ConfettiEffect.spawn(bounds, &mut rng);
            assert!(p.y <= -cfg::SPAWN_OFFSET && p.y >= -cfg::SPAWN_OFFSET - cfg::SPAWN_SPREAD);
            assert!(p.x >= 0.0 && p.x <= bounds.width);
            assert!(p.vy >= cfg::FALL_SPEED_MIN && p.vy <= cfg::FALL_SPEED_MAX);
            assert!(Shape::CONFETTI.contains(&p.shape));
            assert!(CONFETTI_PALETTE.contains(&p.color));
            assert_eq!(p.opacity, 1.0);
            assert!(p.lifetime.is_none());
        }
    }

    #[test]
    fn test_step_falls_and_jitters_drift() {
        let mut rng = rand::thread_rng();
        let mut p = ConfettiEffect.spawn(LogicalSize::new(400.0, 600.0), &mut rng);
        p.y = 100.0;
        let (vx, vy) = (p.vx, p.vy);

        let outcome = ConfettiEffect.step(&mut p, 0, &ctx(1), &mut rng);

        assert_eq!(outcome, StepOutcome::Alive);
        assert_eq!(p.y, 100.0 + vy);
        assert!((p.vx - vx).abs() <= cfg::JITTER);
    }

    #[test]
    fn test_recycles_only_past_bottom_margin() {
        let mut rng = rand::thread_rng();
        let mut p = ConfettiEffect.spawn(LogicalSize::new(400.0, 600.0), &mut rng);
        p.vy = 2.0;

        p.y = 617.0;
        assert_eq!(ConfettiEffect.step(&mut p, 0, &ctx(1), &mut rng), StepOutcome::Alive);

        p.y = 619.0;
        assert_eq!(ConfettiEffect.step(&mut p, 0, &ctx(2), &mut rng), StepOutcome::Recycle);
    }
}
