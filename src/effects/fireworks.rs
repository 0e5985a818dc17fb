//! Firework bursts launched from the upper middle of the surface
//!
//! The population starts empty; every burst adds a ring of embers that fly
//! outward, sag under gravity, slow down and fade out.

use std::f32::consts::TAU;

use femtovg::{Paint, Path};
use rand::RngCore;

use super::{EffectKind, FrameContext, ParticleEffect, StepOutcome, pick, uniform};
use crate::color::CONFETTI_PALETTE;
use crate::config::fireworks as cfg;
use crate::config::population;
use crate::host::LogicalSize;
use crate::painter::Painter;
use crate::particle::{Particle, Shape};

pub struct FireworksEffect;

impl FireworksEffect {
    /// Evenly spaced ring of embers around `(x, y)`, all in one color
    pub fn burst(&self, x: f32, y: f32, rng: &mut dyn RngCore) -> Vec<Particle> {
        let color = pick(rng, &CONFETTI_PALETTE);
        let count = population::FIREWORK_BURST;
        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                let speed = uniform(rng, cfg::SPEED_MIN, cfg::SPEED_MAX);
                let size = uniform(rng, cfg::SIZE_MIN, cfg::SIZE_MAX);
                let mut p = Particle::at(x, y, Shape::Ember, color, size)
                    .with_lifetime(0.0, uniform(rng, cfg::LIFE_MIN, cfg::LIFE_MAX));
                p.vx = angle.cos() * speed;
                p.vy = angle.sin() * speed;
                p
            })
            .collect()
    }

    /// Random burst center in the upper middle region
    pub fn burst_center(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> (f32, f32) {
        let x = bounds.width * (cfg::CENTER_X_MIN + uniform(rng, 0.0, cfg::CENTER_X_SPAN));
        let y = bounds.height * (cfg::CENTER_Y_MIN + uniform(rng, 0.0, cfg::CENTER_Y_SPAN));
        (x, y)
    }
}

impl ParticleEffect for FireworksEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Fireworks
    }

    fn population(&self) -> usize {
        0
    }

    fn shapes(&self) -> &'static [Shape] {
        &[Shape::Ember]
    }

    fn reseeds_on_resize(&self) -> bool {
        false
    }

    /// A single ember at a random burst center
    fn spawn(&self, bounds: LogicalSize, rng: &mut dyn RngCore) -> Particle {
        let (x, y) = self.burst_center(bounds, rng);
        let mut ring = self.burst(x, y, rng);
        let index = rng.next_u32() as usize % ring.len();
        ring.swap_remove(index)
    }

    fn before_step(&self, particles: &mut Vec<Particle>, ctx: &FrameContext, rng: &mut dyn RngCore) {
        if ctx.frame > 0 && ctx.frame % cfg::BURST_INTERVAL == 0 {
            let (x, y) = self.burst_center(ctx.bounds, rng);
            particles.extend(self.burst(x, y, rng));
        }
    }

    fn step(
        &self,
        p: &mut Particle,
        _index: usize,
        _ctx: &FrameContext,
        _rng: &mut dyn RngCore,
    ) -> StepOutcome {
        let Some(progress) = p.age_one_frame() else {
            return StepOutcome::Expired;
        };
        p.x += p.vx;
        p.y += p.vy;
        p.vy += cfg::GRAVITY;
        p.vx *= cfg::FRICTION;
        p.vy *= cfg::FRICTION;
        p.opacity = (1.0 - progress).max(0.0);

        if p.is_expired() {
            StepOutcome::Expired
        } else {
            StepOutcome::Alive
        }
    }

    fn draw(&self, painter: &mut dyn Painter, p: &Particle) {
        let color = p.color.to_femtovg();

        let mut glow = Path::new();
        glow.circle(p.x, p.y, p.size + cfg::GLOW_RADIUS);
        let glow_paint = Paint::radial_gradient(
            p.x,
            p.y,
            p.size * 0.5,
            p.size + cfg::GLOW_RADIUS,
            p.color.faded(0.6).to_femtovg(),
            p.color.faded(0.0).to_femtovg(),
        );
        painter.fill_path(&glow, &glow_paint);

        let mut core = Path::new();
        core.circle(p.x, p.y, p.size);
        painter.fill_path(&core, &Paint::color(color));
    }
}
