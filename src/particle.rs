//! Particle state shared by all effects

use crate::color::Rgba;

/// What a particle looks like; each effect only ever produces its own shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    ConfettiRect,
    ConfettiCircle,
    ConfettiTriangle,
    Heart,
    Balloon,
    Sparkle,
    Star,
    Ember,
}

impl Shape {
    pub const CONFETTI: [Shape; 3] = [Shape::ConfettiRect, Shape::ConfettiCircle, Shape::ConfettiTriangle];
}

/// Age bookkeeping for particles that expire by time, in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub age: f32,
    pub max_age: f32,
}

impl Lifetime {
    pub fn new(age: f32, max_age: f32) -> Self {
        Self { age, max_age }
    }

    /// Fraction of life used so far
    pub fn progress(&self) -> f32 {
        if self.max_age <= 0.0 {
            1.0
        } else {
            self.age / self.max_age
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }
}

/// One simulated visual unit, in logical pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    pub color: Rgba,
    pub opacity: f32,
    pub shape: Shape,
    pub lifetime: Option<Lifetime>,
}

impl Particle {
    /// A motionless, fully opaque particle at `(x, y)`
    pub fn at(x: f32, y: f32, shape: Shape, color: Rgba, size: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size,
            rotation: 0.0,
            rotation_speed: 0.0,
            color,
            opacity: 1.0,
            shape,
            lifetime: None,
        }
    }

    pub fn with_lifetime(mut self, age: f32, max_age: f32) -> Self {
        self.lifetime = Some(Lifetime::new(age, max_age));
        self
    }

    /// Advance age by one frame and return the new progress, if this particle has a lifetime
    pub fn age_one_frame(&mut self) -> Option<f32> {
        let lifetime = self.lifetime.as_mut()?;
        lifetime.age += 1.0;
        Some(lifetime.progress())
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime.is_some_and(|l| l.is_expired())
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }
}
