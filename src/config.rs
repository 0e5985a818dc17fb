//! Centralized tunables for the animation surface
//!
//! All magic numbers for spawn ranges, physics and timing live here.
//! Positions and speeds are in logical pixels (and logical pixels per frame).

/// Surface sizing and lifecycle
pub mod surface {
    /// Logical width used when the container measures to zero
    pub const DEFAULT_WIDTH: f32 = 400.0;
    /// Logical height used when the container measures to zero
    pub const DEFAULT_HEIGHT: f32 = 600.0;
    /// Device pixel ratio used when the host cannot report one
    pub const DEFAULT_PIXEL_RATIO: f32 = 1.0;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Delay between attach and the first measurement, so the container has been laid out
    pub const ATTACH_DELAY: Duration = Duration::from_millis(100);
}

/// Population size per effect kind
pub mod population {
    pub const CONFETTI: usize = 50;
    pub const HEARTS: usize = 15;
    pub const BALLOONS: usize = 10;
    pub const SPARKLES: usize = 30;
    pub const STARS: usize = 25;
    /// Particles created by a single firework burst
    pub const FIREWORK_BURST: usize = 30;
}

/// Confetti flakes falling from above the top edge
pub mod confetti {
    /// Flakes are recycled once they fall this far below the bottom edge
    pub const BOTTOM_MARGIN: f32 = 20.0;
    /// Spawn y is `-SPAWN_OFFSET - rand * SPAWN_SPREAD`
    pub const SPAWN_OFFSET: f32 = 20.0;
    pub const SPAWN_SPREAD: f32 = 100.0;
    pub const FALL_SPEED_MIN: f32 = 2.0;
    pub const FALL_SPEED_MAX: f32 = 5.0;
    /// Horizontal drift is uniform in `[-DRIFT_MAX, DRIFT_MAX)`
    pub const DRIFT_MAX: f32 = 1.0;
    /// Per-frame horizontal jitter is uniform in `[-JITTER, JITTER)`
    pub const JITTER: f32 = 0.05;
    pub const SIZE_MIN: f32 = 8.0;
    pub const SIZE_MAX: f32 = 16.0;
    /// Rotation rate in degrees per frame, uniform in `[-SPIN_MAX, SPIN_MAX)`
    pub const SPIN_MAX: f32 = 5.0;
}

/// Hearts rising from below the bottom edge
pub mod hearts {
    /// Hearts are recycled once they rise above `-TOP_MARGIN`
    pub const TOP_MARGIN: f32 = 50.0;
    pub const SPAWN_OFFSET: f32 = 20.0;
    pub const SPAWN_SPREAD: f32 = 50.0;
    pub const RISE_SPEED_MIN: f32 = 1.5;
    pub const RISE_SPEED_MAX: f32 = 3.5;
    pub const DRIFT_MAX: f32 = 0.5;
    /// Sway is `sin(y * SWAY_FREQUENCY) * SWAY_AMPLITUDE`
    pub const SWAY_FREQUENCY: f32 = 0.02;
    pub const SWAY_AMPLITUDE: f32 = 0.5;
    pub const SIZE_MIN: f32 = 15.0;
    pub const SIZE_MAX: f32 = 35.0;
    pub const OPACITY_MIN: f32 = 0.8;
}

/// Balloons rising from below the bottom edge
pub mod balloons {
    pub const TOP_MARGIN: f32 = 100.0;
    pub const SPAWN_OFFSET: f32 = 50.0;
    pub const SPAWN_SPREAD: f32 = 100.0;
    pub const RISE_SPEED_MIN: f32 = 1.0;
    pub const RISE_SPEED_MAX: f32 = 2.5;
    pub const DRIFT_MAX: f32 = 0.25;
    /// Sway is `sin(seconds + index) * SWAY_AMPLITUDE`
    pub const SWAY_AMPLITUDE: f32 = 0.3;
    pub const SIZE_MIN: f32 = 30.0;
    pub const SIZE_MAX: f32 = 50.0;
    /// Initial tilt in degrees, uniform in `[-TILT_MAX, TILT_MAX)`
    pub const TILT_MAX: f32 = 10.0;
    pub const SPIN_MAX: f32 = 0.25;
    pub const OPACITY: f32 = 0.9;
}

/// Four-pointed sparkles blinking in place
pub mod sparkles {
    pub const MAX_LIFE: f32 = 100.0;
    pub const SIZE_MIN: f32 = 10.0;
    pub const SIZE_MAX: f32 = 25.0;
    pub const SPIN: f32 = 2.0;
    /// Inner radius of the star outline relative to the outer one
    pub const INNER_RATIO: f32 = 0.3;
}

/// Five-pointed stars pulsing in place
pub mod stars {
    pub const MAX_LIFE: f32 = 150.0;
    pub const SIZE_MIN: f32 = 8.0;
    pub const SIZE_MAX: f32 = 20.0;
    pub const SPIN: f32 = 1.0;
    pub const INNER_RATIO: f32 = 0.4;
    /// Opacity never drops below this floor
    pub const MIN_OPACITY: f32 = 0.3;
}

/// Firework bursts
pub mod fireworks {
    /// A burst is launched every `BURST_INTERVAL` frames
    pub const BURST_INTERVAL: u64 = 90;
    /// Burst centers are drawn from `[0.2, 0.8) x [0.2, 0.5)` of the surface
    pub const CENTER_X_MIN: f32 = 0.2;
    pub const CENTER_X_SPAN: f32 = 0.6;
    pub const CENTER_Y_MIN: f32 = 0.2;
    pub const CENTER_Y_SPAN: f32 = 0.3;
    pub const SPEED_MIN: f32 = 2.0;
    pub const SPEED_MAX: f32 = 5.0;
    pub const SIZE_MIN: f32 = 3.0;
    pub const SIZE_MAX: f32 = 6.0;
    pub const LIFE_MIN: f32 = 60.0;
    pub const LIFE_MAX: f32 = 100.0;
    pub const GRAVITY: f32 = 0.05;
    pub const FRICTION: f32 = 0.98;
    /// Glow radius in logical pixels around each ember
    pub const GLOW_RADIUS: f32 = 10.0;
}
