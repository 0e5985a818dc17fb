//! The animation surface: lifecycle, sizing and the per-frame loop
//!
//! A surface owns its particle population exclusively. The host drives it
//! through callbacks: `on_deferred` once after attach, `on_resize` while the
//! resize listener is registered, and `on_frame` for every display refresh
//! the surface asked for. Each frame re-requests the next one, so the loop
//! stops as soon as the pending ticket is cancelled.

use std::time::Instant;

use femtovg::{Paint, Path};
use log::{debug, trace};

use crate::color::Rgba;
use crate::config;
use crate::effects::{EffectKind, FrameContext, ParticleEffect, StepOutcome};
use crate::host::{BufferSize, FrameHandle, ListenerHandle, LogicalSize, SurfaceHost};
use crate::painter::Painter;
use crate::particle::Particle;
use crate::scene::SceneConfig;

/// Where the surface is in its attach/detach lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not attached to a container yet
    Detached,
    /// Attached, waiting for the container to be laid out
    AwaitingLayout,
    /// Measured and ready to draw
    Ready,
}

pub struct AnimationSurface<H: SurfaceHost> {
    host: H,
    effect: EffectKind,
    particles: Vec<Particle>,
    primary: Rgba,
    accent: Rgba,
    backdrop: bool,
    pixel_ratio: f32,
    logical: LogicalSize,
    buffer: BufferSize,
    lifecycle: Lifecycle,
    running: bool,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
    frame: u64,
    started_at: Instant,
}

impl<H: SurfaceHost> AnimationSurface<H> {
    pub fn new(host: H, scene: SceneConfig) -> Self {
        Self {
            host,
            effect: scene.animation,
            particles: Vec::new(),
            primary: scene.primary_color,
            accent: scene.accent_color,
            backdrop: false,
            pixel_ratio: config::surface::DEFAULT_PIXEL_RATIO,
            logical: LogicalSize::default(),
            buffer: BufferSize::default(),
            lifecycle: Lifecycle::Detached,
            running: false,
            pending_frame: None,
            resize_listener: None,
            frame: 0,
            started_at: Instant::now(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn effect(&self) -> EffectKind {
        self.effect
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn colors(&self) -> (Rgba, Rgba) {
        (self.primary, self.accent)
    }

    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    pub fn buffer_size(&self) -> BufferSize {
        self.buffer
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn has_backdrop(&self) -> bool {
        self.backdrop
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames stepped since the current effect started
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Mount on the host container; measurement waits for the deferred callback
    pub fn attach(&mut self) {
        if self.lifecycle != Lifecycle::Detached {
            return;
        }
        debug!("surface attached, deferring layout for {:?}", config::timing::ATTACH_DELAY);
        self.lifecycle = Lifecycle::AwaitingLayout;
        self.host.defer(config::timing::ATTACH_DELAY);
    }

    /// Deferred layout callback: first measurement, then start if there is anything to show
    pub fn on_deferred(&mut self) {
        if self.lifecycle != Lifecycle::AwaitingLayout {
            return;
        }
        self.measure();
        self.lifecycle = Lifecycle::Ready;
        if !self.effect.is_none() {
            self.register_resize_listener();
            self.start();
        }
    }

    /// Unmount: cancel the loop and drop the resize listener
    pub fn detach(&mut self) {
        self.stop();
        self.particles.clear();
        self.unregister_resize_listener();
        self.lifecycle = Lifecycle::Detached;
        debug!("surface detached");
    }

    pub fn set_effect(&mut self, kind: EffectKind) {
        if kind == self.effect {
            return;
        }
        debug!("effect {} -> {}", self.effect, kind);
        self.stop();
        self.particles.clear();
        self.effect = kind;

        // Before the first layout only the selection is recorded; on_deferred starts it
        if self.lifecycle != Lifecycle::Ready {
            return;
        }
        if kind.is_none() {
            self.unregister_resize_listener();
        } else {
            self.measure();
            self.register_resize_listener();
            self.start();
        }
    }

    pub fn set_colors(&mut self, primary: Rgba, accent: Rgba) {
        self.primary = primary;
        self.accent = accent;
    }

    /// Paint the primary-to-accent gradient behind the particles
    pub fn set_backdrop(&mut self, enabled: bool) {
        self.backdrop = enabled;
    }

    pub fn apply_scene(&mut self, scene: &SceneConfig) {
        self.set_colors(scene.primary_color, scene.accent_color);
        self.set_effect(scene.animation);
    }

    /// Container or pixel ratio changed
    pub fn on_resize(&mut self) {
        if self.lifecycle != Lifecycle::Ready || self.resize_listener.is_none() {
            return;
        }
        self.measure();
        if self.running
            && let Some(effect) = self.effect.behavior()
            && effect.reseeds_on_resize()
        {
            self.seed(effect);
        }
    }

    /// Re-measure without reseeding, for hosts that repaint an idle surface
    pub fn refresh_layout(&mut self) {
        if self.lifecycle == Lifecycle::Ready {
            self.measure();
        }
    }

    /// Display refresh callback for a frame this surface requested
    ///
    /// `painter` is `None` when the drawing context is unavailable; the frame
    /// is then skipped but the loop keeps going.
    pub fn on_frame(&mut self, painter: Option<&mut dyn Painter>) {
        if !self.running {
            return;
        }
        self.pending_frame = None;

        if let Some(painter) = painter {
            self.step();
            painter.begin_frame(self.buffer);
            self.render(painter);
            painter.end_frame();
        } else {
            trace!("no drawing context, skipping frame");
        }

        self.pending_frame = Some(self.host.request_frame());
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self) {
        let Some(effect) = self.effect.behavior() else {
            return;
        };
        self.frame += 1;
        let ctx = FrameContext {
            bounds: self.logical,
            frame: self.frame,
            elapsed: self.started_at.elapsed().as_secs_f32(),
        };
        let mut rng = rand::thread_rng();

        effect.before_step(&mut self.particles, &ctx, &mut rng);

        let mut index = 0;
        self.particles.retain_mut(|p| {
            let outcome = effect.step(p, index, &ctx, &mut rng);
            index += 1;
            match outcome {
                StepOutcome::Alive => true,
                StepOutcome::Recycle => {
                    *p = effect.spawn(ctx.bounds, &mut rng);
                    true
                }
                StepOutcome::Expired => false,
            }
        });
    }

    /// Draw the current population without advancing it
    ///
    /// Expects a cleared buffer; all effect drawing happens in logical pixels.
    pub fn render(&self, painter: &mut dyn Painter) {
        painter.reset_transform();
        painter.scale(self.pixel_ratio, self.pixel_ratio);

        if self.backdrop {
            self.draw_backdrop(painter);
        }

        let Some(effect) = self.effect.behavior() else {
            return;
        };
        for p in self.particles.iter().filter(|p| p.opacity > 0.0) {
            painter.save();
            painter.set_global_alpha(p.opacity.min(1.0));
            effect.draw(painter, p);
            painter.restore();
        }
    }

    fn draw_backdrop(&self, painter: &mut dyn Painter) {
        let LogicalSize { width, height } = self.logical;
        let mut rect = Path::new();
        rect.rect(0.0, 0.0, width, height);
        let paint = Paint::linear_gradient(
            0.0,
            0.0,
            width,
            height,
            self.primary.to_femtovg(),
            self.accent.to_femtovg(),
        );
        painter.fill_path(&rect, &paint);
    }

    fn start(&mut self) {
        let Some(effect) = self.effect.behavior() else {
            return;
        };
        debug!("starting {} at {:?} x{}", self.effect, self.logical, self.pixel_ratio);
        self.running = true;
        self.frame = 0;
        self.started_at = Instant::now();
        self.seed(effect);
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.host.request_frame());
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        if self.running {
            debug!("stopping {}", self.effect);
        }
        self.running = false;
    }

    fn seed(&mut self, effect: &dyn ParticleEffect) {
        let mut rng = rand::thread_rng();
        self.particles = effect.seed(self.logical, &mut rng);
    }

    fn measure(&mut self) {
        self.pixel_ratio = self
            .host
            .device_pixel_ratio()
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .unwrap_or(config::surface::DEFAULT_PIXEL_RATIO);
        self.logical = self.host.container_size().or_default_dimensions();
        self.buffer = self.logical.to_buffer(self.pixel_ratio);
        trace!("measured {:?} -> buffer {:?}", self.logical, self.buffer);
        self.host.resize_buffer(self.buffer);
    }

    fn register_resize_listener(&mut self) {
        self.unregister_resize_listener();
        self.resize_listener = Some(self.host.add_resize_listener());
    }

    fn unregister_resize_listener(&mut self) {
        if let Some(handle) = self.resize_listener.take() {
            self.host.remove_resize_listener(handle);
        }
    }
}

impl<H: SurfaceHost> Drop for AnimationSurface<H> {
    fn drop(&mut self) {
        if self.lifecycle != Lifecycle::Detached {
            self.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{CONFETTI_PALETTE, DEFAULT_ACCENT, DEFAULT_PRIMARY};
    use crate::config::population;
    use crate::host::HeadlessHost;
    use crate::painter::RecordingPainter;
    use crate::particle::Shape;

    fn scene(kind: EffectKind) -> SceneConfig {
        SceneConfig {
            animation: kind,
            primary_color: DEFAULT_PRIMARY,
            accent_color: DEFAULT_ACCENT,
        }
    }

    fn ready_surface(kind: EffectKind, host: HeadlessHost) -> AnimationSurface<HeadlessHost> {
        let mut surface = AnimationSurface::new(host, scene(kind));
        surface.attach();
        surface.on_deferred();
        surface
    }

    /// Fire the pending frame the way a host would
    fn fire(surface: &mut AnimationSurface<HeadlessHost>, painter: &mut RecordingPainter) -> bool {
        if surface.host_mut().take_pending_frame().is_none() {
            return false;
        }
        surface.on_frame(Some(painter));
        true
    }

    fn expected_population(kind: EffectKind) -> usize {
        match kind {
            EffectKind::Confetti => population::CONFETTI,
            EffectKind::Hearts => population::HEARTS,
            EffectKind::Balloons => population::BALLOONS,
            EffectKind::Sparkles => population::SPARKLES,
            EffectKind::Stars => population::STARS,
            EffectKind::Fireworks | EffectKind::None => 0,
        }
    }

    const SEEDED: [EffectKind; 5] = [
        EffectKind::Confetti,
        EffectKind::Hearts,
        EffectKind::Balloons,
        EffectKind::Sparkles,
        EffectKind::Stars,
    ];

    #[test]
    fn test_attach_defers_measurement() {
        let mut surface = AnimationSurface::new(HeadlessHost::default(), scene(EffectKind::Confetti));
        surface.attach();

        assert_eq!(surface.lifecycle(), Lifecycle::AwaitingLayout);
        assert_eq!(surface.host().deferred, vec![config::timing::ATTACH_DELAY]);
        assert!(surface.particles().is_empty());
        assert_eq!(surface.host().frame_requests, 0);

        surface.on_deferred();
        assert_eq!(surface.lifecycle(), Lifecycle::Ready);
        assert!(surface.is_running());
        assert_eq!(surface.host().frame_requests, 1);
    }

    #[test]
    fn test_population_constant_across_frames() {
        for kind in SEEDED {
            let mut surface = ready_surface(kind, HeadlessHost::default());
            let mut painter = RecordingPainter::default();
            assert_eq!(surface.particles().len(), expected_population(kind), "{kind}");

            for _ in 0..400 {
                assert!(fire(&mut surface, &mut painter));
                assert_eq!(surface.particles().len(), expected_population(kind), "{kind}");
            }
            assert_eq!(surface.frame_count(), 400);
        }
    }

    #[test]
    fn test_fireworks_grow_by_bursts_and_shrink_between() {
        let mut surface = ready_surface(EffectKind::Fireworks, HeadlessHost::default());
        assert!(surface.particles().is_empty());

        let mut previous = 0;
        for _ in 0..400 {
            surface.step();
            let len = surface.particles().len();
            if surface.frame_count() % config::fireworks::BURST_INTERVAL == 0 {
                assert!(len <= previous + population::FIREWORK_BURST);
                assert!(len >= population::FIREWORK_BURST);
            } else {
                assert!(len <= previous, "grew between bursts at frame {}", surface.frame_count());
            }
            if surface.frame_count() < config::fireworks::BURST_INTERVAL {
                assert_eq!(len, 0);
            }
            previous = len;
        }
    }

    #[test]
    fn test_fireworks_burst_adds_exactly_one_ring() {
        let mut surface = ready_surface(EffectKind::Fireworks, HeadlessHost::default());
        for _ in 0..config::fireworks::BURST_INTERVAL - 1 {
            surface.step();
        }
        assert!(surface.particles().is_empty());
        surface.step();
        // Fresh embers age one frame in the same step but none can expire yet
        assert_eq!(surface.particles().len(), population::FIREWORK_BURST);
        assert!(surface.particles().iter().all(|p| p.shape == Shape::Ember));
    }

    #[test]
    fn test_effect_switch_discards_previous_population() {
        for from in SEEDED {
            for to in SEEDED {
                if from == to {
                    continue;
                }
                let mut surface = ready_surface(from, HeadlessHost::default());
                surface.step();
                surface.set_effect(to);

                let valid = to.behavior().unwrap().shapes();
                assert_eq!(surface.particles().len(), expected_population(to));
                assert!(surface.particles().iter().all(|p| valid.contains(&p.shape)), "{from} -> {to}");
                assert_eq!(surface.frame_count(), 0);
            }
        }
    }

    #[test]
    fn test_switch_to_fireworks_starts_empty() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        surface.set_effect(EffectKind::Fireworks);
        assert!(surface.particles().is_empty());
        assert!(surface.is_running());
    }

    #[test]
    fn test_switch_cancels_outstanding_frame() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        let stale = surface.host().pending_frame;
        surface.set_effect(EffectKind::Stars);

        assert_eq!(surface.host().frame_cancels, 1);
        assert_ne!(surface.host().pending_frame, stale);
        assert!(surface.host().pending_frame.is_some());
    }

    #[test]
    fn test_idle_never_schedules_frames() {
        let mut surface = ready_surface(EffectKind::None, HeadlessHost::default());
        let mut painter = RecordingPainter::default();

        assert!(!surface.is_running());
        assert!(surface.particles().is_empty());
        assert!(!fire(&mut surface, &mut painter));
        surface.on_frame(Some(&mut painter));
        surface.on_resize();

        assert_eq!(surface.host().frame_requests, 0);
        assert!(surface.host().listeners.is_empty());
        assert!(painter.frames.is_empty());
        assert!(surface.particles().is_empty());
    }

    #[test]
    fn test_switch_to_none_tears_down() {
        let mut surface = ready_surface(EffectKind::Hearts, HeadlessHost::default());
        assert_eq!(surface.host().listeners.len(), 1);

        surface.set_effect(EffectKind::None);
        assert!(!surface.is_running());
        assert!(surface.particles().is_empty());
        assert_eq!(surface.host().pending_frame, None);
        assert!(surface.host().listeners.is_empty());

        surface.set_effect(EffectKind::Balloons);
        assert_eq!(surface.host().listeners.len(), 1);
        assert_eq!(surface.particles().len(), population::BALLOONS);
    }

    #[test]
    fn test_single_resize_listener_across_switches() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        for kind in [EffectKind::Hearts, EffectKind::Stars, EffectKind::Fireworks, EffectKind::Sparkles] {
            surface.set_effect(kind);
            assert_eq!(surface.host().listeners.len(), 1);
        }
    }

    #[test]
    fn test_buffer_scales_by_pixel_ratio() {
        let surface = ready_surface(EffectKind::Confetti, HeadlessHost::new(400.0, 600.0, Some(2.0)));
        assert_eq!(surface.buffer_size(), BufferSize { width: 800, height: 1200 });
        assert_eq!(surface.host().buffer, BufferSize { width: 800, height: 1200 });
        assert_eq!(surface.logical_size(), LogicalSize::new(400.0, 600.0));

        let surface = ready_surface(EffectKind::Confetti, HeadlessHost::new(400.0, 600.0, Some(1.0)));
        assert_eq!(surface.buffer_size(), BufferSize { width: 400, height: 600 });
    }

    #[test]
    fn test_missing_pixel_ratio_defaults_to_one() {
        let surface = ready_surface(EffectKind::Stars, HeadlessHost::new(300.0, 200.0, None));
        assert_eq!(surface.pixel_ratio(), 1.0);
        assert_eq!(surface.buffer_size(), BufferSize { width: 300, height: 200 });
    }

    #[test]
    fn test_frame_draws_in_logical_units() {
        let mut surface = ready_surface(EffectKind::Sparkles, HeadlessHost::new(400.0, 600.0, Some(2.0)));
        let mut painter = RecordingPainter::default();
        assert!(fire(&mut surface, &mut painter));

        assert_eq!(painter.frames, vec![BufferSize { width: 800, height: 1200 }]);
        assert_eq!(painter.scales, vec![(2.0, 2.0)]);
        assert_eq!(painter.ended, 1);
        assert_eq!(painter.depth, 0);
        assert!(painter.alphas.iter().all(|a| (0.0..=1.0).contains(a)));
    }

    #[test]
    fn test_zero_size_container_falls_back() {
        for kind in SEEDED {
            let surface = ready_surface(kind, HeadlessHost::new(0.0, 0.0, Some(1.0)));
            assert_eq!(surface.logical_size(), LogicalSize::new(400.0, 600.0));
            assert_eq!(surface.particles().len(), expected_population(kind));
            assert!(surface.particles().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn test_resize_reseeds_position_dependent_effects() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::new(400.0, 600.0, Some(1.0)));
        surface.host_mut().container = LogicalSize::new(1000.0, 300.0);
        surface.host_mut().pixel_ratio = Some(3.0);
        surface.on_resize();

        assert_eq!(surface.buffer_size(), BufferSize { width: 3000, height: 900 });
        assert_eq!(surface.particles().len(), population::CONFETTI);
        assert!(surface.particles().iter().all(|p| p.x <= 1000.0));
    }

    #[test]
    fn test_resize_keeps_fireworks_in_flight() {
        let mut surface = ready_surface(EffectKind::Fireworks, HeadlessHost::default());
        for _ in 0..config::fireworks::BURST_INTERVAL {
            surface.step();
        }
        let before = surface.particles().to_vec();
        surface.host_mut().container = LogicalSize::new(800.0, 800.0);
        surface.on_resize();
        assert_eq!(surface.particles(), before.as_slice());
        assert_eq!(surface.logical_size(), LogicalSize::new(800.0, 800.0));
    }

    #[test]
    fn test_confetti_recycled_from_above() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        let height = surface.logical_size().height;
        surface.particles[0].y = height + 25.0;
        surface.particles[0].vy = 3.0;
        surface.particles[0].x = -1234.0;

        surface.step();

        let p = &surface.particles()[0];
        assert!(p.y < 0.0);
        assert!(p.x >= 0.0);
        assert!(Shape::CONFETTI.contains(&p.shape));
        assert!(CONFETTI_PALETTE.contains(&p.color));
        assert_eq!(surface.particles().len(), population::CONFETTI);
    }

    #[test]
    fn test_missing_drawing_context_skips_but_keeps_loop() {
        let mut surface = ready_surface(EffectKind::Hearts, HeadlessHost::default());
        let before = surface.particles().to_vec();
        surface.host_mut().take_pending_frame();
        surface.on_frame(None);

        assert_eq!(surface.particles(), before.as_slice());
        assert_eq!(surface.frame_count(), 0);
        assert!(surface.host().pending_frame.is_some());
        assert_eq!(surface.host().frame_requests, 2);
    }

    #[test]
    fn test_effect_set_before_layout_starts_on_deferred() {
        let mut surface = AnimationSurface::new(HeadlessHost::default(), scene(EffectKind::None));
        surface.attach();
        surface.set_effect(EffectKind::Stars);
        surface.on_resize();

        assert!(surface.particles().is_empty());
        assert_eq!(surface.host().frame_requests, 0);
        assert_eq!(surface.host().buffer, BufferSize::default());

        surface.on_deferred();
        assert_eq!(surface.particles().len(), population::STARS);
        assert_eq!(surface.host().frame_requests, 1);
    }

    #[test]
    fn test_detach_cancels_and_unregisters() {
        let mut surface = ready_surface(EffectKind::Balloons, HeadlessHost::default());
        surface.detach();

        assert_eq!(surface.lifecycle(), Lifecycle::Detached);
        assert_eq!(surface.host().pending_frame, None);
        assert!(surface.host().listeners.is_empty());
        assert!(surface.particles().is_empty());

        let mut painter = RecordingPainter::default();
        surface.on_frame(Some(&mut painter));
        assert!(painter.frames.is_empty());
    }

    #[test]
    fn test_backdrop_toggles_gradient_fill() {
        let mut surface = ready_surface(EffectKind::None, HeadlessHost::default());
        surface.set_backdrop(true);
        let mut painter = RecordingPainter::default();
        surface.render(&mut painter);
        assert_eq!(painter.fills, 1);

        surface.set_backdrop(false);
        let mut painter = RecordingPainter::default();
        surface.render(&mut painter);
        assert_eq!(painter.fills, 0);
    }

    #[test]
    fn test_refresh_layout_keeps_idle_surface_idle() {
        let mut surface = ready_surface(EffectKind::None, HeadlessHost::default());
        surface.host_mut().container = LogicalSize::new(800.0, 500.0);
        surface.refresh_layout();

        assert_eq!(surface.logical_size(), LogicalSize::new(800.0, 500.0));
        assert_eq!(surface.host().buffer, BufferSize { width: 800, height: 500 });
        assert_eq!(surface.host().frame_requests, 0);
        assert!(surface.host().listeners.is_empty());
    }

    #[test]
    fn test_apply_scene_switches_effect_and_colors() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        assert_eq!(surface.colors(), (DEFAULT_PRIMARY, DEFAULT_ACCENT));

        let primary = Rgba::hex(0xe91e63);
        let accent = Rgba::hex(0xffd700);
        surface.apply_scene(&SceneConfig::new(EffectKind::Hearts, primary, accent));

        assert_eq!(surface.colors(), (primary, accent));
        assert_eq!(surface.effect(), EffectKind::Hearts);
        assert!(surface.is_running());
        assert_eq!(surface.particles().len(), population::HEARTS);
        assert!(surface.particles().iter().all(|p| p.shape == Shape::Heart));

        // Colors alone do not restart the loop
        surface.set_colors(accent, primary);
        assert_eq!(surface.colors(), (accent, primary));
        assert_eq!(surface.host().frame_cancels, 1);
    }

    #[test]
    fn test_same_effect_is_a_no_op() {
        let mut surface = ready_surface(EffectKind::Confetti, HeadlessHost::default());
        let before = surface.particles().to_vec();
        surface.set_effect(EffectKind::Confetti);
        assert_eq!(surface.particles(), before.as_slice());
        assert_eq!(surface.host().frame_cancels, 0);
    }
}
