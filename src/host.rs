//! The environment a surface lives in
//!
//! A host measures the container, reports the device pixel ratio, owns the
//! backing buffer and delivers display-synced frame callbacks. The window
//! host in the binary and [`HeadlessHost`] are the two implementations.

use std::time::Duration;

use crate::config;

/// Size in logical (density independent) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalSize {
    pub width: f32,
    pub height: f32,
}

impl LogicalSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replace each degenerate dimension (zero, negative, NaN) with the default
    pub fn or_default_dimensions(self) -> Self {
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            width: pick(self.width, config::surface::DEFAULT_WIDTH),
            height: pick(self.height, config::surface::DEFAULT_HEIGHT),
        }
    }

    /// Backing buffer extent for this size at `pixel_ratio`
    pub fn to_buffer(self, pixel_ratio: f32) -> BufferSize {
        BufferSize {
            width: (self.width * pixel_ratio).round().max(0.0) as u32,
            height: (self.height * pixel_ratio).round().max(0.0) as u32,
        }
    }
}

impl Default for LogicalSize {
    fn default() -> Self {
        Self::new(config::surface::DEFAULT_WIDTH, config::surface::DEFAULT_HEIGHT)
    }
}

/// Size of the backing pixel buffer, in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

/// Ticket for one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Registration of a resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Services a surface needs from its environment
///
/// Callbacks flow back into the surface: the host calls
/// `AnimationSurface::on_frame` for a requested frame,
/// `AnimationSurface::on_resize` while a listener is registered, and
/// `AnimationSurface::on_deferred` once a deferred delay elapses.
pub trait SurfaceHost {
    /// Current container size; may be zero before layout
    fn container_size(&self) -> LogicalSize;
    fn device_pixel_ratio(&self) -> Option<f32>;
    fn resize_buffer(&mut self, size: BufferSize);

    /// Ask for one callback at the next display refresh
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_resize_listener(&mut self) -> ListenerHandle;
    fn remove_resize_listener(&mut self, handle: ListenerHandle);

    /// Ask for a single callback after `delay`
    fn defer(&mut self, delay: Duration);
}

/// In-memory host with a fixed container, for tests, benchmarks and offscreen use
///
/// Every call is recorded so callers can inspect what the surface asked for.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub container: LogicalSize,
    pub pixel_ratio: Option<f32>,
    pub buffer: BufferSize,
    pub pending_frame: Option<FrameHandle>,
    pub frame_requests: usize,
    pub frame_cancels: usize,
    pub listeners: Vec<ListenerHandle>,
    pub deferred: Vec<Duration>,
    next_id: u64,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32, pixel_ratio: Option<f32>) -> Self {
        Self {
            container: LogicalSize::new(width, height),
            pixel_ratio,
            buffer: BufferSize::default(),
            pending_frame: None,
            frame_requests: 0,
            frame_cancels: 0,
            listeners: Vec::new(),
            deferred: Vec::new(),
            next_id: 0,
        }
    }

    /// Take the outstanding frame ticket, as a host does right before firing it
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(config::surface::DEFAULT_WIDTH, config::surface::DEFAULT_HEIGHT, Some(1.0))
    }
}

impl SurfaceHost for HeadlessHost {
    fn container_size(&self) -> LogicalSize {
        self.container
    }

    fn device_pixel_ratio(&self) -> Option<f32> {
        self.pixel_ratio
    }

    fn resize_buffer(&mut self, size: BufferSize) {
        self.buffer = size;
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id());
        self.pending_frame = Some(handle);
        self.frame_requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
        self.frame_cancels += 1;
    }

    fn add_resize_listener(&mut self) -> ListenerHandle {
        let handle = ListenerHandle::new(self.next_id());
        self.listeners.push(handle);
        handle
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        self.listeners.retain(|h| *h != handle);
    }

    fn defer(&mut self, delay: Duration) {
        self.deferred.push(delay);
    }
}
