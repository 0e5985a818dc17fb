//! Native window host: winit window, glutin surface, vsync-driven frames

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use glutin::context::PossiblyCurrentContext;
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use invite_fx::host::{BufferSize, FrameHandle, ListenerHandle, LogicalSize, SurfaceHost};
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct WindowHost {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
    deferred_until: Option<Instant>,
    next_id: u64,
}

impl WindowHost {
    pub fn new(
        window: Window,
        gl_context: PossiblyCurrentContext,
        gl_surface: Surface<WindowSurface>,
    ) -> Self {
        Self {
            window,
            gl_context,
            gl_surface,
            pending_frame: None,
            resize_listener: None,
            deferred_until: None,
            next_id: 0,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Take the outstanding frame ticket when the redraw it asked for arrives
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn has_resize_listener(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Deadline of the deferred callback, if one is waiting
    pub fn deferred_until(&self) -> Option<Instant> {
        self.deferred_until
    }

    /// Clear the deferred deadline once it has passed; true if the callback is due
    pub fn take_due_deferred(&mut self, now: Instant) -> bool {
        match self.deferred_until {
            Some(deadline) if now >= deadline => {
                self.deferred_until = None;
                true
            }
            _ => false,
        }
    }

    /// Keep the GL drawable matching the window, whether or not a surface listens
    pub fn sync_drawable(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl_surface.resize(&self.gl_context, width, height);
        }
    }

    pub fn physical_buffer(&self) -> BufferSize {
        let size = self.window.inner_size();
        BufferSize {
            width: size.width,
            height: size.height,
        }
    }

    pub fn present(&self) {
        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::warn!("failed to swap buffers: {err}");
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl SurfaceHost for WindowHost {
    fn container_size(&self) -> LogicalSize {
        let size = self.window.inner_size().to_logical::<f32>(self.window.scale_factor());
        LogicalSize::new(size.width, size.height)
    }

    fn device_pixel_ratio(&self) -> Option<f32> {
        Some(self.window.scale_factor() as f32)
    }

    fn resize_buffer(&mut self, size: BufferSize) {
        self.sync_drawable(PhysicalSize::new(size.width, size.height));
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id());
        self.pending_frame = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // winit cannot retract a redraw request; dropping the ticket makes it a no-op
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerHandle {
        let handle = ListenerHandle::new(self.next_id());
        self.resize_listener = Some(handle);
        handle
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        if self.resize_listener == Some(handle) {
            self.resize_listener = None;
        }
    }

    fn defer(&mut self, delay: Duration) {
        self.deferred_until = Some(Instant::now() + delay);
    }
}
