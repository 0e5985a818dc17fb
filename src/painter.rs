//! Drawing context used by the effects
//!
//! Effects draw through `&mut dyn Painter` so the surface can target any
//! femtovg backend, or a recorder in tests.

use femtovg::{Canvas, Color, Paint, Path, Renderer};

use crate::host::BufferSize;

pub trait Painter {
    /// Size the pixel buffer for this frame and clear it to transparent
    fn begin_frame(&mut self, buffer: BufferSize);
    /// Submit everything drawn since `begin_frame`
    fn end_frame(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn reset_transform(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_path(&mut self, path: &Path, paint: &Paint);
    fn stroke_path(&mut self, path: &Path, paint: &Paint);
}

impl<T: Renderer> Painter for Canvas<T> {
    fn begin_frame(&mut self, buffer: BufferSize) {
        // The transform handles the pixel ratio, so the canvas itself stays at dpi 1.0
        self.set_size(buffer.width, buffer.height, 1.0);
        self.reset_transform();
        self.clear_rect(0, 0, buffer.width, buffer.height, Color::rgba(0, 0, 0, 0));
    }

    fn end_frame(&mut self) {
        self.flush();
    }

    fn save(&mut self) {
        Canvas::save(self);
    }

    fn restore(&mut self) {
        Canvas::restore(self);
    }

    fn reset_transform(&mut self) {
        Canvas::reset_transform(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        Canvas::translate(self, x, y);
    }

    fn rotate(&mut self, radians: f32) {
        Canvas::rotate(self, radians);
    }

    fn scale(&mut self, x: f32, y: f32) {
        Canvas::scale(self, x, y);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        Canvas::set_global_alpha(self, alpha);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        Canvas::fill_path(self, path, paint);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint) {
        Canvas::stroke_path(self, path, paint);
    }
}

/// Painter that records calls instead of drawing
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub frames: Vec<BufferSize>,
    pub ended: usize,
    pub fills: usize,
    pub strokes: usize,
    pub scales: Vec<(f32, f32)>,
    pub alphas: Vec<f32>,
    pub depth: i32,
}

#[cfg(test)]
impl Painter for RecordingPainter {
    fn begin_frame(&mut self, buffer: BufferSize) {
        self.frames.push(buffer);
    }

    fn end_frame(&mut self) {
        self.ended += 1;
    }

    fn save(&mut self) {
        self.depth += 1;
    }

    fn restore(&mut self) {
        self.depth -= 1;
    }

    fn reset_transform(&mut self) {}

    fn translate(&mut self, _x: f32, _y: f32) {}

    fn rotate(&mut self, _radians: f32) {}

    fn scale(&mut self, x: f32, y: f32) {
        self.scales.push((x, y));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alphas.push(alpha);
    }

    fn fill_path(&mut self, _path: &Path, _paint: &Paint) {
        self.fills += 1;
    }

    fn stroke_path(&mut self, _path: &Path, _paint: &Paint) {
        self.strokes += 1;
    }
}
