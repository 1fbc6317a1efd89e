//! Raster target abstraction and the software bitmap that backs tests.
//!
//! [`RasterTarget`] is the seam between the drawing core and whatever
//! surface the embedding application renders to. It mirrors the small
//! Canvas2D subset the protocol needs: stroked lines, rectangles and
//! ellipses, filled discs, a clear, and a pixel snapshot/restore pair for
//! the shape-preview erase cycle. Implementations rasterize however they
//! like; [`Bitmap`] is the in-process software implementation.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use wire::Point;

use crate::consts::BACKGROUND_COLOR;

/// Error from a raster operation.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The backing surface is gone (e.g. a detached canvas). Fatal only
    /// to the single render call that hit it.
    #[error("raster target unavailable")]
    Unavailable,
    /// A snapshot from before a resize no longer matches the surface.
    #[error("snapshot is {snap_w}x{snap_h} but the target is {w}x{h}")]
    SnapshotMismatch { snap_w: u32, snap_h: u32, w: u32, h: u32 },
}

/// An opaque copy of a target's pixels, captured at shape-gesture start
/// and restored between preview frames. Never valid across a resize.
#[derive(Debug, Clone)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Snapshot {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Drawing surface the renderer writes into.
pub trait RasterTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Stroke a straight line segment.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) -> Result<(), RasterError>;

    /// Stroke an axis-aligned rectangle outline. `w`/`h` are non-negative;
    /// callers normalize the drag direction first.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn stroke_rect(&mut self, origin: Point, w: f64, h: f64, color: &str, width: f64) -> Result<(), RasterError>;

    /// Stroke an ellipse outline around `center` with per-axis radii.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: &str, width: f64) -> Result<(), RasterError>;

    /// Fill a solid disc.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn fill_disc(&mut self, center: Point, radius: f64, color: &str) -> Result<(), RasterError>;

    /// Reset every pixel to the background.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn clear(&mut self) -> Result<(), RasterError>;

    /// Capture the current pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Unavailable`] if the surface is gone.
    fn snapshot(&self) -> Result<Snapshot, RasterError>;

    /// Write a snapshot's pixels back.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::SnapshotMismatch`] if the snapshot predates
    /// a resize, [`RasterError::Unavailable`] if the surface is gone.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError>;
}

/// Parse a `#RRGGBB` or shorthand `#RGB` color into a packed `0x00RRGGBB`
/// pixel. Anything unparseable maps to white, matching the forgiving
/// CSS-color posture of the wire format.
#[must_use]
pub fn parse_color(color: &str) -> u32 {
    let hex = color.strip_prefix('#').unwrap_or(color);
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).unwrap_or(0x00FF_FFFF),
        // CSS shorthand: each digit doubles (#f80 -> #ff8800).
        3 => u32::from_str_radix(hex, 16).map_or(0x00FF_FFFF, |rgb| {
            let r = (rgb >> 8) & 0xF;
            let g = (rgb >> 4) & 0xF;
            let b = rgb & 0xF;
            (r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11
        }),
        _ => 0x00FF_FFFF,
    }
}

/// Software raster: a `width × height` grid of packed `0x00RRGGBB`
/// pixels. Thick strokes are stamped as discs along the path.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    background: u32,
}

impl Bitmap {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let background = parse_color(BACKGROUND_COLOR);
        Self {
            width,
            height,
            pixels: vec![background; (width as usize) * (height as usize)],
            background,
        }
    }

    /// Read one pixel; `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
        } else {
            None
        }
    }

    /// Count pixels that differ from the background.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != self.background).count()
    }

    /// Resize the surface, discarding all content. Any snapshot taken
    /// before this call will no longer restore.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; (width as usize) * (height as usize)];
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height) {
            #[allow(clippy::cast_sign_loss)]
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.pixels[idx] = color;
        }
    }

    fn stamp_disc(&mut self, center: Point, radius: f64, color: u32) {
        let r = radius.max(0.5);
        #[allow(clippy::cast_possible_truncation)]
        let (cx, cy) = (center.x, center.y);
        let x0 = (cx - r).floor() as i64;
        let x1 = (cx + r).ceil() as i64;
        let y0 = (cy - r).floor() as i64;
        let y1 = (cy + r).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                #[allow(clippy::cast_precision_loss)]
                let (dx, dy) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn stamp_line(&mut self, from: Point, to: Point, color: u32, width: f64) {
        let radius = (width / 2.0).max(0.5);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len = dx.hypot(dy);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (len.ceil() as usize).max(1) * 2;
        #[allow(clippy::cast_precision_loss)]
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp_disc(Point::new(from.x + dx * t, from.y + dy * t), radius, color);
        }
    }
}

impl RasterTarget for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) -> Result<(), RasterError> {
        self.stamp_line(from, to, parse_color(color), width);
        Ok(())
    }

    fn stroke_rect(&mut self, origin: Point, w: f64, h: f64, color: &str, width: f64) -> Result<(), RasterError> {
        let c = parse_color(color);
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (origin.x + w, origin.y + h);
        self.stamp_line(Point::new(x0, y0), Point::new(x1, y0), c, width);
        self.stamp_line(Point::new(x1, y0), Point::new(x1, y1), c, width);
        self.stamp_line(Point::new(x1, y1), Point::new(x0, y1), c, width);
        self.stamp_line(Point::new(x0, y1), Point::new(x0, y0), c, width);
        Ok(())
    }

    fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: &str, width: f64) -> Result<(), RasterError> {
        let c = parse_color(color);
        // Enough segments that the chord error stays under a pixel.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = ((rx.max(ry) * std::f64::consts::TAU).ceil() as usize).clamp(16, 1024);
        let mut prev = Point::new(center.x + rx, center.y);
        #[allow(clippy::cast_precision_loss)]
        for i in 1..=segments {
            let theta = std::f64::consts::TAU * (i as f64) / (segments as f64);
            let next = Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin());
            self.stamp_line(prev, next, c, width);
            prev = next;
        }
        Ok(())
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: &str) -> Result<(), RasterError> {
        self.stamp_disc(center, radius, parse_color(color));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RasterError> {
        self.pixels.fill(self.background);
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, RasterError> {
        Ok(Snapshot { width: self.width, height: self.height, pixels: self.pixels.clone() })
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(RasterError::SnapshotMismatch {
                snap_w: snapshot.width,
                snap_h: snapshot.height,
                w: self.width,
                h: self.height,
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }
}
