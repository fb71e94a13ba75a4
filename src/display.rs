//! Memory-mapped 32x32 display.
//!
//! Addresses `0x0200..=0x05FF` form a framebuffer of 1024 cells, one per pixel,
//! row-major. The low nibble of each cell selects one of 16 fixed palette
//! entries. [`DisplayBus`] wraps any [`MemoryBus`] and reports every write into
//! that range to a [`DisplaySink`]; the core never talks to a rendering API.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::MemoryBus;

/// First framebuffer address.
pub const FRAMEBUFFER_START: u16 = 0x0200;

/// Last framebuffer address (inclusive).
pub const FRAMEBUFFER_END: u16 = 0x05FF;

/// Framebuffer width in pixels.
pub const DISPLAY_WIDTH: usize = 32;

/// Framebuffer height in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Fixed 16-entry palette as `0xRRGGBB`.
pub const PALETTE: [u32; 16] = [
    0x000000, 0xFFFFFF, 0x880000, 0xAAFFEE, 0xCC44CC, 0x00CC55, 0x0000AA, 0xEEEE77,
    0xDD8855, 0x664400, 0xFF7777, 0x333333, 0x777777, 0xAAFF66, 0x0088FF, 0xBBBBBB,
];

/// A single pixel update derived from a framebuffer write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    /// Column, 0-31
    pub x: u8,

    /// Row, 0-31
    pub y: u8,

    /// Palette index, 0-15
    pub color: u8,
}

impl PixelWrite {
    /// Maps a memory write to a pixel update, or `None` outside the framebuffer.
    pub fn from_write(addr: u16, value: u8) -> Option<Self> {
        if !(FRAMEBUFFER_START..=FRAMEBUFFER_END).contains(&addr) {
            return None;
        }

        let offset = (addr - FRAMEBUFFER_START) as usize;
        Some(Self {
            x: (offset % DISPLAY_WIDTH) as u8,
            y: (offset / DISPLAY_WIDTH) as u8,
            color: value & 0x0F,
        })
    }

    /// RGB value of this pixel's palette entry.
    pub fn rgb(&self) -> u32 {
        PALETTE[self.color as usize]
    }
}

/// Receiver of framebuffer writes.
///
/// Implemented for any `FnMut(PixelWrite)` closure, so a presentation layer can
/// hook in without defining a type.
pub trait DisplaySink {
    /// Called once per write into the framebuffer range.
    fn set_pixel(&mut self, pixel: PixelWrite);
}

impl<F: FnMut(PixelWrite)> DisplaySink for F {
    fn set_pixel(&mut self, pixel: PixelWrite) {
        self(pixel)
    }
}

/// Palette-indexed pixel buffer that can be shared with a presentation thread.
///
/// Clones share the same pixels.
#[derive(Clone)]
pub struct Framebuffer {
    pixels: Arc<[AtomicU8]>,
}

impl Framebuffer {
    /// Creates a black framebuffer.
    pub fn new() -> Self {
        let pixels: Vec<AtomicU8> = (0..DISPLAY_WIDTH * DISPLAY_HEIGHT)
            .map(|_| AtomicU8::new(0))
            .collect();
        Self {
            pixels: pixels.into(),
        }
    }

    /// Palette index at `(x, y)`.
    pub fn color_index(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * DISPLAY_WIDTH + x].load(Ordering::Relaxed)
    }

    /// Redraws every pixel from the framebuffer region of `bus`.
    pub fn refresh_from<M: MemoryBus + ?Sized>(&mut self, bus: &M) {
        for addr in FRAMEBUFFER_START..=FRAMEBUFFER_END {
            if let Some(pixel) = PixelWrite::from_write(addr, bus.read(addr)) {
                self.set_pixel(pixel);
            }
        }
    }

    /// The whole frame as RGBA bytes, row-major, fully opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for cell in self.pixels.iter() {
            let rgb = PALETTE[(cell.load(Ordering::Relaxed) & 0x0F) as usize];
            out.extend_from_slice(&[(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xFF]);
        }
        out
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for Framebuffer {
    fn set_pixel(&mut self, pixel: PixelWrite) {
        let index = pixel.y as usize * DISPLAY_WIDTH + pixel.x as usize;
        self.pixels[index].store(pixel.color, Ordering::Relaxed);
    }
}

/// Memory bus wrapper that mirrors framebuffer writes into a [`DisplaySink`].
///
/// Reads never notify. Writes are stored in the inner bus first, then reported.
///
/// # Examples
///
/// ```
/// use sim6502::{DisplayBus, FlatMemory, Framebuffer, MemoryBus};
///
/// let screen = Framebuffer::new();
/// let mut bus = DisplayBus::new(FlatMemory::new()).with_sink(screen.clone());
///
/// bus.write(0x0221, 0x05);
/// assert_eq!(screen.color_index(1, 1), 0x05);
/// ```
pub struct DisplayBus<M: MemoryBus> {
    inner: M,
    sink: Option<Box<dyn DisplaySink + Send>>,
}

impl<M: MemoryBus> DisplayBus<M> {
    /// Wraps `inner` with no sink attached.
    pub fn new(inner: M) -> Self {
        Self { inner, sink: None }
    }

    /// Attaches the sink that receives framebuffer writes.
    pub fn with_sink<D: DisplaySink + Send + 'static>(mut self, sink: D) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Replaces or removes the sink.
    pub fn set_sink(&mut self, sink: Option<Box<dyn DisplaySink + Send>>) {
        self.sink = sink;
    }

    /// Borrows the wrapped bus.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Unwraps the inner bus, dropping the sink.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: MemoryBus> MemoryBus for DisplayBus<M> {
    fn read(&self, addr: u16) -> u8 {
        self.inner.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.inner.write(addr, value);

        if let (Some(sink), Some(pixel)) = (self.sink.as_mut(), PixelWrite::from_write(addr, value)) {
            sink.set_pixel(pixel);
        }
    }
}
