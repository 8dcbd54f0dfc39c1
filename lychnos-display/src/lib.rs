//! SSD1306 framebuffer renderer and device driver
//!
//! This crate provides:
//! - `Framebuffer` - a bit-packed 128x64 monochrome pixel buffer with
//!   line, rectangle, glyph, text, and integer drawing primitives
//! - `font` - a fixed-width bitmap font packed into two words per glyph
//! - `Ssd1306` - the device driver that sends the command sequence and
//!   streams the framebuffer over any [`lychnos_hal::I2cBus`] transport
//!
//! # Architecture
//!
//! Drawing happens entirely in memory; nothing touches the bus until
//! `flush()`. The renderer never produces out-of-bounds writes: a
//! primitive whose bounding box leaves the framebuffer is rejected whole,
//! with no partial effect and no error reported.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod font;
pub mod framebuffer;
pub mod ssd1306;

pub use font::FontSize;
pub use framebuffer::{Framebuffer, BUF_LEN, HEIGHT, WIDTH};
pub use ssd1306::Ssd1306;
