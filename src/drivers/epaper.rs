//! Monochrome ePaper panel driver (UC81xx-family controller over SPI).
//!
//! ```text
//!  power_up:   RST pulse ─▶ BOOSTER ─▶ POWER_ON ─▶ busy ─▶ PANEL_SETTING ─▶ RESOLUTION
//!  paint:      draw into framebuffer ─▶ DTM2 + data ─▶ REFRESH ─▶ busy
//!  power_down: POWER_OFF ─▶ busy ─▶ DEEP_SLEEP(0xA5)
//! ```
//!
//! The BUSY line is active LOW.  Every wait is bounded; a panel that never
//! releases BUSY yields [`DisplayError::BusyTimeout`] rather than hanging
//! the loop.
//!
//! Pixels are drawn with `embedded-graphics` into a 1-bpp [`Framebuffer`]
//! (bit set = paper, bit clear = ink) and sent in one transfer.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::{debug, warn};

use crate::app::ports::PanelPort;
use crate::display::canvas;
use crate::display::layout::Layout;
use crate::error::DisplayError;
use crate::readings::Frame;

// ── Controller commands ───────────────────────────────────────

mod cmd {
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const BOOSTER_SOFT_START: u8 = 0x06;
    pub const DEEP_SLEEP: u8 = 0x07;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;
    pub const RESOLUTION_SETTING: u8 = 0x61;
}

/// Check code the controller requires before entering deep sleep.
const DEEP_SLEEP_CHECK: u8 = 0xA5;
/// Black/white mode, scan up, shift right, booster on, no soft reset.
const PANEL_SETTING_BW: u8 = 0x1F;

const RESET_PULSE_MS: u32 = 10;
const BUSY_POLL_MS: u32 = 10;
/// A full refresh takes a few seconds; anything past this is a dead panel.
const BUSY_TIMEOUT_MS: u32 = 30_000;

// ───────────────────────────────────────────────────────────────
// Framebuffer
// ───────────────────────────────────────────────────────────────

/// 1-bpp, row-major, MSB first.  Bit set = paper (white).
pub struct Framebuffer {
    size: Size,
    stride: usize,
    bytes: Vec<u8>,
}

impl Framebuffer {
    pub fn new(size: Size) -> Self {
        let stride = size.width.div_ceil(8) as usize;
        Self {
            size,
            stride,
            bytes: vec![0xFF; stride * size.height as usize],
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_ink(&self, point: Point) -> bool {
        self.locate(point)
            .is_some_and(|(i, mask)| self.bytes[i] & mask == 0)
    }

    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let index = y as usize * self.stride + (x / 8) as usize;
        Some((index, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((i, mask)) = self.locate(point) {
                match color {
                    BinaryColor::On => self.bytes[i] &= !mask,
                    BinaryColor::Off => self.bytes[i] |= mask,
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Infallible> {
        let fill = match color {
            BinaryColor::On => 0x00,
            BinaryColor::Off => 0xFF,
        };
        self.bytes.fill(fill);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// EpaperPanel
// ───────────────────────────────────────────────────────────────

pub struct EpaperPanel<SPI, DC, RST, BUSY, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: D,
    buffer: Framebuffer,
}

impl<SPI, DC, RST, BUSY, D> EpaperPanel<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    /// `size` is the panel resolution; it must match the layout canvas.
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: D, size: Size) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
            buffer: Framebuffer::new(size),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.buffer
    }

    // ── Sequences ─────────────────────────────────────────────

    fn power_on_sequence(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_ms(RESET_PULSE_MS);

        self.command(cmd::BOOSTER_SOFT_START, &[0x17, 0x17, 0x17])?;
        self.command(cmd::POWER_ON, &[])?;
        self.wait_idle()?;

        let Size { width, height } = self.buffer.size();
        self.command(cmd::PANEL_SETTING, &[PANEL_SETTING_BW])?;
        self.command(
            cmd::RESOLUTION_SETTING,
            &[
                (width >> 8) as u8,
                width as u8,
                (height >> 8) as u8,
                height as u8,
            ],
        )
    }

    fn power_off_sequence(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::POWER_OFF, &[])?;
        self.wait_idle()?;
        self.command(cmd::DEEP_SLEEP, &[DEEP_SLEEP_CHECK])
    }

    // ── Bus primitives ────────────────────────────────────────

    fn command(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Bus)?;
        self.spi.write(&[command]).map_err(|_| DisplayError::Bus)?;
        if !data.is_empty() {
            self.dc.set_high().map_err(|_| DisplayError::Bus)?;
            self.spi.write(data).map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    fn send_buffer(&mut self) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Bus)?;
        self.spi
            .write(&[cmd::DATA_START_TRANSMISSION_2])
            .map_err(|_| DisplayError::Bus)?;
        self.dc.set_high().map_err(|_| DisplayError::Bus)?;
        self.spi
            .write(self.buffer.bytes())
            .map_err(|_| DisplayError::Bus)
    }

    fn wait_idle(&mut self) -> Result<(), DisplayError> {
        let mut waited = 0;
        while self.busy.is_low().map_err(|_| DisplayError::Bus)? {
            if waited >= BUSY_TIMEOUT_MS {
                return Err(DisplayError::BusyTimeout);
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += BUSY_POLL_MS;
        }
        debug!("EPD: idle after {} ms", waited);
        Ok(())
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl<SPI, DC, RST, BUSY, D> PanelPort for EpaperPanel<SPI, DC, RST, BUSY, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    fn power_up(&mut self) -> Result<(), DisplayError> {
        self.power_on_sequence().map_err(|e| {
            warn!("EPD: power-up failed: {}", e);
            DisplayError::PowerUpFailed
        })
    }

    fn power_down(&mut self) -> Result<(), DisplayError> {
        self.power_off_sequence().map_err(|e| {
            warn!("EPD: power-down failed: {}", e);
            DisplayError::PowerDownFailed
        })
    }

    fn paint(&mut self, layout: &Layout, frame: &Frame) -> Result<(), DisplayError> {
        if layout.canvas() != self.buffer.size() {
            warn!(
                "EPD: layout canvas {:?} does not match panel {:?}",
                layout.canvas(),
                self.buffer.size()
            );
            return Err(DisplayError::PaintRejected);
        }

        let Ok(()) = canvas::draw_frame(&mut self.buffer, layout, frame);
        self.send_buffer()?;
        self.command(cmd::DISPLAY_REFRESH, &[])?;
        self.wait_idle()
    }
}
