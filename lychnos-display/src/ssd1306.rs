//! SSD1306 OLED device driver
//!
//! Wraps a borrowed I2C bus and a [`Framebuffer`]. Each command byte goes
//! out as its own two-byte transaction (`[0x00, command]`); the
//! framebuffer goes out as one long data transaction (`[0x40, bytes...]`).
//! On buses with a hardware transfer counter the driver arms the reload
//! protocol around the long transfer; on buses without one those calls
//! are no-ops, so the same code drives both generations.

use lychnos_hal::I2cBus;

use crate::framebuffer::Framebuffer;

/// Fixed bus address of the display (7-bit `0x3C`, pre-shifted).
pub const DEFAULT_ADDRESS: u8 = 0x78;

/// Control bytes prefixing each transaction.
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// Command opcodes used by the init sequence.
mod cmd {
    pub const CLOCK_DIV: u8 = 0xD5;
    pub const MULTIPLEX: u8 = 0xA8;
    pub const DISPLAY_OFFSET: u8 = 0xD3;
    pub const START_LINE_0: u8 = 0x40;
    pub const CHARGE_PUMP: u8 = 0x8D;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const SEG_REMAP: u8 = 0xA1;
    pub const COM_SCAN_DESC: u8 = 0xC8;
    pub const COM_PINS: u8 = 0xDA;
    pub const CONTRAST: u8 = 0x81;
    pub const PRECHARGE: u8 = 0xD9;
    pub const VCOM_LEVEL: u8 = 0xDB;
    pub const RAM_CONTENT: u8 = 0xA4;
    pub const NORMAL_MODE: u8 = 0xA6;
    pub const DISPLAY_ON: u8 = 0xAF;
}

/// One 128x64 SSD1306 display on a shared I2C bus.
///
/// Owns its framebuffer; the bus is a non-owning borrow so other devices
/// on the same bus stay possible. Callers must not interleave another
/// device's transaction inside this driver's start/stop brackets.
pub struct Ssd1306<'a, B: I2cBus> {
    bus: &'a mut B,
    address: u8,
    fb: Framebuffer,
}

impl<'a, B: I2cBus> Ssd1306<'a, B> {
    pub fn new(bus: &'a mut B, address: u8) -> Self {
        Self {
            bus,
            address,
            fb: Framebuffer::new(),
        }
    }

    /// The in-memory image. Draw here, then [`flush`](Self::flush).
    pub fn frame(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    /// Send one command byte in its own transaction.
    pub fn command(&mut self, byte: u8) {
        self.bus.set_transfer_len(2);
        self.bus.start(self.address);
        self.bus.write(CONTROL_COMMAND);
        self.bus.write(byte);
        self.bus.stop();
    }

    /// Send one data byte in its own transaction.
    pub fn data(&mut self, byte: u8) {
        self.bus.set_transfer_len(2);
        self.bus.start(self.address);
        self.bus.write(CONTROL_DATA);
        self.bus.write(byte);
        self.bus.stop();
    }

    /// Run the panel's power-up command sequence and turn the display on.
    pub fn initialize(&mut self) {
        self.command(cmd::CLOCK_DIV);
        self.command(0x80);
        self.command(cmd::MULTIPLEX);
        self.command(0x3F);
        self.command(cmd::DISPLAY_OFFSET);
        self.command(0x00);
        self.command(cmd::START_LINE_0);
        // Internal charge pump on.
        self.command(cmd::CHARGE_PUMP);
        self.command(0x14);
        // Horizontal addressing.
        self.command(cmd::MEMORY_MODE);
        self.command(0x00);
        self.command(cmd::SEG_REMAP);
        self.command(cmd::COM_SCAN_DESC);
        self.command(cmd::COM_PINS);
        self.command(0x12);
        self.command(cmd::CONTRAST);
        self.command(0xCF);
        self.command(cmd::PRECHARGE);
        self.command(0xF1);
        self.command(cmd::VCOM_LEVEL);
        self.command(0x40);
        self.command(cmd::RAM_CONTENT);
        self.command(cmd::NORMAL_MODE);
        self.command(cmd::DISPLAY_ON);
    }

    /// Stream the whole framebuffer to the panel as one data transaction.
    ///
    /// The buffer exceeds the 255-byte framing limit of counter-equipped
    /// buses, so reload is asserted before the start condition and the
    /// stop condition releases it.
    pub fn flush(&mut self) {
        self.bus.set_reload(true);
        self.bus.set_transfer_len(1);
        self.bus.start(self.address);
        self.bus.write(CONTROL_DATA);
        self.bus.stream(self.fb.as_bytes());
        self.bus.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;
    use lychnos_hal::{IoPort, Peripheral, Status};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        SetLen(u8),
        SetReload(bool),
        Start(u8),
        Write(u8),
        Stream(usize),
        Stop,
    }

    /// Records the bus operation sequence instead of touching hardware.
    struct MockBus {
        events: RefCell<Vec<Event, 128>>,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
            }
        }

        fn record(&self, event: Event) {
            let _ = self.events.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<Event, 128> {
            self.events.borrow().clone()
        }
    }

    impl Peripheral for MockBus {
        fn status(&self) -> Status {
            Status::Running
        }

        fn enable_clock(&mut self) {}
        fn reset(&mut self) {}
        fn disable(&mut self) {}
    }

    impl IoPort for MockBus {
        type Word = u8;

        fn read(&mut self) -> u8 {
            0
        }

        fn write(&mut self, word: u8) {
            self.record(Event::Write(word));
        }

        fn stream(&mut self, words: &[u8]) {
            self.record(Event::Stream(words.len()));
        }
    }

    impl I2cBus for MockBus {
        fn initialize(&mut self) {}

        fn start(&mut self, address: u8) {
            self.record(Event::Start(address));
        }

        fn stop(&mut self) {
            self.record(Event::Stop);
        }

        fn set_transfer_len(&mut self, len: u8) {
            self.record(Event::SetLen(len));
        }

        fn set_reload(&mut self, reload: bool) {
            self.record(Event::SetReload(reload));
        }
    }

    #[test]
    fn test_command_frames_one_control_and_one_opcode_byte() {
        let mut bus = MockBus::new();
        let mut oled = Ssd1306::new(&mut bus, DEFAULT_ADDRESS);
        oled.command(0xAF);

        assert_eq!(
            bus.events().as_slice(),
            &[
                Event::SetLen(2),
                Event::Start(0x78),
                Event::Write(0x00),
                Event::Write(0xAF),
                Event::Stop,
            ]
        );
    }

    #[test]
    fn test_data_frames_one_control_and_one_payload_byte() {
        let mut bus = MockBus::new();
        let mut oled = Ssd1306::new(&mut bus, DEFAULT_ADDRESS);
        oled.data(0x5A);

        assert_eq!(
            bus.events().as_slice(),
            &[
                Event::SetLen(2),
                Event::Start(0x78),
                Event::Write(0x40),
                Event::Write(0x5A),
                Event::Stop,
            ]
        );
    }

    #[test]
    fn test_initialize_ends_with_display_on() {
        let mut bus = MockBus::new();
        let mut oled = Ssd1306::new(&mut bus, DEFAULT_ADDRESS);
        oled.initialize();

        let events = bus.events();
        // 24 command transactions of 5 events each.
        assert_eq!(events.len(), 24 * 5);
        assert_eq!(events[0], Event::SetLen(2));
        assert_eq!(events[1], Event::Start(0x78));
        assert_eq!(events[2], Event::Write(0x00));
        assert_eq!(events[3], Event::Write(cmd::CLOCK_DIV));
        assert_eq!(events[events.len() - 2], Event::Write(cmd::DISPLAY_ON));
        assert_eq!(events[events.len() - 1], Event::Stop);
    }

    #[test]
    fn test_flush_streams_whole_buffer_under_reload() {
        let mut bus = MockBus::new();
        let mut oled = Ssd1306::new(&mut bus, DEFAULT_ADDRESS);
        oled.frame().pixel(0, 0, true);
        oled.flush();

        assert_eq!(
            bus.events().as_slice(),
            &[
                Event::SetReload(true),
                Event::SetLen(1),
                Event::Start(0x78),
                Event::Write(0x40),
                Event::Stream(crate::BUF_LEN),
                Event::Stop,
            ]
        );
    }
}
