//! Lychnos Firmware
//!
//! Status-lamp firmware for an STM32F303 board with a 128x64 SSD1306 OLED
//! on I2C1 and an LED on PA1. Three periodic tasks share the executor:
//! blink the LED, bump an on-screen counter, and stream the framebuffer to
//! the panel.
//!
//! This is the composition root: every peripheral driver is built exactly
//! once here and handed to the tasks that use it. Clock bring-up and the
//! time driver come from embassy; all peripheral register access below
//! goes through the register-level drivers.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lychnos_display::{FontSize, Ssd1306};
use lychnos_hal::{BankId, BusId, I2cBus, Mmio, Peripheral, PinPreset};
use lychnos_hal_stm32f3::{base, Gpio, I2c, Pin};

/// Board wiring.
mod board {
    /// On-board LED, PA1.
    pub const LED_PIN: u8 = 1;
    /// I2C1 SDA, PB7.
    pub const SDA_PIN: u8 = 7;
    /// I2C1 SCL, PB6.
    pub const SCL_PIN: u8 = 6;
    /// Alternate function routing PB6/PB7 to I2C1.
    pub const I2C_AF: u32 = 4;

    pub const LED_BLINK_MS: u64 = 500;
    pub const COUNT_STEP_MS: u64 = 100;
    pub const REFRESH_MS: u64 = 50;
}

/// Counter box on screen: cleared and redrawn every count step.
const COUNT_BOX: (i32, i32, i32, i32) = (68, 28, 34, 8);

static LED_BANK: StaticCell<Gpio<Mmio>> = StaticCell::new();
static I2C_BANK: StaticCell<Gpio<Mmio>> = StaticCell::new();
static I2C_BUS: StaticCell<I2c<Mmio>> = StaticCell::new();

type Display = Ssd1306<'static, I2c<Mmio>>;

/// The one display device, shared by the counter and refresh tasks.
static OLED: Mutex<CriticalSectionRawMutex, Option<Display>> = Mutex::new(None);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lychnos firmware starting...");

    // Clocks and the time driver. Peripheral registers are driven
    // directly below.
    let _p = embassy_stm32::init(Default::default());

    // Register blocks. Each driver gets its own RCC handle and only
    // touches its own enable/reset bits.
    let (gpioa, gpiob, i2c1, rcc_a, rcc_b, rcc_i2c) = unsafe {
        (
            Mmio::new(base::GPIOA as *mut u32, base::GPIO_WORDS),
            Mmio::new(base::GPIOB as *mut u32, base::GPIO_WORDS),
            Mmio::new(base::I2C1 as *mut u32, base::I2C_WORDS),
            Mmio::new(base::RCC as *mut u32, base::RCC_WORDS),
            Mmio::new(base::RCC as *mut u32, base::RCC_WORDS),
            Mmio::new(base::RCC as *mut u32, base::RCC_WORDS),
        )
    };

    // LED bank and pin.
    let mut led_bank = Gpio::configure(gpioa, rcc_a, BankId::A).unwrap();
    led_bank.enable_clock();
    let led_bank = LED_BANK.init(led_bank);
    let led = Pin::new(led_bank, board::LED_PIN, PinPreset::OutPushPull);

    // I2C pins: open-drain alternate function with pull-ups, routed to
    // I2C1.
    let mut i2c_bank = Gpio::configure(gpiob, rcc_b, BankId::B).unwrap();
    i2c_bank.enable_clock();
    let i2c_bank = I2C_BANK.init(i2c_bank);
    let mut sda = Pin::new(i2c_bank, board::SDA_PIN, PinPreset::AltOpenDrainPullUp);
    let mut scl = Pin::new(i2c_bank, board::SCL_PIN, PinPreset::AltOpenDrainPullUp);
    sda.set_alt_func(board::I2C_AF);
    scl.set_alt_func(board::I2C_AF);

    // I2C peripheral.
    let mut i2c = I2c::configure(i2c1, rcc_i2c, BusId::I2c1).unwrap();
    i2c.reset();
    i2c.enable_clock();
    i2c.initialize();
    let i2c = I2C_BUS.init(i2c);
    info!("I2C1 up");

    // Display: power-up sequence, then the initial image.
    let mut oled = Ssd1306::new(i2c, lychnos_display::ssd1306::DEFAULT_ADDRESS);
    oled.initialize();
    let fb = oled.frame();
    fb.rect(0, 0, 128, 64, 0, false);
    fb.rect(0, 0, 128, 64, 4, true);
    fb.text(28, 29, "Count:", true, FontSize::Small);
    oled.flush();
    info!("OLED initialized");

    *OLED.lock().await = Some(oled);

    spawner.spawn(blink_task(led)).unwrap();
    spawner.spawn(count_task()).unwrap();
    spawner.spawn(refresh_task()).unwrap();

    info!("All tasks spawned");
}

/// Blink the on-board LED.
#[embassy_executor::task]
async fn blink_task(mut led: Pin<'static, Mmio>) {
    let mut ticker = Ticker::every(Duration::from_millis(board::LED_BLINK_MS));
    loop {
        led.toggle();
        ticker.next().await;
    }
}

/// Bump the counter and redraw its box in the framebuffer.
#[embassy_executor::task]
async fn count_task() {
    let mut ticker = Ticker::every(Duration::from_millis(board::COUNT_STEP_MS));
    let mut count: u16 = 0;
    loop {
        count = count.wrapping_add(1);
        if let Some(oled) = OLED.lock().await.as_mut() {
            let (x, y, w, h) = COUNT_BOX;
            let fb = oled.frame();
            fb.rect(x, y, w, h, 0, false);
            fb.integer(x + 2, y + 1, count as i32, true, FontSize::Small);
        }
        ticker.next().await;
    }
}

/// Stream the framebuffer to the panel.
#[embassy_executor::task]
async fn refresh_task() {
    let mut ticker = Ticker::every(Duration::from_millis(board::REFRESH_MS));
    loop {
        if let Some(oled) = OLED.lock().await.as_mut() {
            oled.flush();
        }
        ticker.next().await;
    }
}
