//! 1Bitsy (STM32F415RG) wiring
//!
//! | Signal | Pin  | Signal | Pin  |
//! |--------|------|--------|------|
//! | R1     | PB13 | R2     | PB12 |
//! | G1     | PB1  | G2     | PB0  |
//! | B1     | PB11 | B2     | PB10 |
//! | CLK    | PC9  | LAT    | PC8  |
//! | OE     | PC7  | A..E   | PB5..PB9 |
//!
//! PC2 is a scope probe, high while a scan step runs. The console is
//! USART3 on PC10 (TX) / PC11 (RX).

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Uart};
use embassy_stm32::{bind_interrupts, peripherals, Peri, Peripherals};

use hubclock_drivers::{AddressPins, ChainPins, GpioPanelBus};

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 64;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 64;

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

pub type PanelPin = Output<'static>;
pub type PanelBusImpl = GpioPanelBus<PanelPin>;

bind_interrupts!(struct Irqs {
    USART3 => usart::InterruptHandler<peripherals::USART3>;
});

/// Board peripherals used by the firmware
pub struct Board {
    pub bus: PanelBusImpl,
    pub probe: PanelPin,
    pub console: Uart<'static, Async>,
}

/// Clock tree: 25 MHz crystal, 168 MHz system clock
pub fn clock_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;
    use embassy_stm32::time::Hertz;

    let mut config = embassy_stm32::Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(25_000_000),
        mode: HseMode::Oscillator,
    });
    config.rcc.pll_src = PllSource::HSE;
    config.rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV25,
        mul: PllMul::MUL336,
        divp: Some(PllPDiv::DIV2),
        divq: Some(PllQDiv::DIV7),
        divr: None,
    });
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV4;
    config.rcc.apb2_pre = APBPrescaler::DIV2;
    config.rcc.sys = Sysclk::PLL1_P;
    config
}

/// Push-pull output, fast enough for the shift clock
fn output(pin: Peri<'static, impl Pin>) -> PanelPin {
    Output::new(pin, Level::Low, Speed::VeryHigh)
}

impl Board {
    /// Claim the panel pins and the console UART
    pub fn new(p: Peripherals) -> Result<Self, usart::ConfigError> {
        let upper = ChainPins::new(output(p.PB13), output(p.PB1), output(p.PB11));
        let lower = ChainPins::new(output(p.PB12), output(p.PB0), output(p.PB10));

        let mut address = AddressPins::new();
        for pin in [
            output(p.PB5),
            output(p.PB6),
            output(p.PB7),
            output(p.PB8),
            output(p.PB9),
        ] {
            // Capacity is exactly five lines
            let _ = address.push(pin);
        }

        let bus = GpioPanelBus::new(
            upper,
            lower,
            output(p.PC9),
            output(p.PC8),
            output(p.PC7),
            address,
        );

        let mut uart_config = usart::Config::default();
        uart_config.baudrate = CONSOLE_BAUD;
        let console = Uart::new(
            p.USART3,
            p.PC11, // RX
            p.PC10, // TX
            Irqs,
            p.DMA1_CH3,
            p.DMA1_CH1,
            uart_config,
        )?;

        Ok(Self {
            bus,
            probe: output(p.PC2),
            console,
        })
    }
}
