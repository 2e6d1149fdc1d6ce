//! Board collaborators consumed by the request handler.
//!
//! The handler never touches GPIO or ADC registers directly. It talks to a
//! [`Hardware`] implementation which exposes exactly what the status page
//! needs: two digital inputs, one analog channel and one digital output.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

/// Electrical level of a digital input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Hardware primitives used by the sampler and the command interpreter.
///
/// Reads are synchronous and infallible: a faulty pin or ADC is outside the
/// scope of the responder. Implementations whose underlying read can fail
/// must return the last known value instead.
pub trait Hardware: Send {
    /// Raw level of button A. Buttons are pulled up, so `Low` means pressed.
    fn button_a_level(&self) -> Level;

    /// Raw level of button B. Same wiring as button A.
    fn button_b_level(&self) -> Level;

    /// Raw 12-bit code from the on-die temperature sensor channel.
    fn read_temperature_adc(&self) -> u16;

    /// Drives the indicator output.
    fn set_indicator(&mut self, on: bool);
}

#[derive(Debug)]
struct SimState {
    button_a_high: AtomicBool,
    button_b_high: AtomicBool,
    adc_raw: AtomicU16,
    indicator: AtomicBool,
    reads: AtomicUsize,
}

/// In-memory board used when no physical hardware is attached.
///
/// Cloning yields another handle onto the same pins, so a test (or a
/// console task) can press buttons while the server owns the board.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    state: Arc<SimState>,
}

impl SimulatedBoard {
    /// Creates a board with both buttons released and the given ADC code.
    pub fn new(adc_raw: u16) -> Self {
        Self {
            state: Arc::new(SimState {
                button_a_high: AtomicBool::new(true),
                button_b_high: AtomicBool::new(true),
                adc_raw: AtomicU16::new(adc_raw & 0x0FFF),
                indicator: AtomicBool::new(false),
                reads: AtomicUsize::new(0),
            }),
        }
    }

    pub fn set_button_a_pressed(&self, pressed: bool) {
        self.state.button_a_high.store(!pressed, Ordering::Relaxed);
    }

    pub fn set_button_b_pressed(&self, pressed: bool) {
        self.state.button_b_high.store(!pressed, Ordering::Relaxed);
    }

    /// Sets the ADC code. Values wider than 12 bits are masked.
    pub fn set_adc_raw(&self, raw: u16) {
        self.state.adc_raw.store(raw & 0x0FFF, Ordering::Relaxed);
    }

    /// Current level of the indicator line.
    pub fn indicator(&self) -> bool {
        self.state.indicator.load(Ordering::Relaxed)
    }

    /// Number of input reads (pins and ADC) performed so far.
    pub fn read_count(&self) -> usize {
        self.state.reads.load(Ordering::Relaxed)
    }

    fn count_read(&self) {
        self.state.reads.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::new(876)
    }
}

impl Hardware for SimulatedBoard {
    fn button_a_level(&self) -> Level {
        self.count_read();
        self.state.button_a_high.load(Ordering::Relaxed).into()
    }

    fn button_b_level(&self) -> Level {
        self.count_read();
        self.state.button_b_high.load(Ordering::Relaxed).into()
    }

    fn read_temperature_adc(&self) -> u16 {
        self.count_read();
        self.state.adc_raw.load(Ordering::Relaxed)
    }

    fn set_indicator(&mut self, on: bool) {
        self.state.indicator.store(on, Ordering::Relaxed);
    }
}
