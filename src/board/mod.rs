//! Board access shared by every connection.
//!
//! [`Board`] pairs the hardware collaborator with the process-wide
//! [`OutputState`]. Connections run on a multi-threaded runtime, so the
//! board lives behind an async mutex: a request takes the lock, applies its
//! command and samples the inputs, then releases it. At most one request
//! mutates the indicator at a time and every later render observes the
//! latest value.

pub mod hardware;
pub mod output;
pub mod sampler;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use hardware::{Hardware, Level, SimulatedBoard};
pub use output::OutputState;
pub use sampler::{ButtonState, HardwareSnapshot};

/// Handle to the board shared across connection tasks.
pub type SharedBoard = Arc<Mutex<Board>>;

pub struct Board {
    hardware: Box<dyn Hardware>,
    output: OutputState,
}

impl Board {
    /// Takes ownership of the hardware and drives the indicator off.
    pub fn new(hardware: impl Hardware + 'static) -> Self {
        let mut hardware: Box<dyn Hardware> = Box::new(hardware);
        hardware.set_indicator(false);
        Self {
            hardware,
            output: OutputState::Off,
        }
    }

    pub fn into_shared(self) -> SharedBoard {
        Arc::new(Mutex::new(self))
    }

    pub fn output(&self) -> OutputState {
        self.output
    }

    /// Sets the indicator. Repeating the current state still drives the line.
    pub fn set_output(&mut self, state: OutputState) {
        self.hardware.set_indicator(state.is_on());
        self.output = state;
    }

    pub fn sample(&self) -> HardwareSnapshot {
        sampler::sample(self.hardware.as_ref())
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board").field("output", &self.output).finish()
    }
}
