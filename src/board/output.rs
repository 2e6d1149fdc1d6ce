/// State of the indicator output.
///
/// Starts `Off` when the process boots and only changes in response to an
/// explicit command. It is never reset between requests or connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputState {
    #[default]
    Off,
    On,
}

impl OutputState {
    pub fn is_on(&self) -> bool {
        matches!(self, OutputState::On)
    }

    /// Label shown on the status page.
    pub fn label(&self) -> &'static str {
        match self {
            OutputState::On => "Ligado",
            OutputState::Off => "Desligado",
        }
    }
}
