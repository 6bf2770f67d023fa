/// Things the user can ask of a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Exit the application
    Quit,

    TogglePause,

    /// Advance a single generation on the next tick
    Step,

    /// Lengthen the time between generations
    Slower,

    /// Shorten the time between generations
    Faster,

    /// Switch to the next rule
    CycleRule,
}
