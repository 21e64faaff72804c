use liblogic::Bit;


/// Two-phase clock. Each tick is a half cycle; a cycle completes on the
/// falling edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    cycle: usize,
    state: Bit,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the clock line, returning the completed cycle count.
    pub fn tick(&mut self) -> usize {
        self.state = !self.state;

        if !self.state {
            self.cycle += 1;
        }

        self.cycle
    }

    /// Rising then falling edge.
    pub fn pulse(&mut self) -> usize {
        self.tick();
        self.tick()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> Bit {
        self.state
    }

    pub fn cycle(&self) -> usize {
        self.cycle
    }
}
