//! Latches (level-sensitive) and flip-flops (rising-edge triggered).

use crate::{
    gates::{and, nor, not},
    Bit,
};


/// Cross-coupled NOR latch. Driving both S and R is the forbidden state and
/// leaves both outputs low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrLatch {
    q: Bit,
    q_bar: Bit,
}

impl SrLatch {
    pub fn new() -> Self {
        Self {
            q: false,
            q_bar: true,
        }
    }

    pub fn update(&mut self, set: Bit, reset: Bit) -> Bit {
        // Two passes settle the feedback loop.
        for _ in 0..2 {
            let q = nor(reset, self.q_bar);
            let q_bar = nor(set, self.q);

            self.q = q;
            self.q_bar = q_bar;
        }

        self.q
    }

    pub fn q(&self) -> Bit {
        self.q
    }

    pub fn q_bar(&self) -> Bit {
        self.q_bar
    }
}

impl Default for SrLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatedSrLatch {
    latch: SrLatch,
}

impl GatedSrLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, set: Bit, reset: Bit, enable: Bit) -> Bit {
        self.latch.update(and(set, enable), and(reset, enable))
    }

    pub fn q(&self) -> Bit {
        self.latch.q()
    }
}

/// Transparent while enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DLatch {
    q: Bit,
}

impl DLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: Bit, enable: Bit) -> Bit {
        if enable {
            self.q = data;
        }

        self.q
    }

    pub fn q(&self) -> Bit {
        self.q
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DFlipFlop {
    q: Bit,
    last_clock: Bit,
}

impl DFlipFlop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&mut self, data: Bit, clock: Bit) -> Bit {
        if rising_edge(self.last_clock, clock) {
            self.q = data;
        }
        self.last_clock = clock;

        self.q
    }

    pub fn read(&self) -> Bit {
        self.q
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JkFlipFlop {
    q: Bit,
    last_clock: Bit,
}

impl JkFlipFlop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&mut self, j: Bit, k: Bit, clock: Bit) -> Bit {
        if rising_edge(self.last_clock, clock) {
            self.q = match (j, k) {
                (false, false) => self.q,
                (false, true) => false,
                (true, false) => true,
                (true, true) => not(self.q),
            };
        }
        self.last_clock = clock;

        self.q
    }

    pub fn read(&self) -> Bit {
        self.q
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TFlipFlop(JkFlipFlop);

impl TFlipFlop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&mut self, toggle: Bit, clock: Bit) -> Bit {
        self.0.clock(toggle, toggle, clock)
    }

    pub fn read(&self) -> Bit {
        self.0.read()
    }
}

fn rising_edge(last_clock: Bit, clock: Bit) -> Bit {
    and(not(last_clock), clock)
}
