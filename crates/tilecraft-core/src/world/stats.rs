//! Simulation statistics collection trait

/// Trait for collecting water simulation statistics
///
/// The automaton reports what it did through this trait so callers can
/// choose between counting (debug overlays, the headless driver) and nothing.
pub trait SimStats {
    /// A water block spread into a new cell (down or sideways)
    fn record_water_flow(&mut self);

    /// An isolated water block evaporated
    fn record_evaporation(&mut self);

    /// A tick of the water automaton completed
    fn record_tick(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_water_flow(&mut self) {}
    fn record_evaporation(&mut self) {}
    fn record_tick(&mut self) {}
}

/// Running totals of water activity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WaterStats {
    pub flows: u64,
    pub evaporations: u64,
    pub ticks: u64,
}

impl SimStats for WaterStats {
    fn record_water_flow(&mut self) {
        self.flows += 1;
    }

    fn record_evaporation(&mut self) {
        self.evaporations += 1;
    }

    fn record_tick(&mut self) {
        self.ticks += 1;
    }
}
