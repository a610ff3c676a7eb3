//! Multi-instance simulator
//!
//! Several dispatchers in one process, sharing one in-memory register and
//! one manually stepped real-time source. Each instance ticks with its own
//! scheduler, so the register is the only channel between them.

use std::sync::Arc;
use std::time::Duration;

use railboard_board::BoardSettings;
use railboard_core::{RailboardResult, SimTime};
use railboard_runtime::{Dispatcher, Scheduler, TickReport};
use railboard_time::{ClockController, ManualSource, MemoryRegister, SyncRegister};

/// One simulated board instance
pub struct SimulatedInstance {
    pub name: String,
    pub dispatcher: Dispatcher,
    scheduler: Scheduler,
}

impl SimulatedInstance {
    pub fn tick(&mut self) -> TickReport {
        self.scheduler.tick(&mut self.dispatcher)
    }

    pub fn now(&self) -> SimTime {
        self.dispatcher.now()
    }
}

/// Instances sharing a register and a real-time source
pub struct InstanceSimulator {
    storage: MemoryRegister,
    source: ManualSource,
    instances: Vec<SimulatedInstance>,
    elapsed: Duration,
}

impl InstanceSimulator {
    /// `count` instances named `a`, `b`, ...
    pub fn new(count: usize) -> Self {
        let mut sim = InstanceSimulator {
            storage: MemoryRegister::new(),
            source: ManualSource::new(),
            instances: Vec::with_capacity(count),
            elapsed: Duration::ZERO,
        };
        for i in 0..count {
            let name = char::from(b'a' + (i % 26) as u8).to_string();
            sim.add_instance(name);
        }
        sim
    }

    /// Open one more instance against the shared register
    pub fn add_instance(&mut self, name: impl Into<String>) -> usize {
        let clock = ClockController::with_source(self.register(), Arc::new(self.source.clone()));
        self.instances.push(SimulatedInstance {
            name: name.into(),
            dispatcher: Dispatcher::with_clock(clock, BoardSettings::default()),
            scheduler: Scheduler::new(),
        });
        self.instances.len() - 1
    }

    /// A fresh handle on the shared register
    pub fn register(&self) -> SyncRegister {
        SyncRegister::new(Arc::new(self.storage.clone()))
    }

    pub fn instance(&self, index: usize) -> &SimulatedInstance {
        &self.instances[index]
    }

    pub fn instance_mut(&mut self, index: usize) -> &mut SimulatedInstance {
        &mut self.instances[index]
    }

    pub fn instances(&self) -> &[SimulatedInstance] {
        &self.instances
    }

    /// Real time elapsed since the simulator was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Run `startup` on every instance in order
    pub fn startup_all(&mut self) -> RailboardResult<Vec<bool>> {
        self.instances
            .iter_mut()
            .map(|instance| instance.dispatcher.startup())
            .collect()
    }

    /// Tick every instance once without moving real time
    pub fn tick_all(&mut self) -> Vec<TickReport> {
        self.instances.iter_mut().map(SimulatedInstance::tick).collect()
    }

    /// Move real time by `dt`, then tick every instance
    pub fn step(&mut self, dt: Duration) -> Vec<TickReport> {
        self.source.advance(dt);
        self.elapsed += dt;
        self.tick_all()
    }

    /// Step in `period` increments until `total` real time has passed
    pub fn run_for(&mut self, total: Duration, period: Duration) -> usize {
        let mut steps = 0;
        let mut remaining = total;
        while !remaining.is_zero() {
            let dt = remaining.min(period);
            self.step(dt);
            remaining -= dt;
            steps += 1;
        }
        steps
    }

    /// Whether every paused instance shows the shared synced time
    pub fn paused_instances_agree(&self) -> bool {
        let register = self.register();
        let Some(shared) = register.synced_time() else {
            return true;
        };
        self.instances
            .iter()
            .filter(|instance| !instance.dispatcher.is_running())
            .all(|instance| instance.now() == shared)
    }
}
