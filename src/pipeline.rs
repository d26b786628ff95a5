//! Module pipeline driving one per-cycle update
//!
//! The pipeline owns an ordered registry of modules sharing a
//! [`DroneContext`]. Registration order is both init order and tick order
//! and never changes; a module added while running is appended and
//! initialized immediately. Lifecycle is a one-way state machine:
//!
//! ```text
//! Uninitialized --init()--> Running --shutdown()--> TornDown
//! ```
//!
//! `init` runs exactly once per module before any tick. A module with an
//! unmet dependency must no-op its own tick rather than disturb the rest of
//! the cycle; nothing a module does during a tick can halt the pipeline.

use crate::protocol::{ControlCommand, TelemetryFrame};
use crate::snapshot::Snapshot;
use std::sync::Arc;

/// Shared per-vehicle state handed to every module
///
/// The control snapshot has exactly one authoritative writer (the
/// controller module); the telemetry snapshot is written by the link's
/// receive thread or a virtual sensor module. Everyone else reads.
#[derive(Clone, Default)]
pub struct DroneContext {
    /// Current outbound control command
    pub control: Arc<Snapshot<ControlCommand>>,
    /// Latest decoded telemetry frame
    pub telemetry: Arc<Snapshot<TelemetryFrame>>,
}

impl DroneContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Capability set every pipeline module exposes
pub trait DroneModule: Send {
    /// Module name (for logs)
    fn name(&self) -> &'static str;

    /// Called exactly once, in registration order, before any tick
    fn init(&mut self, ctx: &DroneContext);

    /// Called once per cycle, in registration order
    fn tick(&mut self, ctx: &DroneContext);

    /// Called once at teardown, in registration order
    fn shutdown(&mut self) {}
}

/// Pipeline lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Running,
    TornDown,
}

/// Ordered module registry with a one-way lifecycle
pub struct Pipeline {
    ctx: DroneContext,
    modules: Vec<Box<dyn DroneModule>>,
    state: PipelineState,
}

impl Pipeline {
    /// Create an empty pipeline around a shared context
    pub fn new(ctx: DroneContext) -> Self {
        Self {
            ctx,
            modules: Vec::new(),
            state: PipelineState::Uninitialized,
        }
    }

    /// Shared context handle
    pub fn context(&self) -> &DroneContext {
        &self.ctx
    }

    /// Current lifecycle state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Append a module
    ///
    /// Before `init` the module just joins the registry; while running it
    /// is initialized immediately so it is ready for the next tick. After
    /// teardown new modules are rejected.
    pub fn add_module(&mut self, mut module: Box<dyn DroneModule>) {
        match self.state {
            PipelineState::Uninitialized => self.modules.push(module),
            PipelineState::Running => {
                log::info!("pipeline: late-adding module {}", module.name());
                module.init(&self.ctx);
                self.modules.push(module);
            }
            PipelineState::TornDown => {
                log::warn!(
                    "pipeline: ignoring module {} added after teardown",
                    module.name()
                );
            }
        }
    }

    /// Initialize every registered module in registration order
    ///
    /// Idempotent: calling again while running or after teardown is a
    /// logged no-op.
    pub fn init(&mut self) {
        if self.state != PipelineState::Uninitialized {
            log::warn!("pipeline: init called in state {:?}", self.state);
            return;
        }
        for module in &mut self.modules {
            log::debug!("pipeline: init {}", module.name());
            module.init(&self.ctx);
        }
        self.state = PipelineState::Running;
        log::info!("pipeline: running with {} modules", self.modules.len());
    }

    /// Run one cycle: every module ticks, in registration order
    pub fn tick(&mut self) {
        if self.state != PipelineState::Running {
            return;
        }
        for module in &mut self.modules {
            module.tick(&self.ctx);
        }
    }

    /// Tear down: shut every module down and stop ticking
    ///
    /// Safe to call more than once. The link module releases its channel
    /// from its shutdown hook, so teardown never leaks a socket.
    pub fn shutdown(&mut self) {
        if self.state == PipelineState::TornDown {
            return;
        }
        for module in &mut self.modules {
            log::debug!("pipeline: shutdown {}", module.name());
            module.shutdown();
        }
        self.state = PipelineState::TornDown;
        log::info!("pipeline: torn down");
    }
}
