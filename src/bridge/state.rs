//! The state bridge.
//!
//! A `StateBridge` sits between display panels and one engine. Panels ask it
//! to advance, then pull a fresh `Snapshot` to render. The bridge also keeps a
//! step counter, a status, and a set of PC breakpoints for `run`.
//!
//! # Engine Ownership
//!
//! There is no default: a bridge is built either with
//! [`StateBridge::exclusive`], which moves the engine into the bridge, or with
//! [`StateBridge::shared`], which clones a [`SharedEngine`] handle. Panels that
//! must agree on what the machine looks like share one handle; panels built
//! with their own exclusive engines step independently and can diverge.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::engine::{Engine, EngineFault};
use super::snapshot::Snapshot;

/// Engine handle shared by several bridges on the same event loop.
pub type SharedEngine<E> = Rc<RefCell<E>>;

/// Wrap an engine so several bridges can drive it.
pub fn share<E: Engine>(engine: E) -> SharedEngine<E> {
    Rc::new(RefCell::new(engine))
}

/// Bridge status as seen by the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeStatus {
    /// Freshly started; no step taken yet.
    #[default]
    Idle,
    /// Last step succeeded.
    Stepping,
    /// Last step landed on a breakpoint.
    Breakpoint { pc: u16 },
    /// Last step failed. Cleared by `start()`.
    Faulted,
}

enum Binding<E> {
    Exclusive(E),
    Shared(SharedEngine<E>),
}

impl<E: Engine> Binding<E> {
    fn with<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        match self {
            Binding::Exclusive(engine) => f(engine),
            Binding::Shared(handle) => f(&*handle.borrow()),
        }
    }

    fn with_mut<R>(&mut self, f: impl FnOnce(&mut E) -> R) -> R {
        match self {
            Binding::Exclusive(engine) => f(engine),
            Binding::Shared(handle) => f(&mut *handle.borrow_mut()),
        }
    }
}

/// Pull-based view of one engine.
pub struct StateBridge<E: Engine> {
    /// The engine, owned or shared.
    binding: Binding<E>,
    /// Steps taken through this bridge since the last `start()`.
    steps: u64,
    /// Current status.
    status: BridgeStatus,
    /// PC values that stop `run`.
    breakpoints: BTreeSet<u16>,
}

impl<E: Engine> StateBridge<E> {
    /// Bridge that owns its engine. Nothing else can step it.
    pub fn exclusive(engine: E) -> Self {
        Self::with_binding(Binding::Exclusive(engine))
    }

    /// Bridge over an engine shared with other bridges.
    pub fn shared(handle: &SharedEngine<E>) -> Self {
        Self::with_binding(Binding::Shared(Rc::clone(handle)))
    }

    fn with_binding(binding: Binding<E>) -> Self {
        Self {
            binding,
            steps: 0,
            status: BridgeStatus::Idle,
            breakpoints: BTreeSet::new(),
        }
    }

    /// Reset the engine to its starting state.
    ///
    /// This is a full reset every time it is called. Call it when the panel
    /// is first initialized, not on every visibility change. On a shared
    /// engine it resets the machine for every bridge on the handle.
    pub fn start(&mut self) {
        self.binding.with_mut(|engine| engine.reset());
        self.steps = 0;
        self.status = BridgeStatus::Idle;
        log::debug!("Engine started at PC 0x{:04X}", self.pc());
    }

    /// Advance the engine by one unit.
    ///
    /// A failed step leaves the bridge `Faulted`; later successful steps
    /// still advance the engine but do not clear the status.
    pub fn step(&mut self) -> Result<(), EngineFault> {
        if let Err(fault) = self.binding.with_mut(|engine| engine.step()) {
            log::debug!("Step {} faulted: {}", self.steps + 1, fault);
            self.status = BridgeStatus::Faulted;
            return Err(fault);
        }

        self.steps += 1;
        let pc = self.pc();
        log::trace!("Step {} -> PC 0x{:04X}", self.steps, pc);

        // Faulted sticks until start().
        if self.status == BridgeStatus::Faulted {
            return Ok(());
        }
        self.status = if self.breakpoints.contains(&pc) {
            log::debug!("Breakpoint hit at PC 0x{:04X}", pc);
            BridgeStatus::Breakpoint { pc }
        } else {
            BridgeStatus::Stepping
        };
        Ok(())
    }

    /// Copy out the current registers.
    pub fn registers(&self) -> Snapshot {
        self.binding.with(|engine| engine.registers())
    }

    /// Current program counter.
    pub fn pc(&self) -> u16 {
        self.registers().pc
    }

    /// Step up to `max_steps` times.
    ///
    /// Stops early after landing on a breakpoint. Starting on a breakpoint
    /// does not stop the first step. Returns the number of steps executed.
    pub fn run(&mut self, max_steps: u64) -> Result<u64, EngineFault> {
        let mut executed = 0;
        while executed < max_steps {
            self.step()?;
            executed += 1;
            if self.breakpoints.contains(&self.pc()) {
                break;
            }
        }
        Ok(executed)
    }

    /// Stop `run` when PC reaches `pc`.
    pub fn add_breakpoint(&mut self, pc: u16) {
        self.breakpoints.insert(pc);
    }

    /// Returns true if a breakpoint was set at `pc`.
    pub fn remove_breakpoint(&mut self, pc: u16) -> bool {
        self.breakpoints.remove(&pc)
    }

    /// Remove all breakpoints.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Breakpoints in ascending PC order.
    pub fn breakpoints(&self) -> impl Iterator<Item = u16> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn status(&self) -> BridgeStatus {
        self.status
    }

    /// Steps taken through this bridge since the last `start()`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True if this bridge shares its engine.
    pub fn is_shared(&self) -> bool {
        matches!(self.binding, Binding::Shared(_))
    }
}
