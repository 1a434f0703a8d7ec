//! Single-consumer execution context for the tracking engine
//!
//! Hints usually arrive on a network thread while the engine's state must only
//! ever be touched by one thread. `EngineHandle`s can be cloned and sent
//! anywhere; they push [`EngineCommand`]s into a queue that exactly one
//! [`EngineExecutor`] drains, in arrival order, on the thread that owns the
//! engine.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace};

use crate::api::engine::TrackingEngine;
use crate::api::error::{EngineError, EngineResult};
use crate::api::observer::ObserverPosition;
use crate::api::types::{EngineCommand, OutcomeSink};
use crate::core::{RenderDescriptor, TrackedHint};
use crate::utils::config::EngineConfig;

/// Cloneable, thread-safe entry point into an executor's queue
#[derive(Debug, Clone)]
pub struct EngineHandle {
    sender: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Queue a decoded update
    pub fn submit(&self, update: TrackedHint) -> EngineResult<()> {
        Ok(self.sender.send(EngineCommand::Hint(update))?)
    }

    /// Queue a session reset, ordered after everything submitted before it
    pub fn reset(&self) -> EngineResult<()> {
        Ok(self.sender.send(EngineCommand::Reset)?)
    }

    /// Copy of the render state once every earlier command has been applied.
    ///
    /// Blocks until the executor answers, so it must not be called from the
    /// executor's own thread.
    pub fn snapshot(&self) -> EngineResult<Vec<RenderDescriptor>> {
        let (reply, response) = mpsc::channel();
        self.sender.send(EngineCommand::Snapshot(reply))?;
        Ok(response.recv()?)
    }

    /// Ask the executor to stop after the commands already queued
    pub fn shutdown(&self) -> EngineResult<()> {
        Ok(self.sender.send(EngineCommand::Shutdown)?)
    }
}

/// Owner of a [`TrackingEngine`] and the receiving end of its command queue
pub struct EngineExecutor<O> {
    engine: TrackingEngine,
    observer: O,
    receiver: Receiver<EngineCommand>,
    sink: Option<OutcomeSink>,
    stopped: bool,
}

impl<O: ObserverPosition> EngineExecutor<O> {
    pub fn new(engine: TrackingEngine, observer: O) -> (Self, EngineHandle) {
        let (sender, receiver) = mpsc::channel();
        let executor = Self {
            engine,
            observer,
            receiver,
            sink: None,
            stopped: false,
        };
        (executor, EngineHandle { sender })
    }

    /// Forward every hint outcome to `sink`
    pub fn with_sink(mut self, sink: OutcomeSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn engine(&self) -> &TrackingEngine {
        &self.engine
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Process commands until shutdown or until every handle is dropped,
    /// then hand the engine back.
    pub fn run(mut self) -> TrackingEngine {
        while !self.stopped {
            match self.receiver.recv() {
                Ok(command) => {
                    if self.apply(command).is_break() {
                        self.stopped = true;
                    }
                }
                Err(_) => {
                    debug!("all engine handles dropped");
                    self.stopped = true;
                }
            }
        }
        self.engine
    }

    /// Process only the commands already queued, without blocking.
    ///
    /// Meant for hosts that pump the queue from their own frame loop.
    /// Returns the number of commands applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while !self.stopped {
            match self.receiver.try_recv() {
                Ok(command) => {
                    applied += 1;
                    if self.apply(command).is_break() {
                        self.stopped = true;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.stopped = true;
                }
            }
        }
        applied
    }

    fn apply(&mut self, command: EngineCommand) -> ControlFlow<()> {
        match command {
            EngineCommand::Hint(update) => {
                let outcome = self.engine.handle(&update, &self.observer);
                if let Some(sink) = self.sink.as_mut() {
                    sink(&outcome);
                }
            }
            EngineCommand::Reset => {
                self.engine.reset();
            }
            EngineCommand::Snapshot(reply) => {
                // The requester may have given up waiting
                if reply.send(self.engine.snapshot().to_vec()).is_err() {
                    trace!("snapshot requester went away");
                }
            }
            EngineCommand::Shutdown => {
                debug!("engine executor shutting down");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// Start an executor on a dedicated thread.
///
/// The join handle yields the engine after shutdown.
pub fn spawn<O>(
    config: EngineConfig,
    observer: O,
    sink: Option<OutcomeSink>,
) -> EngineResult<(EngineHandle, JoinHandle<TrackingEngine>)>
where
    O: ObserverPosition + Send + 'static,
{
    let engine = TrackingEngine::new(config)?;
    let (mut executor, handle) = EngineExecutor::new(engine, observer);
    if let Some(sink) = sink {
        executor = executor.with_sink(sink);
    }

    let join = thread::Builder::new()
        .name("tracking-engine".to_string())
        .spawn(move || executor.run())
        .map_err(EngineError::Spawn)?;

    Ok((handle, join))
}
