//! Event bus: a channel feeding every registered sink.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Fans simulation events out to sinks.
///
/// `emit` only enqueues; sinks see events when [`flush`](Self::flush) runs,
/// normally once per step. [`sender`](Self::sender) hands out producer handles
/// for other threads.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
    dispatched: u64,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            dispatched: 0,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::debug!(sink = sink.name(), "telemetry sink registered");
        self.sinks.push(sink);
    }

    /// A disabled bus drops events on `emit`.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus, so send cannot fail here.
        let _ = self.sender.send(event);
    }

    /// Producer handle for emitting from another thread.
    pub fn sender(&self) -> mpsc::Sender<SimulationEvent> {
        self.sender.clone()
    }

    /// Delivers all queued events to every sink, in emission order.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            self.dispatched += 1;
        }
    }

    /// Flushes, then lets every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
        tracing::debug!(dispatched = self.dispatched, "telemetry bus finished");
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Events delivered so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
