use super::frame::Frame;

/// Per-frame callback registered against the host loop
pub type FrameCallback = Box<dyn FnMut(&Frame)>;

/// Handle returned by [`FrameLoop::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Host-owned registry of per-frame callbacks
///
/// Callbacks run in subscription order, once per dispatched frame. The
/// registry never calls back into itself, so callbacks cannot subscribe or
/// unsubscribe during dispatch.
pub struct FrameLoop {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, FrameCallback)>,
    frames_dispatched: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
            frames_dispatched: 0,
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Frame) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    pub fn dispatch(&mut self, frame: &Frame) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(frame);
        }
        self.frames_dispatched += 1;
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.callbacks.iter().any(|(sub, _)| *sub == id)
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn frames_dispatched(&self) -> u64 {
        self.frames_dispatched
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
