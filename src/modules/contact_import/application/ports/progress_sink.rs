use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::modules::contact_import::domain::{ImportPhase, ProgressEvent, UploadProgress};

/// Observer of an import run. Calls arrive synchronously and in order.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, progress: &UploadProgress);

    fn on_phase(&self, _phase: ImportPhase) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&UploadProgress) + Send + Sync,
{
    fn on_progress(&self, progress: &UploadProgress) {
        self(progress)
    }
}

/// Forwards every event into an unbounded channel so a caller can consume
/// the run as a stream
#[derive(Clone)]
pub struct ChannelProgressSink {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelProgressSink {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn on_progress(&self, progress: &UploadProgress) {
        // A dropped receiver only means nobody is listening anymore.
        let _ = self.sender.send(ProgressEvent::Progress(*progress));
    }

    fn on_phase(&self, phase: ImportPhase) {
        let _ = self.sender.send(ProgressEvent::Phase(phase));
    }
}

pub fn progress_channel() -> (ChannelProgressSink, UnboundedReceiver<ProgressEvent>) {
    let (sender, receiver) = unbounded_channel();
    (ChannelProgressSink::new(sender), receiver)
}
