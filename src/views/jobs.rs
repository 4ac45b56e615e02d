use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, Sender, TryRecvError},
};
use std::thread;

/// Background workers for one view, delivering results over a channel.
///
/// Each spawned job sends at most one message. `cancel` drops the channel so
/// results of jobs still running are never delivered.
pub(crate) struct ViewJobs<M> {
    message_tx: Sender<M>,
    message_rx: Receiver<M>,
    cancel: Arc<AtomicBool>,
    in_flight: usize,
}

impl<M: Send + 'static> ViewJobs<M> {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            cancel: Arc::new(AtomicBool::new(false)),
            in_flight: 0,
        }
    }

    pub(crate) fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> M + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.message_tx.clone();
        let cancel = Arc::clone(&self.cancel);
        thread::spawn(move || {
            let message = job();
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let _ = tx.send(message);
        });
    }

    /// Take every finished result without blocking.
    pub(crate) fn drain(&mut self) -> Vec<M> {
        let mut messages = Vec::new();
        loop {
            match self.message_rx.try_recv() {
                Ok(message) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    messages.push(message);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.in_flight = 0;
                    break;
                }
            }
        }
        messages
    }

    pub(crate) fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        self.message_tx = message_tx;
        self.message_rx = message_rx;
        self.cancel = Arc::new(AtomicBool::new(false));
        self.in_flight = 0;
    }

    pub(crate) fn pending(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn drain_until<M: Send + 'static>(jobs: &mut ViewJobs<M>, count: usize) -> Vec<M> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < count && Instant::now() < deadline {
            out.extend(jobs.drain());
            thread::sleep(Duration::from_millis(5));
        }
        out
    }

    #[test]
    fn delivers_results_and_tracks_pending() {
        let mut jobs = ViewJobs::new();
        jobs.spawn(|| 1);
        jobs.spawn(|| 2);
        assert_eq!(jobs.pending(), 2);
        let mut results = drain_until(&mut jobs, 2);
        results.sort();
        assert_eq!(results, vec![1, 2]);
        assert_eq!(jobs.pending(), 0);
    }

    #[test]
    fn cancelled_jobs_never_deliver() {
        let mut jobs = ViewJobs::new();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        jobs.spawn(move || {
            let _ = release_rx.recv();
            "stale"
        });
        jobs.cancel();
        assert_eq!(jobs.pending(), 0);
        release_tx.send(()).unwrap();
        jobs.spawn(|| "fresh");
        assert_eq!(drain_until(&mut jobs, 1), vec!["fresh"]);
        thread::sleep(Duration::from_millis(20));
        assert!(jobs.drain().is_empty());
    }
}
