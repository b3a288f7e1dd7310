use crate::Error;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::trace;

struct Shared<T> {
    value: T,
    // bumped on every cancellation, a fired transition only applies under the
    // generation it was scheduled with
    generation: u64,
    pending: bool,
    subscribers: Vec<kanal::Sender<T>>,
}

impl<T: Clone> Shared<T> {
    fn apply(&mut self, value: T) {
        self.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        self.value = value;
    }
}

impl<T> Shared<T> {
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
    }
}

struct Scheduled<T> {
    value: T,
    deadline: Instant,
    generation: u64,
}

enum Command<T> {
    Schedule(Scheduled<T>),
    Cancel,
}

/// A value which can be changed immediately or after a delay.
///
/// At most one delayed transition is outstanding at any time: every call to
/// [`set`](DelayableState::set) cancels the previous one before applying or
/// scheduling the new value, so only the most recently requested transition
/// ever takes effect. Dropping the state cancels whatever is still pending.
///
/// Delayed transitions are driven by a single timer task per state, started
/// on the first delayed `set` and retargeted by every later one. The task
/// exits once the state is dropped.
pub struct DelayableState<T> {
    shared: Arc<Mutex<Shared<T>>>,
    timer: Option<mpsc::UnboundedSender<Command<T>>>,
    runtime: Handle,
}

impl<T> DelayableState<T>
where
    T: Clone + Send + 'static,
{
    /// Creates a new state bound to the tokio runtime of the caller.
    pub fn new(initial: T) -> Result<Self, Error> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_handle(initial, runtime))
    }

    /// Creates a new state whose delayed transitions run on `runtime`.
    pub fn with_handle(initial: T, runtime: Handle) -> Self {
        DelayableState {
            shared: Arc::new(Mutex::new(Shared {
                value: initial,
                generation: 0,
                pending: false,
                subscribers: Vec::new(),
            })),
            timer: None,
            runtime,
        }
    }

    /// Get the current value.
    #[inline]
    pub fn get(&self) -> T {
        self.shared.lock().value.clone()
    }

    /// Set the value after `delay`, or right away if the delay is zero.
    ///
    /// Any transition scheduled by a previous call is cancelled first and
    /// will never fire.
    pub fn set(&mut self, value: T, delay: Duration) {
        if delay.is_zero() {
            self.cancel_pending();
            self.shared.lock().apply(value);
            return;
        }

        let generation = {
            let mut shared = self.shared.lock();
            shared.invalidate();
            shared.pending = true;
            shared.generation
        };
        trace!(message = "scheduling delayed transition", ?delay, generation);

        let scheduled = Scheduled {
            value,
            deadline: Instant::now() + delay,
            generation,
        };
        // replaces the previous schedule, if any; fails only once the runtime
        // has shut down, when nothing could fire anyway
        let _ = self.timer().send(Command::Schedule(scheduled));
    }

    /// Set the value synchronously.
    #[inline]
    pub fn set_now(&mut self, value: T) {
        self.set(value, Duration::ZERO);
    }

    /// Schedule the value to be applied once `delay` has elapsed.
    #[inline]
    pub fn set_after(&mut self, value: T, delay: Duration) {
        self.set(value, delay);
    }

    /// Receive every value applied from now on, immediate or delayed.
    pub fn subscribe(&self) -> kanal::Receiver<T> {
        let (tx, rx) = kanal::unbounded();
        self.shared.lock().subscribers.push(tx);
        rx
    }

    fn timer(&mut self) -> &mpsc::UnboundedSender<Command<T>> {
        let shared = &self.shared;
        let runtime = &self.runtime;
        self.timer.get_or_insert_with(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            trace!("starting transition timer");
            runtime.spawn(run_timer(Arc::clone(shared), rx));
            tx
        })
    }
}

impl<T> DelayableState<T> {
    /// Cancel the pending delayed transition, if any, leaving the current
    /// value untouched.
    pub fn cancel_pending(&mut self) {
        let was_pending = {
            let mut shared = self.shared.lock();
            let was_pending = shared.pending;
            shared.invalidate();
            was_pending
        };
        if was_pending {
            trace!("cancelling pending transition");
            if let Some(timer) = &self.timer {
                let _ = timer.send(Command::Cancel);
            }
        }
    }

    /// Get if a delayed transition is still waiting to fire.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.shared.lock().pending
    }
}

impl<T> Drop for DelayableState<T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl<T: fmt::Debug> fmt::Debug for DelayableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("DelayableState")
            .field("value", &shared.value)
            .field("pending", &shared.pending)
            .finish()
    }
}

/// Sleeps until the latest scheduled deadline and applies its value, unless a
/// newer command arrived first. Returns when the owning state is dropped.
async fn run_timer<T: Clone>(
    shared: Arc<Mutex<Shared<T>>>,
    mut commands: mpsc::UnboundedReceiver<Command<T>>,
) {
    let sleep = time::sleep(Duration::ZERO);
    tokio::pin!(sleep);
    let mut scheduled: Option<Scheduled<T>> = None;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Schedule(next)) => {
                    sleep.as_mut().reset(next.deadline);
                    scheduled = Some(next);
                }
                Some(Command::Cancel) => scheduled = None,
                None => break,
            },
            () = &mut sleep, if scheduled.is_some() => {
                if let Some(Scheduled { value, generation, .. }) = scheduled.take() {
                    let mut shared = shared.lock();
                    if shared.generation == generation {
                        trace!(message = "applying delayed transition", generation);
                        shared.pending = false;
                        shared.apply(value);
                    }
                }
            }
        }
    }
    trace!("transition timer stopped");
}
