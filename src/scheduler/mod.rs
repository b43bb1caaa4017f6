//! Serial display queue.
//!
//! [`ToastScheduler`] is a cheap, cloneable handle. Every operation is sent
//! as a command to a single [`SchedulerLoop`], which owns the queue, the
//! presenter and the active toast's lifecycle. Hosts with a UI executor can
//! poll [`SchedulerLoop::run`] there; others can use [`ToastScheduler::spawn`].

mod lifecycle;

use std::fmt;

use async_channel::{Sender, unbounded};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::Result;
use crate::config::Settings;
use crate::error::Error;
use crate::presenter::Presenter;
use crate::request::{ToastId, ToastRequest};

pub use lifecycle::SchedulerLoop;

pub(crate) enum Command {
    Enqueue(ToastRequest),
    DismissHead,
    DismissAll,
    Tap(ToastId),
    Reflow,
    Configure(Box<Settings>),
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

/// Lifecycle stage of the active toast.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Showing,
    Visible,
    Hiding,
}

/// Point-in-time view of the queue.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub active: Option<(ToastId, Stage)>,
    pub pending: Vec<ToastId>,
}

impl Snapshot {
    /// Number of queued toasts, the active one included.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.active.is_some()) + self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    #[must_use]
    pub fn active_id(&self) -> Option<ToastId> {
        self.active.map(|(id, _)| id)
    }
}

#[derive(Clone)]
pub struct ToastScheduler {
    tx: Sender<Command>,
}

impl ToastScheduler {
    /// Create a handle and the loop it drives. Nothing happens until the
    /// loop is polled.
    pub fn new<P: Presenter>(presenter: P, settings: Settings) -> (Self, SchedulerLoop<P>) {
        let (tx, rx) = unbounded();
        (Self { tx }, SchedulerLoop::new(rx, presenter, settings))
    }

    /// Create a handle and run its loop on the current tokio runtime.
    pub fn spawn<P: Presenter>(presenter: P, settings: Settings) -> (Self, JoinHandle<()>) {
        let (handle, scheduler) = Self::new(presenter, settings);
        (handle, tokio::spawn(scheduler.run()))
    }

    /// Queue `request`. Enqueueing an id that is already queued does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn enqueue(&self, request: ToastRequest) -> Result<ToastId> {
        let id = request.id();
        self.send(Command::Enqueue(request))?;
        Ok(id)
    }

    /// Hide the visible toast and move on to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn dismiss_head(&self) -> Result<()> {
        self.send(Command::DismissHead)
    }

    /// Drop every waiting toast and hide the visible one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn dismiss_all(&self) -> Result<()> {
        self.send(Command::DismissAll)
    }

    /// Report a tap on the view for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn tap(&self, id: ToastId) -> Result<()> {
        self.send(Command::Tap(id))
    }

    /// Recompute the visible toast's placement, e.g. after a keyboard
    /// appeared or disappeared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn reflow(&self) -> Result<()> {
        self.send(Command::Reflow)
    }

    /// Replace the settings used for toasts shown from now on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub fn configure(&self, settings: Settings) -> Result<()> {
        self.send(Command::Configure(Box::new(settings)))
    }

    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| Error::SchedulerClosed)
    }

    /// Stop the loop, removing the visible toast without animation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchedulerClosed`] if the loop has already stopped.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        self.tx.try_send(command).map_err(|_| {
            debug!("command sent to a stopped toast scheduler");
            Error::SchedulerClosed
        })
    }
}

impl fmt::Debug for ToastScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastScheduler")
            .field("closed", &self.tx.is_closed())
            .field("in_flight", &self.tx.len())
            .finish()
    }
}
