use std::collections::VecDeque;
use std::pin::Pin;

use async_channel::Receiver;
use tokio::time::{Sleep, sleep};
use tracing::{debug, info, warn};

use crate::animation::HideProfile;
use crate::config::Settings;
use crate::layout::ToastLayout;
use crate::presenter::{Completion, Presenter, SurfaceId, ToastView};
use crate::request::{Dismissal, ToastId, ToastRequest};

use super::{Command, Snapshot, Stage};

/// Owner of the toast queue. See the [module docs](super).
///
/// The logical queue is the active toast followed by `pending`; only the
/// active toast is ever on a surface.
pub struct SchedulerLoop<P> {
    commands: Receiver<Command>,
    presenter: P,
    settings: Settings,
    active: Option<ActiveToast>,
    pending: VecDeque<ToastRequest>,
}

struct ActiveToast {
    request: ToastRequest,
    surface: SurfaceId,
    phase: Phase,
}

/// Each variant owns the one future that ends it. Replacing the phase drops
/// that future, which is how the auto-hide timer and an unfinished show
/// transition get cancelled.
enum Phase {
    Showing(Completion),
    Visible(Pin<Box<Sleep>>),
    Hiding { done: Completion, reason: Dismissal },
}

impl Phase {
    const fn stage(&self) -> Stage {
        match self {
            Self::Showing(_) => Stage::Showing,
            Self::Visible(_) => Stage::Visible,
            Self::Hiding { .. } => Stage::Hiding,
        }
    }

    async fn elapsed(&mut self) {
        match self {
            Self::Showing(done) | Self::Hiding { done, .. } => done.as_mut().await,
            Self::Visible(timer) => timer.as_mut().await,
        }
    }
}

async fn phase_elapsed(active: &mut Option<ActiveToast>) {
    match active {
        Some(active) => active.phase.elapsed().await,
        None => std::future::pending().await,
    }
}

impl<P: Presenter> SchedulerLoop<P> {
    pub(super) const fn new(commands: Receiver<Command>, presenter: P, settings: Settings) -> Self {
        Self {
            commands,
            presenter,
            settings,
            active: None,
            pending: VecDeque::new(),
        }
    }

    /// Process commands and lifecycle events until shut down or until every
    /// [`super::ToastScheduler`] handle is dropped.
    pub async fn run(mut self) {
        debug!("toast scheduler started");
        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Ok(Command::Shutdown) | Err(_) => break,
                    Ok(command) => self.handle(command),
                },
                () = phase_elapsed(&mut self.active), if self.active.is_some() => {
                    self.advance();
                }
            }
        }
        self.teardown();
        debug!("toast scheduler stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Enqueue(request) => self.enqueue(request),
            Command::DismissHead => self.dismiss_head(),
            Command::DismissAll => self.dismiss_all(),
            Command::Tap(id) => self.tap(id),
            Command::Reflow => self.reflow(),
            Command::Configure(settings) => {
                self.settings = *settings;
                debug!("toast settings replaced");
                self.reflow();
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn contains(&self, id: ToastId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.request.id() == id)
            || self.pending.iter().any(|request| request.id() == id)
    }

    fn enqueue(&mut self, request: ToastRequest) {
        let id = request.id();
        if request.is_spent() {
            debug!(toast_id = %id, "toast already finished; ignoring");
            return;
        }
        if self.contains(id) {
            debug!(toast_id = %id, "toast already queued; ignoring");
            return;
        }
        debug!(toast_id = %id, queued = self.pending.len(), "toast queued");
        self.pending.push_back(request);
        if self.active.is_none() {
            self.promote_next();
        }
    }

    /// Start showing the first pending toast that has somewhere to go.
    fn promote_next(&mut self) {
        while let Some(request) = self.pending.pop_front() {
            if let Some(active) = self.begin_showing(request) {
                self.active = Some(active);
                return;
            }
        }
    }

    fn begin_showing(&mut self, request: ToastRequest) -> Option<ActiveToast> {
        let id = request.id();
        let Some(surface) = self.target_surface(&request) else {
            warn!(
                toast_id = %id,
                policy = %self.settings.surface_policy,
                "no surface to present on; skipping toast"
            );
            return None;
        };

        let view = ToastView::build(&request, &self.settings);
        let layout = self.layout_for(&request, surface);
        self.presenter.insert(surface, &view, &layout);
        self.presenter.bring_to_front(surface, id);
        let done = self.presenter.animate(id, &self.settings.show);

        info!(
            toast_id = %id,
            %surface,
            placement = %layout.placement,
            text = %request.content().plain_text(),
            "showing toast"
        );
        Some(ActiveToast {
            request,
            surface,
            phase: Phase::Showing(done),
        })
    }

    fn target_surface(&self, request: &ToastRequest) -> Option<SurfaceId> {
        request
            .surface()
            .or_else(|| self.presenter.resolve_surface(self.settings.surface_policy))
    }

    fn layout_for(&self, request: &ToastRequest, surface: SurfaceId) -> ToastLayout {
        ToastLayout::new(
            request.resolved_placement(&self.settings),
            request.resolved_insets(&self.settings),
            self.presenter.safe_area(surface),
            self.settings.content_padding,
        )
    }

    /// The active toast's current phase finished.
    fn advance(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let id = active.request.id();
        match active.phase {
            Phase::Showing(_) => {
                let duration = active.request.resolved_duration(&self.settings);
                debug!(toast_id = %id, ?duration, "toast visible; auto-hide armed");
                active.phase = Phase::Visible(Box::pin(sleep(duration)));
            }
            Phase::Visible(_) => {
                self.begin_hiding(HideProfile::Plain, Dismissal::Timeout);
            }
            Phase::Hiding { reason, .. } => self.finish(reason),
        }
    }

    /// Move the active toast into `Hiding`. Returns `false` when there is no
    /// active toast or it is already hiding.
    fn begin_hiding(&mut self, profile: HideProfile, reason: Dismissal) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let id = active.request.id();
        if matches!(active.phase, Phase::Hiding { .. }) {
            debug!(toast_id = %id, %reason, "toast already hiding");
            return false;
        }
        let transition = self.settings.hide_transition(profile);
        let done = self.presenter.animate(id, &transition);
        debug!(toast_id = %id, %reason, ?profile, "hiding toast");
        active.phase = Phase::Hiding { done, reason };
        true
    }

    fn finish(&mut self, reason: Dismissal) {
        let Some(active) = self.active.take() else {
            return;
        };
        let id = active.request.id();
        self.presenter.remove(active.surface, id);
        info!(toast_id = %id, %reason, "toast removed");
        active.request.complete(reason);
        self.promote_next();
    }

    fn dismiss_head(&mut self) {
        if self.active.is_none() {
            debug!("dismiss requested with no toast on screen");
            return;
        }
        self.begin_hiding(HideProfile::Plain, Dismissal::Dismissed);
    }

    fn dismiss_all(&mut self) {
        let dropped = self.pending.len();
        self.pending.clear();
        if self.active.is_none() && dropped == 0 {
            debug!("dismiss-all requested with an empty queue");
            return;
        }
        debug!(dropped, "pending toasts discarded");
        self.begin_hiding(HideProfile::Plain, Dismissal::Cleared);
    }

    fn tap(&mut self, id: ToastId) {
        if !self.settings.tap_to_dismiss {
            debug!(toast_id = %id, "tap ignored; tap-to-dismiss disabled");
            return;
        }
        if self.active.as_ref().map(|active| active.request.id()) != Some(id) {
            debug!(toast_id = %id, "tap ignored; toast is not on screen");
            return;
        }
        self.begin_hiding(HideProfile::Fling, Dismissal::Tapped);
    }

    fn reflow(&mut self) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let id = active.request.id();
        let current = active.surface;
        let Some(target) = self.target_surface(&active.request) else {
            debug!(toast_id = %id, "reflow found no surface; keeping toast where it is");
            return;
        };

        let layout = self.layout_for(&active.request, target);
        if target == current {
            self.presenter.relayout(current, id, &layout);
        } else {
            let view = ToastView::build(&active.request, &self.settings);
            self.presenter.remove(current, id);
            self.presenter.insert(target, &view, &layout);
            if let Some(active) = self.active.as_mut() {
                active.surface = target;
            }
            debug!(toast_id = %id, from = %current, to = %target, "toast moved to another surface");
        }
        self.presenter.bring_to_front(target, id);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            active: self
                .active
                .as_ref()
                .map(|active| (active.request.id(), active.phase.stage())),
            pending: self.pending.iter().map(ToastRequest::id).collect(),
        }
    }

    fn teardown(&mut self) {
        self.pending.clear();
        if let Some(active) = self.active.take() {
            let id = active.request.id();
            self.presenter.remove(active.surface, id);
            active.request.complete(Dismissal::Cleared);
        }
    }
}
