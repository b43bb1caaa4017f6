//! The boundary between the scheduler and whatever draws toasts.
//!
//! A [`Presenter`] owns the presentation surfaces, the layout engine and the
//! animation runner. The scheduler only ever calls it from its own loop, so
//! implementations need `Send` but not `Sync`.

use std::fmt::{self, Display};
use std::future::Future;
use std::pin::Pin;

use crate::animation::Transition;
use crate::config::Settings;
use crate::layout::ToastLayout;
use crate::request::{StyledRun, ToastId, ToastRequest};
use crate::types::{Color, EdgeInsets, SurfacePolicy};

/// Opaque handle to a presentation surface (a window, a layer, a pane).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SurfaceId(pub u64);

impl Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Resolves once a transition has finished running.
pub type Completion = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Everything needed to draw one toast box.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub runs: Vec<StyledRun>,
    pub background: Color,
    pub corner_radius: f64,
    pub content_padding: EdgeInsets,
    /// Whether the host should route taps on this view to `ToastScheduler::tap`.
    pub interactive: bool,
}

impl ToastView {
    pub(crate) fn build(request: &ToastRequest, settings: &Settings) -> Self {
        Self {
            id: request.id(),
            runs: request.content().resolve(&settings.text),
            background: settings.background,
            corner_radius: settings.corner_radius,
            content_padding: settings.content_padding,
            interactive: settings.tap_to_dismiss,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

pub trait Presenter: Send + 'static {
    /// Pick a surface under `policy`, or `None` when nothing is on screen.
    fn resolve_surface(&self, policy: SurfacePolicy) -> Option<SurfaceId>;

    /// Insets of the area not obscured by system chrome or a keyboard.
    fn safe_area(&self, surface: SurfaceId) -> EdgeInsets;

    fn insert(&mut self, surface: SurfaceId, view: &ToastView, layout: &ToastLayout);

    /// Re-apply constraints to a view already on `surface`.
    fn relayout(&mut self, surface: SurfaceId, id: ToastId, layout: &ToastLayout);

    fn bring_to_front(&mut self, surface: SurfaceId, id: ToastId);

    fn remove(&mut self, surface: SurfaceId, id: ToastId);

    /// Start `transition` on the view and return immediately. The returned
    /// future resolves when it ends; it may be dropped early if the scheduler
    /// abandons the transition.
    fn animate(&mut self, id: ToastId, transition: &Transition) -> Completion;
}

/// A completion that simply waits out the transition's duration, for hosts
/// whose animation runner offers no completion signal.
#[must_use]
pub fn timed(transition: &Transition) -> Completion {
    Box::pin(tokio::time::sleep(transition.duration))
}
