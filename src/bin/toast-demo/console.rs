use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use toast::animation::Transition;
use toast::layout::ToastLayout;
use toast::presenter::{self, Completion, Presenter, SurfaceId, ToastView};
use toast::request::ToastId;
use toast::types::{EdgeInsets, Rect, Size, SurfacePolicy};

const SCREEN: SurfaceId = SurfaceId(1);
const BOUNDS: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);
const SAFE_AREA: EdgeInsets = EdgeInsets::new(47.0, 0.0, 34.0, 0.0);
const KEYBOARD_HEIGHT: f64 = 336.0;

/// A single phone-sized surface rendered as log lines on stdout.
pub struct ConsolePresenter {
    keyboard: Arc<AtomicBool>,
    views: Vec<(ToastId, String, Size)>,
}

impl ConsolePresenter {
    pub const fn new(keyboard: Arc<AtomicBool>) -> Self {
        Self {
            keyboard,
            views: Vec::new(),
        }
    }

    fn print_frame(&self, verb: &str, id: ToastId, layout: &ToastLayout) {
        if let Some((_, text, size)) = self.views.iter().find(|(view, ..)| *view == id) {
            let frame = layout.solve(BOUNDS, *size);
            println!(
                "{SCREEN} {verb:<8} [{:>5.1},{:>5.1} {:>5.1}x{:>4.1}] {:<6} {text}",
                frame.x, frame.y, frame.width, frame.height, layout.placement
            );
        }
    }
}

/// Rough text metrics for a monospace-ish font.
fn measure(view: &ToastView) -> Size {
    let size = view.runs.first().map_or(14.0, |run| run.font_size);
    let text = view.text();
    let lines = text.lines().count().max(1);
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    Size::new(widest as f64 * size * 0.55, lines as f64 * size * 1.2)
}

impl Presenter for ConsolePresenter {
    fn resolve_surface(&self, _policy: SurfacePolicy) -> Option<SurfaceId> {
        Some(SCREEN)
    }

    fn safe_area(&self, _surface: SurfaceId) -> EdgeInsets {
        if self.keyboard.load(Ordering::SeqCst) {
            EdgeInsets {
                bottom: KEYBOARD_HEIGHT,
                ..SAFE_AREA
            }
        } else {
            SAFE_AREA
        }
    }

    fn insert(&mut self, _surface: SurfaceId, view: &ToastView, layout: &ToastLayout) {
        self.views.push((view.id, view.text().replace('\n', " / "), measure(view)));
        self.print_frame("insert", view.id, layout);
    }

    fn relayout(&mut self, _surface: SurfaceId, id: ToastId, layout: &ToastLayout) {
        self.print_frame("relayout", id, layout);
    }

    fn bring_to_front(&mut self, _surface: SurfaceId, _id: ToastId) {}

    fn remove(&mut self, surface: SurfaceId, id: ToastId) {
        self.views.retain(|(view, ..)| *view != id);
        println!("{surface} remove   {id}");
    }

    fn animate(&mut self, id: ToastId, transition: &Transition) -> Completion {
        tracing::trace!(toast_id = %id, ?transition, "animating");
        presenter::timed(transition)
    }
}
