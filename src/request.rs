use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uuid::Uuid;

use crate::Result;
use crate::config::{Settings, TextStyle};
use crate::error::ConfigError;
use crate::presenter::SurfaceId;
use crate::scheduler::ToastScheduler;
use crate::types::{Color, DurationPreset, EdgeInsets, Placement};

/// Identity of a toast. Two requests with identical text are still distinct.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A span of rich text. Unset properties fall back to the configured style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            color: None,
        }
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// A run with every property resolved, ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub font_size: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastContent {
    Plain(String),
    Styled(Vec<TextRun>),
}

impl ToastContent {
    /// Resolve against `style`, which is read at show time.
    #[must_use]
    pub fn resolve(&self, style: &TextStyle) -> Vec<StyledRun> {
        match self {
            Self::Plain(text) => vec![StyledRun {
                text: text.clone(),
                font_size: style.font_size,
                color: style.color,
            }],
            Self::Styled(runs) => runs
                .iter()
                .map(|run| StyledRun {
                    text: run.text.clone(),
                    font_size: run.font_size.unwrap_or(style.font_size),
                    color: run.color.unwrap_or(style.color),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Styled(runs) => runs.iter().map(|run| run.text.as_str()).collect(),
        }
    }
}

impl From<&str> for ToastContent {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for ToastContent {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<Vec<TextRun>> for ToastContent {
    fn from(runs: Vec<TextRun>) -> Self {
        Self::Styled(runs)
    }
}

/// Why a toast left the screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dismissal {
    /// Its display duration elapsed.
    Timeout,
    /// The user tapped it.
    Tapped,
    /// `dismiss_head` was called.
    Dismissed,
    /// `dismiss_all` was called while it was on screen.
    Cleared,
}

impl Dismissal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Tapped => "tapped",
            Self::Dismissed => "dismissed",
            Self::Cleared => "cleared",
        }
    }
}

impl Display for Dismissal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type CompletionHandler = Box<dyn FnOnce(Dismissal) + Send + 'static>;

/// One notification, frozen at [`ToastBuilder::build`].
///
/// Unset duration and placement are resolved from [`Settings`] when the
/// toast starts showing, not when it is enqueued.
///
/// Clones share the id and the completion handler, so presenting a clone of
/// a queued request is a no-op and the handler still runs at most once. Once
/// a request has been removed from screen it is spent and the scheduler
/// ignores it.
#[derive(Clone)]
pub struct ToastRequest {
    id: ToastId,
    content: ToastContent,
    duration: Option<Duration>,
    placement: Option<Placement>,
    insets: Option<EdgeInsets>,
    surface: Option<SurfaceId>,
    completion: Arc<CompletionSlot>,
}

struct CompletionSlot {
    handler: Mutex<Option<CompletionHandler>>,
    spent: AtomicBool,
}

impl ToastRequest {
    pub fn builder(content: impl Into<ToastContent>) -> ToastBuilder {
        ToastBuilder {
            content: content.into(),
            duration: None,
            placement: None,
            insets: None,
            surface: None,
            on_complete: None,
        }
    }

    pub fn new(content: impl Into<ToastContent>) -> Self {
        Self::builder(content).build()
    }

    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::new(text)
    }

    #[must_use]
    pub fn styled(runs: Vec<TextRun>) -> Self {
        Self::new(runs)
    }

    #[must_use]
    pub const fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub const fn content(&self) -> &ToastContent {
        &self.content
    }

    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    #[must_use]
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }

    #[must_use]
    pub const fn insets(&self) -> Option<EdgeInsets> {
        self.insets
    }

    #[must_use]
    pub const fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Hand the request to `scheduler`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchedulerClosed`] if the scheduler loop has
    /// stopped.
    pub fn present(self, scheduler: &ToastScheduler) -> Result<ToastId> {
        scheduler.enqueue(self)
    }

    pub(crate) fn resolved_duration(&self, settings: &Settings) -> Duration {
        self.duration.unwrap_or(settings.default_duration)
    }

    pub(crate) fn resolved_placement(&self, settings: &Settings) -> Placement {
        self.placement.unwrap_or(settings.default_placement)
    }

    pub(crate) fn resolved_insets(&self, settings: &Settings) -> EdgeInsets {
        self.insets.unwrap_or(settings.screen_padding)
    }

    /// Whether this request (or a clone of it) already finished on screen.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.completion.spent.load(Ordering::SeqCst)
    }

    /// Mark the request spent and fire the completion handler; later calls,
    /// on this request or any clone of it, do nothing.
    pub(crate) fn complete(&self, reason: Dismissal) {
        self.completion.spent.store(true, Ordering::SeqCst);
        let handler = match self.completion.handler.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handler) = handler {
            handler(reason);
        }
    }

    fn has_completion(&self) -> bool {
        match self.completion.handler.lock() {
            Ok(slot) => slot.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

impl fmt::Debug for ToastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastRequest")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("duration", &self.duration)
            .field("placement", &self.placement)
            .field("insets", &self.insets)
            .field("surface", &self.surface)
            .field("on_complete", &self.has_completion())
            .field("spent", &self.is_spent())
            .finish()
    }
}

#[must_use]
pub struct ToastBuilder {
    content: ToastContent,
    duration: Option<Duration>,
    placement: Option<Placement>,
    insets: Option<EdgeInsets>,
    surface: Option<SurfaceId>,
    on_complete: Option<CompletionHandler>,
}

impl ToastBuilder {
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub const fn preset(self, preset: DurationPreset) -> Self {
        self.duration(preset.as_duration())
    }

    /// Duration in fractional seconds, as UI code often has it.
    ///
    /// # Errors
    ///
    /// Negative or non-finite values are rejected rather than clamped.
    pub fn try_duration_secs(self, secs: f64) -> std::result::Result<Self, ConfigError> {
        Duration::try_from_secs_f64(secs)
            .map(|duration| self.duration(duration))
            .map_err(|err| ConfigError::InvalidField {
                field: "duration",
                message: format!("{secs}: {err}"),
            })
    }

    pub const fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub const fn insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = Some(insets);
        self
    }

    pub const fn surface(mut self, surface: SurfaceId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn on_complete(mut self, handler: impl FnOnce(Dismissal) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn build(self) -> ToastRequest {
        ToastRequest {
            id: ToastId::new(),
            content: self.content,
            duration: self.duration,
            placement: self.placement,
            insets: self.insets,
            surface: self.surface,
            completion: Arc::new(CompletionSlot {
                handler: Mutex::new(self.on_complete),
                spent: AtomicBool::new(false),
            }),
        }
    }
}
