//! The clock widget aggregate.
//!
//! One [`ClockWidget`] per displayed clock. It owns three separate parts:
//!
//! - `settings`: the persisted configuration ([`ClockSettings`])
//! - `state`: transient display state ([`ClockState`]: zone, label tracker,
//!   refresh timer, pending redraw)
//! - `labels`: the host's label handles ([`ClockLabels`])
//!
//! plus the scheduler that drives its refresh timer and the source it reads
//! the time from.
//!
//! # Event Flow
//!
//! ```text
//! Scheduler tick ──► on_timer(handle) ──► redraw requested
//!                                              │
//! host polls take_redraw_request() ◄───────────┘
//!        │
//!        ▼
//! paint(canvas) ──► sample ──► render_face ──► LabelTracker::apply
//! ```
//!
//! The host drives everything from its run loop on one thread; the widget
//! never blocks and never reports errors.

use crate::canvas::Canvas;
use crate::face::render_face;
use crate::labels::{ClockLabels, Label, LabelTracker, LabelUpdate};
use crate::refresh::{RefreshTimer, Scheduler};
use crate::sampler::{TimeSource, UNKNOWN_WEEKDAY, sample};
use crate::settings::{ClockSettings, FontDesc};
use crate::zone::ZoneHandle;

/// Label texts before the first paint.
const INITIAL_DATE: &str = "00/00";
const INITIAL_TIME: &str = "00:00";

/// Name of the remote event that forces a redraw.
pub const REMOTE_REFRESH: &str = "refresh";

/// Value carried by a remote event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Events the host can dispatch to a widget.
#[derive(Clone, Debug)]
pub enum WidgetEvent<H> {
    /// A scheduler callback fired.
    Tick(H),
    /// The configuration dialog closed with new settings.
    ConfigApplied(ClockSettings),
    /// A named remote event.
    Remote { name: String, value: RemoteValue },
    /// The widget is being removed.
    Teardown,
}

/// Transient display state of one clock.
#[derive(Debug)]
pub struct ClockState<H> {
    pub zone: ZoneHandle,
    pub tracker: LabelTracker,
    pub timer: RefreshTimer<H>,
    /// A paint has been requested and not yet performed.
    pub redraw: bool,
    pub torn_down: bool,
}

impl<H> Default for ClockState<H> {
    fn default() -> Self {
        Self {
            zone: ZoneHandle::utc(),
            tracker: LabelTracker::default(),
            timer: RefreshTimer::default(),
            redraw: false,
            torn_down: false,
        }
    }
}

/// One analog clock with its labels.
pub struct ClockWidget<S, L, T>
where
    S: Scheduler,
    L: Label,
    T: TimeSource,
{
    settings: ClockSettings,
    state: ClockState<S::Handle>,
    labels: ClockLabels<L>,
    scheduler: S,
    source: T,
}

impl<S, L, T> ClockWidget<S, L, T>
where
    S: Scheduler,
    L: Label,
    T: TimeSource,
{
    /// Create a widget, write the initial label texts and arm its timer.
    pub fn new(settings: ClockSettings, scheduler: S, mut labels: ClockLabels<L>, source: T) -> Self {
        labels.title.set_text(&settings.title);
        labels.day.set_text(UNKNOWN_WEEKDAY);
        labels.date.set_text(INITIAL_DATE);
        labels.time.set_text(INITIAL_TIME);

        let mut widget = Self {
            settings: settings.clone(),
            state: ClockState::default(),
            labels,
            scheduler,
            source,
        };
        widget.apply_settings(settings);
        widget
    }

    /// Apply a full configuration: fonts, timer restart, title, zone and
    /// label visibility.
    pub fn apply_settings(&mut self, settings: ClockSettings) {
        if self.state.torn_down {
            log::warn!("ignoring settings for a torn down clock");
            return;
        }

        let date_font = FontDesc::parse(&settings.date_font);
        self.labels.title.set_font(&FontDesc::parse(&settings.title_font));
        self.labels.day.set_font(&date_font);
        self.labels.date.set_font(&date_font);
        self.labels.time.set_font(&FontDesc::parse(&settings.time_font));

        self.state.timer.start(&mut self.scheduler);

        self.settings = settings;
        let title = self.settings.title.clone();
        self.set_title(&title);
        let timezone = self.settings.timezone.clone();
        self.set_timezone(&timezone);
        self.set_show_title(self.settings.show_title);
        self.set_show_date(self.settings.show_date);
        self.set_show_time(self.settings.show_time);
    }

    pub fn set_title(&mut self, title: &str) {
        self.settings.title = title.to_string();
        self.labels.title.set_text(title);
    }

    /// Switch zones and repaint right away.
    pub fn set_timezone(&mut self, id: &str) {
        self.settings.timezone = id.to_string();
        // The old handle is dropped here
        self.state.zone = ZoneHandle::resolve(id);
        log::info!("time zone set to {:?}{}", id, if self.state.zone.is_fallback() { " (using UTC)" } else { "" });
        self.request_redraw();
    }

    pub fn set_show_title(&mut self, show: bool) {
        self.settings.show_title = show;
        self.labels.title.set_visible(show);
    }

    /// Weekday and date labels share one flag.
    pub fn set_show_date(&mut self, show: bool) {
        self.settings.show_date = show;
        self.labels.day.set_visible(show);
        self.labels.date.set_visible(show);
    }

    pub fn set_show_time(&mut self, show: bool) {
        self.settings.show_time = show;
        self.labels.time.set_visible(show);
    }

    /// Scheduler callback. Returns true if the tick was accepted.
    pub fn on_timer(&mut self, handle: S::Handle) -> bool {
        if !self.state.timer.is_current(handle) {
            log::debug!("ignoring stale timer tick {handle:?}");
            return false;
        }
        self.request_redraw();
        true
    }

    /// Paint callback: sample the time, draw the face, update the labels.
    pub fn paint<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> LabelUpdate {
        let now = sample(&self.source, &self.state.zone);
        render_face(canvas, now.hour, now.minute);
        let update = self.state.tracker.apply(&now, &mut self.labels);
        self.state.redraw = false;
        update
    }

    /// Handle a remote event. Returns true if `name` is known.
    pub fn remote_event(&mut self, name: &str, value: &RemoteValue) -> bool {
        match name {
            REMOTE_REFRESH => {
                if *value == RemoteValue::Bool(true) {
                    self.request_redraw();
                }
                true
            }
            _ => false,
        }
    }

    /// Dispatch an event to its handler. Returns true if it was handled.
    pub fn handle(&mut self, event: WidgetEvent<S::Handle>) -> bool {
        match event {
            WidgetEvent::Tick(handle) => self.on_timer(handle),
            WidgetEvent::ConfigApplied(settings) => {
                self.apply_settings(settings);
                true
            }
            WidgetEvent::Remote { name, value } => self.remote_event(&name, &value),
            WidgetEvent::Teardown => {
                self.teardown();
                true
            }
        }
    }

    pub fn request_redraw(&mut self) { self.state.redraw = true; }

    pub fn redraw_requested(&self) -> bool { self.state.redraw }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool { core::mem::replace(&mut self.state.redraw, false) }

    /// Cancel the timer, then release the zone. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.state.torn_down {
            return;
        }
        self.state.timer.stop(&mut self.scheduler);
        self.state.zone = ZoneHandle::utc();
        self.state.redraw = false;
        self.state.torn_down = true;
        log::debug!("clock torn down");
    }

    pub fn settings(&self) -> &ClockSettings { &self.settings }

    pub fn state(&self) -> &ClockState<S::Handle> { &self.state }

    pub fn zone(&self) -> &ZoneHandle { &self.state.zone }

    pub fn labels(&self) -> &ClockLabels<L> { &self.labels }

    pub fn labels_mut(&mut self) -> &mut ClockLabels<L> { &mut self.labels }

    pub fn scheduler(&self) -> &S { &self.scheduler }

    pub fn scheduler_mut(&mut self) -> &mut S { &mut self.scheduler }

    pub fn source(&self) -> &T { &self.source }
}

impl<S, L, T> Drop for ClockWidget<S, L, T>
where
    S: Scheduler,
    L: Label,
    T: TimeSource,
{
    fn drop(&mut self) { self.teardown(); }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::labels::MemoryLabel;
    use crate::refresh::ManualScheduler;
    use crate::sampler::FixedTimeSource;

    type TestWidget<'a> = ClockWidget<&'a mut ManualScheduler, MemoryLabel, FixedTimeSource>;

    /// Thursday 2023-06-15 03:30 UTC.
    fn thursday() -> Timestamp { "2023-06-15T03:30:00Z".parse().unwrap() }

    fn widget(scheduler: &mut ManualScheduler, settings: ClockSettings) -> TestWidget<'_> {
        ClockWidget::new(settings, scheduler, ClockLabels::default(), FixedTimeSource::new(thursday()))
    }

    #[test]
    fn test_new_writes_initial_labels_and_arms_timer() {
        let mut scheduler = ManualScheduler::new();
        let clock = widget(&mut scheduler, ClockSettings::default());

        assert_eq!(clock.labels().title.text, "Title");
        assert_eq!(clock.labels().day.text, "---");
        assert_eq!(clock.labels().date.text, "00/00");
        assert_eq!(clock.labels().time.text, "00:00");
        assert!(clock.labels().time.visible, "Labels are shown by default");
        assert!(clock.state().timer.is_armed(), "New widget arms its refresh timer");
        assert!(clock.redraw_requested(), "Setting the zone requests a first paint");
        drop(clock);
        assert!(scheduler.live().is_empty(), "Dropping the widget cancels its timer");
    }

    #[test]
    fn test_new_applies_fonts() {
        let mut scheduler = ManualScheduler::new();
        let settings = ClockSettings {
            time_font: "Mono 24".into(),
            ..ClockSettings::default()
        };
        let clock = widget(&mut scheduler, settings);

        assert_eq!(clock.labels().time.font.as_ref().and_then(FontDesc::pixel_size), Some(24));
        assert_eq!(clock.labels().day.font, clock.labels().date.font, "Weekday and date share a font");
    }

    #[test]
    fn test_paint_end_to_end() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let mut canvas = RecordingCanvas::new(100, 100);

        let update = clock.paint(&mut canvas);
        assert_eq!(update, LabelUpdate { time: true, date: true });
        assert_eq!(clock.labels().time.text, "03:30");
        assert_eq!(clock.labels().day.text, "Thu");
        assert_eq!(clock.labels().date.text, "15/06");
        assert_eq!(canvas.fill_count(), 3, "Ticks, minute hand and hour hand");
        assert!(!clock.redraw_requested(), "Paint clears the redraw request");
    }

    #[test]
    fn test_second_paint_rewrites_nothing() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let mut canvas = RecordingCanvas::new(100, 100);
        clock.paint(&mut canvas);
        let writes = clock.labels().time.writes;

        canvas.clear();
        let update = clock.paint(&mut canvas);
        assert!(!update.any(), "Unchanged time should not touch the labels");
        assert_eq!(clock.labels().time.writes, writes);
        assert_eq!(canvas.fill_count(), 3, "Face is redrawn every paint");
    }

    #[test]
    fn test_paint_follows_source() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let mut canvas = RecordingCanvas::new(50, 50);
        clock.paint(&mut canvas);

        clock.source().advance(SignedDuration::from_mins(1));
        let update = clock.paint(&mut canvas);
        assert_eq!(update, LabelUpdate { time: true, date: false });
        assert_eq!(clock.labels().time.text, "03:31");
    }

    #[test]
    fn test_tick_requests_redraw() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        clock.take_redraw_request();

        let handle = clock.scheduler().live()[0];
        assert!(clock.on_timer(handle));
        assert!(clock.take_redraw_request(), "Tick should request a paint");
        assert!(!clock.redraw_requested(), "Take clears the request");
    }

    #[test]
    fn test_reapply_keeps_one_timer_and_ignores_stale_ticks() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let old = clock.scheduler().live()[0];

        for _ in 0..3 {
            clock.apply_settings(ClockSettings::default());
            assert_eq!(clock.scheduler().live().len(), 1, "Exactly one refresh schedule at a time");
        }
        clock.take_redraw_request();
        assert!(!clock.on_timer(old), "Tick from a cancelled schedule is stale");
        assert!(!clock.redraw_requested());
    }

    #[test]
    fn test_set_timezone_forces_redraw() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let mut canvas = RecordingCanvas::new(100, 100);
        clock.paint(&mut canvas);

        clock.set_timezone("+09:00");
        assert!(clock.redraw_requested(), "Zone change repaints without waiting for a tick");
        assert_eq!(clock.settings().timezone, "+09:00");
        clock.paint(&mut canvas);
        assert_eq!(clock.labels().time.text, "12:30");
    }

    #[test]
    fn test_invalid_timezone_samples_utc() {
        let mut scheduler = ManualScheduler::new();
        let settings = ClockSettings {
            timezone: "Nowhere/Special".into(),
            ..ClockSettings::default()
        };
        let mut clock = widget(&mut scheduler, settings);
        assert!(clock.zone().is_fallback());

        clock.paint(&mut RecordingCanvas::new(10, 10));
        assert_eq!(clock.labels().time.text, "03:30", "Invalid zone falls back to UTC");
    }

    #[test]
    fn test_visibility_toggles_leave_timer_alone() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let handle = clock.scheduler().live()[0];

        clock.set_show_title(false);
        clock.set_show_date(false);
        clock.set_show_time(false);
        assert!(!clock.labels().title.visible);
        assert!(!clock.labels().day.visible && !clock.labels().date.visible, "Date flag hides both labels");
        assert!(!clock.labels().time.visible);
        assert!(!clock.settings().show_date);
        assert!(clock.state().timer.is_current(handle), "Visibility does not restart the timer");
        assert_eq!(clock.scheduler().armed, 1);
    }

    #[test]
    fn test_settings_hide_labels() {
        let mut scheduler = ManualScheduler::new();
        let settings = ClockSettings {
            show_title: false,
            ..ClockSettings::default()
        };
        let clock = widget(&mut scheduler, settings);
        assert!(!clock.labels().title.visible);
        assert!(clock.labels().date.visible);
    }

    #[test]
    fn test_remote_refresh() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        clock.take_redraw_request();

        assert!(clock.remote_event("refresh", &RemoteValue::Bool(false)));
        assert!(!clock.redraw_requested(), "refresh=false is accepted but does nothing");

        assert!(clock.remote_event("refresh", &RemoteValue::Bool(true)));
        assert!(clock.redraw_requested());

        assert!(!clock.remote_event("rotate", &RemoteValue::Int(1)), "Unknown events are not handled");
    }

    #[test]
    fn test_event_dispatch() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        clock.take_redraw_request();

        let handle = clock.scheduler().live()[0];
        assert!(clock.handle(WidgetEvent::Tick(handle)));
        assert!(clock.take_redraw_request());

        let settings = ClockSettings {
            title: "Dispatched".into(),
            ..ClockSettings::default()
        };
        assert!(clock.handle(WidgetEvent::ConfigApplied(settings)));
        assert_eq!(clock.labels().title.text, "Dispatched");

        let remote = WidgetEvent::Remote {
            name: "refresh".into(),
            value: RemoteValue::Bool(true),
        };
        assert!(clock.handle(remote));

        assert!(clock.handle(WidgetEvent::Teardown));
        assert!(clock.scheduler().live().is_empty());
    }

    #[test]
    fn test_teardown_cancels_and_ignores_later_ticks() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = widget(&mut scheduler, ClockSettings::default());
        let handle = clock.scheduler().live()[0];

        clock.teardown();
        clock.teardown();
        assert!(clock.scheduler().live().is_empty(), "Teardown cancels the timer");
        assert_eq!(clock.scheduler().cancelled, 1, "Second teardown is a no-op");
        assert!(!clock.on_timer(handle), "No tick is accepted after teardown");

        clock.apply_settings(ClockSettings::default());
        assert!(clock.scheduler().live().is_empty(), "Torn down widget does not re-arm");
    }
}
