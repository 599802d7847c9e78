//! Scripted press, drag, optional edge hold, and release.

use popmenu::{
    Duration, Instant, MenuTrigger, Point, PointerEvent, TriggerEvent, VerticalAlignment,
};

const FRAME_TIME: Duration = Duration::from_millis(16);
const SETTLE_LIMIT: u32 = 200;

/// What the script should do once the panel is open.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub row: usize,
    pub scroll_ticks: u32,
    pub hold: Duration,
}

/// One timestamped line of the session transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub at: Duration,
    pub event: TriggerEvent,
}

/// Drives a trigger on a synthetic clock.
pub struct Session<'a> {
    trigger: &'a mut MenuTrigger,
    start: Instant,
    now: Instant,
    log: Vec<Entry>,
    on_release: Option<Box<dyn FnMut(&MenuTrigger) + 'a>>,
}

impl<'a> Session<'a> {
    pub fn new(trigger: &'a mut MenuTrigger, start: Instant) -> Self {
        Self {
            trigger,
            start,
            now: start,
            log: Vec::new(),
            on_release: None,
        }
    }

    /// Called with the trigger just before the release event is sent.
    pub fn on_release(mut self, f: impl FnMut(&MenuTrigger) + 'a) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    /// Run `plan` and return the transcript.
    pub fn run(mut self, plan: Plan) -> Vec<Entry> {
        let anchor = self.trigger.bounds();
        let press = Point::new(anchor.mid_x(), anchor.mid_y());
        self.pointer(PointerEvent::down(press, self.now));
        self.advance(3);

        if plan.scroll_ticks > 0 {
            if let Some(edge) = self.edge_point() {
                self.pointer(PointerEvent::moved(edge, self.now));
                self.advance(plan.scroll_ticks);
            }
        }

        let release = match self.row_point(plan.row) {
            Some(p) => p,
            None => {
                tracing::warn!(message = "demo.row.hidden", row = plan.row);
                press
            }
        };
        self.pointer(PointerEvent::moved(release, self.now));

        let release_at = self.start + plan.hold;
        while self.now < release_at {
            self.advance(1);
        }
        if let Some(f) = self.on_release.as_mut() {
            f(&*self.trigger);
        }
        self.pointer(PointerEvent::up(release, self.now));

        let mut frames = 0;
        while (self.trigger.is_open() || self.trigger.fading_count() > 0) && frames < SETTLE_LIMIT {
            self.advance(1);
            frames += 1;
        }
        self.log
    }

    fn pointer(&mut self, event: PointerEvent) {
        let events = self.trigger.handle_pointer(&event);
        self.record(events);
    }

    fn advance(&mut self, frames: u32) {
        for _ in 0..frames {
            self.now += FRAME_TIME;
            let events = self.trigger.tick(self.now);
            self.record(events);
        }
    }

    fn record(&mut self, events: Vec<TriggerEvent>) {
        let at = self.now.saturating_duration_since(self.start);
        self.log
            .extend(events.into_iter().map(|event| Entry { at, event }));
    }

    /// A trigger-space point inside the edge band the panel opens toward.
    fn edge_point(&self) -> Option<Point> {
        self.trigger.with_panel(|panel| {
            let layout = panel.layout()?;
            let c = layout.scroll_container;
            let y = match panel.alignment().vertical {
                VerticalAlignment::Bottom => c.max_y() - 4.0,
                VerticalAlignment::Top => c.min_y() + 4.0,
            };
            Some(layout.frame.from_local(Point::new(c.mid_x(), y)))
        })?
    }

    /// Trigger-space centre of `row`, if it is inside the viewport.
    fn row_point(&self, row: usize) -> Option<Point> {
        self.trigger.with_panel(|panel| {
            let layout = panel.layout()?;
            let frame = layout.item_frame_in_panel(row, panel.scroll().offset())?;
            let centre = Point::new(frame.mid_x(), frame.mid_y());
            layout
                .scroll_container
                .contains(centre)
                .then(|| layout.frame.from_local(centre))
        })?
    }
}
