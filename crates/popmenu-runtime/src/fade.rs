#![forbid(unsafe_code)]

//! Fire-and-forget opacity fades.
//!
//! A [`Fade`] interpolates opacity linearly between two values and runs its
//! completion callback exactly once, on the first tick at or after its end.
//! [`Fade::finish`] jumps to the end and runs the callback immediately, so an
//! interrupted fade still performs its cleanup.

use std::fmt;

use web_time::{Duration, Instant};

type OnComplete = Box<dyn FnOnce()>;

/// A linear opacity animation.
pub struct Fade {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    value: f32,
    on_complete: Option<OnComplete>,
    finished: bool,
}

impl Fade {
    /// Fade from fully opaque to transparent.
    #[must_use]
    pub fn out(start: Instant, duration: Duration) -> Self {
        Self::new(1.0, 0.0, start, duration)
    }

    /// Fade from transparent to fully opaque.
    #[must_use]
    pub fn r#in(start: Instant, duration: Duration) -> Self {
        Self::new(0.0, 1.0, start, duration)
    }

    #[must_use]
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            value: from,
            on_complete: None,
            finished: false,
        }
    }

    /// Attach the completion callback (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Advance to `now` and return the current opacity.
    pub fn tick(&mut self, now: Instant) -> f32 {
        if self.finished {
            return self.value;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            self.finish();
            return self.value;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.value = self.from + (self.to - self.from) * t;
        self.value
    }

    /// Jump to the end and run the completion callback if it has not run.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.value = self.to;
        if let Some(f) = self.on_complete.take() {
            f();
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl fmt::Debug for Fade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fade")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("value", &self.value)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn fade_out_interpolates() {
        let t = Instant::now();
        let mut fade = Fade::out(t, MS_200);
        assert_eq!(fade.tick(t), 1.0);
        let mid = fade.tick(t + Duration::from_millis(100));
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(fade.tick(t + MS_200), 0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn completion_runs_exactly_once() {
        let t = Instant::now();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let mut fade = Fade::out(t, MS_200).on_complete(move || c.set(c.get() + 1));
        fade.tick(t + MS_200);
        fade.tick(t + MS_200 * 2);
        fade.finish();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn finish_runs_cleanup_mid_flight() {
        let t = Instant::now();
        let removed = Rc::new(Cell::new(false));
        let r = Rc::clone(&removed);
        let mut fade = Fade::out(t, MS_200).on_complete(move || r.set(true));
        fade.tick(t + Duration::from_millis(50));
        assert!(!removed.get());
        fade.finish();
        assert!(removed.get());
        assert_eq!(fade.value(), 0.0);
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let t = Instant::now();
        let mut fade = Fade::r#in(t, Duration::ZERO);
        assert_eq!(fade.tick(t), 1.0);
        assert!(fade.is_finished());
    }
}
