use crate::key::Key;
use gallery_common::MoveDirection;
use glam::{DVec2, Vec2};
use std::collections::BTreeSet;

/// Device state as reported by the window system.
///
/// Nothing here is interpreted; the window layer writes into it as events
/// arrive and the sampler reads it once per frame.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    cursor: Option<DVec2>,
    scroll: f64,
    held: BTreeSet<Key>,
    close_requested: bool,
    /// Where a captured pointer's virtual cursor starts before any absolute
    /// position is known.
    origin: DVec2,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw state whose virtual cursor starts at `origin` (usually the
    /// window centre).
    pub fn with_origin(x: f64, y: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            ..Self::default()
        }
    }

    /// Record an absolute cursor position in screen pixels.
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = Some(DVec2::new(x, y));
    }

    /// Advance the virtual cursor of a captured pointer by a raw motion delta.
    ///
    /// The virtual cursor is unbounded, so looking around never stops at a
    /// screen edge.
    pub fn move_cursor_by(&mut self, dx: f64, dy: f64) {
        let current = self.cursor.unwrap_or(self.origin);
        self.cursor = Some(current + DVec2::new(dx, dy));
    }

    pub fn cursor(&self) -> Option<DVec2> {
        self.cursor
    }

    /// Accumulate vertical scroll until the next sample.
    pub fn add_scroll(&mut self, dy: f64) {
        self.scroll += dy;
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn take_scroll(&mut self) -> f64 {
        std::mem::take(&mut self.scroll)
    }
}

/// Everything the camera needs from one frame of input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSample {
    /// Cursor travel since the previous sample, `y` positive when looking up.
    pub look: Vec2,
    /// Vertical scroll since the previous sample; positive narrows the view.
    pub scroll: f32,
    /// Held movement directions, each at most once.
    pub moves: Vec<MoveDirection>,
    /// Seconds since the previous sample.
    pub delta_time: f32,
    pub exit_requested: bool,
}

/// Turns polled [`RawInput`] into per-frame [`InputSample`]s.
///
/// Owns the "first mouse" and "last frame time" state so the first sample
/// never produces a jump.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    last_cursor: Option<DVec2>,
    last_time: Option<f64>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull one frame of input. `now` is a monotonic clock in seconds.
    pub fn sample(&mut self, raw: &mut RawInput, now: f64) -> InputSample {
        let look = self.cursor_delta(raw.cursor());

        let delta_time = match self.last_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);

        let moves = Key::MOVEMENT
            .iter()
            .filter(|k| raw.is_down(**k))
            .filter_map(|k| k.direction())
            .collect();

        InputSample {
            look,
            scroll: raw.take_scroll() as f32,
            moves,
            delta_time,
            exit_requested: raw.close_requested() || raw.is_down(Key::Escape),
        }
    }

    fn cursor_delta(&mut self, cursor: Option<DVec2>) -> Vec2 {
        let Some(pos) = cursor else {
            return Vec2::ZERO;
        };
        let last = self.last_cursor.replace(pos).unwrap_or_else(|| {
            tracing::debug!("first cursor sample at ({:.1}, {:.1})", pos.x, pos.y);
            pos
        });
        let delta = pos - last;
        // Screen Y grows downward, pitch grows upward.
        Vec2::new(delta.x as f32, -delta.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_sample_is_zero() {
        let mut raw = RawInput::new();
        raw.set_cursor(640.0, 360.0);
        let mut sampler = InputSampler::new();
        let s = sampler.sample(&mut raw, 0.0);
        assert_eq!(s.look, Vec2::ZERO);
    }

    #[test]
    fn no_cursor_yet_is_zero_and_keeps_guard() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample(&mut raw, 0.0).look, Vec2::ZERO);

        raw.set_cursor(10.0, 10.0);
        assert_eq!(sampler.sample(&mut raw, 0.1).look, Vec2::ZERO);
    }

    #[test]
    fn delta_is_relative_and_y_inverted() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        raw.set_cursor(640.0, 360.0);
        sampler.sample(&mut raw, 0.0);

        raw.set_cursor(650.0, 340.0);
        let s = sampler.sample(&mut raw, 0.016);
        assert_eq!(s.look, Vec2::new(10.0, 20.0));

        // Unchanged cursor means no further look.
        let s = sampler.sample(&mut raw, 0.032);
        assert_eq!(s.look, Vec2::ZERO);
    }

    #[test]
    fn virtual_cursor_accumulates_motion() {
        let mut raw = RawInput::with_origin(640.0, 360.0);
        let mut sampler = InputSampler::new();
        raw.move_cursor_by(5.0, 5.0);
        assert_eq!(raw.cursor(), Some(DVec2::new(645.0, 365.0)));
        assert_eq!(sampler.sample(&mut raw, 0.0).look, Vec2::ZERO);

        raw.move_cursor_by(3.0, -2.0);
        raw.move_cursor_by(1.0, -1.0);
        assert_eq!(sampler.sample(&mut raw, 0.01).look, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn delta_time_from_clock() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        assert_eq!(sampler.sample(&mut raw, 5.0).delta_time, 0.0);
        let dt = sampler.sample(&mut raw, 5.25).delta_time;
        assert!((dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn delta_time_never_negative() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        sampler.sample(&mut raw, 2.0);
        assert_eq!(sampler.sample(&mut raw, 1.0).delta_time, 0.0);
    }

    #[test]
    fn scroll_passes_through_and_drains() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        raw.add_scroll(1.0);
        raw.add_scroll(2.0);
        assert_eq!(sampler.sample(&mut raw, 0.0).scroll, 3.0);
        assert_eq!(sampler.sample(&mut raw, 0.1).scroll, 0.0);

        raw.add_scroll(-4.0);
        assert_eq!(sampler.sample(&mut raw, 0.2).scroll, -4.0);
    }

    #[test]
    fn held_keys_are_independent() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        raw.press(Key::W);
        raw.press(Key::D);
        raw.press(Key::W);
        let s = sampler.sample(&mut raw, 0.0);
        assert_eq!(s.moves, vec![MoveDirection::Forward, MoveDirection::Right]);

        // Opposing keys both fire; they cancel in the camera, not here.
        raw.press(Key::S);
        let s = sampler.sample(&mut raw, 0.1);
        assert_eq!(
            s.moves,
            vec![
                MoveDirection::Forward,
                MoveDirection::Backward,
                MoveDirection::Right,
            ]
        );

        raw.release_all();
        assert!(sampler.sample(&mut raw, 0.2).moves.is_empty());
    }

    #[test]
    fn keys_stay_held_across_samples() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        raw.press(Key::A);
        assert_eq!(sampler.sample(&mut raw, 0.0).moves, vec![MoveDirection::Left]);
        assert_eq!(sampler.sample(&mut raw, 0.1).moves, vec![MoveDirection::Left]);
        raw.release(Key::A);
        assert!(sampler.sample(&mut raw, 0.2).moves.is_empty());
    }

    #[test]
    fn exit_on_escape_or_close() {
        let mut raw = RawInput::new();
        let mut sampler = InputSampler::new();
        assert!(!sampler.sample(&mut raw, 0.0).exit_requested);

        raw.press(Key::Escape);
        let s = sampler.sample(&mut raw, 0.1);
        assert!(s.exit_requested);
        assert!(s.moves.is_empty());

        let mut raw = RawInput::new();
        raw.request_close();
        assert!(sampler.sample(&mut raw, 0.2).exit_requested);
    }
}
