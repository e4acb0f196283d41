use std::time::Duration;

pub const DEFAULT_FPS: u32 = 12;
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

/// Frame cursor that advances `(current + 1) % frame_count` once per `1/fps` second.
///
/// No timers are owned here: the caller passes `now` (any monotonic clock, e.g. time since
/// the preview opened) to [`Playback::play`] and [`Playback::tick`]. Dropping the value is
/// the only cancellation needed.
#[derive(Clone, Debug)]
pub struct Playback {
    fps: u32,
    frame_count: usize,
    current: usize,
    /// Clock time of the last frame advance while playing.
    anchor: Option<Duration>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl Playback {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            frame_count: 0,
            current: 0,
            anchor: None,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps))
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Navigation and play controls only make sense with two or more frames.
    pub fn controls_enabled(&self) -> bool {
        self.frame_count > 1
    }

    /// A new frame list: stop and rewind to the first frame.
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        self.current = 0;
        self.anchor = None;
    }

    /// Start advancing from `now`. No-op when already playing or with fewer than two frames.
    pub fn play(&mut self, now: Duration) {
        if self.is_playing() || !self.controls_enabled() {
            return;
        }
        self.anchor = Some(now);
    }

    /// Stop; the current frame stays displayed.
    pub fn pause(&mut self) {
        self.anchor = None;
    }

    pub fn toggle(&mut self, now: Duration) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Change the rate (clamped to `MIN_FPS..=MAX_FPS`). A running loop restarts its period
    /// at `now` and keeps the current frame.
    pub fn set_fps(&mut self, fps: u32, now: Duration) {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
        if self.is_playing() {
            self.anchor = Some(now);
        }
    }

    /// Advance by every whole interval elapsed since the last advance and return the frame
    /// to show. A `now` earlier than the last advance changes nothing.
    pub fn tick(&mut self, now: Duration) -> usize {
        let Some(anchor) = self.anchor else {
            return self.current;
        };
        if self.frame_count == 0 {
            return self.current;
        }
        let interval = self.interval().as_nanos();
        let elapsed = now.saturating_sub(anchor).as_nanos();
        let steps = elapsed / interval;
        if steps > 0 {
            let n = self.frame_count as u128;
            self.current = ((self.current as u128 + steps) % n) as usize;
            let advanced = Duration::from_nanos((steps * interval) as u64);
            self.anchor = Some(anchor + advanced);
        }
        self.current
    }

    /// Step forward, wrapping to the first frame. Works while playing or paused.
    pub fn next(&mut self) -> usize {
        if self.frame_count > 0 {
            self.current = (self.current + 1) % self.frame_count;
        }
        self.current
    }

    /// Step back, wrapping to the last frame.
    pub fn prev(&mut self) -> usize {
        if self.frame_count > 0 {
            self.current = self
                .current
                .checked_sub(1)
                .unwrap_or(self.frame_count - 1);
        }
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
