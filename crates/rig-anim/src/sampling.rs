//! Mapping of animation time onto keyframe pairs and blend factors

use std::time::Duration;

/// Smoothstep easing, `3t² - 2t³`.
///
/// Maps `[0, 1]` onto `[0, 1]` monotonically with zero slope at both ends.
/// Input outside the unit interval is clamped.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Where a point in time falls on a cyclic keyframe track
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyframeSample {
    /// Current keyframe, `floor(time) mod N`
    pub frame: usize,
    /// Keyframe being blended towards, `(frame + 1) mod N`
    pub next_frame: usize,
    /// Fractional part of time, in `[0, 1)`
    pub t: f32,
    /// Eased blend factor, `smoothstep(t)`
    pub blend: f32,
}

impl KeyframeSample {
    /// Sample a track of `frame_count` keyframes at `time` seconds.
    ///
    /// One keyframe per unit of time. Negative time wraps backwards and
    /// non-finite time is read as `0.0`. `frame_count` of zero is treated as
    /// a single keyframe.
    pub fn at(time: f32, frame_count: usize) -> Self {
        let time = if time.is_finite() { time } else { 0.0 };
        let frame_count = frame_count.max(1);

        let whole = time.floor();
        // Fractions that round up to 1.0 in f32 belong to the next step
        let t = (time - whole).clamp(0.0, 1.0 - f32::EPSILON);

        let frame = (f64::from(whole).rem_euclid(frame_count as f64)) as usize % frame_count;
        let next_frame = (frame + 1) % frame_count;

        Self {
            frame,
            next_frame,
            t,
            blend: smoothstep(t),
        }
    }
}

/// Wall-clock driven animation time.
///
/// Accumulates elapsed seconds scaled by `speed`, one keyframe per second at
/// unit speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    time: f32,
    speed: f32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// Clock at time zero, unit speed
    pub fn new() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
        }
    }

    /// Clock at time zero running at `speed` keyframes per second
    pub fn with_speed(speed: f32) -> Self {
        Self { time: 0.0, speed }
    }

    /// Current animation time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Playback speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change playback speed without moving the current time
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Advance by `dt` seconds. Non-finite steps are ignored.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let step = dt * self.speed;
        if step.is_finite() {
            self.time += step;
        }
        self.time
    }

    /// Advance by a wall-clock duration
    pub fn advance_duration(&mut self, elapsed: Duration) -> f32 {
        self.advance(elapsed.as_secs_f32())
    }

    /// Jump to an absolute time
    pub fn seek(&mut self, time: f32) {
        if time.is_finite() {
            self.time = time;
        }
    }

    /// Back to time zero
    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Keyframe sample for the current time
    pub fn sample(&self, frame_count: usize) -> KeyframeSample {
        KeyframeSample::at(self.time, frame_count)
    }
}
