use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        ease::Ease,
        interpolate::{InterpolateOpts, interpolate},
        spring::{SpringConfig, SpringOpts, spring},
    },
    foundation::{
        core::{FrameClock, Fps},
        error::{GearersError, GearersResult},
    },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// How a segment turns its local frame into a value.
pub enum Motion {
    /// Eased 0 to 1 over the segment duration, clamped outside it.
    Linear {
        /// Curve applied to the progress.
        #[serde(default)]
        ease: Ease,
    },
    /// Spring released at the segment start.
    Spring {
        /// Physics.
        #[serde(default)]
        config: SpringConfig,
        /// Stretch the trajectory to settle exactly at the segment end.
        #[serde(default)]
        stretch: bool,
    },
    /// Breakpoints in local frames.
    Keyframes {
        /// Local frame breakpoints, strictly increasing.
        input: Vec<f64>,
        /// Values at the breakpoints.
        output: Vec<f64>,
        /// Extrapolation and easing.
        #[serde(default = "clamped")]
        opts: InterpolateOpts,
    },
}

fn clamped() -> InterpolateOpts {
    InterpolateOpts::CLAMP
}

impl Default for Motion {
    fn default() -> Self {
        Self::Linear { ease: Ease::Linear }
    }
}

impl Motion {
    /// Unstretched spring.
    pub fn spring(config: SpringConfig) -> Self {
        Self::Spring {
            config,
            stretch: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A named sub-animation on a scene timeline, in frame units.
pub struct Segment {
    /// Lookup name.
    pub name: String,
    /// First frame (may be fractional).
    pub start: f64,
    /// Length in frames, `>= 0`.
    pub duration: f64,
    /// Value curve for [`Segment::sample`].
    #[serde(default)]
    pub motion: Motion,
}

impl Segment {
    /// Linear segment; rejects non-finite bounds and negative durations.
    pub fn new(name: impl Into<String>, start: f64, duration: f64) -> GearersResult<Self> {
        let name = name.into();
        if !start.is_finite() || !duration.is_finite() {
            return Err(GearersError::validation(format!(
                "segment '{name}' has non-finite bounds"
            )));
        }
        if duration < 0.0 {
            return Err(GearersError::validation(format!(
                "segment '{name}' duration must be >= 0, got {duration}"
            )));
        }
        Ok(Self {
            name,
            start,
            duration,
            motion: Motion::default(),
        })
    }

    /// Segment given in seconds.
    pub fn secs(
        name: impl Into<String>,
        fps: Fps,
        start_secs: f64,
        duration_secs: f64,
    ) -> GearersResult<Self> {
        Self::new(
            name,
            fps.secs_to_frames(start_secs),
            fps.secs_to_frames(duration_secs),
        )
    }

    /// Segment starting `gap` frames after `prev` ends.
    pub fn after(
        name: impl Into<String>,
        prev: &Segment,
        gap: f64,
        duration: f64,
    ) -> GearersResult<Self> {
        Self::new(name, prev.end() + gap, duration)
    }

    /// Same segment with another motion.
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// One past the last frame.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Frames elapsed since the start; negative before it.
    pub fn local(&self, frame: f64) -> f64 {
        frame - self.start
    }

    /// `true` for frames in `[start, end)`.
    pub fn contains(&self, frame: f64) -> bool {
        self.start <= frame && frame < self.end()
    }

    /// `true` for frames strictly between start and end.
    pub fn strictly_contains(&self, frame: f64) -> bool {
        self.start < frame && frame < self.end()
    }

    /// Linear progress clamped to `[0, 1]`. Zero-length segments step at the start.
    pub fn progress(&self, frame: f64) -> f64 {
        if self.duration == 0.0 {
            return if frame >= self.start { 1.0 } else { 0.0 };
        }
        (self.local(frame) / self.duration).clamp(0.0, 1.0)
    }

    /// Window envelope: ramps 0 to 1 over `fade_in`, holds, ramps back to 0 over the last
    /// `fade_out` frames. Zero outside the segment.
    pub fn fade(&self, frame: f64, fade_in: f64, fade_out: f64) -> f64 {
        let rise = if fade_in > 0.0 {
            ((frame - self.start) / fade_in).clamp(0.0, 1.0)
        } else if frame >= self.start {
            1.0
        } else {
            0.0
        };
        let fall = if fade_out > 0.0 {
            ((self.end() - frame) / fade_out).clamp(0.0, 1.0)
        } else if frame <= self.end() {
            1.0
        } else {
            0.0
        };
        rise.min(fall)
    }

    /// Evaluate the segment's [`Motion`] at `clock`.
    pub fn sample(&self, clock: FrameClock) -> GearersResult<f64> {
        let frame = clock.f();
        match &self.motion {
            Motion::Linear { ease } => Ok(ease.apply(self.progress(frame))),
            Motion::Spring { config, stretch } => {
                let mut opts = SpringOpts::from(*config);
                if *stretch && self.duration > 0.0 {
                    opts = opts.with_duration(self.duration);
                }
                spring(self.local(frame), clock.fps, &opts)
            }
            Motion::Keyframes {
                input,
                output,
                opts,
            } => interpolate(self.local(frame), input, output, *opts),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Ordered set of possibly overlapping segments.
pub struct Timeline {
    /// Segments in insertion order.
    pub segments: Vec<Segment>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment; names must be unique.
    pub fn push(&mut self, seg: Segment) -> GearersResult<&Segment> {
        if self.segments.iter().any(|s| s.name == seg.name) {
            return Err(GearersError::validation(format!(
                "duplicate segment '{}'",
                seg.name
            )));
        }
        self.segments.push(seg);
        let idx = self.segments.len() - 1;
        Ok(&self.segments[idx])
    }

    /// Builder form of [`Timeline::push`].
    pub fn with(mut self, seg: Segment) -> GearersResult<Self> {
        self.push(seg)?;
        Ok(self)
    }

    /// Look up a segment by name.
    pub fn get(&self, name: &str) -> GearersResult<&Segment> {
        self.segments
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| GearersError::evaluation(format!("unknown segment '{name}'")))
    }

    /// Sample the named segment.
    pub fn sample(&self, name: &str, clock: FrameClock) -> GearersResult<f64> {
        self.get(name)?.sample(clock)
    }

    /// Names of the segments covering `frame`.
    pub fn active(&self, frame: f64) -> impl Iterator<Item = &str> + '_ {
        self.segments
            .iter()
            .filter(move |s| s.contains(frame))
            .map(|s| s.name.as_str())
    }

    /// Latest segment end, or 0 for an empty timeline.
    pub fn end(&self) -> f64 {
        self.segments.iter().map(Segment::end).fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/timeline.rs"]
mod tests;
