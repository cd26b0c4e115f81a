use crate::foundation::{
    core::Fps,
    error::{GearersError, GearersResult},
};

/// Default settle threshold used when stretching a spring to a fixed duration.
pub const DEFAULT_REST_THRESHOLD: f64 = 0.005;

/// Consecutive in-threshold frames required before a spring counts as settled.
const SETTLE_WINDOW_FRAMES: u64 = 20;

/// Upper bound on settle measurement, in seconds of simulated time.
const MAX_SETTLE_SECS: f64 = 600.0;

const CRITICAL_EPS: f64 = 1e-9;

/// Physical parameters of a damped mass-spring released at rest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Viscous damping coefficient (`>= 0`).
    pub damping: f64,
    /// Spring constant (`> 0`).
    pub stiffness: f64,
    /// Moving mass (`> 0`).
    pub mass: f64,
    /// Never move past the target value.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Damping and stiffness with default mass.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Only damping changed from the defaults.
    pub fn with_damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Reject parameters with no physical meaning.
    pub fn validate(&self) -> GearersResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(GearersError::animation("spring mass must be finite and > 0"));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(GearersError::animation(
                "spring stiffness must be finite and > 0",
            ));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(GearersError::animation(
                "spring damping must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// `ζ = c / (2·√(k·m))`; below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

/// Full set of options for [`spring`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringOpts {
    /// Spring physics.
    pub config: SpringConfig,
    /// Rest value before the trigger.
    pub from: f64,
    /// Settling value.
    pub to: f64,
    /// Stretch the trajectory so it settles by this many frames.
    pub duration_in_frames: Option<f64>,
    /// Frames to wait after the offset origin before releasing.
    pub delay: f64,
    /// Play the (stretched) trajectory backwards.
    pub reverse: bool,
    /// Settle threshold used to measure the natural duration.
    pub rest_threshold: f64,
}

impl Default for SpringOpts {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            duration_in_frames: None,
            delay: 0.0,
            reverse: false,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }
}

impl From<SpringConfig> for SpringOpts {
    fn from(config: SpringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl SpringOpts {
    /// Same options with a fixed duration.
    pub fn with_duration(mut self, frames: f64) -> Self {
        self.duration_in_frames = Some(frames);
        self
    }

    /// Same options animating between other endpoints.
    pub fn between(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Normalized response: 0 at release, settling at 1. `t` is in seconds and must be `>= 0`.
fn unit_response(config: &SpringConfig, t: f64) -> f64 {
    let w0 = config.natural_frequency();
    let zeta = config.damping_ratio();

    // Displacement from the target, normalized so it starts at 1 with zero velocity.
    let y = if (zeta - 1.0).abs() < CRITICAL_EPS {
        (-w0 * t).exp() * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let w1 = w0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * w0 * t).exp();
        envelope * ((w1 * t).cos() + (zeta * w0 / w1) * (w1 * t).sin())
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - root);
        let r2 = -w0 * (zeta + root);
        (r1 * (r2 * t).exp() - r2 * (r1 * t).exp()) / (r1 - r2)
    };
    1.0 - y
}

/// Frames until a 0→1 spring stays within `threshold` of 1.
///
/// The spring counts as settled once it remains inside the threshold for 20 consecutive frames;
/// the returned value is the first frame of that run.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> GearersResult<u64> {
    config.validate()?;
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(GearersError::animation(
            "spring rest threshold must be in (0, 1)",
        ));
    }
    if config.damping == 0.0 {
        return Err(GearersError::animation(
            "undamped spring never settles; cannot measure its duration",
        ));
    }

    let max_frames = fps.secs_to_frames_floor(MAX_SETTLE_SECS);
    let off = |frame: u64| (unit_response(config, fps.frames_to_secs(frame as f64)) - 1.0).abs();

    let mut frame = 0u64;
    while off(frame) >= threshold {
        frame += 1;
        if frame > max_frames {
            return Err(GearersError::animation(format!(
                "spring did not settle within {MAX_SETTLE_SECS}s"
            )));
        }
    }

    let mut finished = frame;
    let mut stable = 0u64;
    while stable < SETTLE_WINDOW_FRAMES {
        frame += 1;
        if frame > max_frames {
            return Err(GearersError::animation(format!(
                "spring did not settle within {MAX_SETTLE_SECS}s"
            )));
        }
        if off(frame) >= threshold {
            stable = 0;
            finished = frame + 1;
        } else {
            stable += 1;
        }
    }

    tracing::debug!(finished, ?config, "measured spring settle length");
    Ok(finished)
}

/// Value of a spring `frame_offset` frames after its trigger.
///
/// Negative offsets (after delay and reversal) return `opts.from`. With `duration_in_frames` set,
/// time is rescaled so the spring settles at that frame and holds `opts.to` afterwards.
pub fn spring(frame_offset: f64, fps: Fps, opts: &SpringOpts) -> GearersResult<f64> {
    opts.config.validate()?;
    if frame_offset.is_nan() {
        return Err(GearersError::animation("spring frame offset is NaN"));
    }
    if let Some(d) = opts.duration_in_frames
        && !(d.is_finite() && d > 0.0)
    {
        return Err(GearersError::animation(
            "spring duration_in_frames must be finite and > 0",
        ));
    }

    let natural = if opts.reverse || opts.duration_in_frames.is_some() {
        Some(measure_spring(fps, &opts.config, opts.rest_threshold)?.max(1) as f64)
    } else {
        None
    };

    let mut frame = if opts.reverse {
        let span = opts.duration_in_frames.or(natural).unwrap_or(0.0);
        span - frame_offset + opts.delay
    } else {
        frame_offset - opts.delay
    };

    if let (Some(duration), Some(natural)) = (opts.duration_in_frames, natural) {
        if frame > duration {
            return Ok(opts.to);
        }
        frame /= duration / natural;
    }

    if frame < 0.0 {
        return Ok(opts.from);
    }

    let unit = unit_response(&opts.config, fps.frames_to_secs(frame));
    let value = opts.from + (opts.to - opts.from) * unit;

    if opts.config.overshoot_clamping {
        return Ok(if opts.to >= opts.from {
            value.min(opts.to)
        } else {
            value.max(opts.to)
        });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
