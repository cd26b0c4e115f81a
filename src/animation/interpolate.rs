use crate::{
    animation::ease::Ease,
    foundation::color::Color,
    foundation::error::{GearersError, GearersResult},
};

/// Behavior of [`interpolate`] for inputs outside the breakpoint range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the nearest output value.
    Clamp,
    /// Continue the slope of the outermost segment.
    #[default]
    Extend,
    /// Return the input value unchanged.
    Identity,
}

/// Per-side extrapolation and the curve applied inside each segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpolateOpts {
    /// Policy below the first breakpoint.
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    pub right: Extrapolate,
    /// Easing applied to the local fraction between two breakpoints.
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Extend on both sides, linear segments.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
        ease: Ease::Linear,
    };

    /// Clamp on both sides.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Extend below the range, clamp above it.
    pub const CLAMP_RIGHT: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Clamp below the range, extend above it.
    pub const CLAMP_LEFT: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Extend,
        ease: Ease::Linear,
    };

    /// Same policies with a different in-segment curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

fn validate_ranges(input: &[f64], output_len: usize) -> GearersResult<()> {
    if input.len() < 2 {
        return Err(GearersError::invalid_range(format!(
            "input range needs at least 2 breakpoints, got {}",
            input.len()
        )));
    }
    if input.len() != output_len {
        return Err(GearersError::invalid_range(format!(
            "input range has {} breakpoints but output range has {}",
            input.len(),
            output_len
        )));
    }
    if let Some(bad) = input.iter().find(|v| !v.is_finite()) {
        return Err(GearersError::invalid_range(format!(
            "input range contains non-finite breakpoint {bad}"
        )));
    }
    if let Some(w) = input.windows(2).find(|w| w[0] >= w[1]) {
        return Err(GearersError::invalid_range(format!(
            "input range must be strictly increasing, found {} then {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    // Exact at both ends: t == 0 yields a, t == 1 yields b.
    a * (1.0 - t) + b * t
}

/// Map `value` through piecewise-linear breakpoints.
///
/// `input` must be strictly increasing and the same length as `output` (at least two points).
/// Between two breakpoints the local fraction is shaped by `opts.ease`; outside the range each
/// side follows its own [`Extrapolate`] policy.
pub fn interpolate(
    value: f64,
    input: &[f64],
    output: &[f64],
    opts: InterpolateOpts,
) -> GearersResult<f64> {
    validate_ranges(input, output.len())?;
    if let Some(bad) = output.iter().find(|v| !v.is_finite()) {
        return Err(GearersError::invalid_range(format!(
            "output range contains non-finite value {bad}"
        )));
    }
    if value.is_nan() {
        return Err(GearersError::invalid_range("cannot interpolate NaN"));
    }

    let last = input.len() - 1;

    if value < input[0] {
        return Ok(match opts.left {
            Extrapolate::Clamp => output[0],
            Extrapolate::Identity => value,
            Extrapolate::Extend => {
                let t = (value - input[0]) / (input[1] - input[0]);
                lerp(output[0], output[1], t)
            }
        });
    }
    if value > input[last] {
        return Ok(match opts.right {
            Extrapolate::Clamp => output[last],
            Extrapolate::Identity => value,
            Extrapolate::Extend => {
                let t = (value - input[last - 1]) / (input[last] - input[last - 1]);
                lerp(output[last - 1], output[last], t)
            }
        });
    }

    // In range: `idx` is the first breakpoint strictly greater than `value`.
    let idx = input.partition_point(|x| *x <= value);
    if input[idx - 1] == value {
        return Ok(output[idx - 1]);
    }
    let (i0, i1) = (idx - 1, idx);
    let t = (value - input[i0]) / (input[i1] - input[i0]);
    Ok(lerp(output[i0], output[i1], opts.ease.apply(t)))
}

/// Map `value` through color breakpoints, blending channels linearly.
///
/// Range rules match [`interpolate`]. [`Extrapolate::Identity`] has no color meaning and is
/// rejected.
pub fn interpolate_color(
    value: f64,
    input: &[f64],
    colors: &[Color],
    opts: InterpolateOpts,
) -> GearersResult<Color> {
    if opts.left == Extrapolate::Identity || opts.right == Extrapolate::Identity {
        return Err(GearersError::invalid_range(
            "identity extrapolation is not defined for colors",
        ));
    }
    let indices: Vec<f64> = (0..colors.len()).map(|i| i as f64).collect();
    let pos = interpolate(value, input, &indices, opts)?;

    let last = colors.len() - 1;
    let seg = (pos.floor().max(0.0) as usize).min(last - 1);
    let t = pos - seg as f64;
    Ok(colors[seg].lerp(colors[seg + 1], t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
