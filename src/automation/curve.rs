/// Which operation parameter a curve drives.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AutomationTarget {
    /// Operation id (flat operation or graph node).
    pub operation_id: String,
    /// Parameter name, e.g. `scale`.
    pub param_name: String,
}

/// One control point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutomationPoint {
    /// Time in seconds.
    pub t: f64,
    /// Parameter value at `t`.
    pub value: f64,
}

/// How values between points are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight line between neighbours.
    #[default]
    Linear,
    /// Hold the previous point's value.
    Step,
    /// Smoothstep between neighbours.
    Smooth,
}

/// Time-varying value for one operation parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AutomationCurve {
    /// Curve id.
    pub id: String,
    /// Driven parameter.
    pub target: AutomationTarget,
    /// Control points ordered by `t`.
    #[serde(default)]
    pub points: Vec<AutomationPoint>,
    /// Interpolation between points.
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl AutomationCurve {
    /// Value at time `t`, or `None` for a curve without points or a NaN `t`.
    ///
    /// Times before the first point or after the last hold the end values.
    pub fn sample(&self, t: f64) -> Option<f64> {
        if t.is_nan() {
            return None;
        }
        let first = self.points.first()?;
        let last = self.points.last()?;
        if t <= first.t || self.points.len() == 1 {
            return Some(first.value);
        }
        if t >= last.t {
            return Some(last.value);
        }

        // NaN point times can break the ordering partition_point relies on
        let i = self
            .points
            .partition_point(|p| p.t <= t)
            .clamp(1, self.points.len() - 1);
        let a = self.points[i - 1];
        let b = self.points[i];
        let span = b.t - a.t;
        if span <= 0.0 {
            return Some(b.value);
        }
        let u = (t - a.t) / span;
        let u = match self.interpolation {
            Interpolation::Linear => u,
            Interpolation::Step => 0.0,
            Interpolation::Smooth => u * u * (3.0 - 2.0 * u),
        };
        Some(a.value + (b.value - a.value) * u)
    }
}

/// Declared numeric range for an automatable parameter.
pub fn param_range(name: &str) -> Option<(f64, f64)> {
    match name {
        "scale" => Some((0.0, 4.0)),
        "jitter" => Some((0.0, 1.0)),
        "quantize" => Some((0.0, 8.0)),
        "drift" => Some((-50.0, 50.0)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/automation/curve.rs"]
mod tests;
