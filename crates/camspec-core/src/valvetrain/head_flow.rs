//! Cylinder head flow-bench curve with piecewise-linear lookup

use serde::{Deserialize, Serialize};

/// One flow-bench reading. Either flow may be missing; the other side
/// stands in for it on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    /// Valve lift (in)
    pub lift: f64,
    /// Intake flow (cfm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intake_cfm: Option<f64>,
    /// Exhaust flow (cfm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaust_cfm: Option<f64>,
}

impl FlowSample {
    pub fn new(lift: f64, intake_cfm: Option<f64>, exhaust_cfm: Option<f64>) -> Self {
        Self {
            lift,
            intake_cfm,
            exhaust_cfm,
        }
    }

    fn intake(&self) -> Option<f64> {
        self.intake_cfm.or(self.exhaust_cfm)
    }

    fn exhaust(&self) -> Option<f64> {
        self.exhaust_cfm.or(self.intake_cfm)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Flow samples ordered by strictly increasing lift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FlowSample>", into = "Vec<FlowSample>")]
pub struct HeadFlowCurve {
    samples: Vec<FlowSample>,
}

impl From<Vec<FlowSample>> for HeadFlowCurve {
    fn from(samples: Vec<FlowSample>) -> Self {
        Self::new(samples)
    }
}

impl From<HeadFlowCurve> for Vec<FlowSample> {
    fn from(curve: HeadFlowCurve) -> Self {
        curve.samples
    }
}

impl HeadFlowCurve {
    /// Build a curve from unordered bench readings.
    ///
    /// Readings with a non-finite lift or no finite flow are dropped, the
    /// rest are sorted by lift and repeated lifts keep the first reading.
    pub fn new(samples: Vec<FlowSample>) -> Self {
        let mut samples: Vec<FlowSample> = samples
            .into_iter()
            .filter(|s| s.lift.is_finite())
            .map(|s| FlowSample::new(s.lift, finite(s.intake_cfm), finite(s.exhaust_cfm)))
            .filter(|s| s.intake_cfm.is_some() || s.exhaust_cfm.is_some())
            .collect();
        samples.sort_by(|a, b| a.lift.total_cmp(&b.lift));
        samples.dedup_by(|later, earlier| later.lift == earlier.lift);
        Self { samples }
    }

    pub fn samples(&self) -> &[FlowSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Intake flow at `lift`; `None` for an empty curve
    pub fn intake_at(&self, lift: f64) -> Option<f64> {
        self.flow_at(lift, FlowSample::intake)
    }

    /// Exhaust flow at `lift`; `None` for an empty curve
    pub fn exhaust_at(&self, lift: f64) -> Option<f64> {
        self.flow_at(lift, FlowSample::exhaust)
    }

    /// Highest intake reading on the curve (exhaust standing in where intake
    /// is missing)
    pub fn peak_intake_flow(&self) -> Option<f64> {
        self.samples
            .iter()
            .filter_map(FlowSample::intake)
            .fold(None, |max: Option<f64>, flow| {
                Some(max.map_or(flow, |m| m.max(flow)))
            })
    }

    fn flow_at(&self, lift: f64, flow: fn(&FlowSample) -> Option<f64>) -> Option<f64> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;

        if !lift.is_finite() {
            return flow(last);
        }
        if lift <= first.lift {
            return flow(first);
        }
        if lift >= last.lift {
            return flow(last);
        }

        for pair in self.samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if lift < a.lift || lift > b.lift {
                continue;
            }
            let (Some(flow_a), Some(flow_b)) = (flow(a), flow(b)) else {
                continue;
            };
            let span = b.lift - a.lift;
            if span <= 0.0 {
                return Some(flow_a);
            }
            return Some(flow_a + (flow_b - flow_a) * (lift - a.lift) / span);
        }

        flow(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> HeadFlowCurve {
        HeadFlowCurve::new(vec![
            FlowSample::new(0.400, Some(250.0), Some(190.0)),
            FlowSample::new(0.200, Some(140.0), Some(110.0)),
            FlowSample::new(0.600, Some(310.0), None),
            FlowSample::new(0.500, Some(290.0), Some(215.0)),
        ])
    }

    #[test]
    fn new_sorts_by_lift() {
        let lifts: Vec<f64> = bench().samples().iter().map(|s| s.lift).collect();
        assert_eq!(lifts, vec![0.2, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn new_drops_unusable_readings() {
        let curve = HeadFlowCurve::new(vec![
            FlowSample::new(f64::NAN, Some(100.0), None),
            FlowSample::new(0.3, None, None),
            FlowSample::new(0.3, Some(f64::INFINITY), None),
            FlowSample::new(0.4, Some(200.0), None),
            FlowSample::new(0.4, Some(999.0), None),
        ]);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.intake_at(0.4), Some(200.0));
    }

    #[test]
    fn interpolates_between_samples() {
        let curve = bench();
        let flow = curve.intake_at(0.45).unwrap();
        assert!((flow - 270.0).abs() < 1e-9);
    }

    #[test]
    fn exhaust_falls_back_to_intake() {
        assert_eq!(bench().exhaust_at(0.6), Some(310.0));
    }

    #[test]
    fn non_finite_lift_returns_last_sample() {
        assert_eq!(bench().intake_at(f64::NAN), Some(310.0));
    }

    #[test]
    fn empty_curve_has_no_flow() {
        let curve = HeadFlowCurve::default();
        assert_eq!(curve.intake_at(0.5), None);
        assert_eq!(curve.peak_intake_flow(), None);
    }

    #[test]
    fn peak_intake_flow() {
        assert_eq!(bench().peak_intake_flow(), Some(310.0));
    }
}
