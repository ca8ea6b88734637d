//! Overlay which retries with progressively more robust noding until an attempt succeeds.
//!
//! Floating precision noding is fast and moves no coordinates but can fail on nearly coincident
//! linework. Failed attempts are retried with snap rounding on a grid derived from the size of
//! the inputs, growing the grid each try, first on the inputs as given and then on inputs which
//! have been snap rounded against themselves. The last resort is snap rounding at the largest
//! scale which is still robust for the input magnitude.
use crate::{
    core::traits::Real,
    error::{OverlayError, OverlayResult},
    geometry::{max_bound_magnitude, Dimension, Geometry},
    overlay::{overlay_heterogeneous, NodingStrategy, OverlayNg, OverlayOp, OverlayOptions},
    precision::{safe_scale, PrecisionModel},
};
use log::{debug, warn};

/// Number of snap rounding grids tried before falling back to the safe scale.
pub const NUM_SNAP_TRIES: usize = 5;
/// Ratio of the input magnitude to the first snap tolerance.
pub const SNAP_TOL_FACTOR: f64 = 1e12;
/// Growth of the snap tolerance between tries.
pub const TOLERANCE_GROWTH: f64 = 10.0;

/// One rung of the escalation ladder.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LadderStep {
    /// Validated floating precision noding.
    Floating,
    /// Snap rounding of the inputs as given.
    SnapRounding(PrecisionModel),
    /// Each input is unioned with itself under snap rounding first, removing the self
    /// intersections and near coincidences within an input, then the inputs are overlaid.
    SnapSelfThenRound(PrecisionModel),
    /// Snap rounding at the safe scale of the inputs.
    SafeScale(PrecisionModel),
}

/// Outcome of a single overlay attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome<T> {
    Success(Geometry<T>),
    /// The attempt failed in a way another noding strategy may avoid.
    Retry(OverlayError),
    /// The attempt failed in a way no strategy can fix, the ladder stops.
    Fatal(OverlayError),
}

impl<T> From<OverlayResult<Geometry<T>>> for AttemptOutcome<T> {
    fn from(result: OverlayResult<Geometry<T>>) -> Self {
        match result {
            Ok(g) => AttemptOutcome::Success(g),
            Err(e) if e.is_retryable() => AttemptOutcome::Retry(e),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

/// Run `attempt` for each step in order until one succeeds.
///
/// A fatal outcome is returned immediately. If every step fails the error of the first attempt
/// is returned, since later attempts perturb the inputs and their errors say less about them.
pub fn run_ladder<T, F>(steps: &[LadderStep], mut attempt: F) -> OverlayResult<Geometry<T>>
where
    F: FnMut(LadderStep) -> AttemptOutcome<T>,
{
    let mut original: Option<OverlayError> = None;
    for (i, step) in steps.iter().enumerate() {
        debug!("overlay attempt {} of {}: {:?}", i + 1, steps.len(), step);
        match attempt(*step) {
            AttemptOutcome::Success(g) => {
                if i > 0 {
                    debug!("overlay succeeded after {} failed attempts", i);
                }
                return Ok(g);
            }
            AttemptOutcome::Fatal(e) => return Err(e),
            AttemptOutcome::Retry(e) => {
                debug!("overlay attempt {} failed: {}", i + 1, e);
                original.get_or_insert(e);
            }
        }
    }
    warn!("overlay failed after {} attempts", steps.len());
    Err(original
        .unwrap_or_else(|| OverlayError::topology("no overlay strategy attempted"))
        .into_surfaced())
}

fn ordinate_magnitude<T>(g: Option<&Geometry<T>>) -> f64
where
    T: Real,
{
    g.and_then(|g| g.envelope())
        .map(|env| max_bound_magnitude(&env).to_f64_lossy())
        .unwrap_or(0.0)
}

/// Initial snap tolerance, a tiny fraction of the largest ordinate magnitude of the inputs.
pub fn snap_tolerance<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> f64
where
    T: Real,
{
    let magnitude = ordinate_magnitude(Some(a)).max(ordinate_magnitude(b));
    magnitude / SNAP_TOL_FACTOR
}

/// Fixed precision model with a power of ten grid no smaller than `tolerance`.
pub fn snap_precision(tolerance: f64) -> PrecisionModel {
    let exp = tolerance.log10().ceil() as i32;
    PrecisionModel::fixed(10f64.powi(-exp))
}

/// Steps of the escalation ladder for the given inputs.
pub fn ladder_steps<T>(a: &Geometry<T>, b: Option<&Geometry<T>>) -> Vec<LadderStep>
where
    T: Real,
{
    let mut steps = vec![LadderStep::Floating];
    let mut tolerance = snap_tolerance(a, b);
    // inputs at the origin give no tolerance to snap with
    if tolerance > 0.0 && tolerance.is_finite() {
        for _ in 0..NUM_SNAP_TRIES {
            let pm = snap_precision(tolerance);
            steps.push(LadderStep::SnapRounding(pm));
            steps.push(LadderStep::SnapSelfThenRound(pm));
            tolerance *= TOLERANCE_GROWTH;
        }
    }
    steps.push(LadderStep::SafeScale(PrecisionModel::fixed(safe_scale(a, b))));
    steps
}

/// Escalating overlay of homogeneous inputs.
#[derive(Debug, Clone)]
pub struct OverlayRobust<'a, T>
where
    T: Real,
{
    a: &'a Geometry<T>,
    b: Option<&'a Geometry<T>>,
    op: OverlayOp,
    options: OverlayOptions,
}

impl<'a, T> OverlayRobust<'a, T>
where
    T: Real,
{
    pub fn new(a: &'a Geometry<T>, b: Option<&'a Geometry<T>>, op: OverlayOp) -> Self {
        OverlayRobust {
            a,
            b,
            op,
            options: OverlayOptions::new(),
        }
    }

    pub fn with_options(mut self, options: OverlayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn result(&self) -> OverlayResult<Geometry<T>> {
        let steps = ladder_steps(self.a, self.b);
        run_ladder(&steps, |step| self.attempt(step).into())
    }

    fn attempt(&self, step: LadderStep) -> OverlayResult<Geometry<T>> {
        match step {
            LadderStep::Floating => self.overlay_with(self.a, self.b, NodingStrategy::Floating),
            LadderStep::SnapRounding(pm) | LadderStep::SafeScale(pm) => {
                self.overlay_with(self.a, self.b, NodingStrategy::SnapRounding(pm))
            }
            LadderStep::SnapSelfThenRound(pm) => {
                let strategy = NodingStrategy::SnapRounding(pm);
                let a = self.snap_self(self.a, strategy)?;
                let b = match self.b {
                    Some(b) => Some(self.snap_self(b, strategy)?),
                    None => None,
                };
                self.overlay_with(&a, b.as_ref(), strategy)
            }
        }
    }

    fn overlay_with(
        &self,
        a: &Geometry<T>,
        b: Option<&Geometry<T>>,
        strategy: NodingStrategy,
    ) -> OverlayResult<Geometry<T>> {
        OverlayNg::new(a, b, self.op)
            .with_strategy(strategy)
            .with_options(self.options)
            .result()
    }

    fn snap_self(&self, g: &Geometry<T>, strategy: NodingStrategy) -> OverlayResult<Geometry<T>> {
        // points have no linework to clean up
        if g.dimension() <= Dimension::Point {
            return Ok(g.clone());
        }
        let strict = OverlayOptions {
            strict: true,
            ..self.options
        };
        OverlayNg::new(g, None, OverlayOp::Union)
            .with_strategy(strategy)
            .with_options(strict)
            .result()
    }
}

/// Overlay of `a` and `b` (or the union of `a` with itself when `b` is `None`) with default
/// options.
///
/// A floating precision model uses the escalating strategy ladder. A fixed precision model
/// makes a single snap rounding attempt on its grid.
///
/// # Examples
///
/// ```
/// # use topo_overlay::geometry::*;
/// # use topo_overlay::overlay::OverlayOp;
/// # use topo_overlay::precision::PrecisionModel;
/// # use topo_overlay::robust::overlay;
/// let a = Geometry::Polygon(Polygon::new(
///     LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
///     vec![],
/// ));
/// let b = Geometry::Polygon(Polygon::new(
///     LineString::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]),
///     vec![],
/// ));
/// let union = overlay(&a, Some(&b), OverlayOp::Union, PrecisionModel::Floating).unwrap();
/// assert_eq!(union.area(), 7.0);
/// ```
pub fn overlay<T>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    op: OverlayOp,
    pm: PrecisionModel,
) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    overlay_with_options(a, b, op, pm, OverlayOptions::new())
}

/// Same as [overlay] with explicit options.
pub fn overlay_with_options<T>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    op: OverlayOp,
    pm: PrecisionModel,
    options: OverlayOptions,
) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    a.validate()?;
    if let Some(b) = b {
        b.validate()?;
    }
    if b.is_none() && op != OverlayOp::Union {
        return Err(OverlayError::InvalidInput(format!(
            "{op} requires two inputs"
        )));
    }

    let is_heterogeneous = !a.is_homogeneous() || b.is_some_and(|b| !b.is_homogeneous());
    if is_heterogeneous {
        debug!("overlay of heterogeneous inputs by dimension");
        return overlay_heterogeneous(
            a,
            b,
            op,
            &mut |a: &Geometry<T>, b: Option<&Geometry<T>>, op: OverlayOp| {
                overlay_homogeneous(a, b, op, pm, options)
            },
        );
    }
    overlay_homogeneous(a, b, op, pm, options)
}

/// Union of all components of `g`.
pub fn union_self<T>(g: &Geometry<T>, pm: PrecisionModel) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    overlay(g, None, OverlayOp::Union, pm)
}

fn overlay_homogeneous<T>(
    a: &Geometry<T>,
    b: Option<&Geometry<T>>,
    op: OverlayOp,
    pm: PrecisionModel,
    options: OverlayOptions,
) -> OverlayResult<Geometry<T>>
where
    T: Real,
{
    if pm.is_floating() {
        return OverlayRobust::new(a, b, op).with_options(options).result();
    }
    debug!("overlay with fixed precision, grid size {}", pm.grid_size());
    OverlayNg::new(a, b, op)
        .with_strategy(NodingStrategy::SnapRounding(pm))
        .with_options(options)
        .result()
        .map_err(OverlayError::into_surfaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        ))
    }

    #[test]
    fn snap_grid_is_power_of_ten() {
        let pm = snap_precision(3.0e-10);
        assert_eq!(pm.grid_size(), 1e-9);
        let pm = snap_precision(2.0e-3);
        assert!((pm.grid_size() - 1e-2).abs() < 1e-15);
    }

    #[test]
    fn ladder_order() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let steps = ladder_steps(&a, None);
        assert_eq!(steps.len(), 2 + 2 * NUM_SNAP_TRIES);
        assert_eq!(steps[0], LadderStep::Floating);
        assert!(matches!(steps[1], LadderStep::SnapRounding(_)));
        assert!(matches!(steps[2], LadderStep::SnapSelfThenRound(_)));
        assert!(matches!(steps[steps.len() - 1], LadderStep::SafeScale(_)));
        match (steps[1], steps[3]) {
            (LadderStep::SnapRounding(first), LadderStep::SnapRounding(second)) => {
                assert!(second.grid_size() > first.grid_size());
            }
            other => panic!("unexpected steps {other:?}"),
        }
    }

    #[test]
    fn ladder_keeps_original_error() {
        let steps = [
            LadderStep::Floating,
            LadderStep::SnapRounding(PrecisionModel::fixed(10.0)),
        ];
        let mut count = 0;
        let result: OverlayResult<Geometry<f64>> = run_ladder(&steps, |step| {
            count += 1;
            match step {
                LadderStep::Floating => AttemptOutcome::Retry(OverlayError::NodingFailure {
                    message: "first".to_string(),
                    location: None,
                }),
                _ => AttemptOutcome::Retry(OverlayError::topology("second")),
            }
        });
        assert_eq!(count, 2);
        match result {
            Err(OverlayError::Topology { message, .. }) => assert_eq!(message, "first"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fatal_stops_ladder() {
        let steps = [LadderStep::Floating, LadderStep::SafeScale(PrecisionModel::fixed(1.0))];
        let mut count = 0;
        let result: OverlayResult<Geometry<f64>> = run_ladder(&steps, |_| {
            count += 1;
            AttemptOutcome::Fatal(OverlayError::InvalidInput("bad".to_string()))
        });
        assert_eq!(count, 1);
        assert!(matches!(result, Err(OverlayError::InvalidInput(_))));
    }

    #[test]
    fn single_input_requires_union() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let result = overlay(&a, None, OverlayOp::Intersection, PrecisionModel::Floating);
        assert!(matches!(result, Err(OverlayError::InvalidInput(_))));
        assert!(overlay(&a, None, OverlayOp::Union, PrecisionModel::Floating).is_ok());
    }
}
