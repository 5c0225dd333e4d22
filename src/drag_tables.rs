//! Embedded standard drag tables.
//!
//! Mach→Cd data for the G1 and G7 reference projectiles, interpolated
//! linearly with clamped extrapolation at the table edges. The drag force
//! looks coefficients up here via the profile's [`DragModel`] tag.

use once_cell::sync::Lazy;

use crate::DragModel;

/// A tabulated drag curve: drag coefficient as a function of Mach number.
#[derive(Debug, Clone)]
pub struct DragTable {
    mach_values: Vec<f64>,
    cd_values: Vec<f64>,
}

impl DragTable {
    pub fn new(points: &[(f64, f64)]) -> Self {
        let mach_values = points.iter().map(|(m, _)| *m).collect();
        let cd_values = points.iter().map(|(_, cd)| *cd).collect();
        Self {
            mach_values,
            cd_values,
        }
    }

    /// Interpolate the drag coefficient at the given Mach number.
    ///
    /// Values outside the tabulated range clamp to the edge entries; a
    /// drag coefficient never goes negative.
    pub fn interpolate(&self, mach: f64) -> f64 {
        let n = self.mach_values.len();
        if n == 0 {
            return 0.5; // fallback
        }
        if n == 1 || mach <= self.mach_values[0] {
            return self.cd_values[0];
        }
        if mach >= self.mach_values[n - 1] {
            return self.cd_values[n - 1];
        }

        // table is sorted by Mach, find the containing segment
        let idx = self
            .mach_values
            .partition_point(|&m| m <= mach)
            .saturating_sub(1);

        let x0 = self.mach_values[idx];
        let x1 = self.mach_values[idx + 1];
        let y0 = self.cd_values[idx];
        let y1 = self.cd_values[idx + 1];

        let span = x1 - x0;
        if span.abs() < 1e-12 {
            return y0;
        }
        let t = (mach - x0) / span;
        (y0 + t * (y1 - y0)).max(0.0)
    }
}

/// G1 standard drag curve (flat-based reference projectile)
static G1_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| {
    DragTable::new(&[
        (0.0, 0.2629),
        (0.5, 0.2695),
        (0.6, 0.2752),
        (0.7, 0.2817),
        (0.8, 0.2902),
        (0.9, 0.3012),
        (1.0, 0.4805),
        (1.1, 0.5933),
        (1.2, 0.6318),
        (1.3, 0.6440),
        (1.4, 0.6444),
        (1.5, 0.6372),
        (1.6, 0.6252),
        (1.7, 0.6105),
        (1.8, 0.5956),
        (1.9, 0.5815),
        (2.0, 0.5934),
        (2.5, 0.5598),
        (3.0, 0.5133),
        (4.0, 0.4811),
        (5.0, 0.4988),
    ])
});

/// G7 standard drag curve (boat-tailed reference projectile)
static G7_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| {
    DragTable::new(&[
        (0.0, 0.1198),
        (0.5, 0.1197),
        (0.6, 0.1202),
        (0.7, 0.1213),
        (0.8, 0.1240),
        (0.9, 0.1294),
        (1.0, 0.3803),
        (1.1, 0.4015),
        (1.2, 0.4043),
        (1.3, 0.3956),
        (1.4, 0.3814),
        (1.5, 0.3663),
        (1.6, 0.3520),
        (1.7, 0.3398),
        (1.8, 0.3297),
        (1.9, 0.3221),
        (2.0, 0.2980),
        (2.5, 0.2731),
        (3.0, 0.2424),
        (4.0, 0.2196),
        (5.0, 0.1618),
    ])
});

/// Get the drag coefficient for a Mach number under the given drag model.
pub fn drag_coefficient(mach: f64, model: DragModel) -> f64 {
    match model {
        DragModel::G1 => G1_DRAG_TABLE.interpolate(mach),
        DragModel::G7 => G7_DRAG_TABLE.interpolate(mach),
    }
}
