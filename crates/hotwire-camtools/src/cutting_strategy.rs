//! Cutting strategies
//!
//! A strategy walks the two kerf-offset rib profiles in lock-step and emits
//! the synchronized four-axis moves that cut the panel. Both surfaces are
//! sampled by the same fraction of their own length, so ribs with different
//! point counts or chords stay paired along the wire.

use std::f64::consts::PI;

use hotwire_core::{AirfoilProfile, Point2D};

use crate::error::CamToolResult;
use crate::gcode::{Axes, CommandSink, MoveFlags};
use crate::machine::Machine;

/// Points used to cut around a spar
const SPAR_POINTS: usize = 360;

/// Toolpath generator for one panel
pub trait CuttingStrategy {
    fn name(&self) -> &str;

    /// Emit the full cut of `left`/`right` into `sink`.
    fn cut(
        &self,
        machine: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) -> CamToolResult<()>;
}

/// Top then bottom pass with lead-in and lead-out, followed by stock
/// removal and the spar
#[derive(Debug, Clone, PartialEq)]
pub struct StandardCuttingStrategy {
    /// Settle time in seconds
    pub dwell_time: f64,
    /// Distance ahead of the leading edge where the wire enters
    pub le_offset: f64,
    /// Distance behind the trailing edge where the wire leaves
    pub te_offset: f64,
}

impl Default for StandardCuttingStrategy {
    fn default() -> Self {
        Self {
            dwell_time: 1.0,
            le_offset: 1.0,
            te_offset: 1.0,
        }
    }
}

impl CuttingStrategy for StandardCuttingStrategy {
    fn name(&self) -> &str {
        "standard"
    }

    fn cut(
        &self,
        m: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) -> CamToolResult<()> {
        let above_foam = above_foam(m);
        let le_offset = Point2D::new(self.le_offset, 0.0);
        let te_offset = Point2D::new(self.te_offset, 0.0);
        let leading_edge = m.calculate_move(left.left_midpoint(), right.left_midpoint());
        let trailing_edge = m.calculate_move(left.right_midpoint(), right.right_midpoint());
        let lead_in = m.calculate_move(
            left.left_midpoint() - le_offset,
            right.left_midpoint() - le_offset,
        );

        // Top surface
        move_to_safe_height(m, sink);
        sink.fast_move(lead_in.horizontal_part(), MoveFlags::NONE);
        sink.fast_move(above_foam, MoveFlags::DO_NOT_NORMALIZE);
        sink.move_to(lead_in, MoveFlags::DO_NOT_NORMALIZE);
        sink.dwell(self.dwell_time);
        sink.move_to(leading_edge, MoveFlags::NONE);
        sink.dwell(self.dwell_time);

        self.cut_top(m, left, right, sink);

        sink.move_to(trailing_edge, MoveFlags::NONE);
        sink.dwell(self.dwell_time);
        sink.move_to(
            m.calculate_move(
                left.right_midpoint() + te_offset,
                right.right_midpoint() + te_offset,
            ),
            MoveFlags::NONE,
        );
        sink.dwell(self.dwell_time);
        sink.move_to(above_foam, MoveFlags::DO_NOT_NORMALIZE);

        // Bottom surface
        move_to_safe_height(m, sink);
        sink.fast_move(lead_in.horizontal_part(), MoveFlags::NONE);
        sink.fast_move(above_foam, MoveFlags::DO_NOT_NORMALIZE);
        sink.move_to(lead_in, MoveFlags::NONE);
        sink.dwell(self.dwell_time);
        sink.move_to(leading_edge, MoveFlags::NONE);
        sink.dwell(self.dwell_time);

        self.cut_bottom(m, left, right, sink);

        sink.move_to(trailing_edge, MoveFlags::NONE);
        sink.move_to(
            m.calculate_move(
                left.right_midpoint() - te_offset,
                right.right_midpoint() - te_offset,
            ),
            MoveFlags::NONE,
        );
        sink.dwell(self.dwell_time);
        sink.move_to(above_foam, MoveFlags::DO_NOT_NORMALIZE);
        sink.dwell(self.dwell_time * 2.0);
        move_to_safe_height(m, sink);

        self.cut_stock(m, left, right, sink);
        self.cut_spar(m, left, right, sink);
        Ok(())
    }
}

impl StandardCuttingStrategy {
    fn cut_top(
        &self,
        m: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) {
        let points = m.profile_points();
        for i in 0..points {
            if i == 0 {
                sink.dwell(self.dwell_time);
            }
            let pct = i as f64 / points as f64;
            let a = left.top().interpolate_by_distance_percent(pct);
            let b = right.top().interpolate_by_distance_percent(pct);
            sink.move_to(m.calculate_move(a, b), MoveFlags::NONE);
            if i == 0 {
                sink.dwell(self.dwell_time);
            }
        }

        sink.move_to(
            m.calculate_move(left.top().last(), right.top().last()),
            MoveFlags::NONE,
        );
        sink.dwell(self.dwell_time);
    }

    fn cut_bottom(
        &self,
        m: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) {
        let points = m.profile_points();
        for i in 0..points {
            let pct = i as f64 / points as f64;
            let a = left.bottom().interpolate_by_distance_percent(pct);
            let b = right.bottom().interpolate_by_distance_percent(pct);
            sink.move_to(m.calculate_move(a, b), MoveFlags::NONE);
            if i == 0 {
                sink.dwell(self.dwell_time);
            }
        }
        // the trailing-edge move that follows finishes the surface
        sink.dwell(self.dwell_time);
    }

    /// Straight plunge cuts that part the tail and front stock from the panel.
    ///
    /// A rib without a stock length uses the other rib's.
    fn cut_stock(
        &self,
        m: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) {
        let panel = m.panel();
        let (left_kerf, right_kerf) = m.kerf();

        if let Some((left_stock, right_stock)) =
            paired(panel.left_rib.tail_stock, panel.right_rib.tail_stock)
        {
            tracing::debug!("Cutting tail stock ({}, {})", left_stock, right_stock);
            let position = m.calculate_move(
                Point2D::new(left.right_midpoint().x - left_stock + left_kerf, 0.0),
                Point2D::new(right.right_midpoint().x - right_stock + right_kerf, 0.0),
            );
            self.plunge_cut(m, position, sink);
            sink.dwell(self.dwell_time * 2.0);
            move_to_safe_height(m, sink);
        }

        if let Some((left_stock, right_stock)) =
            paired(panel.left_rib.front_stock, panel.right_rib.front_stock)
        {
            tracing::debug!("Cutting front stock ({}, {})", left_stock, right_stock);
            let position = m.calculate_move(
                Point2D::new(left.left_midpoint().x + left_stock - left_kerf, 0.0),
                Point2D::new(right.left_midpoint().x + right_stock - right_kerf, 0.0),
            );
            self.plunge_cut(m, position, sink);
            move_to_safe_height(m, sink);
        }
    }

    /// Down to the table at `position` and back up above the foam.
    fn plunge_cut(&self, m: &Machine, position: Axes, sink: &mut dyn CommandSink) {
        let above_foam = above_foam(m);
        sink.fast_move(position.horizontal_part(), MoveFlags::NONE);
        sink.fast_move(above_foam, MoveFlags::DO_NOT_NORMALIZE);
        sink.move_to(Axes::vertical(0.0, 0.0), MoveFlags::DO_NOT_NORMALIZE);
        sink.move_to(above_foam, MoveFlags::DO_NOT_NORMALIZE);
    }

    fn cut_spar(
        &self,
        m: &Machine,
        left: &AirfoilProfile,
        right: &AirfoilProfile,
        sink: &mut dyn CommandSink,
    ) {
        let (left_spar, right_spar) = match (left.spar(), right.spar()) {
            (Some(l), Some(r)) => (l, r),
            (None, None) => return,
            _ => {
                tracing::warn!("Spar defined on only one rib, skipping spar cut");
                return;
            }
        };
        tracing::debug!(
            "Cutting spar at {} r={} / {} r={}",
            left_spar.center,
            left_spar.radius,
            right_spar.center,
            right_spar.radius
        );

        let height = m.foam_height() * 1.1;
        sink.fast_move(
            Axes::full(
                left_spar.center.x + left_spar.radius,
                height,
                right_spar.center.x + right_spar.radius,
                height,
            ),
            MoveFlags::NONE,
        );
        let centers = m.calculate_move(left_spar.center, right_spar.center);
        sink.move_to(centers, MoveFlags::NONE);

        for i in 0..SPAR_POINTS {
            let angle = 2.0 * PI * i as f64 / SPAR_POINTS as f64;
            let (sin, cos) = angle.sin_cos();
            let a = left_spar.center + Point2D::new(cos, sin) * left_spar.radius;
            let b = right_spar.center + Point2D::new(cos, sin) * right_spar.radius;
            sink.move_to(m.calculate_move(a, b), MoveFlags::NONE);
        }
        sink.move_to(centers, MoveFlags::NONE);
    }
}

fn above_foam(m: &Machine) -> Axes {
    let height = m.foam_height() * 1.1;
    Axes::vertical(height, height)
}

fn move_to_safe_height(m: &Machine, sink: &mut dyn CommandSink) {
    let height = m.safe_height();
    sink.fast_move(Axes::vertical(height, height), MoveFlags::DO_NOT_NORMALIZE);
}

fn paired(left: Option<f64>, right: Option<f64>) -> Option<(f64, f64)> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l, r)),
        (Some(l), None) => Some((l, l)),
        (None, Some(r)) => Some((r, r)),
        (None, None) => None,
    }
}
