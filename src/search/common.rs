//! Search state shared by the sequential and parallel drivers.
//!
//! Drivers only decide which boxes to refine and where the oracle runs.
//! Everything that mutates `border`, `ylow` and `yup` lives here and runs on
//! the calling thread, in the order the cuts are applied.

#[cfg(feature = "serde")]
use std::path::Path;

use log::{debug, info, warn};

use super::border::Border;
use super::config::{OptLevel, SearchConfig};
use super::error::SearchError;
use crate::geometry::{disjoint_irect, Point, Rectangle, Segment};
use crate::oracle::Oracle;
use crate::result_set::ResultSet;
#[cfg(feature = "serde")]
use crate::result_set::ResultSetError;

/// Checks the inputs of a search before any oracle call.
pub fn validate_inputs<O: Oracle>(
    config: &SearchConfig,
    xspace: &Rectangle,
    oracle: &O,
) -> Result<(), SearchError> {
    config.validate()?;
    if xspace.dim() == 0 {
        return Err(SearchError::InvalidConfig(
            "search space must have at least one dimension".to_string(),
        ));
    }
    if xspace.dim() != oracle.dimension() {
        return Err(SearchError::DimensionMismatch {
            space: xspace.dim(),
            oracle: oracle.dimension(),
        });
    }
    let bounded = xspace
        .min_corner()
        .iter()
        .chain(xspace.max_corner().iter())
        .all(|c| c.is_finite());
    if !bounded {
        return Err(SearchError::InvalidConfig(format!(
            "search space must be bounded, got {xspace}"
        )));
    }
    Ok(())
}

/// Which region a clipped or dominated border box is moved to.
#[derive(Debug, Clone, Copy)]
enum Region {
    Low,
    Up,
}

#[derive(Debug)]
pub(crate) struct SearchState {
    xspace: Rectangle,
    border: Border,
    // Undetermined boxes too small to refine at this precision.
    settled: Vec<Rectangle>,
    ylow: Vec<Rectangle>,
    yup: Vec<Rectangle>,
    vol_total: f64,
    vol_ylow: f64,
    vol_yup: f64,
    vol_border: f64,
    step: u64,
    opt_level: OptLevel,
    error: Point,
}

impl SearchState {
    pub fn new(xspace: Rectangle, config: &SearchConfig) -> Self {
        let n = xspace.dim();
        let vol_total = xspace.volume();
        let mut border = Border::new();
        border.insert(xspace.clone());
        Self {
            xspace,
            border,
            settled: Vec::new(),
            ylow: Vec::new(),
            yup: Vec::new(),
            vol_total,
            vol_ylow: 0.0,
            vol_yup: 0.0,
            vol_border: vol_total,
            step: 0,
            opt_level: config.opt_level,
            error: Point::splat(config.epsilon, n),
        }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Per-axis precision for the binary searches.
    pub fn error(&self) -> &Point {
        &self.error
    }

    pub fn is_done(&self, config: &SearchConfig) -> bool {
        self.vol_border < config.delta || self.step >= config.max_step || self.border.is_empty()
    }

    /// Pops the largest box that is still wider than `epsilon` on some axis.
    pub fn pop(&mut self) -> Option<Rectangle> {
        while let Some(rect) = self.border.pop_largest() {
            if rect.extents().less(&self.error) {
                self.settled.push(rect);
            } else {
                return Some(rect);
            }
        }
        None
    }

    /// Classifies the parts of `rect` settled by the cut `y` on its diagonal
    /// and returns the undetermined rest to the border.
    pub fn apply_cut(&mut self, rect: &Rectangle, y: &Segment) {
        let low = y.low();
        let high = y.high();
        self.step += 1;

        if low == rect.min_corner() && high == rect.max_corner() {
            debug!("step {}: diagonal of {} could not be narrowed", self.step, rect);
            self.settled.push(rect.clone());
            return;
        }

        self.add(Region::Low, Rectangle::new(rect.min_corner().clone(), low.clone()));
        self.add(Region::Up, Rectangle::new(high.clone(), rect.max_corner().clone()));

        match self.opt_level {
            OptLevel::None => {}
            OptLevel::Dominance => self.absorb_dominated(low, high),
            OptLevel::Clip => self.clip_border(low, high),
        }

        // Disjoint pieces keep the three lists a partition of xspace, so the
        // border volume is exactly what ylow and yup leave over.
        let y_rect = Rectangle::new(low.clone(), high.clone());
        for piece in disjoint_irect(&y_rect, rect) {
            self.push_border(piece);
        }

        self.vol_border = self.vol_total - self.vol_ylow - self.vol_yup;
        debug!(
            "step {}: cut {} border_volume={:.6e} border_boxes={}",
            self.step,
            y,
            self.vol_border,
            self.border.len() + self.settled.len()
        );
    }

    fn add(&mut self, region: Region, rect: Rectangle) {
        let volume = rect.volume();
        if volume <= 0.0 {
            return;
        }
        match region {
            Region::Low => {
                self.vol_ylow += volume;
                self.ylow.push(rect);
            }
            Region::Up => {
                self.vol_yup += volume;
                self.yup.push(rect);
            }
        }
    }

    fn push_border(&mut self, rect: Rectangle) {
        if !rect.is_degenerate() {
            self.border.insert(rect);
        }
    }

    // Border boxes inside [xspace.min, low] are below the closure, those
    // inside [high, xspace.max] are in it.
    fn absorb_dominated(&mut self, low: &Point, high: &Point) {
        let low_cap = Rectangle::degenerate(low.clone());
        let high_floor = Rectangle::degenerate(high.clone());
        for rect in self.border.take_where(|r| r.dominates_rect(&low_cap)) {
            self.add(Region::Low, rect);
        }
        for rect in self.border.take_where(|r| r.is_dominated_by_rect(&high_floor)) {
            self.add(Region::Up, rect);
        }
    }

    fn clip_border(&mut self, low: &Point, high: &Point) {
        let below = Rectangle::new(self.xspace.min_corner().clone(), low.clone());
        let above = Rectangle::new(high.clone(), self.xspace.max_corner().clone());
        self.clip_against(&below, Region::Low);
        self.clip_against(&above, Region::Up);
    }

    fn clip_against(&mut self, region_box: &Rectangle, region: Region) {
        let touched = self
            .border
            .take_where(|r| r.overlaps(region_box) || region_box.overlaps(r));
        for rect in touched {
            let inside = rect.intersection(region_box);
            if inside.is_degenerate() {
                self.border.insert(rect);
                continue;
            }
            for piece in rect.difference(region_box) {
                self.push_border(piece);
            }
            self.add(region, inside);
        }
    }

    fn border_boxes(&self) -> Vec<Rectangle> {
        let mut boxes = self.border.to_vec();
        boxes.extend(self.settled.iter().cloned());
        boxes
    }

    /// Copy of the current lists, border in pop order.
    pub fn snapshot(&self) -> ResultSet {
        ResultSet::new(
            self.border_boxes(),
            self.ylow.clone(),
            self.yup.clone(),
            self.xspace.clone(),
        )
    }

    /// Writes `step_NNNNNN.json` under the configured checkpoint directory.
    #[cfg(feature = "serde")]
    pub fn checkpoint(&self, config: &SearchConfig) -> Result<(), SearchError> {
        if let Some(dir) = &config.checkpoint_dir {
            self.write_checkpoint(dir)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "serde"))]
    pub fn checkpoint(&self, _config: &SearchConfig) -> Result<(), SearchError> {
        Ok(())
    }

    #[cfg(feature = "serde")]
    fn write_checkpoint(&self, dir: &Path) -> Result<(), ResultSetError> {
        std::fs::create_dir_all(dir)?;
        self.snapshot()
            .write_to_file(dir.join(format!("step_{:06}.json", self.step)))
    }

    pub fn finish(self, config: &SearchConfig) -> ResultSet {
        if self.vol_border >= config.delta && self.step >= config.max_step {
            warn!(
                "search stopped after {} steps with border volume {:.6e} (delta {:.6e})",
                self.step, self.vol_border, config.delta
            );
        } else {
            info!(
                "search finished after {} steps: ylow={:.6e} yup={:.6e} border={:.6e}",
                self.step, self.vol_ylow, self.vol_yup, self.vol_border
            );
        }
        ResultSet::new(self.border_boxes(), self.ylow, self.yup, self.xspace)
    }
}
