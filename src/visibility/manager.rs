//! Camera-driven visibility with incremental loading
//!
//! The manager owns the session counters (loaded count, load cap) and the
//! view parameters. Hosts call [`VisibilityManager::apply`] whenever the view
//! changes and hand the returned list to their renderer as a full replacement.

use crate::core::types::{DVec3, Result};
use crate::math::BoundingVolume;
use crate::spatial::{Point3D, PointOctree};
use super::config::{validate_camera, validate_max_distance, DisplayOptions, VisibilityConfig};
use super::loader::{self, LoadState};
use super::source::PointSource;

/// A view change reported by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewChange {
    /// Camera moved to a new position
    CameraMoved(DVec3),
    /// Visibility radius changed
    MaxDistance(f64),
    /// Load cap changed; raising it loads more before recomputing
    TargetCount(usize),
    /// Render toggles changed
    Display(DisplayOptions),
}

/// Points strictly within `max_distance` of `camera`.
///
/// Queries `index` with the cube circumscribing the sphere and drops the
/// corners. Order follows the index traversal.
pub fn visible_within<'a, P>(
    index: &'a PointOctree<P>,
    camera: DVec3,
    max_distance: f64,
) -> Vec<&'a Point3D<P>> {
    let range = BoundingVolume::cube(camera, max_distance);
    let mut candidates = index.query(&range);
    candidates.retain(|p| p.distance_to(camera) < max_distance);
    candidates
}

/// Tracks the view and decides when the index needs more points.
#[derive(Clone, Debug)]
pub struct VisibilityManager {
    /// Current camera position
    camera: DVec3,
    /// Visibility sphere radius
    max_distance: f64,
    /// Points taken from the source so far
    loaded_count: usize,
    /// Cumulative load cap
    target_count: usize,
    /// Below this many visible points, loading is triggered
    min_visible_threshold: usize,
    /// Whether a sparse update loads more points
    auto_load: bool,
    /// Render toggles
    display: DisplayOptions,
    /// Loaded points the index refused
    rejected_count: usize,
}

impl VisibilityManager {
    /// Create a manager with the camera at the origin and nothing loaded
    pub fn new(config: &VisibilityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            camera: DVec3::ZERO,
            max_distance: config.max_distance,
            loaded_count: 0,
            target_count: config.target_count,
            min_visible_threshold: config.min_visible_threshold,
            auto_load: config.auto_load,
            display: config.display,
            rejected_count: 0,
        })
    }

    /// Builder-style camera placement; the position must be finite
    pub fn with_camera(mut self, camera: DVec3) -> Result<Self> {
        validate_camera(camera)?;
        self.camera = camera;
        Ok(self)
    }

    // --- Accessors ---

    pub fn camera(&self) -> DVec3 {
        self.camera
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn min_visible_threshold(&self) -> usize {
        self.min_visible_threshold
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    /// Loaded points the index refused so far
    pub fn rejected_count(&self) -> usize {
        self.rejected_count
    }

    /// Load progress against `source`
    pub fn load_state<S>(&self, source: &S) -> LoadState
    where
        S: PointSource + ?Sized,
    {
        LoadState::classify(self.loaded_count, source.total_available(), self.target_count)
    }

    // --- Visibility ---

    /// Points currently visible, without loading anything
    pub fn visible_stars<'a, P>(&self, index: &'a PointOctree<P>) -> Vec<&'a Point3D<P>> {
        visible_within(index, self.camera, self.max_distance)
    }

    /// Recompute the visible set, loading more points if it is sparse.
    ///
    /// When fewer than `min_visible_threshold` points are visible and
    /// `auto_load` is set, one load step runs (up to `target_count`) and the
    /// set is recomputed. A second step could never add more, since the
    /// first already fills the cap.
    pub fn update_visible_stars<'a, P, S>(
        &mut self,
        index: &'a mut PointOctree<P>,
        source: &S,
    ) -> Vec<&'a Point3D<P>>
    where
        S: PointSource<Payload = P> + ?Sized,
    {
        let visible = visible_within(index, self.camera, self.max_distance).len();
        if visible < self.min_visible_threshold {
            if self.auto_load {
                self.check_and_load_more_stars(index, source);
            } else {
                log::debug!(
                    "Visible set sparse ({} < {}) with auto-load disabled",
                    visible,
                    self.min_visible_threshold,
                );
            }
        }

        let index: &'a PointOctree<P> = index;
        let visible = self.visible_stars(index);
        log::debug!(
            "Visible stars: {} (loaded {} / {}, camera {:?}, radius {})",
            visible.len(),
            self.loaded_count,
            source.total_available(),
            self.camera,
            self.max_distance,
        );
        visible
    }

    /// Load up to the target count and return the new loaded count
    pub fn check_and_load_more_stars<P, S>(&mut self, index: &mut PointOctree<P>, source: &S) -> usize
    where
        S: PointSource<Payload = P> + ?Sized,
    {
        let outcome = loader::check_and_load_more_stars(
            index,
            source,
            self.loaded_count,
            self.target_count,
        );
        self.loaded_count = outcome.loaded_count;
        self.rejected_count += outcome.rejected;
        self.loaded_count
    }

    /// Apply a view change and return the new visible set.
    ///
    /// Fails for a non-finite camera or an invalid `MaxDistance`, in which
    /// case nothing changes and nothing is loaded.
    pub fn apply<'a, P, S>(
        &mut self,
        change: ViewChange,
        index: &'a mut PointOctree<P>,
        source: &S,
    ) -> Result<Vec<&'a Point3D<P>>>
    where
        S: PointSource<Payload = P> + ?Sized,
    {
        match change {
            ViewChange::CameraMoved(camera) => {
                validate_camera(camera)?;
                self.camera = camera;
            }
            ViewChange::MaxDistance(max_distance) => {
                validate_max_distance(max_distance)?;
                self.max_distance = max_distance;
            }
            ViewChange::TargetCount(target_count) => {
                log::info!("Load cap changed: {} -> {}", self.target_count, target_count);
                self.target_count = target_count;
                self.check_and_load_more_stars(index, source);
            }
            ViewChange::Display(display) => self.display = display,
        }

        Ok(self.update_visible_stars(index, source))
    }
}
