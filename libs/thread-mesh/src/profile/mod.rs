//! Thread cross-section profiles.
//!
//! A profile is the 2D outline swept around the Z axis to form a thread. It
//! is described by four axial segment heights:
//!
//! ```text
//!  axial
//!    ^   root ── (r, h1+h2+h3+h4)     root plateau, only when h4 > 0
//!    |   root ── (r, h1+h2+h3)        end of the falling flank
//!    |  crest ── (R, h1+h2)           end of crest plateau, only when h2 > 0
//!    |  crest ── (R, h1)              top of the rising flank
//!    |   root ── (r, 0)
//!    +──────────────────> radius
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadMeshError};

/// Whether a profile point lies on the root or the crest of the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Point at the minor (root) radius; never tapered.
    Root,
    /// Point at the major (crest) radius; tapered near the sweep ends.
    Crest,
}

/// One point of a thread cross-section, in the plane containing the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Radial distance from the axis.
    pub radius: f64,
    /// Axial offset from the start of one pitch.
    pub axial: f64,
    /// Root or crest classification used by the crest taper.
    pub kind: PointKind,
}

/// Axial segment heights of one thread pitch.
///
/// # Examples
/// ```
/// use thread_mesh::ThreadProfile;
///
/// let profile = ThreadProfile::new(0.8, 0.2, 0.8, 0.3);
/// assert!((profile.pitch() - 2.1).abs() < 1e-12);
/// assert_eq!(profile.point_count(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreadProfile {
    /// `h1`: height of the rising flank from root to crest.
    pub rise: f64,
    /// `h2`: height of the crest plateau (0 for a pointed crest).
    pub crest_flat: f64,
    /// `h3`: height of the falling flank from crest back to root.
    pub fall: f64,
    /// `h4`: height of the root plateau before the next pitch (may be 0).
    pub root_flat: f64,
}

impl Default for ThreadProfile {
    fn default() -> Self {
        Self {
            rise: 0.8,
            crest_flat: 0.2,
            fall: 0.8,
            root_flat: 0.3,
        }
    }
}

impl ThreadProfile {
    /// Creates a profile from the four segment heights `h1..h4`.
    pub fn new(rise: f64, crest_flat: f64, fall: f64, root_flat: f64) -> Self {
        Self {
            rise,
            crest_flat,
            fall,
            root_flat,
        }
    }

    /// Axial advance per revolution, `H = h1 + h2 + h3 + h4`.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.rise + self.crest_flat + self.fall + self.root_flat
    }

    /// Number of profile points `N` (3, 4 or 5).
    #[inline]
    pub fn point_count(&self) -> usize {
        3 + usize::from(self.crest_flat > 0.0) + usize::from(self.root_flat > 0.0)
    }

    /// Rejects profiles that would produce a zero-area or self-intersecting
    /// thread.
    pub fn validate(&self) -> Result<()> {
        let heights = [
            ("rise", self.rise),
            ("crest_flat", self.crest_flat),
            ("fall", self.fall),
            ("root_flat", self.root_flat),
        ];
        for (name, value) in heights {
            if !value.is_finite() {
                return Err(ThreadMeshError::contract(format!(
                    "profile {name} must be finite: {value}"
                )));
            }
            if value < 0.0 {
                return Err(ThreadMeshError::contract(format!(
                    "profile {name} must be non-negative: {value}"
                )));
            }
        }
        if self.rise <= 0.0 {
            return Err(ThreadMeshError::contract(format!(
                "profile rise (h1) must be positive: {}",
                self.rise
            )));
        }
        if self.fall <= 0.0 {
            return Err(ThreadMeshError::contract(format!(
                "profile fall (h3) must be positive: {}",
                self.fall
            )));
        }
        Ok(())
    }

    /// Builds the ordered cross-section for the given crest and root radii.
    ///
    /// # Examples
    /// ```
    /// use thread_mesh::{ThreadProfile, PointKind};
    ///
    /// let points = ThreadProfile::new(1.0, 0.0, 1.0, 0.0).points(2.0, 1.5);
    /// assert_eq!(points.len(), 3);
    /// assert_eq!(points[1].kind, PointKind::Crest);
    /// assert_eq!(points[2].axial, 2.0);
    /// ```
    pub fn points(&self, crest_radius: f64, root_radius: f64) -> Vec<ProfilePoint> {
        let root = |axial| ProfilePoint {
            radius: root_radius,
            axial,
            kind: PointKind::Root,
        };
        let crest = |axial| ProfilePoint {
            radius: crest_radius,
            axial,
            kind: PointKind::Crest,
        };

        let mut points = Vec::with_capacity(self.point_count());
        points.push(root(0.0));
        points.push(crest(self.rise));
        if self.crest_flat > 0.0 {
            points.push(crest(self.rise + self.crest_flat));
        }
        points.push(root(self.rise + self.crest_flat + self.fall));
        if self.root_flat > 0.0 {
            points.push(root(self.pitch()));
        }
        points
    }
}
