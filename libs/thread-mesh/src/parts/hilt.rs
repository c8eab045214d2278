//! Hilt: male thread at the bottom, female thread at the top.

use config::constants::DEFAULT_SEGMENTS;
use serde::{Deserialize, Serialize};

use super::{closed_form_counts, PartKind, PartRecipe};
use crate::profile::ThreadProfile;
use crate::recipe::{BufferCounts, Recipe};
use crate::thread::{Polarity, ThreadSpec};

/// Parameters of the hilt.
///
/// The male thread is `radii_diff` smaller than the female one so that
/// consecutive hilts screw into each other with clearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiltConfig {
    /// Vertices per loop.
    pub segments: u32,
    /// Male thread revolutions.
    pub male_loops: u32,
    /// Female thread revolutions.
    pub female_loops: u32,
    /// Female thread crest radius.
    pub crest_radius: f64,
    /// Female thread root radius.
    pub root_radius: f64,
    /// Cross-section of both threads.
    pub profile: ThreadProfile,
    /// Crest taper sharpness of the male thread.
    pub falloff_rate: f64,
    /// Crest taper sharpness of the female thread.
    pub female_falloff_rate: f64,
    /// Height where the female thread starts.
    pub female_offset: f64,
    /// Height where the male thread starts.
    pub male_offset: f64,
    /// Radial clearance between the male and female threads.
    pub radii_diff: f64,
    /// Wall inside the male thread root.
    pub male_thickness: f64,
    /// Wall outside the female thread crest.
    pub female_thickness: f64,
    /// Close the female thread base down to the bore, forming a stop.
    pub locking: bool,
    /// Gap between the female thread end and its closing ring.
    pub end_clearance: f64,
    /// Height of the shoulder above the male thread (non-locking only).
    pub shoulder_height: f64,
    /// Height of the bore lip above the male thread.
    pub bore_lip_height: f64,
}

impl Default for HiltConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            male_loops: 3,
            female_loops: 5,
            crest_radius: 19.5,
            root_radius: 18.2,
            profile: ThreadProfile::default(),
            falloff_rate: 1.0,
            female_falloff_rate: 1000.0,
            female_offset: 150.0,
            male_offset: 0.0,
            radii_diff: 0.5,
            male_thickness: 2.0,
            female_thickness: 2.0,
            locking: false,
            end_clearance: 0.2,
            shoulder_height: 3.0,
            bore_lip_height: 1.0,
        }
    }
}

impl PartRecipe for HiltConfig {
    fn kind(&self) -> PartKind {
        PartKind::Hilt
    }

    fn segments(&self) -> u32 {
        self.segments
    }

    fn set_segments(&mut self, segments: u32) {
        self.segments = segments;
    }

    fn recipe(&self) -> Recipe {
        let pitch = self.profile.pitch();
        let bore = self.root_radius - self.male_thickness - self.radii_diff;
        let wall = self.crest_radius + self.female_thickness;
        let male_end = self.male_offset + f64::from(self.male_loops + 1) * pitch;
        let female_end =
            f64::from(self.female_loops) * pitch + self.female_offset + self.end_clearance;

        let mut recipe = Recipe::new(self.kind().mesh_name(), self.segments);
        let male = recipe.thread(
            "male thread",
            ThreadSpec {
                segments: self.segments,
                loops: self.male_loops,
                crest_radius: self.crest_radius - self.radii_diff,
                root_radius: self.root_radius - self.radii_diff,
                profile: self.profile,
                falloff_rate: self.falloff_rate,
                z_offset: self.male_offset,
                polarity: Polarity::Male,
            },
        );
        let bore_floor = recipe.collar("bore floor", bore, self.male_offset, male.bottom);
        let bore_top = recipe.collar(
            "bore",
            bore,
            f64::from(self.male_loops + 1) * pitch + self.male_offset,
            bore_floor,
        );

        let female = recipe.thread(
            "female thread",
            ThreadSpec {
                segments: self.segments,
                loops: self.female_loops,
                crest_radius: self.crest_radius,
                root_radius: self.root_radius,
                profile: self.profile,
                falloff_rate: self.female_falloff_rate,
                z_offset: self.female_offset,
                polarity: Polarity::Female,
            },
        );
        let mouth = recipe.collar("mouth", self.root_radius, female_end, female.top);
        let rim = recipe.collar("rim", wall, female_end, mouth);
        let wall_base = recipe.collar("outer wall", wall, self.female_offset, rim);
        let shoulder = recipe.collar("shoulder", wall, male_end, wall_base);
        let (stop_radius, stop_height) = if self.locking {
            (bore, self.female_offset)
        } else {
            (self.root_radius, male_end + self.shoulder_height)
        };
        let stop = recipe.collar("thread stop", stop_radius, stop_height, female.bottom);
        let bore_lip = recipe.collar("bore lip", bore, male_end + self.bore_lip_height, bore_top);
        recipe.seam("shoulder seam", shoulder, male.top);
        recipe.seam("stop seam", stop, bore_lip);
        recipe
    }

    fn expected_counts(&self) -> BufferCounts {
        closed_form_counts(
            self.segments,
            &[(self.male_loops, self.profile), (self.female_loops, self.profile)],
            12,
            14,
        )
    }
}
