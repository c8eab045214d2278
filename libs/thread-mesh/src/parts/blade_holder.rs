//! Blade holder: a male thread carrying a stepped bore and a wider cap rim.

use config::constants::DEFAULT_SEGMENTS;
use serde::{Deserialize, Serialize};

use super::{closed_form_counts, PartKind, PartRecipe};
use crate::profile::ThreadProfile;
use crate::recipe::{BufferCounts, Recipe};
use crate::thread::{Polarity, ThreadSpec};

/// Parameters of the blade holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BladeHolderConfig {
    /// Vertices per loop.
    pub segments: u32,
    /// Thread revolutions.
    pub loops: u32,
    /// Thread crest radius.
    pub crest_radius: f64,
    /// Thread root radius.
    pub root_radius: f64,
    /// Thread cross-section.
    pub profile: ThreadProfile,
    /// Crest taper sharpness.
    pub falloff_rate: f64,
    /// Height where the thread starts.
    pub male_offset: f64,
    /// Wall between the thread root and the bore.
    pub male_thickness: f64,
    /// Wall outside the thread crest at the shoulder.
    pub female_thickness: f64,
    /// Extra clearance taken off the bore radius.
    pub bore_offset: f64,
    /// Height of the bore above the shoulder.
    pub neck_length: f64,
    /// Radius of the cap opening.
    pub cap_radius: f64,
    /// Height of the cap rim above the shoulder.
    pub cap_length: f64,
}

impl Default for BladeHolderConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            loops: 2,
            crest_radius: 18.5,
            root_radius: 17.2,
            profile: ThreadProfile::default(),
            falloff_rate: 1.0,
            male_offset: 100.0,
            male_thickness: 2.0,
            female_thickness: 3.0,
            bore_offset: 0.5,
            neck_length: 11.5,
            cap_radius: 12.8,
            cap_length: 15.5,
        }
    }
}

impl PartRecipe for BladeHolderConfig {
    fn kind(&self) -> PartKind {
        PartKind::BladeHolder
    }

    fn segments(&self) -> u32 {
        self.segments
    }

    fn set_segments(&mut self, segments: u32) {
        self.segments = segments;
    }

    fn recipe(&self) -> Recipe {
        let pitch = self.profile.pitch();
        let shoulder = f64::from(self.loops + 1) * pitch + self.male_offset;
        let bore = self.root_radius - self.male_thickness - self.bore_offset;
        let rim = self.crest_radius + self.female_thickness;

        let mut recipe = Recipe::new(self.kind().mesh_name(), self.segments);
        let thread = recipe.thread(
            "male thread",
            ThreadSpec {
                segments: self.segments,
                loops: self.loops,
                crest_radius: self.crest_radius,
                root_radius: self.root_radius,
                profile: self.profile,
                falloff_rate: self.falloff_rate,
                z_offset: self.male_offset,
                polarity: Polarity::Male,
            },
        );
        let bore_floor = recipe.collar("bore floor", bore, self.male_offset, thread.bottom);
        let bore_shoulder = recipe.collar("bore shoulder", bore, shoulder, bore_floor);
        let neck = recipe.collar("neck", bore, shoulder + self.neck_length, bore_shoulder);
        let cap_step = recipe.collar("cap step", self.cap_radius, shoulder + self.neck_length, neck);
        let cap_top = recipe.collar("cap top", self.cap_radius, shoulder + self.cap_length, cap_step);
        let shoulder_rim = recipe.collar("shoulder rim", rim, shoulder, thread.top);
        let rim_top = recipe.collar("rim top", rim, shoulder + self.cap_length, shoulder_rim);
        recipe.seam("cap face", rim_top, cap_top);
        recipe
    }

    fn expected_counts(&self) -> BufferCounts {
        closed_form_counts(self.segments, &[(self.loops, self.profile)], 9, 10)
    }
}
