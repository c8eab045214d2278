//! Pommel: a female thread lifted above a closed end cap.

use config::constants::DEFAULT_SEGMENTS;
use serde::{Deserialize, Serialize};

use super::{closed_form_counts, PartKind, PartRecipe};
use crate::profile::ThreadProfile;
use crate::recipe::{BufferCounts, Recipe};
use crate::thread::{Polarity, ThreadSpec};

/// Parameters of the pommel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PommelConfig {
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
    /// Height of the cap floor.
    pub female_offset: f64,
    /// Wall outside the thread crest.
    pub thickness: f64,
    /// Distance between the cap floor and the thread start.
    pub thread_lift: f64,
    /// Gap between the thread end and its closing ring.
    pub end_clearance: f64,
}

impl Default for PommelConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            loops: 5,
            crest_radius: 19.5,
            root_radius: 18.2,
            profile: ThreadProfile::default(),
            falloff_rate: 1000.0,
            female_offset: 0.0,
            thickness: 2.0,
            thread_lift: 10.0,
            end_clearance: 0.2,
        }
    }
}

impl PartRecipe for PommelConfig {
    fn kind(&self) -> PartKind {
        PartKind::Pommel
    }

    fn segments(&self) -> u32 {
        self.segments
    }

    fn set_segments(&mut self, segments: u32) {
        self.segments = segments;
    }

    fn recipe(&self) -> Recipe {
        let pitch = self.profile.pitch();
        let wall = self.crest_radius + self.thickness;
        let mouth_height = f64::from(self.loops) * pitch
            + self.female_offset
            + self.thread_lift
            + self.end_clearance;

        let mut recipe = Recipe::new(self.kind().mesh_name(), self.segments);
        let thread = recipe.thread(
            "female thread",
            ThreadSpec {
                segments: self.segments,
                loops: self.loops,
                crest_radius: self.crest_radius,
                root_radius: self.root_radius,
                profile: self.profile,
                falloff_rate: self.falloff_rate,
                z_offset: self.female_offset + self.thread_lift,
                polarity: Polarity::Female,
            },
        );
        let mouth = recipe.collar("mouth", self.root_radius, mouth_height, thread.top);
        let rim = recipe.collar("rim", wall, mouth_height, mouth);
        let wall_base = recipe.collar("outer wall", wall, self.female_offset, rim);
        recipe.collar("cap", self.root_radius, self.female_offset, wall_base);
        recipe.collar("floor", self.root_radius, self.female_offset, thread.bottom);
        recipe
    }

    fn expected_counts(&self) -> BufferCounts {
        closed_form_counts(self.segments, &[(self.loops, self.profile)], 7, 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use approx::assert_relative_eq;

    #[test]
    fn thread_is_lifted_off_the_floor() {
        let config = PommelConfig {
            segments: 8,
            ..PommelConfig::default()
        };
        let mesh = config.generate(&GenerationConfig::default()).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 5.0 * config.profile.pitch() + 10.2, epsilon = 1e-9);
        // bottom ring of the thread
        assert_relative_eq!(mesh.vertices()[0].z, 10.0);
    }
}
