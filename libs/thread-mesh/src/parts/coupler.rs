//! Coupling sleeves with a thread at each end.
//!
//! The top thread sits at `top_offset`, the bottom one at `bottom_offset`;
//! collars between them form the shared central band.

use config::constants::DEFAULT_SEGMENTS;
use serde::{Deserialize, Serialize};

use super::{closed_form_counts, PartKind, PartRecipe};
use crate::profile::ThreadProfile;
use crate::recipe::{BufferCounts, Recipe};
use crate::thread::{Polarity, ThreadSpec};

/// Parameters of the female-to-female coupler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplerFemaleConfig {
    /// Vertices per loop.
    pub segments: u32,
    /// Top thread revolutions.
    pub top_loops: u32,
    /// Bottom thread revolutions.
    pub bottom_loops: u32,
    /// Top thread crest radius.
    pub top_crest_radius: f64,
    /// Top thread root radius.
    pub top_root_radius: f64,
    /// Bottom thread crest radius.
    pub bottom_crest_radius: f64,
    /// Bottom thread root radius.
    pub bottom_root_radius: f64,
    /// Cross-section of both threads.
    pub profile: ThreadProfile,
    /// Crest taper sharpness of both threads.
    pub falloff_rate: f64,
    /// Height where the top thread starts.
    pub top_offset: f64,
    /// Height where the bottom thread starts.
    pub bottom_offset: f64,
    /// Wall outside the thread crests.
    pub thickness: f64,
    /// Gap between a thread end and its closing ring.
    pub end_clearance: f64,
    /// Depth of the lip under the top thread.
    pub lip_depth: f64,
}

impl Default for CouplerFemaleConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            top_loops: 3,
            bottom_loops: 3,
            top_crest_radius: 18.5,
            top_root_radius: 17.2,
            bottom_crest_radius: 30.0,
            bottom_root_radius: 28.7,
            profile: ThreadProfile::default(),
            falloff_rate: 1000.0,
            top_offset: 100.0,
            bottom_offset: 70.0,
            thickness: 1.0,
            end_clearance: 0.2,
            lip_depth: 2.0,
        }
    }
}

impl PartRecipe for CouplerFemaleConfig {
    fn kind(&self) -> PartKind {
        PartKind::CouplerFemale
    }

    fn segments(&self) -> u32 {
        self.segments
    }

    fn set_segments(&mut self, segments: u32) {
        self.segments = segments;
    }

    fn recipe(&self) -> Recipe {
        let pitch = self.profile.pitch();
        let top_end = f64::from(self.top_loops) * pitch + self.top_offset + self.end_clearance;
        let top_wall = self.top_crest_radius + self.thickness;
        let bottom_wall = self.bottom_crest_radius + self.thickness;
        let bottom_start = self.bottom_offset - self.end_clearance;
        let bottom_end = self.bottom_offset + f64::from(self.bottom_loops + 1) * pitch;
        let band = self.top_offset - bottom_end;

        let mut recipe = Recipe::new(self.kind().mesh_name(), self.segments);
        let top = recipe.thread(
            "top thread",
            self.thread(self.top_loops, self.top_crest_radius, self.top_root_radius, self.top_offset),
        );
        let top_cap = recipe.collar("top cap", self.top_root_radius, top_end, top.top);
        let top_rim = recipe.collar("top rim", top_wall, top_end, top_cap);
        let top_wall_base = recipe.collar("top wall", top_wall, self.top_offset, top_rim);

        let bottom = recipe.thread(
            "bottom thread",
            self.thread(
                self.bottom_loops,
                self.bottom_crest_radius,
                self.bottom_root_radius,
                self.bottom_offset,
            ),
        );
        let bottom_cap = recipe.collar("bottom cap", self.bottom_root_radius, bottom_start, bottom.bottom);
        let bottom_rim = recipe.collar("bottom rim", bottom_wall, bottom_start, bottom_cap);
        let bottom_wall_mid = recipe.collar(
            "bottom wall",
            bottom_wall,
            f64::from(self.bottom_loops) * pitch + self.bottom_offset,
            bottom_rim,
        );
        let bottom_wall_top = recipe.collar("bottom wall top", bottom_wall, bottom_end, bottom_wall_mid);
        let inner_step = recipe.collar("inner step", self.bottom_root_radius, bottom_end, bottom.top);
        let inner_band = recipe.collar(
            "inner band",
            self.bottom_root_radius,
            band / 2.0 + bottom_end,
            inner_step,
        );
        let outer_band = recipe.collar(
            "outer band",
            bottom_wall,
            2.0 * band / 3.0 + bottom_end,
            bottom_wall_top,
        );
        let lip = recipe.collar(
            "lip",
            self.top_root_radius - self.lip_depth,
            self.top_offset,
            top.bottom,
        );
        recipe.seam("inner seam", lip, inner_band);
        recipe.seam("outer seam", outer_band, top_wall_base);
        recipe
    }

    fn expected_counts(&self) -> BufferCounts {
        closed_form_counts(
            self.segments,
            &[(self.top_loops, self.profile), (self.bottom_loops, self.profile)],
            15,
            17,
        )
    }
}

impl CouplerFemaleConfig {
    fn thread(&self, loops: u32, crest_radius: f64, root_radius: f64, z_offset: f64) -> ThreadSpec {
        ThreadSpec {
            segments: self.segments,
            loops,
            crest_radius,
            root_radius,
            profile: self.profile,
            falloff_rate: self.falloff_rate,
            z_offset,
            polarity: Polarity::Female,
        }
    }
}

/// Parameters of the male-to-male coupler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplerMaleConfig {
    /// Vertices per loop.
    pub segments: u32,
    /// Top thread revolutions.
    pub top_loops: u32,
    /// Bottom thread revolutions.
    pub bottom_loops: u32,
    /// Top thread crest radius.
    pub top_crest_radius: f64,
    /// Top thread root radius.
    pub top_root_radius: f64,
    /// Bottom thread crest radius.
    pub bottom_crest_radius: f64,
    /// Bottom thread root radius.
    pub bottom_root_radius: f64,
    /// Cross-section of both threads.
    pub profile: ThreadProfile,
    /// Crest taper sharpness of both threads.
    pub falloff_rate: f64,
    /// Height where the top thread starts.
    pub top_offset: f64,
    /// Height where the bottom thread starts.
    pub bottom_offset: f64,
    /// Wall inside the top thread root.
    pub thickness: f64,
    /// Wall inside the bottom thread root.
    pub bore_step: f64,
}

impl Default for CouplerMaleConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            top_loops: 3,
            bottom_loops: 3,
            top_crest_radius: 19.0,
            top_root_radius: 17.7,
            bottom_crest_radius: 29.5,
            bottom_root_radius: 28.2,
            profile: ThreadProfile::default(),
            falloff_rate: 1.0,
            top_offset: 70.0,
            bottom_offset: 45.0,
            thickness: 2.0,
            bore_step: 7.0,
        }
    }
}

impl PartRecipe for CouplerMaleConfig {
    fn kind(&self) -> PartKind {
        PartKind::CouplerMale
    }

    fn segments(&self) -> u32 {
        self.segments
    }

    fn set_segments(&mut self, segments: u32) {
        self.segments = segments;
    }

    fn recipe(&self) -> Recipe {
        let pitch = self.profile.pitch();
        let top_bore = self.top_root_radius - self.thickness;
        let bottom_bore = self.bottom_root_radius - self.bore_step;
        let span = self.top_offset - self.bottom_offset;
        let middle = span / 2.0 + self.bottom_offset;
        let flange = 2.0 * span / 3.0 + self.bottom_offset;

        let mut recipe = Recipe::new(self.kind().mesh_name(), self.segments);
        let top = recipe.thread(
            "top thread",
            self.thread(self.top_loops, self.top_crest_radius, self.top_root_radius, self.top_offset),
        );
        let top_cap = recipe.collar(
            "top cap",
            top_bore,
            f64::from(self.top_loops + 1) * pitch + self.top_offset,
            top.top,
        );
        let top_bore_base = recipe.collar("top bore", top_bore, self.top_offset, top_cap);

        let bottom = recipe.thread(
            "bottom thread",
            self.thread(
                self.bottom_loops,
                self.bottom_crest_radius,
                self.bottom_root_radius,
                self.bottom_offset,
            ),
        );
        let bottom_cap = recipe.collar("bottom cap", bottom_bore, self.bottom_offset, bottom.bottom);
        let bottom_bore_top = recipe.collar(
            "bottom bore",
            bottom_bore,
            f64::from(self.bottom_loops + 1) * pitch + self.bottom_offset,
            bottom_cap,
        );
        let bore_middle = recipe.collar("bore middle", bottom_bore, middle, bottom_bore_top);
        let top_bore_middle = recipe.collar("top bore middle", top_bore, middle, top_bore_base);
        let flange_outer = recipe.collar("flange outer", self.bottom_root_radius, flange, bottom.top);
        let flange_inner = recipe.collar("flange inner", bottom_bore, flange, flange_outer);
        let flange_top = recipe.collar("flange top", self.top_root_radius, flange, top.bottom);
        recipe.seam("bore seam", top_bore_middle, bore_middle);
        recipe.seam("flange seam", flange_inner, flange_top);
        recipe
    }

    fn expected_counts(&self) -> BufferCounts {
        closed_form_counts(
            self.segments,
            &[(self.top_loops, self.profile), (self.bottom_loops, self.profile)],
            13,
            15,
        )
    }
}

impl CouplerMaleConfig {
    fn thread(&self, loops: u32, crest_radius: f64, root_radius: f64, z_offset: f64) -> ThreadSpec {
        ThreadSpec {
            segments: self.segments,
            loops,
            crest_radius,
            root_radius,
            profile: self.profile,
            falloff_rate: self.falloff_rate,
            z_offset,
            polarity: Polarity::Male,
        }
    }
}
