//! Pipeline-wide tuning knobs, threaded from the CLI through every stage.

use crate::patch::DEFAULT_REFLECTANCE;

/// Configuration for a full `subdivide -> visibility -> form factors ->
/// solve` run. Every field has a sensible default, so callers can override
/// only what they care about.
#[derive(Debug, Clone, Copy)]
pub struct RadiosityConfig {
    /// Maximum edge length of a subdivided patch.
    pub patch_size: f32,
    /// Diffuse reflectance applied to every patch built by `subdivide`.
    pub reflectance: f32,
    /// Cells per edge of each hemicube face, default 25.
    pub hemicube_subdivision: u32,
    /// Number of Jacobi gather/scatter passes.
    pub iterations: u32,
    /// `true` selects the componentwise color-blend scatter variant
    /// (`incidence ⊙ (color * reflectance) + emission`); `false` selects
    /// the scalar-reflectance variant (`incidence * reflectance +
    /// emission`).
    pub color_blending: bool,
}

impl Default for RadiosityConfig {
    fn default() -> Self {
        Self {
            patch_size: 1.0,
            reflectance: DEFAULT_REFLECTANCE,
            hemicube_subdivision: 25,
            iterations: 10,
            color_blending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reflectance_matches_patch_default() {
        assert_eq!(RadiosityConfig::default().reflectance, DEFAULT_REFLECTANCE);
    }
}
