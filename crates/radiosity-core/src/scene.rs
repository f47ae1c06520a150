//! Convenience aggregate bundling a scene's quads and patch set.
//!
//! Build once, solve as many times as wanted, without every caller having to
//! thread four loose stage calls by hand.

use crate::config::RadiosityConfig;
use crate::error::RadiosityError;
use crate::patch::PatchSet;
use crate::quad::Quad;
use crate::solver::solve_radiosity;
use crate::visibility::compute_visibility;

/// A scene's input quads plus the patch graph derived from them. Quads are
/// kept alongside the patches because `compute_form_factors` accepts them
/// for API parity with callers that load patches directly from a `.pat`/
/// `.los`/`.for` file.
pub struct Scene {
    pub quads: Vec<Quad>,
    pub patches: PatchSet,
}

impl Scene {
    /// Run subdivision, visibility, and form-factor computation in one
    /// call, in dependency order (subdivider → visibility resolver →
    /// hemicube / form-factor calculator). Does not run the solver — call
    /// [`Scene::solve`] separately, possibly more than once with different
    /// iteration counts.
    pub fn build(quads: Vec<Quad>, config: &RadiosityConfig) -> Result<Scene, RadiosityError> {
        if config.patch_size <= 0.0 {
            return Err(RadiosityError::InvalidInput(format!(
                "patch size must be positive, got {}",
                config.patch_size
            )));
        }
        if config.hemicube_subdivision == 0 {
            return Err(RadiosityError::InvalidInput(
                "hemicube subdivision must be positive".into(),
            ));
        }

        let mut patches = crate::subdivide::subdivide(&quads, config.patch_size, config.reflectance)?;
        compute_visibility(&mut patches);
        crate::hemicube::compute_form_factors(&quads, &mut patches, config.hemicube_subdivision)?;

        Ok(Scene { quads, patches })
    }

    /// Wrap a patch set that was already fully assembled elsewhere (e.g.
    /// loaded straight from a `.for` scene file, which already carries
    /// visibility and form-factor data) without re-running subdivision or
    /// visibility.
    pub fn from_patches(quads: Vec<Quad>, patches: PatchSet) -> Scene {
        Scene { quads, patches }
    }

    /// Run `iterations` Jacobi gather/scatter passes and write per-vertex
    /// colors. `iterations` must be positive; a defensive check, since the
    /// CLI is expected to validate its own arguments first.
    pub fn solve(&mut self, config: &RadiosityConfig) -> Result<(), RadiosityError> {
        if config.iterations == 0 {
            return Err(RadiosityError::InvalidInput(
                "iteration count must be positive".into(),
            ));
        }
        solve_radiosity(&mut self.patches, config);
        Ok(())
    }
}
