//! Progressive radiosity solver.
//!
//! Jacobi iteration: every patch's next exitance is computed purely from
//! the *previous* iteration's exitances (a full gather pass over all
//! patches, then a full scatter pass over all patches) — never the
//! Gauss-Seidel style where a patch sees its neighbors' already-updated
//! values within the same pass, and never "shooting" the single brightest
//! patch's unshot energy per step.

use crate::color::Color;
use crate::config::RadiosityConfig;
use crate::patch::PatchSet;
use log::info;

/// Run `config.iterations` gather/scatter passes over `patches`, then write
/// the final exitance back into every patch's corner points.
///
/// Each iteration is two full sweeps, never interleaved:
/// 1. **Gather** — every patch recomputes `incidence` from the exitances
///    every other patch held *before this iteration started*.
/// 2. **Scatter** — every patch recomputes `exitance` from its own new
///    `incidence`, its reflectance, and its emission.
///
/// Corner colors are only written once, after the configured iteration
/// count, as a final presentation step — not something the solver needs to
/// do on every intermediate exitance.
pub fn solve_radiosity(patches: &mut PatchSet, config: &RadiosityConfig) {
    for iteration in 0..config.iterations {
        let exitances: Vec<Color> = patches.iter().map(|p| p.exitance()).collect();

        for id in patches.ids() {
            let viewable_exitances: Vec<Color> = patches
                .get(id)
                .viewable()
                .iter()
                .map(|&other| exitances[other.0])
                .collect();
            patches.get_mut(id).gather(viewable_exitances.into_iter());
        }

        for patch in patches.iter_mut() {
            patch.scatter(config.color_blending);
        }

        info!("radiosity: completed iteration {}/{}", iteration + 1, config.iterations);
    }

    for patch in patches.iter() {
        patch.update_corner_colors();
    }
}
