//! Progressive radiosity light-transport pipeline.
//!
//! Four stages, leaves first: primitives ([`color`], [`point`], [`vector`])
//! → [`quad`]/[`patch`] data model → [`subdivide`] → [`visibility`] →
//! [`hemicube`] (builds the precomputed hemicube and the per-patch
//! form-factor calculator) → [`solver`] (the progressive Jacobi solve and
//! per-vertex color writeback). [`scene`] bundles the four stages behind a
//! single `build`/`solve` entry point; [`config`] collects the tunables
//! every stage reads from. [`error`] is the typed failure surface every
//! fallible entry point returns.
//!
//! No file I/O and no rendering live here — those are `radiosity-formats`
//! and the surrounding display/CLI glue.

pub mod color;
pub mod config;
pub mod error;
pub mod hemicube;
pub mod patch;
pub mod point;
pub mod quad;
pub mod scene;
pub mod solver;
pub mod subdivide;
pub mod vector;
pub mod visibility;

pub use color::Color;
pub use config::RadiosityConfig;
pub use error::RadiosityError;
pub use hemicube::compute_form_factors;
pub use patch::{Patch, PatchId, PatchSet};
pub use point::{Point, SharedPoint};
pub use quad::Quad;
pub use scene::Scene;
pub use solver::solve_radiosity;
pub use subdivide::subdivide;
pub use vector::Vector;
pub use visibility::compute_visibility;
