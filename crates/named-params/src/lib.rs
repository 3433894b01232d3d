//! Named-parameter dispatch for geometry functions.
//!
//! A scripting caller passes optional settings as a dictionary
//! (`{"verbose": true, "vertex_point_map": 42}`). This crate folds an ordered
//! list of parameter operators over that dictionary to build a typed,
//! immutable configuration, then hands it to the geometry function.
//!
//! Layout
//! - `value`: dynamic values and the input dictionary.
//! - `ops`: operator type and the standard geometry operators.
//! - `params`: the `NamedParameters` accumulator and its chain trace.
//! - `apply`: the fold itself, plus the unknown-key policy.
//! - `wrapper`: bind a function to an operator list.
//! - `mesh`: triangle-mesh functions that consume the configuration.

pub mod apply;
pub mod cfg;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod params;
pub mod value;
pub mod wrapper;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use apply::{apply_named_parameters, fold_ops, ApplyReport, Applicator};
pub use cfg::{ApplyCfg, UnknownKeyPolicy};
pub use error::ParamError;
pub use ops::ParamOp;
pub use params::{Kernel, NamedParameters, VertexPointMap};
pub use value::{ParamDict, ParamValue};
pub use wrapper::NamedParameterWrapper;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::apply::{apply_named_parameters, Applicator};
    pub use crate::cfg::{ApplyCfg, UnknownKeyPolicy};
    pub use crate::mesh::{compute_face_normals, process_mesh, smooth_shape, TriangleMesh};
    pub use crate::ops::{self, ParamOp};
    pub use crate::params::{Kernel, NamedParameters, VertexPointMap};
    pub use crate::value::{ParamDict, ParamValue};
}

#[cfg(test)]
mod tests;
