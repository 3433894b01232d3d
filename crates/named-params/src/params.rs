//! The configuration accumulator for geometry functions.
//!
//! `NamedParameters` mirrors the chained-setter style of geometry kernels:
//! every setter consumes `self` and returns an updated copy, and the copy
//! remembers the setter call as one link of its parameter chain
//! (`default_values().verbose(true).tolerance(0.0001)`).
//!
//! Fields are `Option`s: `None` means "caller did not say", and the
//! `*_or_default` accessors resolve against `crate::cfg`.

use crate::cfg::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where vertex positions come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum VertexPointMap {
    /// Handle of a point map registered on the mesh.
    Handle(usize),
    /// Explicit positions, one per vertex.
    Points(Vec<[f64; 3]>),
}

impl fmt::Display for VertexPointMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(h) => write!(f, "vpm_{h}"),
            Self::Points(p) => write!(f, "points[{}]", p.len()),
        }
    }
}

/// Geometry kernel selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Kernel {
    Handle(u64),
    Name(String),
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(h) => write!(f, "kernel_{h}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// Accumulated named-parameter settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NamedParameters {
    pub verbose: Option<bool>,
    pub vertex_point_map: Option<VertexPointMap>,
    pub geom_traits: Option<Kernel>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<u32>,
    #[serde(skip)]
    links: Vec<String>,
}

impl NamedParameters {
    /// Empty configuration; every accessor reports its default.
    #[inline]
    pub fn default_values() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = Some(on);
        self.link(format!("verbose({on})"))
    }

    pub fn vertex_point_map(mut self, vpm: VertexPointMap) -> Self {
        let link = format!("vertex_point_map({vpm})");
        self.vertex_point_map = Some(vpm);
        self.link(link)
    }

    pub fn geom_traits(mut self, kernel: Kernel) -> Self {
        let link = format!("geom_traits({kernel})");
        self.geom_traits = Some(kernel);
        self.link(link)
    }

    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self.link(format!("tolerance({tol})"))
    }

    pub fn max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self.link(format!("max_iterations({n})"))
    }

    fn link(mut self, link: String) -> Self {
        self.links.push(link);
        self
    }

    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    #[inline]
    pub fn tolerance_or_default(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    #[inline]
    pub fn max_iterations_or_default(&self) -> u32 {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    /// Setter calls in the order they were applied.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Full chain, starting at `default_values()`.
    pub fn chain(&self) -> String {
        let mut out = String::from("default_values()");
        for link in &self.links {
            out.push('.');
            out.push_str(link);
        }
        out
    }
}

impl fmt::Display for NamedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain())
    }
}
