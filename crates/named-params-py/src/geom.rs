//! Mesh bindings taking an optional named-parameter dict.

use crate::common::{map_mesh_err, map_param_err, param_dict_from_py};
use named_params::mesh::{compute_face_normals as face_normals, TriangleMesh};
use named_params::{apply_named_parameters, mesh, ops, NamedParameters};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn np_from_py(np: Option<&PyDict>) -> PyResult<NamedParameters> {
    let dict = param_dict_from_py(np)?;
    apply_named_parameters(NamedParameters::default_values(), &dict, &ops::standard())
        .map_err(map_param_err)
}

/// Process a mesh with optional named parameters.
///
/// Parameters
/// ----------
/// mesh_name : str
///     Name of the mesh
/// vertex_count : int
///     Number of vertices
/// np : dict, optional
///     Named parameters. Accepts:
///     - 'tolerance' : float (default: 0.001)
///     - 'max_iterations' : int (default: 100)
///     - 'verbose' : bool (default: False)
///
/// Returns
/// -------
/// str
///     Processing result message
///
/// Examples
/// --------
/// >>> result = process_mesh("cube", 8)
/// >>> result = process_mesh("cube", 8, {"tolerance": 0.0001})
#[pyfunction]
#[pyo3(signature = (mesh_name, vertex_count, np = None))]
pub fn process_mesh(mesh_name: &str, vertex_count: usize, np: Option<&PyDict>) -> PyResult<String> {
    let np = np_from_py(np)?;
    Ok(mesh::process_mesh(mesh_name, vertex_count, &np))
}

/// Compute unit face normals of a triangle mesh.
///
/// Parameters
/// ----------
/// points : sequence of [float, float, float]
/// faces : sequence of [int, int, int]
///     Counter-clockwise vertex indices.
/// np : dict, optional
///     ``vertex_point_map`` (list of points), ``tolerance`` (faces with a
///     smaller area get a zero normal), ``verbose``, ``geom_traits``.
///
/// Returns
/// -------
/// list of (float, float, float)
#[pyfunction]
#[pyo3(signature = (points, faces, np = None))]
pub fn compute_face_normals(
    points: Vec<[f64; 3]>,
    faces: Vec<[usize; 3]>,
    np: Option<&PyDict>,
) -> PyResult<Vec<(f64, f64, f64)>> {
    let np = np_from_py(np)?;
    let mesh = TriangleMesh::from_arrays(&points, faces).map_err(map_mesh_err)?;
    let normals = face_normals(&mesh, &np).map_err(map_mesh_err)?;
    Ok(normals.iter().map(|n| (n.x, n.y, n.z)).collect())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_mesh, m)?)?;
    m.add_function(wrap_pyfunction!(compute_face_normals, m)?)?;
    Ok(())
}
