//! Applicator bindings: dict in, configuration dict out.

use crate::common::{map_param_err, param_dict_from_py, parse_policy};
use named_params::{ops, Applicator, ApplyCfg, Kernel, NamedParameters, VertexPointMap};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

/// Fold named parameters into a configuration.
///
/// Parameters
/// ----------
/// params : dict
///     Named parameters, e.g. ``{"verbose": True, "vertex_point_map": 42}``.
/// ops : list of str, optional
///     Operator keys in application order. Defaults to all of
///     ``verbose``, ``vertex_point_map``, ``geom_traits``, ``tolerance``,
///     ``max_iterations``.
/// unknown : str, optional
///     ``"ignore"`` (default), ``"warn"`` or ``"reject"`` for keys no
///     operator consumes.
///
/// Returns
/// -------
/// dict
///     ``chain``, ``config``, ``matched`` and ``unknown``.
///
/// Examples
/// --------
/// >>> apply_named_parameters({"vertex_point_map": 42, "unknown": 1})["chain"]
/// 'default_values().vertex_point_map(vpm_42)'
#[pyfunction]
#[pyo3(signature = (params, ops = None, unknown = "ignore"))]
pub fn apply_named_parameters(
    py: Python<'_>,
    params: &PyDict,
    ops: Option<Vec<String>>,
    unknown: &str,
) -> PyResult<PyObject> {
    let dict = param_dict_from_py(Some(params))?;
    let policy = parse_policy(unknown)?;
    let op_list = match ops {
        None => ops::standard(),
        Some(names) => names
            .iter()
            .map(|name| {
                ops::by_name(name)
                    .ok_or_else(|| PyValueError::new_err(format!("unknown operator '{name}'")))
            })
            .collect::<PyResult<Vec<_>>>()?,
    };
    let (np, report) = Applicator::new(op_list)
        .with_cfg(ApplyCfg::with_unknown(policy))
        .apply_with_report(NamedParameters::default_values(), &dict)
        .map_err(map_param_err)?;

    let out = PyDict::new(py);
    out.set_item("chain", np.chain())?;
    out.set_item("config", config_to_py(py, &np)?)?;
    out.set_item("matched", PyList::new(py, &report.matched))?;
    out.set_item("unknown", PyList::new(py, &report.unknown))?;
    Ok(out.into())
}

fn config_to_py(py: Python<'_>, np: &NamedParameters) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("verbose", np.verbose)?;
    match &np.vertex_point_map {
        None => dict.set_item("vertex_point_map", py.None())?,
        Some(VertexPointMap::Handle(h)) => dict.set_item("vertex_point_map", *h)?,
        Some(VertexPointMap::Points(p)) => {
            let pts = PyList::empty(py);
            for [x, y, z] in p {
                pts.append((*x, *y, *z))?;
            }
            dict.set_item("vertex_point_map", pts)?
        }
    }
    match &np.geom_traits {
        None => dict.set_item("geom_traits", py.None())?,
        Some(Kernel::Handle(h)) => dict.set_item("geom_traits", *h)?,
        Some(Kernel::Name(n)) => dict.set_item("geom_traits", n)?,
    }
    dict.set_item("tolerance", np.tolerance)?;
    dict.set_item("max_iterations", np.max_iterations)?;
    Ok(dict.into())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apply_named_parameters, m)?)?;
    Ok(())
}
