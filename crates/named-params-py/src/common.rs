use named_params::mesh::MeshError;
use named_params::{ParamDict, ParamError, ParamValue, UnknownKeyPolicy};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};

/// Convert a Python `dict` into a `ParamDict`. Keys must be `str`.
pub fn param_dict_from_py(dict: Option<&PyDict>) -> PyResult<ParamDict> {
    let mut out = ParamDict::new();
    let Some(dict) = dict else {
        return Ok(out);
    };
    for (key, value) in dict.iter() {
        let key: String = key
            .extract()
            .map_err(|_| PyValueError::new_err("named-parameter keys must be str"))?;
        let value = param_value_from_py(&key, value)?;
        out.insert(key, value);
    }
    Ok(out)
}

fn param_value_from_py(key: &str, obj: &PyAny) -> PyResult<ParamValue> {
    // bool first: Python bools also extract as int.
    if obj.is_instance_of::<PyBool>() {
        return Ok(ParamValue::Bool(obj.extract()?));
    }
    if let Ok(i) = obj.extract::<i64>() {
        return Ok(ParamValue::Int(i));
    }
    if let Ok(x) = obj.extract::<f64>() {
        return Ok(ParamValue::Float(x));
    }
    if let Ok(s) = obj.extract::<String>() {
        return Ok(ParamValue::Text(s));
    }
    // Any sequence of 3-sequences: lists, tuples, or a mix.
    if let Ok(points) = obj.extract::<Vec<[f64; 3]>>() {
        return Ok(ParamValue::Points(points));
    }
    Err(PyValueError::new_err(format!(
        "named parameter '{key}' has unsupported type {}",
        obj.get_type().name()?
    )))
}

pub fn parse_policy(s: &str) -> PyResult<UnknownKeyPolicy> {
    s.parse().map_err(PyValueError::new_err)
}

pub fn map_param_err(err: ParamError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn map_mesh_err(err: MeshError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
