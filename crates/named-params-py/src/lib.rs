//! PyO3 bindings for `named_params`.
//!
//! Notes
//! - Keep bindings thin: Python dicts are converted to `ParamDict` in
//!   `common.rs`, everything else happens in the `named_params` crate.
//! - Docstrings live on the `#[pyfunction]`s so `help()` shows them.

use pyo3::prelude::*;

mod apply;
mod common;
mod geom;

#[pymodule]
fn named_params_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", named_params::VERSION)?;
    apply::register(m)?;
    geom::register(m)?;
    Ok(())
}
