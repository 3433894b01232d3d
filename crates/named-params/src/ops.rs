//! Parameter operators: a key paired with the logic that applies a value.
//!
//! An operator is generic over the configuration type `C` so callers can
//! build their own accumulators; the `NamedParameters` set below covers the
//! geometry functions in this crate.

use crate::error::ParamError;
use crate::params::{Kernel, NamedParameters, VertexPointMap};
use crate::value::ParamValue;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type ApplyFn<C> = dyn Fn(C, &ParamValue) -> Result<C, ParamError> + Send + Sync;

/// Immutable (key, apply) pair. Cloning shares the closure.
pub struct ParamOp<C> {
    key: Cow<'static, str>,
    apply: Arc<ApplyFn<C>>,
}

impl<C> ParamOp<C> {
    pub fn new<F>(key: impl Into<Cow<'static, str>>, apply: F) -> Self
    where
        F: Fn(C, &ParamValue) -> Result<C, ParamError> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            apply: Arc::new(apply),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Produce the next configuration from `config` and the matched value.
    #[inline]
    pub fn apply(&self, config: C, value: &ParamValue) -> Result<C, ParamError> {
        (self.apply)(config, value)
    }
}

impl<C> Clone for ParamOp<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<C> fmt::Debug for ParamOp<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamOp").field("key", &self.key).finish()
    }
}

pub const VERBOSE: &str = "verbose";
pub const VERTEX_POINT_MAP: &str = "vertex_point_map";
pub const GEOM_TRAITS: &str = "geom_traits";
pub const TOLERANCE: &str = "tolerance";
pub const MAX_ITERATIONS: &str = "max_iterations";

/// Keys of [`standard`], in order.
pub const STANDARD_KEYS: [&str; 5] = [VERBOSE, VERTEX_POINT_MAP, GEOM_TRAITS, TOLERANCE, MAX_ITERATIONS];

/// `verbose`: bool (or 0/1).
pub fn verbose() -> ParamOp<NamedParameters> {
    ParamOp::new(VERBOSE, |np: NamedParameters, v| {
        Ok(np.verbose(v.as_bool(VERBOSE)?))
    })
}

/// `vertex_point_map`: non-negative int handle, or a list of points.
pub fn vertex_point_map() -> ParamOp<NamedParameters> {
    ParamOp::new(VERTEX_POINT_MAP, |np: NamedParameters, v| {
        let vpm = match v {
            ParamValue::Int(h) => {
                let h = usize::try_from(*h).map_err(|_| {
                    ParamError::invalid(VERTEX_POINT_MAP, format!("handle must be >= 0, got {h}"))
                })?;
                VertexPointMap::Handle(h)
            }
            _ => {
                let points = v.as_points(VERTEX_POINT_MAP).map_err(|_| {
                    ParamError::mismatch(VERTEX_POINT_MAP, "int handle or points", v.kind())
                })?;
                if points.is_empty() {
                    return Err(ParamError::invalid(VERTEX_POINT_MAP, "point list is empty"));
                }
                VertexPointMap::Points(points.to_vec())
            }
        };
        Ok(np.vertex_point_map(vpm))
    })
}

/// `geom_traits`: non-negative int handle, or a kernel name.
pub fn geom_traits() -> ParamOp<NamedParameters> {
    ParamOp::new(GEOM_TRAITS, |np: NamedParameters, v| {
        let kernel = match v {
            ParamValue::Int(h) => {
                let h = u64::try_from(*h).map_err(|_| {
                    ParamError::invalid(GEOM_TRAITS, format!("handle must be >= 0, got {h}"))
                })?;
                Kernel::Handle(h)
            }
            _ => {
                let name = v
                    .as_str(GEOM_TRAITS)
                    .map_err(|_| ParamError::mismatch(GEOM_TRAITS, "int handle or kernel name", v.kind()))?
                    .trim();
                if name.is_empty() {
                    return Err(ParamError::invalid(GEOM_TRAITS, "kernel name is empty"));
                }
                Kernel::Name(name.to_string())
            }
        };
        Ok(np.geom_traits(kernel))
    })
}

/// `tolerance`: finite float > 0.
pub fn tolerance() -> ParamOp<NamedParameters> {
    ParamOp::new(TOLERANCE, |np: NamedParameters, v| {
        let tol = v.as_f64(TOLERANCE)?;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ParamError::invalid(
                TOLERANCE,
                format!("must be finite and > 0, got {tol}"),
            ));
        }
        Ok(np.tolerance(tol))
    })
}

/// `max_iterations`: int in `0..=u32::MAX`.
pub fn max_iterations() -> ParamOp<NamedParameters> {
    ParamOp::new(MAX_ITERATIONS, |np: NamedParameters, v| {
        let n = v.as_i64(MAX_ITERATIONS)?;
        let n = u32::try_from(n).map_err(|_| {
            ParamError::invalid(MAX_ITERATIONS, format!("out of range: {n}"))
        })?;
        Ok(np.max_iterations(n))
    })
}

/// All geometry operators, in `STANDARD_KEYS` order.
pub fn standard() -> Vec<ParamOp<NamedParameters>> {
    vec![
        verbose(),
        vertex_point_map(),
        geom_traits(),
        tolerance(),
        max_iterations(),
    ]
}

/// Look up a geometry operator by its key.
pub fn by_name(name: &str) -> Option<ParamOp<NamedParameters>> {
    match name {
        VERBOSE => Some(verbose()),
        VERTEX_POINT_MAP => Some(vertex_point_map()),
        GEOM_TRAITS => Some(geom_traits()),
        TOLERANCE => Some(tolerance()),
        MAX_ITERATIONS => Some(max_iterations()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: ParamOp<NamedParameters>, v: impl Into<ParamValue>) -> Result<NamedParameters, ParamError> {
        op.apply(NamedParameters::default_values(), &v.into())
    }

    #[test]
    fn standard_matches_keys() {
        let keys: Vec<_> = standard().iter().map(|op| op.key().to_string()).collect();
        assert_eq!(keys, STANDARD_KEYS);
        for key in STANDARD_KEYS {
            assert_eq!(by_name(key).map(|op| op.key().to_string()), Some(key.to_string()));
        }
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn vertex_point_map_accepts_handle_and_points() {
        let np = run(vertex_point_map(), 42i64).unwrap();
        assert_eq!(np.vertex_point_map, Some(VertexPointMap::Handle(42)));
        let np = run(vertex_point_map(), vec![[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(np.vertex_point_map, Some(VertexPointMap::Points(vec![[1.0, 2.0, 3.0]])));
    }

    #[test]
    fn vertex_point_map_rejects_bad_values() {
        assert!(matches!(run(vertex_point_map(), -1i64), Err(ParamError::InvalidValue { .. })));
        assert!(matches!(
            run(vertex_point_map(), Vec::<[f64; 3]>::new()),
            Err(ParamError::InvalidValue { .. })
        ));
        assert!(matches!(
            run(vertex_point_map(), true),
            Err(ParamError::TypeMismatch { found: "bool", .. })
        ));
    }

    #[test]
    fn geom_traits_accepts_handle_and_name() {
        assert_eq!(run(geom_traits(), 99i64).unwrap().geom_traits, Some(Kernel::Handle(99)));
        assert_eq!(
            run(geom_traits(), " epeck ").unwrap().geom_traits,
            Some(Kernel::Name("epeck".into()))
        );
        assert!(matches!(run(geom_traits(), "  "), Err(ParamError::InvalidValue { .. })));
        assert_eq!(
            run(geom_traits(), 0.5).unwrap_err(),
            ParamError::TypeMismatch {
                key: GEOM_TRAITS.into(),
                expected: "int handle or kernel name",
                found: "float",
            }
        );
    }

    #[test]
    fn tolerance_must_be_positive_and_finite() {
        assert_eq!(run(tolerance(), 1e-4).unwrap().tolerance, Some(1e-4));
        assert_eq!(run(tolerance(), 2i64).unwrap().tolerance, Some(2.0));
        assert!(run(tolerance(), 0.0).is_err());
        assert!(run(tolerance(), f64::NAN).is_err());
        assert!(run(tolerance(), "small").is_err());
    }

    #[test]
    fn max_iterations_must_fit_u32() {
        assert_eq!(run(max_iterations(), 500i64).unwrap().max_iterations, Some(500));
        assert!(run(max_iterations(), -3i64).is_err());
        assert!(run(max_iterations(), i64::from(u32::MAX) + 1).is_err());
        assert!(run(max_iterations(), 10.0).is_err());
    }

    #[test]
    fn cloned_op_shares_behavior() {
        let op = verbose();
        let twin = op.clone();
        assert_eq!(format!("{twin:?}"), "ParamOp { key: \"verbose\" }");
        let a = op.apply(NamedParameters::default_values(), &ParamValue::Bool(true)).unwrap();
        let b = twin.apply(NamedParameters::default_values(), &ParamValue::Bool(true)).unwrap();
        assert_eq!(a, b);
    }
}
