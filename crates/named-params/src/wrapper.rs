//! Bind a function to an operator list so it can be called with a dictionary.
//!
//! This is the shape a binding layer exports: `f(input, {"verbose": true})`
//! becomes "apply the dictionary, then call the native function with the
//! resulting configuration".

use crate::apply::Applicator;
use crate::cfg::ApplyCfg;
use crate::error::ParamError;
use crate::ops::ParamOp;
use crate::params::NamedParameters;
use crate::value::ParamDict;

type BoundFn<I, R, C> = dyn Fn(I, &C) -> R + Send + Sync;

pub struct NamedParameterWrapper<I, R, C = NamedParameters> {
    name: String,
    applicator: Applicator<C>,
    func: Box<BoundFn<I, R, C>>,
}

impl<I, R, C: Default> NamedParameterWrapper<I, R, C> {
    pub fn new<F>(name: impl Into<String>, ops: Vec<ParamOp<C>>, func: F) -> Self
    where
        F: Fn(I, &C) -> R + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            applicator: Applicator::new(ops),
            func: Box::new(func),
        }
    }

    pub fn with_cfg(mut self, cfg: ApplyCfg) -> Self {
        self.applicator = self.applicator.with_cfg(cfg);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply `dict` to `C::default()` and call the bound function.
    pub fn call(&self, input: I, dict: &ParamDict) -> Result<R, ParamError> {
        let config = self.applicator.apply(C::default(), dict)?;
        tracing::debug!(function = %self.name, "calling wrapped function");
        Ok((self.func)(input, &config))
    }
}
