//! Named-parameter applicator.
//!
//! Purpose
//! - Turn a run-time dictionary into a configuration value by folding an
//!   ordered operator list over it.
//!
//! Semantics
//! - Operators run in list order. For each operator, if its key is in the
//!   dictionary the operator is applied once and its result becomes the next
//!   configuration; otherwise the configuration passes through unchanged.
//! - Dictionary iteration order never matters: values are only looked up
//!   by key.
//! - A repeated operator key applies once per occurrence.
//! - Keys no operator consumes are handled by `UnknownKeyPolicy`
//!   (default: ignored).
//! - The first operator error stops the fold.

use crate::cfg::{ApplyCfg, UnknownKeyPolicy};
use crate::error::ParamError;
use crate::ops::ParamOp;
use crate::value::ParamDict;
use serde::Serialize;

/// What happened to each dictionary key during one fold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Keys of applied operators, in operator order.
    pub matched: Vec<String>,
    /// Dictionary keys no operator consumed, sorted.
    pub unknown: Vec<String>,
}

/// Operator list plus configuration, reusable across calls.
#[derive(Clone, Debug)]
pub struct Applicator<C> {
    ops: Vec<ParamOp<C>>,
    cfg: ApplyCfg,
}

impl<C> Applicator<C> {
    pub fn new(ops: Vec<ParamOp<C>>) -> Self {
        Self {
            ops,
            cfg: ApplyCfg::default(),
        }
    }

    pub fn with_cfg(mut self, cfg: ApplyCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn apply(&self, base: C, dict: &ParamDict) -> Result<C, ParamError> {
        fold_ops(base, dict, &self.ops, self.cfg).map(|(config, _)| config)
    }

    pub fn apply_with_report(&self, base: C, dict: &ParamDict) -> Result<(C, ApplyReport), ParamError> {
        fold_ops(base, dict, &self.ops, self.cfg)
    }
}

/// Fold `ops` over `dict` starting at `base`, ignoring unknown keys.
pub fn apply_named_parameters<C>(
    base: C,
    dict: &ParamDict,
    ops: &[ParamOp<C>],
) -> Result<C, ParamError> {
    fold_ops(base, dict, ops, ApplyCfg::default()).map(|(config, _)| config)
}

/// The fold behind every entry point.
pub fn fold_ops<C>(
    base: C,
    dict: &ParamDict,
    ops: &[ParamOp<C>],
    cfg: ApplyCfg,
) -> Result<(C, ApplyReport), ParamError> {
    let mut unknown: Vec<String> = dict
        .keys()
        .filter(|key| !ops.iter().any(|op| op.key() == *key))
        .map(str::to_string)
        .collect();
    unknown.sort();

    match cfg.unknown {
        UnknownKeyPolicy::Ignore => {}
        UnknownKeyPolicy::Warn => {
            for key in &unknown {
                tracing::warn!(key = %key, "ignoring unknown named parameter");
            }
        }
        UnknownKeyPolicy::Reject => {
            if !unknown.is_empty() {
                return Err(ParamError::UnknownKeys(unknown));
            }
        }
    }

    let mut config = base;
    let mut matched = Vec::new();
    for op in ops {
        tracing::trace!(op = op.key(), "trying operator");
        match dict.get(op.key()) {
            Some(value) => {
                config = op.apply(config, value)?;
                tracing::debug!(op = op.key(), value = ?value, "applied named parameter");
                matched.push(op.key().to_string());
            }
            None => {
                tracing::trace!(op = op.key(), "no match, next operator");
            }
        }
    }
    tracing::trace!(matched = matched.len(), unknown = unknown.len(), "operator list exhausted");

    Ok((config, ApplyReport { matched, unknown }))
}
