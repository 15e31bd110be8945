//! 可执行性判定（Gating Evaluator）
//!
//! 缺省谓词一律视为可执行（默认开启），且不会触发上报；
//! 提供的谓词先经 [`Guard`] 包装，每次判定时重新求值，不做缓存。
//!
use crate::guard::Guard;
use crate::reporter::ErrorReporter;
use commands_core::Param;
use commands_core::callable::{AsyncParamPredicate, ParamPredicate, Predicate};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::sync::Arc;

pub fn gate(can_execute: Option<Predicate>, reporter: &ErrorReporter) -> Predicate {
    match can_execute {
        Some(predicate) => predicate.guard(reporter),
        None => Arc::new(|| -> anyhow::Result<bool> { Ok(true) }),
    }
}

pub fn param_gate<P: Param>(
    can_execute: Option<ParamPredicate<P>>,
    reporter: &ErrorReporter,
) -> ParamPredicate<P> {
    match can_execute {
        Some(predicate) => predicate.guard(reporter),
        None => Arc::new(|_: &P| -> anyhow::Result<bool> { Ok(true) }),
    }
}

pub fn async_param_gate<P: Param>(
    can_execute: Option<AsyncParamPredicate<P>>,
    reporter: &ErrorReporter,
) -> AsyncParamPredicate<P> {
    match can_execute {
        Some(predicate) => predicate.guard(reporter),
        None => Arc::new(|_: P| -> BoxFuture<'static, anyhow::Result<bool>> {
            future::ready(Ok(true)).boxed()
        }),
    }
}
