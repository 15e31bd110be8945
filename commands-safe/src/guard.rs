//! 故障隔离适配器（Error-Guarding Adapter）
//!
//! 对每种可调用体形态各提供一个 [`Guard`] 实现，共享同一个故障处理核心 [`contain`]：
//! - 正常完成：结果原样返回；
//! - 返回 `Err` 或发生 panic：调用上报回调恰好一次，然后以兜底值完成
//!   （动作 `Ok(())`，谓词 `Ok(false)`，即“出错的判定必须关闭执行”）；
//! - 异步动作返回 [`CommandError::Cancelled`] 时视为取消而非故障，原样透传、不上报。
//!
//! 适配器本身不做任何同步，也不拦截取消令牌。
//!
use crate::reporter::ErrorReporter;
use commands_core::CommandError;
use commands_core::callable::{
    Action, AsyncAction, AsyncParamAction, AsyncParamPredicate, Param, ParamAction,
    ParamPredicate, Predicate,
};
use futures_util::future::{BoxFuture, FutureExt};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use tokio_util::sync::CancellationToken;

/// 将可调用体包装为故障隔离版本，签名保持不变
pub trait Guard: Sized {
    fn guard(self, reporter: &ErrorReporter) -> Self;
}

/// 故障处理核心：成功值原样返回；错误与 panic 上报后返回兜底值
fn contain<T>(
    reporter: &ErrorReporter,
    outcome: thread::Result<anyhow::Result<T>>,
    fallback: T,
) -> T {
    match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            reporter.report(err);
            fallback
        }
        Err(payload) => {
            reporter.report(CommandError::from_panic(payload).into());
            fallback
        }
    }
}

/// 动作专用：取消结果原样透传，其余交给 [`contain`]
fn contain_action(
    reporter: &ErrorReporter,
    outcome: thread::Result<anyhow::Result<()>>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(Err(err)) if CommandError::is_cancellation(&err) => Err(err),
        other => Ok(contain(reporter, other, ())),
    }
}

/// 驱动异步可调用体；构造 Future 时的同步 panic 与轮询中的 panic 都会被捕获
async fn run_caught<T>(
    started: thread::Result<BoxFuture<'static, anyhow::Result<T>>>,
) -> thread::Result<anyhow::Result<T>> {
    match started {
        Ok(running) => AssertUnwindSafe(running).catch_unwind().await,
        Err(payload) => Err(payload),
    }
}

impl Guard for Action {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let execute = self;
        let reporter = reporter.clone();

        Arc::new(move || -> anyhow::Result<()> {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| execute()));
            Ok(contain(&reporter, outcome, ()))
        })
    }
}

impl<P: Param> Guard for ParamAction<P> {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let execute = self;
        let reporter = reporter.clone();

        Arc::new(move |param: P| -> anyhow::Result<()> {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| execute(param)));
            Ok(contain(&reporter, outcome, ()))
        })
    }
}

impl Guard for Predicate {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let predicate = self;
        let reporter = reporter.clone();

        Arc::new(move || -> anyhow::Result<bool> {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| predicate()));
            Ok(contain(&reporter, outcome, false))
        })
    }
}

impl<P: Param> Guard for ParamPredicate<P> {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let predicate = self;
        let reporter = reporter.clone();

        Arc::new(move |param: &P| -> anyhow::Result<bool> {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| predicate(param)));
            Ok(contain(&reporter, outcome, false))
        })
    }
}

impl Guard for AsyncAction {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let execute = self;
        let reporter = reporter.clone();

        Arc::new(
            move |token: CancellationToken| -> BoxFuture<'static, anyhow::Result<()>> {
                let started = panic::catch_unwind(AssertUnwindSafe(|| execute(token)));
                let reporter = reporter.clone();

                async move { contain_action(&reporter, run_caught(started).await) }.boxed()
            },
        )
    }
}

impl<P: Param> Guard for AsyncParamAction<P> {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let execute = self;
        let reporter = reporter.clone();

        Arc::new(
            move |param: P, token: CancellationToken| -> BoxFuture<'static, anyhow::Result<()>> {
                let started = panic::catch_unwind(AssertUnwindSafe(|| execute(param, token)));
                let reporter = reporter.clone();

                async move { contain_action(&reporter, run_caught(started).await) }.boxed()
            },
        )
    }
}

impl<P: Param> Guard for AsyncParamPredicate<P> {
    fn guard(self, reporter: &ErrorReporter) -> Self {
        let predicate = self;
        let reporter = reporter.clone();

        Arc::new(move |param: P| -> BoxFuture<'static, anyhow::Result<bool>> {
            let started = panic::catch_unwind(AssertUnwindSafe(|| predicate(param)));
            let reporter = reporter.clone();

            async move { Ok(contain(&reporter, run_caught(started).await, false)) }.boxed()
        })
    }
}
