//! 可调用体形态（Callable Shapes）
//!
//! 命令工厂接收的全部执行体与判定谓词均以共享 trait object 形式传递，
//! 以便工厂、装饰层与命令对象之间自由克隆、跨线程使用。
//!
//! 约定：
//! - 执行体/谓词“抛错”即返回 `Err(anyhow::Error)`（或发生 panic）；
//! - 异步执行体接收 `CancellationToken`，取消时应返回 [`CommandError::Cancelled`](crate::error::CommandError::Cancelled)。
//!
use futures_util::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 命令参数：可克隆、可跨线程共享
pub trait Param: Clone + Send + Sync + 'static {}

impl<T> Param for T where T: Clone + Send + Sync + 'static {}

/// 同步无参执行体
pub type Action = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// 同步带参执行体
pub type ParamAction<P> = Arc<dyn Fn(P) -> anyhow::Result<()> + Send + Sync>;

/// 同步无参判定谓词
pub type Predicate = Arc<dyn Fn() -> anyhow::Result<bool> + Send + Sync>;

/// 同步带参判定谓词
pub type ParamPredicate<P> = Arc<dyn Fn(&P) -> anyhow::Result<bool> + Send + Sync>;

/// 异步无参执行体
pub type AsyncAction =
    Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// 异步带参执行体
pub type AsyncParamAction<P> =
    Arc<dyn Fn(P, CancellationToken) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// 异步带参判定谓词
pub type AsyncParamPredicate<P> =
    Arc<dyn Fn(P) -> BoxFuture<'static, anyhow::Result<bool>> + Send + Sync>;

pub fn action<F>(f: F) -> Action
where
    F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn param_action<P, F>(f: F) -> ParamAction<P>
where
    P: Param,
    F: Fn(P) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn() -> anyhow::Result<bool> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn param_predicate<P, F>(f: F) -> ParamPredicate<P>
where
    P: Param,
    F: Fn(&P) -> anyhow::Result<bool> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 将返回 Future 的闭包装箱为 [`AsyncAction`]
pub fn async_action<F, Fut>(f: F) -> AsyncAction
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |token: CancellationToken| -> BoxFuture<'static, anyhow::Result<()>> {
        f(token).boxed()
    })
}

pub fn async_param_action<P, F, Fut>(f: F) -> AsyncParamAction<P>
where
    P: Param,
    F: Fn(P, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(
        move |param: P, token: CancellationToken| -> BoxFuture<'static, anyhow::Result<()>> {
            f(param, token).boxed()
        },
    )
}

pub fn async_param_predicate<P, F, Fut>(f: F) -> AsyncParamPredicate<P>
where
    P: Param,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    Arc::new(move |param: P| -> BoxFuture<'static, anyhow::Result<bool>> { f(param).boxed() })
}
