use crate::callable::{
    Action, AsyncAction, AsyncParamAction, AsyncParamPredicate, Param, ParamAction,
    ParamPredicate, Predicate,
};
use crate::options::CommandOptions;

/// 命令工厂（Command Factory）
///
/// - 为四类命令形态（无参/带参 × 同步/异步）提供构造入口；
/// - 返回可调用、可观察的命令对象，其取消、重入与可执行性通知由实现方决定；
/// - 带参异步命令按谓词形态（同步/异步）分为两个入口；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
///
/// 所有构造方法都标注了 `#[track_caller]`：`options.name` 缺省时，
/// 实现方可通过 [`CommandOptions::resolve_name`] 取得调用方位置作为名称。
pub trait Commands: Send + Sync {
    type Command;
    type ParamCommand<P: Param>;
    type AsyncCommand;
    type AsyncParamCommand<P: Param>;

    /// 同步无参命令
    #[track_caller]
    fn command(
        &self,
        execute: Action,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> Self::Command;

    /// 同步带参命令
    #[track_caller]
    fn param_command<P: Param>(
        &self,
        execute: ParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::ParamCommand<P>;

    /// 异步无参命令（同步谓词）
    #[track_caller]
    fn async_command(
        &self,
        execute: AsyncAction,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> Self::AsyncCommand;

    /// 异步带参命令（同步谓词）
    #[track_caller]
    fn async_param_command<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::AsyncParamCommand<P>;

    /// 异步带参命令（异步谓词）
    #[track_caller]
    fn async_param_command_with_async_gate<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<AsyncParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::AsyncParamCommand<P>;
}
