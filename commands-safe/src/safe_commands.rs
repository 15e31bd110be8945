use crate::gate::{async_param_gate, gate, param_gate};
use crate::guard::Guard;
use crate::reporter::ErrorReporter;
use commands_core::callable::{
    Action, AsyncAction, AsyncParamAction, AsyncParamPredicate, ParamAction, ParamPredicate,
    Predicate,
};
use commands_core::{CommandOptions, Commands, Param};

/// 安全命令工厂（装饰器）
///
/// - 与被装饰的工厂实现同一契约，命令对象类型也完全相同，可直接替换；
/// - 每个构造入口都会包装执行体、组合判定谓词，再连同 `options` 原样转发；
/// - 除上报回调外不持有任何状态；构造本身不会失败，故障延迟到调用时处理。
#[derive(Clone, Debug)]
pub struct SafeCommands<C> {
    commands: C,
    reporter: ErrorReporter,
}

impl<C: Commands> SafeCommands<C> {
    pub fn new(commands: C, reporter: ErrorReporter) -> Self {
        Self { commands, reporter }
    }

    /// 被装饰的工厂
    pub fn inner(&self) -> &C {
        &self.commands
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }
}

impl<C: Commands> Commands for SafeCommands<C> {
    type Command = C::Command;
    type ParamCommand<P: Param> = C::ParamCommand<P>;
    type AsyncCommand = C::AsyncCommand;
    type AsyncParamCommand<P: Param> = C::AsyncParamCommand<P>;

    fn command(
        &self,
        execute: Action,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> Self::Command {
        self.commands.command(
            execute.guard(&self.reporter),
            Some(gate(can_execute, &self.reporter)),
            options,
        )
    }

    fn param_command<P: Param>(
        &self,
        execute: ParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::ParamCommand<P> {
        self.commands.param_command(
            execute.guard(&self.reporter),
            Some(param_gate(can_execute, &self.reporter)),
            options,
        )
    }

    fn async_command(
        &self,
        execute: AsyncAction,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> Self::AsyncCommand {
        self.commands.async_command(
            execute.guard(&self.reporter),
            Some(gate(can_execute, &self.reporter)),
            options,
        )
    }

    fn async_param_command<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::AsyncParamCommand<P> {
        self.commands.async_param_command(
            execute.guard(&self.reporter),
            Some(param_gate(can_execute, &self.reporter)),
            options,
        )
    }

    fn async_param_command_with_async_gate<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<AsyncParamPredicate<P>>,
        options: CommandOptions,
    ) -> Self::AsyncParamCommand<P> {
        self.commands.async_param_command_with_async_gate(
            execute.guard(&self.reporter),
            Some(async_param_gate(can_execute, &self.reporter)),
            options,
        )
    }
}
