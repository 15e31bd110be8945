use crate::async_command::{AsyncCommand, AsyncParamCommand, ParamGate};
use crate::callable::{
    Action, AsyncAction, AsyncParamAction, AsyncParamPredicate, Param, ParamAction,
    ParamPredicate, Predicate,
};
use crate::command::{Command, ParamCommand};
use crate::commands::Commands;
use crate::options::CommandOptions;
use crate::state::CommandState;
use std::sync::Arc;

/// 进程内的命令工厂实现
/// - 命令对象内部共享状态，可克隆后在多个任务间使用
/// - 不做故障隔离：执行体/谓词的错误原样返回，panic 原样展开
#[derive(Clone, Copy, Debug)]
pub struct BasicCommands {
    /// 每个命令可执行性通知通道的容量
    notification_capacity: usize,
}

impl Default for BasicCommands {
    fn default() -> Self {
        Self {
            notification_capacity: 16,
        }
    }
}

impl BasicCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notification_capacity(capacity: usize) -> Self {
        Self {
            notification_capacity: capacity,
        }
    }

    #[track_caller]
    fn state(&self, options: &CommandOptions) -> Arc<CommandState> {
        let name = options.resolve_name();
        tracing::trace!(command = %name, force_execution = options.force_execution, "command created");

        Arc::new(CommandState::new(
            name,
            options.force_execution,
            self.notification_capacity,
        ))
    }
}

impl Commands for BasicCommands {
    type Command = Command;
    type ParamCommand<P: Param> = ParamCommand<P>;
    type AsyncCommand = AsyncCommand;
    type AsyncParamCommand<P: Param> = AsyncParamCommand<P>;

    fn command(
        &self,
        execute: Action,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> Command {
        Command::new(self.state(&options), execute, can_execute)
    }

    fn param_command<P: Param>(
        &self,
        execute: ParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> ParamCommand<P> {
        ParamCommand::new(self.state(&options), execute, can_execute)
    }

    fn async_command(
        &self,
        execute: AsyncAction,
        can_execute: Option<Predicate>,
        options: CommandOptions,
    ) -> AsyncCommand {
        AsyncCommand::new(self.state(&options), execute, can_execute)
    }

    fn async_param_command<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
        options: CommandOptions,
    ) -> AsyncParamCommand<P> {
        AsyncParamCommand::new(
            self.state(&options),
            execute,
            can_execute.map(ParamGate::Sync),
        )
    }

    fn async_param_command_with_async_gate<P: Param>(
        &self,
        execute: AsyncParamAction<P>,
        can_execute: Option<AsyncParamPredicate<P>>,
        options: CommandOptions,
    ) -> AsyncParamCommand<P> {
        AsyncParamCommand::new(
            self.state(&options),
            execute,
            can_execute.map(ParamGate::Async),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::{action, param_action, param_predicate, predicate};
    use crate::error::CommandError;
    use crate::state::ObservableCommand;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn command_runs_body_and_reports_name() {
        let commands = BasicCommands::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let cmd = commands.command(
            action(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            None,
            CommandOptions::named("count"),
        );

        assert_eq!(cmd.name(), "count");
        assert!(cmd.can_execute().unwrap());
        cmd.execute().unwrap();
        cmd.execute().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(!cmd.is_executing());
    }

    #[test]
    fn default_name_is_call_site() {
        let commands = BasicCommands::new();
        let cmd = commands.command(action(|| Ok(())), None, CommandOptions::default());
        assert!(
            cmd.name().contains("basic_commands.rs"),
            "unexpected name: {}",
            cmd.name()
        );
    }

    #[test]
    fn gated_off_command_is_not_executed() {
        let commands = BasicCommands::new();
        let enabled = Arc::new(AtomicBool::new(false));
        let flag = enabled.clone();

        let cmd = commands.command(
            action(|| Ok(())),
            Some(predicate(move || Ok(flag.load(Ordering::SeqCst)))),
            CommandOptions::named("gated"),
        );

        let err = cmd.execute().unwrap_err();
        assert!(matches!(err, CommandError::NotExecutable { ref name } if name == "gated"));

        // 谓词每次重新求值
        enabled.store(true, Ordering::SeqCst);
        assert!(cmd.can_execute().unwrap());
        cmd.execute().unwrap();
    }

    #[test]
    fn body_and_predicate_errors_propagate() {
        let commands = BasicCommands::new();

        let failing = commands.command(
            action(|| anyhow::bail!("disk full")),
            None,
            CommandOptions::named("save"),
        );
        match failing.execute().unwrap_err() {
            CommandError::Failed { name, source } => {
                assert_eq!(name, "save");
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let broken_gate = commands.param_command(
            param_action(|_: u32| Ok(())),
            Some(param_predicate(|_: &u32| -> anyhow::Result<bool> {
                anyhow::bail!("no state")
            })),
            CommandOptions::named("gate"),
        );
        assert!(matches!(
            broken_gate.can_execute(&1).unwrap_err(),
            CommandError::Predicate { .. }
        ));
    }

    #[test]
    fn param_reaches_body_unchanged() {
        let commands = BasicCommands::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();

        let cmd = commands.param_command(
            param_action(move |n: usize| {
                sink.store(n, Ordering::SeqCst);
                Ok(())
            }),
            Some(param_predicate(|n: &usize| Ok(*n > 0))),
            CommandOptions::named("store"),
        );

        assert!(!cmd.can_execute(&0).unwrap());
        cmd.execute(7).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn raise_can_execute_changed_notifies_subscribers() {
        let commands = BasicCommands::new();
        let cmd = commands.command(action(|| Ok(())), None, CommandOptions::named("n"));
        let mut rx = cmd.subscribe();

        cmd.raise_can_execute_changed();
        assert!(rx.try_recv().is_ok());

        // 开始与结束各一次
        cmd.execute().unwrap();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn notification_capacity_bounds_pending_changes() {
        let commands = BasicCommands::with_notification_capacity(1);
        let cmd = commands.command(action(|| Ok(())), None, CommandOptions::named("tight"));
        let mut rx = cmd.subscribe();

        cmd.raise_can_execute_changed();
        cmd.raise_can_execute_changed();

        // 容量为 1：较早的通知被覆盖，订阅方收到 Lagged
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(1))));
        assert!(rx.try_recv().is_ok());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn panicking_body_resets_executing_state() {
        let commands = BasicCommands::new();
        let cmd = commands.command(
            action(|| panic!("body exploded")),
            None,
            CommandOptions::named("boom"),
        );

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cmd.execute()));
        assert!(outcome.is_err());
        assert!(!cmd.is_executing());
        assert!(cmd.can_execute().unwrap());
    }
}
