//! 命令对象的共享状态
//!
//! 四类命令对象共用：名称、重入策略、执行中计数、可执行性变更通知与取消令牌。
//!
use crate::error::CommandError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// 可执行性变更通知（不携带数据，订阅方收到后重新调用 `can_execute`）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanExecuteChanged;

/// 命令对象的可观察面
pub trait ObservableCommand {
    fn name(&self) -> &str;
    fn force_execution(&self) -> bool;
    fn is_executing(&self) -> bool;
    /// 订阅可执行性变更
    fn subscribe(&self) -> broadcast::Receiver<CanExecuteChanged>;
    /// 外部状态变化后手动触发通知
    fn raise_can_execute_changed(&self);
}

pub(crate) struct CommandState {
    name: String,
    force_execution: bool,
    running: AtomicUsize,
    notifier: broadcast::Sender<CanExecuteChanged>,
    cancellation: Mutex<CancellationToken>,
}

impl CommandState {
    pub(crate) fn new(name: String, force_execution: bool, capacity: usize) -> Self {
        let (notifier, _rx) = broadcast::channel(capacity.max(1));

        Self {
            name,
            force_execution,
            running: AtomicUsize::new(0),
            notifier,
            cancellation: Mutex::new(CancellationToken::new()),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn force_execution(&self) -> bool {
        self.force_execution
    }

    pub(crate) fn is_executing(&self) -> bool {
        self.running.load(Ordering::Acquire) > 0
    }

    /// 执行中且不允许重入时，命令视为不可执行
    pub(crate) fn blocked(&self) -> bool {
        self.is_executing() && !self.force_execution
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CanExecuteChanged> {
        self.notifier.subscribe()
    }

    pub(crate) fn notify(&self) {
        // 没有订阅者时 send 返回错误，忽略即可
        let _ = self.notifier.send(CanExecuteChanged);
    }

    /// 标记一次执行开始；不允许重入且已有执行时返回 None
    pub(crate) fn try_begin(self: &Arc<Self>) -> Option<Running> {
        if self.force_execution {
            self.running.fetch_add(1, Ordering::AcqRel);
        } else if self
            .running
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        self.notify();
        Some(Running {
            state: self.clone(),
        })
    }

    /// 为本次执行派生取消令牌
    pub(crate) fn run_token(&self) -> CancellationToken {
        self.cancellation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token()
    }

    /// 取消所有进行中的执行；之后的执行使用新的令牌
    pub(crate) fn cancel(&self) {
        let mut current = self
            .cancellation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancellationToken::new();
    }

    pub(crate) fn not_executable(&self) -> CommandError {
        CommandError::NotExecutable {
            name: self.name.clone(),
        }
    }

    pub(crate) fn failed(&self, err: anyhow::Error) -> CommandError {
        if CommandError::is_cancellation(&err) {
            tracing::debug!(command = %self.name, "command cancelled");
            return CommandError::Cancelled;
        }

        tracing::warn!(command = %self.name, error = %err, "command failed");
        CommandError::Failed {
            name: self.name.clone(),
            source: err,
        }
    }

    pub(crate) fn predicate_failed(&self, err: anyhow::Error) -> CommandError {
        tracing::warn!(command = %self.name, error = %err, "can-execute predicate failed");
        CommandError::Predicate {
            name: self.name.clone(),
            source: err,
        }
    }
}

/// 执行中标记；drop 时（包括 panic 展开）归还计数并发出通知
pub(crate) struct Running {
    state: Arc<CommandState>,
}

impl Drop for Running {
    fn drop(&mut self) {
        self.state.running.fetch_sub(1, Ordering::AcqRel);
        self.state.notify();
    }
}

macro_rules! impl_observable {
    ($ty:ident $(<$p:ident>)?) => {
        impl$(<$p: $crate::callable::Param>)? $crate::state::ObservableCommand for $ty$(<$p>)? {
            fn name(&self) -> &str {
                self.state.name()
            }

            fn force_execution(&self) -> bool {
                self.state.force_execution()
            }

            fn is_executing(&self) -> bool {
                self.state.is_executing()
            }

            fn subscribe(&self) -> ::tokio::sync::broadcast::Receiver<$crate::state::CanExecuteChanged> {
                self.state.subscribe()
            }

            fn raise_can_execute_changed(&self) {
                self.state.notify();
            }
        }
    };
}

pub(crate) use impl_observable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_state_rejects_second_run() {
        let state = Arc::new(CommandState::new("x".into(), false, 4));
        let first = state.try_begin().expect("first run");
        assert!(state.blocked());
        assert!(state.try_begin().is_none());

        drop(first);
        assert!(!state.is_executing());
        assert!(state.try_begin().is_some());
    }

    #[test]
    fn forced_state_allows_reentry() {
        let state = Arc::new(CommandState::new("x".into(), true, 4));
        let a = state.try_begin().expect("first run");
        let b = state.try_begin().expect("second run");
        assert!(state.is_executing());
        assert!(!state.blocked());

        drop(a);
        assert!(state.is_executing());
        drop(b);
        assert!(!state.is_executing());
    }

    #[test]
    fn running_marker_notifies_on_begin_and_end() {
        let state = Arc::new(CommandState::new("x".into(), false, 4));
        let mut rx = state.subscribe();

        let running = state.try_begin().unwrap();
        drop(running);

        assert_eq!(rx.try_recv().unwrap(), CanExecuteChanged);
        assert_eq!(rx.try_recv().unwrap(), CanExecuteChanged);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn cancel_only_affects_current_tokens() {
        let state = CommandState::new("x".into(), false, 4);
        let before = state.run_token();
        state.cancel();
        let after = state.run_token();

        assert!(before.is_cancelled());
        assert!(!after.is_cancelled());
    }
}
