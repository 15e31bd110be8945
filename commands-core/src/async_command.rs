//! 异步命令对象
//!
//! 每次执行派生独立的子取消令牌，`cancel()` 只影响进行中的执行。
//!
use crate::callable::{
    AsyncAction, AsyncParamAction, AsyncParamPredicate, Param, ParamPredicate, Predicate,
};
use crate::error::CommandResult;
use crate::state::{CommandState, impl_observable};
use std::sync::Arc;

/// 异步无参命令
#[derive(Clone)]
pub struct AsyncCommand {
    state: Arc<CommandState>,
    execute: AsyncAction,
    can_execute: Option<Predicate>,
}

impl AsyncCommand {
    pub(crate) fn new(
        state: Arc<CommandState>,
        execute: AsyncAction,
        can_execute: Option<Predicate>,
    ) -> Self {
        Self {
            state,
            execute,
            can_execute,
        }
    }

    pub fn can_execute(&self) -> CommandResult<bool> {
        if self.state.blocked() {
            return Ok(false);
        }

        match &self.can_execute {
            None => Ok(true),
            Some(p) => p().map_err(|e| self.state.predicate_failed(e)),
        }
    }

    pub async fn execute(&self) -> CommandResult<()> {
        if !self.can_execute()? {
            return Err(self.state.not_executable());
        }
        let Some(_running) = self.state.try_begin() else {
            return Err(self.state.not_executable());
        };

        tracing::debug!(command = %self.state.name(), "executing async command");
        let token = self.state.run_token();
        (self.execute)(token)
            .await
            .map_err(|e| self.state.failed(e))
    }

    /// 取消进行中的执行
    pub fn cancel(&self) {
        self.state.cancel();
    }
}

impl_observable!(AsyncCommand);

/// 带参异步命令的判定谓词：同步或异步
#[derive(Clone)]
pub enum ParamGate<P: Param> {
    Sync(ParamPredicate<P>),
    Async(AsyncParamPredicate<P>),
}

/// 异步带参命令
#[derive(Clone)]
pub struct AsyncParamCommand<P: Param> {
    state: Arc<CommandState>,
    execute: AsyncParamAction<P>,
    can_execute: Option<ParamGate<P>>,
}

impl<P: Param> AsyncParamCommand<P> {
    pub(crate) fn new(
        state: Arc<CommandState>,
        execute: AsyncParamAction<P>,
        can_execute: Option<ParamGate<P>>,
    ) -> Self {
        Self {
            state,
            execute,
            can_execute,
        }
    }

    pub async fn can_execute(&self, param: &P) -> CommandResult<bool> {
        if self.state.blocked() {
            return Ok(false);
        }

        let verdict = match &self.can_execute {
            None => Ok(true),
            Some(ParamGate::Sync(p)) => p(param),
            Some(ParamGate::Async(p)) => p(param.clone()).await,
        };

        verdict.map_err(|e| self.state.predicate_failed(e))
    }

    pub async fn execute(&self, param: P) -> CommandResult<()> {
        if !self.can_execute(&param).await? {
            return Err(self.state.not_executable());
        }
        let Some(_running) = self.state.try_begin() else {
            return Err(self.state.not_executable());
        };

        tracing::debug!(command = %self.state.name(), "executing async command");
        let token = self.state.run_token();
        (self.execute)(param, token)
            .await
            .map_err(|e| self.state.failed(e))
    }

    pub fn cancel(&self) {
        self.state.cancel();
    }
}

impl_observable!(AsyncParamCommand<P>);
