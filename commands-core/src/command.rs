//! 同步命令对象
//!
use crate::callable::{Action, Param, ParamAction, ParamPredicate, Predicate};
use crate::error::CommandResult;
use crate::state::{CommandState, impl_observable};
use std::sync::Arc;

/// 同步无参命令
#[derive(Clone)]
pub struct Command {
    state: Arc<CommandState>,
    execute: Action,
    can_execute: Option<Predicate>,
}

impl Command {
    pub(crate) fn new(
        state: Arc<CommandState>,
        execute: Action,
        can_execute: Option<Predicate>,
    ) -> Self {
        Self {
            state,
            execute,
            can_execute,
        }
    }

    /// 当前是否可执行：执行中（且不允许重入）为 false，否则取谓词结果，无谓词为 true
    pub fn can_execute(&self) -> CommandResult<bool> {
        if self.state.blocked() {
            return Ok(false);
        }

        match &self.can_execute {
            None => Ok(true),
            Some(p) => p().map_err(|e| self.state.predicate_failed(e)),
        }
    }

    pub fn execute(&self) -> CommandResult<()> {
        if !self.can_execute()? {
            return Err(self.state.not_executable());
        }
        let Some(_running) = self.state.try_begin() else {
            return Err(self.state.not_executable());
        };

        tracing::debug!(command = %self.state.name(), "executing command");
        (self.execute)().map_err(|e| self.state.failed(e))
    }
}

impl_observable!(Command);

/// 同步带参命令
#[derive(Clone)]
pub struct ParamCommand<P: Param> {
    state: Arc<CommandState>,
    execute: ParamAction<P>,
    can_execute: Option<ParamPredicate<P>>,
}

impl<P: Param> ParamCommand<P> {
    pub(crate) fn new(
        state: Arc<CommandState>,
        execute: ParamAction<P>,
        can_execute: Option<ParamPredicate<P>>,
    ) -> Self {
        Self {
            state,
            execute,
            can_execute,
        }
    }

    pub fn can_execute(&self, param: &P) -> CommandResult<bool> {
        if self.state.blocked() {
            return Ok(false);
        }

        match &self.can_execute {
            None => Ok(true),
            Some(p) => p(param).map_err(|e| self.state.predicate_failed(e)),
        }
    }

    pub fn execute(&self, param: P) -> CommandResult<()> {
        if !self.can_execute(&param)? {
            return Err(self.state.not_executable());
        }
        let Some(_running) = self.state.try_begin() else {
            return Err(self.state.not_executable());
        };

        tracing::debug!(command = %self.state.name(), "executing command");
        (self.execute)(param).map_err(|e| self.state.failed(e))
    }
}

impl_observable!(ParamCommand<P>);
