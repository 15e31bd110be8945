//! 命令工厂基础库（commands-core）
//!
//! 定义“命令工厂”能力契约与其所需的通用构件：
//! - 可调用体形态（`callable`）：同步/异步、带参/无参的执行体与判定谓词
//! - 构造选项（`options`）：`force_execution` 与诊断用名称
//! - 工厂契约（`commands`）：`Commands` trait，四类命令形态的构造入口
//! - 参考实现（`basic_commands`）：进程内工厂及其产出的命令对象
//! - 统一错误（`error`）
//!
//! 本 crate 不负责故障隔离：执行体或谓词返回的错误会原样上抛给调用方。
//! 隔离与上报由装饰层（`commands-safe`）在工厂之外完成。
//!
pub mod async_command;
pub mod basic_commands;
pub mod callable;
pub mod command;
pub mod commands;
pub mod error;
pub mod options;
pub mod state;

pub use async_command::{AsyncCommand, AsyncParamCommand, ParamGate};
pub use basic_commands::BasicCommands;
pub use callable::Param;
pub use command::{Command, ParamCommand};
pub use commands::Commands;
pub use error::{CommandError, CommandResult};
pub use options::CommandOptions;
pub use state::{CanExecuteChanged, ObservableCommand};
