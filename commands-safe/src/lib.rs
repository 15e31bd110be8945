//! 安全命令装饰层（commands-safe）
//!
//! 在任意 [`Commands`](commands_core::Commands) 实现之外包一层故障隔离：
//! - `guard`：执行体/谓词的错误与 panic 一律拦截，交给上报回调，并以安全默认值代替
//!   （动作视为“无副作用地完成”，谓词视为 `false`）；
//! - `gate`：可选谓词的组合，缺省为“总是可执行”；
//! - `SafeCommands`：与被装饰工厂签名完全一致的替身，转发前完成上述包装；
//! - `ErrorReporter`：全局唯一的故障上报回调。
//!
//! 典型用法：
//! ```rust
//! use commands_core::callable::action;
//! use commands_core::{BasicCommands, CommandOptions, Commands};
//! use commands_safe::{ErrorReporter, SafeCommands};
//!
//! let commands = SafeCommands::new(BasicCommands::new(), ErrorReporter::tracing());
//! let cmd = commands.command(
//!     action(|| anyhow::bail!("boom")),
//!     None,
//!     CommandOptions::named("explode"),
//! );
//! assert!(cmd.execute().is_ok());
//! ```
pub mod gate;
pub mod guard;
pub mod reporter;
pub mod safe_commands;

pub use guard::Guard;
pub use reporter::ErrorReporter;
pub use safe_commands::SafeCommands;
