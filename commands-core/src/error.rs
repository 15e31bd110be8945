//! 命令层统一错误定义
//!
//! 工厂本身构造不会失败，错误只出现在调用阶段：
//! 判定被拒、执行体失败、谓词失败、取消与 panic。
//!
use std::any::Any;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command not executable: name={name}")]
    NotExecutable { name: String },

    #[error("command failed: name={name}, reason={source}")]
    Failed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("can-execute predicate failed: name={name}, reason={source}")]
    Predicate {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("command cancelled")]
    Cancelled,

    #[error("panicked: {message}")]
    Panicked { message: String },
}

impl CommandError {
    /// 将 panic 负载转换为错误；仅识别 `&str` 与 `String` 两类负载
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        CommandError::Panicked { message }
    }

    /// 判断执行体返回的错误是否表示“已取消”
    pub fn is_cancellation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<CommandError>(), Some(CommandError::Cancelled))
    }
}

/// 统一 Result 类型别名
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payload_is_extracted() {
        let err = CommandError::from_panic(Box::new("boom"));
        assert!(matches!(err, CommandError::Panicked { ref message } if message == "boom"));

        let err = CommandError::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(err.to_string(), "panicked: owned boom");

        let err = CommandError::from_panic(Box::new(42_u32));
        assert_eq!(err.to_string(), "panicked: unknown panic");
    }

    #[test]
    fn cancellation_is_recognized_through_anyhow() {
        let cancelled = anyhow::Error::from(CommandError::Cancelled);
        assert!(CommandError::is_cancellation(&cancelled));

        let other = anyhow::anyhow!("cancelled");
        assert!(!CommandError::is_cancellation(&other));

        let panicked = anyhow::Error::from(CommandError::Panicked {
            message: "x".into(),
        });
        assert!(!CommandError::is_cancellation(&panicked));
    }
}
