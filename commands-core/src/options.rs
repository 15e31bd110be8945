//! 命令构造选项
//!
//! - `force_execution`：是否允许在上一次执行尚未结束时再次执行（由工厂解释，装饰层只透传）；
//! - `name`：诊断/日志用名称，缺省时解析为调用方源码位置（`file:line:column`）。
//!
use bon::Builder;
use std::panic::Location;

/// 典型用法：
/// ```rust
/// use commands_core::CommandOptions;
///
/// let opts = CommandOptions::builder()
///     .name("save")
///     .force_execution(true)
///     .build();
/// assert_eq!(opts.name.as_deref(), Some("save"));
/// ```
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// 允许重入执行
    #[builder(default)]
    pub force_execution: bool,
    /// 显示名称（可选）
    #[builder(into)]
    pub name: Option<String>,
}

impl CommandOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn forced() -> Self {
        Self {
            force_execution: true,
            ..Self::default()
        }
    }

    /// 解析最终名称：显式名称优先，否则取调用方位置。
    ///
    /// 调用链上的各层需同样标注 `#[track_caller]`，位置才会落到真正的调用方。
    #[track_caller]
    pub fn resolve_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => Location::caller().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_name_wins() {
        assert_eq!(CommandOptions::named("open").resolve_name(), "open");
    }

    #[test]
    fn missing_name_resolves_to_call_site() {
        let name = CommandOptions::default().resolve_name();
        assert!(name.contains("options.rs"), "unexpected name: {name}");
    }

    #[test]
    fn builder_defaults() {
        let opts = CommandOptions::builder().build();
        assert_eq!(opts, CommandOptions::default());
        assert!(!opts.force_execution);

        let opts = CommandOptions::builder().maybe_name(Some("x")).build();
        assert_eq!(opts.name.as_deref(), Some("x"));
        assert!(CommandOptions::forced().force_execution);
    }
}
