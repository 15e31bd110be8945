use commands_core::callable::{
    action, async_action, async_param_action, async_param_predicate, param_action,
    param_predicate,
};
use commands_core::{BasicCommands, CommandOptions, Commands, ObservableCommand};
use commands_safe::{ErrorReporter, SafeCommands};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let commands = SafeCommands::new(BasicCommands::new(), ErrorReporter::tracing());
    let balance = Arc::new(AtomicI64::new(100));

    // 同步带参命令：金额非法时谓词报错，命令视为不可执行
    let withdraw = {
        let b = balance.clone();
        let check = balance.clone();
        commands.param_command(
            param_action(move |amount: i64| {
                b.fetch_sub(amount, Ordering::SeqCst);
                Ok(())
            }),
            Some(param_predicate(move |amount: &i64| {
                anyhow::ensure!(*amount > 0, "amount must be positive: {amount}");
                Ok(check.load(Ordering::SeqCst) >= *amount)
            })),
            CommandOptions::named("withdraw"),
        )
    };

    println!("withdraw(30) enabled: {}", withdraw.can_execute(&30)?);
    withdraw.execute(30)?;
    println!("withdraw(-5) enabled: {}", withdraw.can_execute(&-5)?);
    println!("balance after withdraw: {}", balance.load(Ordering::SeqCst));

    // 执行体出错：错误被记录，调用方看到的是“无副作用地完成”
    let audit = commands.command(
        action(|| anyhow::bail!("audit log unavailable")),
        None,
        CommandOptions::default(),
    );
    audit.execute()?;
    println!("command `{}` completed", audit.name());

    let sync_remote = commands.async_command(
        async_action(|_token| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            anyhow::Result::<()>::Err(anyhow::anyhow!("remote timed out"))
        }),
        None,
        CommandOptions::named("sync-remote"),
    );
    sync_remote.execute().await?;
    println!("async command `{}` completed", sync_remote.name());

    // 异步谓词
    let deposit = {
        let b = balance.clone();
        commands.async_param_command_with_async_gate(
            async_param_action(move |amount: i64, _token| {
                let b = b.clone();
                async move {
                    b.fetch_add(amount, Ordering::SeqCst);
                    Ok(())
                }
            }),
            Some(async_param_predicate(|amount: i64| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(amount <= 1_000)
            })),
            CommandOptions::named("deposit"),
        )
    };

    println!("deposit(5000) enabled: {}", deposit.can_execute(&5_000).await?);
    deposit.execute(50).await?;
    println!("final balance: {}", balance.load(Ordering::SeqCst));

    Ok(())
}
