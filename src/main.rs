use std::io::Write;

use clap::Parser;

use vigil_cli::structs::cli::Cli;
use vigil_cli::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();
    runner.run_command(cli.command).await?;

    Ok(())
}
