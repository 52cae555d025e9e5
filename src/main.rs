//! depbump - bump a Go module dependency and propose it as a pull request
//!
//! usage: depbump [-nopush|-push] [-nopr] [-version VERSION] [-token NAME] [-base BRANCH] PATH [COMMAND]...

use depbump::cli::CliArgs;
use depbump::exec::SystemRunner;
use depbump::hosting::{GitHubApi, HttpClient};
use depbump::output::{Reporter, TextFormatter};
use depbump::pipeline::Pipeline;
use depbump::telemetry::init_tracing;
use depbump::template::CommitTemplate;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match CliArgs::try_parse_args(std::env::args()) {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            // Usage errors exit 1 like every other fatal condition
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = args.into_config(|name| std::env::var(name).ok())?;
    tracing::debug!(
        path = %config.path,
        version = ?config.version,
        push = config.push,
        pull_request = config.pull_request,
        token_present = config.token.is_some(),
        "configuration"
    );

    let work_dir = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("cannot determine working directory: {}", e))?;
    let template = CommitTemplate::new()?;
    let runner = SystemRunner::new(&work_dir);
    let api = GitHubApi::new(HttpClient::new()?);

    let color = io::stdout().is_terminal();
    let outcome = Pipeline::new(&config, &template, &runner, &api, &work_dir)
        .with_reporter(Reporter::new(color))
        .run()
        .await?;

    let mut stdout = io::stdout().lock();
    TextFormatter::new(color).format(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
