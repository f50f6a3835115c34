use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use recruit_console::{cli, client, config, error, render, review, triage};
use recruit_console_common::{Endpoints, ListQuery, Patch};
use cli::{Cli, Commands};
use client::BackendClient;
use config::Config;
use error::Result;
use std::future::Future;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    let endpoints = Endpoints::new(config.resolve_api_base(cli.api_base.as_deref()));
    tracing::debug!(api_base = endpoints.base(), "resolved backend origin");
    let client = BackendClient::new(endpoints, Duration::from_secs(config.timeout_seconds))?;

    match cli.command {
        Commands::Upload { file, job_id } => {
            let job_id = job_id.unwrap_or_else(|| config.default_job_id.clone());
            println!("📄 recruit-console - アップロード\n");
            println!("- ジョブID: {}", job_id);

            let result = with_spinner("アップロード中...", client.upload(&file, &job_id)).await?;

            println!("✔ 完了\n");
            println!("{}", result.pretty()?);
            if let Some(name) = result.saved_filename() {
                println!("\n履歴書: {}", client.endpoints().resume_file(name));
            }
        }

        Commands::List { job_id, status, limit, offset, all } => {
            let query = ListQuery::default()
                .with_job(job_id.unwrap_or_default())
                .with_status(status.unwrap_or_default());
            let page_size = if all { None } else { Some(limit.unwrap_or(config.page_size)) };
            let mut session = review::ReviewSession::new(client, query, page_size).starting_at(offset);

            with_spinner("候補者を取得中...", session.load()).await;

            if let Some(error) = session.error() {
                println!("Error: {}", error);
            }
            println!("{}", render::candidate_table(session.candidates()));
            if let Some(pager) = session.pager() {
                println!("\n{}", render::pager_line(pager));
            }
        }

        Commands::Show { id } => {
            let value = with_spinner("取得中...", client.candidate(id)).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Status { id, status } => {
            let label = status.label().to_string();
            if client.patch(Some(id), &Patch::Status(status)).await? {
                println!("✔ #{} のステータスを {} に更新しました", id, label);
            } else {
                println!("IDが無効です: {}", id);
            }
        }

        Commands::Notes { id, notes } => {
            if client.patch(Some(id), &Patch::Notes(notes)).await? {
                println!("✔ #{} のメモを更新しました", id);
            } else {
                println!("IDが無効です: {}", id);
            }
        }

        Commands::Triage { job_id, status, offset } => {
            println!("🗂  recruit-console - トリアージ\n");
            let query = ListQuery::default()
                .with_job(job_id.unwrap_or_default())
                .with_status(status.unwrap_or_default());
            let mut session = review::ReviewSession::new(client, query, Some(config.page_size))
                .starting_at(offset);
            triage::run_triage(&mut session).await?;
        }

        Commands::Analytics { job_id } => {
            let summary = with_spinner("集計を取得中...", client.summary(job_id.as_deref())).await?;
            print!("{}", render::summary_report(&summary));
        }

        Commands::Health => {
            let value = client.health().await?;
            println!("✔ {} に接続できました", client.endpoints().base());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Config { set_api_base, set_page_size, set_job_id, show } => {
            let mut changed = false;

            if let Some(base) = set_api_base {
                config.set_api_base(base)?;
                changed = true;
            }
            if let Some(size) = set_page_size {
                config.set_page_size(size)?;
                changed = true;
            }
            if let Some(job_id) = set_job_id {
                config.default_job_id = job_id;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  APIオリジン: {}", config.resolve_api_base(cli.api_base.as_deref()));
                println!("  1ページ件数: {}", config.page_size);
                println!("  既定ジョブID: {}", config.default_job_id);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "recruit_console=debug" } else { "recruit_console=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 通信中はスピナーを出す
async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}
