use clap::{Parser, Subcommand};
use recruit_console_common::CandidateStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recruit-console")]
#[command(about = "履歴書スクリーニング管理コンソール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのオリジン（例: http://127.0.0.1:8001）
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 履歴書をアップロードして解析結果を表示
    Upload {
        /// 履歴書ファイル (.pdf/.txt/.docx)
        #[arg(required = true)]
        file: PathBuf,

        /// ジョブID（省略時は設定の既定値）
        #[arg(short, long)]
        job_id: Option<String>,
    },

    /// 候補者一覧
    List {
        /// ジョブIDで絞り込み
        #[arg(short, long)]
        job_id: Option<String>,

        /// ステータスで絞り込み (shortlisted/review/reject)
        #[arg(short, long)]
        status: Option<String>,

        /// 1ページの件数（省略時は設定の値）
        #[arg(short, long)]
        limit: Option<u64>,

        /// 開始位置
        #[arg(short, long, default_value = "0")]
        offset: u64,

        /// ページングせずに全件取得
        #[arg(long, conflicts_with_all = ["limit", "offset"])]
        all: bool,
    },

    /// 候補者の詳細JSONを表示
    Show {
        #[arg(required = true)]
        id: u64,
    },

    /// ステータスを更新 (shortlisted/review/reject/unknown)
    Status {
        #[arg(required = true)]
        id: u64,

        #[arg(required = true)]
        status: CandidateStatus,
    },

    /// メモを更新（空文字列で削除）
    Notes {
        #[arg(required = true)]
        id: u64,

        #[arg(required = true)]
        notes: String,
    },

    /// 対話的にステータス・メモを付ける
    Triage {
        /// ジョブIDで絞り込み
        #[arg(short, long)]
        job_id: Option<String>,

        /// ステータスで絞り込み（例: 未設定だけ見るなら省略）
        #[arg(short, long)]
        status: Option<String>,

        /// 開始位置
        #[arg(short, long, default_value = "0")]
        offset: u64,
    },

    /// 集計を表示
    Analytics {
        /// ジョブIDで絞り込み
        #[arg(short, long)]
        job_id: Option<String>,
    },

    /// バックエンドの疎通確認
    Health,

    /// 設定を表示/編集
    Config {
        /// バックエンドのオリジンを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// 一覧の1ページ件数を設定
        #[arg(long)]
        set_page_size: Option<u64>,

        /// アップロードの既定ジョブIDを設定
        #[arg(long)]
        set_job_id: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
