use crate::generator::GeneratorKind;
use crate::plan_file::DEFAULT_PLAN_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trip-planner")]
#[command(about = "旅行プラン作成・旅程表出力ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 旅行条件を入力して旅程を生成
    Plan {
        /// 目的地（複数指定可、順番通り）
        #[arg(short, long = "destination", requires = "start")]
        destinations: Vec<String>,

        /// 開始日 (YYYY-MM-DD)
        #[arg(long, requires = "destinations")]
        start: Option<String>,

        /// 終了日 (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// 予算（省略時は設定値）
        #[arg(short, long)]
        budget: Option<f64>,

        /// 通貨コード（省略時は設定値）
        #[arg(short, long)]
        currency: Option<String>,

        /// 航空券を含める
        #[arg(long)]
        flights: bool,

        /// 保存先プランファイル
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        output: PathBuf,

        /// 旅程生成エンジン
        #[arg(long, value_enum, default_value = "sample")]
        generator: GeneratorKind,

        /// 生成後の編集メニューを表示しない
        #[arg(long)]
        no_edit: bool,
    },

    /// 旅程を日ごとに表示
    Show {
        /// プランファイル
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,
    },

    /// 旅程を追加/更新（idが既存なら更新）
    Add {
        /// プランファイル
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// 旅程id（省略時は新規採番）
        #[arg(long)]
        id: Option<String>,

        /// 日番号 (1〜日数)
        #[arg(long)]
        day: u32,

        /// 時刻 (HH:MM)
        #[arg(short, long)]
        time: String,

        /// 内容
        #[arg(short, long)]
        activity: String,

        /// 場所
        #[arg(short, long, default_value = "")]
        location: String,

        /// 概算費用（0は無料）
        #[arg(long, default_value = "0")]
        cost: f64,

        /// 種別 (flight/accommodation/activity/meal/transport)
        #[arg(long = "type", default_value = "activity")]
        kind: String,
    },

    /// 旅程を別の日へ移動
    Move {
        /// プランファイル
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// 移動する旅程id
        #[arg(required = true)]
        item: String,

        /// 移動先（N または day-N）
        #[arg(required = true)]
        to: String,
    },

    /// 旅程表をPDF/テキストで出力
    Export {
        /// プランファイル
        #[arg(short, long, default_value = DEFAULT_PLAN_FILE)]
        plan: PathBuf,

        /// 出力形式 (pdf/text/both)
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（省略時は設定値またはカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の通貨コードを設定
        #[arg(long)]
        currency: Option<String>,

        /// 既定の予算を設定
        #[arg(long)]
        budget: Option<f64>,

        /// 生成の待ち時間（ミリ秒）を設定
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 既定の出力ディレクトリを設定
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Text,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "text" | "txt" => Ok(ExportFormat::Text),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, text, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
