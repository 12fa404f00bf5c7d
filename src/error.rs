use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("旅行条件が不正です: {0}")]
    InvalidTrip(String),

    #[error("旅行条件が未設定です。先に `trip-planner plan` で旅程を作成してください")]
    NoTrip,

    #[error("旅程が見つかりません: id={0}")]
    ItemNotFound(String),

    #[error("日番号は数値で指定してください: {0}")]
    InvalidDay(String),

    #[error("日番号が範囲外です: {day}日目（1〜{days}日）")]
    DayOutOfRange { day: u32, days: u32 },

    #[error("時刻の形式が不正です（HH:MM）: {0}")]
    InvalidTime(String),

    #[error("日付の形式が不正です（YYYY-MM-DD）: {0}")]
    InvalidDate(String),

    #[error("プランファイルのバージョンが不一致です: {found}（対応: {expected}）")]
    PlanFileVersion { found: u32, expected: u32 },

    #[error("旅程の生成がキャンセルされました")]
    GenerationCancelled,

    #[error("旅程の生成に失敗: {0}")]
    GenerationFailed(String),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<trip_planner_common::Error> for PlannerError {
    fn from(err: trip_planner_common::Error) -> Self {
        use trip_planner_common::Error as CommonError;
        match err {
            CommonError::Io(e) => PlannerError::Io(e),
            CommonError::Json(e) => PlannerError::JsonParse(e),
            CommonError::Config(msg) => PlannerError::Config(msg),
            CommonError::InvalidTrip(msg) => PlannerError::InvalidTrip(msg),
        }
    }
}

impl From<dialoguer::Error> for PlannerError {
    fn from(err: dialoguer::Error) -> Self {
        PlannerError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
