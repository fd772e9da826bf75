/*
 * Responsibility
 * - Movie.release_date の検証ルール (設定で切り替え)
 *   - FreeText: 空でない文字列なら受け付ける
 *   - Date: chrono の format (ex: "%m-%d-%Y") で日付として parse できること
 * - 保存値はクライアントが送った文字列のまま (正規化しない)
 */
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReleaseDatePolicy {
    #[default]
    FreeText,
    Date { format: String },
}

impl ReleaseDatePolicy {
    pub fn from_format(format: Option<&str>) -> Self {
        match format {
            Some(f) => Self::Date {
                format: f.to_string(),
            },
            None => Self::FreeText,
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("release_date cannot be empty".to_string());
        }

        match self {
            Self::FreeText => Ok(()),
            Self::Date { format } => NaiveDate::parse_from_str(value, format)
                .map(|_| ())
                .map_err(|_| format!("release_date must be a date formatted as {}", format)),
        }
    }
}
