use chrono::NaiveDate;

use crate::errors::AppError;

/// 終了日が開始日より前でないことを確認します。作成時・更新時の両方で使います。
pub fn validate_date_range(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<(), AppError> {
    match end_date {
        Some(end) if end < start_date => Err(AppError::InvalidDateRange),
        _ => Ok(()),
    }
}

/// 新規タスクの検証。期間の検証に加えて、開始日が `today` より前でないことを確認します。
///
/// 開始日の制約は作成時のみ。更新時は [`validate_date_range`] だけを使うため、
/// 過去に始まったタスクもそのまま編集できます。
pub fn validate_new_task(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), AppError> {
    validate_date_range(start_date, end_date)?;
    if start_date < today {
        return Err(AppError::StartDateInPast);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(None)]
    #[case(Some(date(2030, 5, 1)))]
    #[case(Some(date(2030, 5, 3)))]
    fn test_valid_range(#[case] end_date: Option<NaiveDate>) {
        assert!(validate_date_range(date(2030, 5, 1), end_date).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let result = validate_date_range(date(2030, 5, 2), Some(date(2030, 5, 1)));
        assert!(matches!(result, Err(AppError::InvalidDateRange)));
    }

    #[test]
    fn test_new_task_starting_today() {
        let today = date(2030, 5, 1);
        assert!(validate_new_task(today, Some(date(2030, 5, 3)), today).is_ok());
    }

    #[test]
    fn test_new_task_starting_yesterday() {
        let today = date(2030, 5, 1);
        let result = validate_new_task(date(2030, 4, 30), None, today);
        assert!(matches!(result, Err(AppError::StartDateInPast)));
    }

    #[test]
    fn test_range_is_checked_before_start_date() {
        // 両方の規則に違反する場合は期間エラーを優先する
        let today = date(2030, 5, 1);
        let result = validate_new_task(date(2030, 4, 30), Some(date(2030, 4, 29)), today);
        assert!(matches!(result, Err(AppError::InvalidDateRange)));
    }
}
