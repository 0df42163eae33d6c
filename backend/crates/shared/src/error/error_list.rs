//! Error List - Non-empty failure payload
//!
//! Defines [`ErrorList`], the [`AppResult<T>`] alias and the [`FromErrors`]
//! capability used by generic code (e.g. the validation pipeline) to build a
//! failure without knowing the success type.

use super::app_error::AppError;
use super::kind::ErrorKind;

/// 失敗時に返されるエラーの非空リスト
///
/// ## Invariants
/// * 常に 1 件以上のエラーを保持する
/// * `Validation` 以外の種別を含む場合、エラーはちょうど 1 件
/// * 挿入順を保持する（並べ替えない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList(Vec<AppError>);

/// アプリケーション結果型エイリアス
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, error_list::AppResult};
///
/// fn find_user(id: u32) -> AppResult<String> {
///     if id == 0 {
///         return Err(AppError::not_found("User.NotFound", "user not found").into());
///     }
///     Ok("Alice".to_string())
/// }
///
/// assert!(find_user(0).is_err());
/// ```
pub type AppResult<T> = Result<T, ErrorList>;

impl ErrorList {
    /// 単一原因の失敗
    pub fn single(error: AppError) -> Self {
        Self(vec![error])
    }

    /// 入力規則違反の集合から構築
    ///
    /// 入力が空の場合は `None`（失敗ではない）を返します。
    /// 全要素は `Validation` 種別として作り直されます。
    pub fn validation<I, C, D>(violations: I) -> Option<Self>
    where
        I: IntoIterator<Item = (C, D)>,
        C: Into<std::borrow::Cow<'static, str>>,
        D: Into<std::borrow::Cow<'static, str>>,
    {
        let errors: Vec<AppError> = violations
            .into_iter()
            .map(|(code, description)| AppError::validation(code, description))
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// 先頭のエラー（常に存在）
    pub fn first(&self) -> &AppError {
        // Non-empty by construction.
        &self.0[0]
    }

    /// 全件が `Validation` 種別かどうか
    pub fn is_all_validation(&self) -> bool {
        self.0.iter().all(AppError::is_validation)
    }

    /// 境界で使用する種別（全件 Validation なら Validation、それ以外は先頭の種別）
    pub fn kind(&self) -> ErrorKind {
        if self.is_all_validation() {
            ErrorKind::Validation
        } else {
            self.first().kind()
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppError> {
        self.0.iter()
    }
}

impl From<AppError> for ErrorList {
    fn from(error: AppError) -> Self {
        Self::single(error)
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a AppError;
    type IntoIter = std::slice::Iter<'a, AppError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

// ============================================================================
// FromErrors capability
// ============================================================================

/// 失敗値をエラーリストから構築できる結果型
///
/// 汎用コード（検証パイプラインなど）は成功型を知らずにこのトレイト経由で
/// 失敗を生成します。実行時の型判定は行いません。
pub trait FromErrors {
    fn from_errors(errors: ErrorList) -> Self;
}

impl<T> FromErrors for Result<T, ErrorList> {
    fn from_errors(errors: ErrorList) -> Self {
        Err(errors)
    }
}
