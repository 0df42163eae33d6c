//! Application Error - Unified error value for the application
//!
//! Defines the [`AppError`] struct. Errors are immutable values created at the
//! point of failure and carried inside an
//! [`ErrorList`](super::error_list::ErrorList).

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `code` - 機械可読な安定識別子（例: `"User.EmailAlreadyExists"`）
/// * `description` - 人間向けのメッセージ
/// * `source` - 元のエラー（オプション、ログ用。クライアントには返さない）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::conflict("User.EmailAlreadyExists", "email already registered");
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// assert_eq!(err.code(), "User.EmailAlreadyExists");
/// ```
#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    code: Cow<'static, str>,
    description: Cow<'static, str>,
    source: Option<Arc<dyn Error + Send + Sync + 'static>>,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            description: description.into(),
            source: None,
        }
    }

    /// 400 入力規則違反
    #[inline]
    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Validation, code, description)
    }

    /// 409 Conflict エラー
    #[inline]
    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Conflict, code, description)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::NotFound, code, description)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unauthorized, code, description)
    }

    /// 403 Forbidden エラー
    #[inline]
    pub fn forbidden(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Forbidden, code, description)
    }

    /// 500 想定外の障害
    #[inline]
    pub fn failure(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Failure, code, description)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 元のエラーを設定（ログ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::AppError;
    /// use std::error::Error;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
    /// let err = AppError::failure("Store.Unavailable", "store unavailable").with_source(io);
    /// assert!(err.source().is_some());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 機械可読コードを取得
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// メッセージを取得
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// 入力規則違反かどうか
    #[inline]
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.code == other.code && self.description == other.description
    }
}

impl Eq for AppError {}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("description", &self.description);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.code, self.description)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "User.NotFound", "user not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "User.NotFound");
        assert_eq!(err.description(), "user not found");
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::validation("c", "d").status_code(), 400);
        assert_eq!(AppError::unauthorized("c", "d").status_code(), 401);
        assert_eq!(AppError::forbidden("c", "d").status_code(), 403);
        assert_eq!(AppError::not_found("c", "d").status_code(), 404);
        assert_eq!(AppError::conflict("c", "d").status_code(), 409);
        assert_eq!(AppError::failure("c", "d").status_code(), 500);
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::failure("Config.Read", "failed to read file").with_source(io_err);
        assert!(err.source().is_some());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_display() {
        let err = AppError::conflict("User.EmailAlreadyExists", "email already registered");
        assert_eq!(
            err.to_string(),
            "[Conflict] User.EmailAlreadyExists: email already registered"
        );
    }

    #[test]
    fn test_equality_ignores_source() {
        let io_err = std::io::Error::other("boom");
        let a = AppError::failure("X", "y").with_source(io_err);
        let b = AppError::failure("X", "y");
        assert_eq!(a, b);
    }
}
