//! Error types for the catalog core
//!
//! All fallible operations in this crate return [`Result<T>`] with a
//! [`CatalogError`]. Failures are explicit values handed back to the caller;
//! the UI layer owns turning them into user feedback, and nothing in the core
//! retries or swallows a storage failure.

use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for the catalog core
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== Repository errors =====

    /// A book with the same folded title and author already exists.
    /// Recovered locally by the caller; never fatal.
    #[error("book already in catalog: '{title}' by '{author}'")]
    DuplicateBook { title: String, author: String },

    /// The targeted record id no longer exists
    #[error("no book with id {0}")]
    RecordNotFound(i64),

    // ===== Schema errors =====

    /// Database schema migration failed
    #[error("schema migration failed: {0}")]
    MigrationFailed(String),

    // ===== Preference errors =====

    /// Reading or writing a preference group file failed
    #[error("preference store error: {0}")]
    PreferenceIo(String),

    // ===== Validation =====

    /// Malformed data handed to the core
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ===== External library errors =====
    // Automatic conversions; these make up the storage-write failure class.

    /// Database driver error from sqlx
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        CatalogError::InvalidInput(message.into())
    }

    /// Whether this is the duplicate-book rejection from `add_book`
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CatalogError::DuplicateBook { .. })
    }

    /// Whether this is an underlying persistence failure rather than a
    /// domain-level rejection
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Sqlx(_) | CatalogError::Io(_) | CatalogError::MigrationFailed(_)
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Domain rejections get actionable text; storage failures keep their
    /// technical detail since the screens surface them as a failure notice.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::DuplicateBook { title, author } => {
                if author.is_empty() {
                    format!("'{title}' is already in your catalog.")
                } else {
                    format!("'{title}' by {author} is already in your catalog.")
                }
            }
            CatalogError::RecordNotFound(_) => {
                "That book no longer exists. Refresh and try again.".to_string()
            }
            CatalogError::PreferenceIo(_) => {
                "Your settings could not be saved. Check device storage and try again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
