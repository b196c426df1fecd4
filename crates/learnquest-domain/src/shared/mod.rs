use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(LearnerId);
define_id!(LessonId);
define_id!(SubjectId);
define_id!(AchievementId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    LearnerNotFound = 2001,
    LessonNotFound = 2002,
    AchievementNotFound = 2003,

    // Business Logic (3xxx)
    LessonInactive = 3001,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DataIntegrityError = 4002,
    SerializationError = 4003,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidScore = 6002,
    InvalidXp = 6003,
    MissingRequiredField = 6004,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::LearnerNotFound
            | ErrorCode::LessonNotFound
            | ErrorCode::AchievementNotFound
            | ErrorCode::LessonInactive
            | ErrorCode::ValidationError
            | ErrorCode::InvalidScore
            | ErrorCode::InvalidXp
            | ErrorCode::MissingRequiredField => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            _ => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RepositoryError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Learner not found: {0}")]
    LearnerNotFound(String),

    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(String),

    #[error("Lesson is inactive: {0}")]
    LessonInactive(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Invalid XP value: {0}")]
    InvalidXp(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::LearnerNotFound(_) => ErrorCode::LearnerNotFound,
            DomainError::LessonNotFound(_) => ErrorCode::LessonNotFound,
            DomainError::AchievementNotFound(_) => ErrorCode::AchievementNotFound,
            DomainError::LessonInactive(_) => ErrorCode::LessonInactive,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidScore(_) => ErrorCode::InvalidScore,
            DomainError::InvalidXp(_) => ErrorCode::InvalidXp,
            DomainError::MissingField(_) => ErrorCode::MissingRequiredField,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::LearnerNotFound(msg)
            | DomainError::LessonNotFound(msg)
            | DomainError::AchievementNotFound(msg)
            | DomainError::LessonInactive(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Serialization(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidScore(msg)
            | DomainError::InvalidXp(msg)
            | DomainError::MissingField(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
