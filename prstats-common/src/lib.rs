use thiserror::Error;

/// Error types for loading pull requests and computing merge statistics
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrStatsError {
    #[error("Must provide a CSV filename")]
    MissingArgument,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid CSV data: {0}")]
    InvalidCsv(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Cannot parse {column} timestamp {value:?}")]
    DateParse { column: String, value: String },

    #[error("Cannot compute statistics over an empty sample")]
    EmptySample,
}

/// Result type for pull request statistics operations
pub type Result<T> = std::result::Result<T, PrStatsError>;

/// A column every pull request export must carry.
///
/// Exports may contain additional columns; they are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Repository,
    Number,
    User,
    Title,
    State,
    Created,
    Updated,
    Merged,
    Url,
}

impl Column {
    /// Every required column, in the order the export tool writes them.
    pub const ALL: [Column; 9] = [
        Column::Repository,
        Column::Number,
        Column::User,
        Column::Title,
        Column::State,
        Column::Created,
        Column::Updated,
        Column::Merged,
        Column::Url,
    ];

    /// Header text as it appears in the export.
    pub fn as_name(&self) -> &'static str {
        match self {
            Column::Repository => "Repository",
            Column::Number => "#",
            Column::User => "User",
            Column::Title => "Title",
            Column::State => "State",
            Column::Created => "Created",
            Column::Updated => "Updated",
            Column::Merged => "Merged",
            Column::Url => "URL",
        }
    }

    /// Exact (case-sensitive) lookup by header text.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.as_name() == name)
    }
}
