///
/// Errors surfaced while loading configuration or tabular input.
///
/// Parsing and comparing addresses never fail, every failure in this enum
/// originates at the edges: the vocabulary file, the CSV files, or a
/// reference collection that turned out to be empty.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A street type pattern failed to compile
    #[error("Invalid street type pattern for {label}: {source}")]
    Pattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    /// Two labels share the exact same pattern
    #[error("Ambiguous street types: {first} and {second} share the same pattern")]
    AmbiguousStreetTypes {
        first: String,
        second: String,
    },

    #[error("Missing column {column} in CSV header")]
    MissingColumn {
        column: String,
    },

    #[error("Reference collection is empty")]
    EmptyReference,
}
