mod progression_queries;

pub use progression_queries::ProgressionQueries;
