

pub mod engine;
pub mod error;
pub mod models;
pub mod parser;
pub mod prompt;

pub use engine::{AnalysisSettings, Analyzer};
pub use error::{AnalysisError, ErrorKind};
pub use models::{AnalysisReport, ModelVerdict, ResultSet, RiskBand};
pub use parser::{extract_json_object, parse_verdict, JsonExtraction};
