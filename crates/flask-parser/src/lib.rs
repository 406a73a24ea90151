pub mod errors;
pub mod layout;
pub mod loader;
pub mod model;
pub mod project;

pub use errors::{ParserError, Stage};
pub use layout::{ColumnLayout, ColumnOrigin};
pub use loader::{load_source, HeaderMode, DEFAULT_HEADER_LINES};
pub use model::{
    FileMetadata, Observation, ParsedFlaskFile, SourceRow, SourceTable, MISSING_SENTINEL,
    OUTPUT_COLUMNS, SOURCE_COLUMNS,
};
pub use project::{parse_flask_file, project, project_with_layout};
