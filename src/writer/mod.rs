pub mod db;
pub mod loader;
pub mod schema_gen;
pub mod schema_manager;
pub mod value;

pub use db::Database;
pub use loader::{BulkLoader, LoadReport, Record, RecordOutcome};
pub use schema_manager::SchemaManager;
pub use value::SqlValue;
