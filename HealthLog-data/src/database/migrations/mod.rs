// Schema migrations, run once when the connection factory is created
mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
