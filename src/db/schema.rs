//! Destructive schema reset for the demo databases.

use sqlx::sqlite::SqliteConnection;
use tracing::info;

/// Table set owned by one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `trains`
    Trains,
    /// `movies` and `tasks`
    Movies,
}

impl Schema {
    fn script(&self) -> &'static str {
        match self {
            Schema::Trains => include_str!("trains_schema.sql"),
            Schema::Movies => include_str!("movies_schema.sql"),
        }
    }

    pub fn tables(&self) -> &'static [&'static str] {
        match self {
            Schema::Trains => &["trains"],
            Schema::Movies => &["movies", "tasks"],
        }
    }
}

/// Drop every table of `schema` and create it again, empty.
///
/// All existing rows are lost. Identifier sequences restart at 1.
pub async fn recreate_schema(conn: &mut SqliteConnection, schema: Schema) -> Result<(), sqlx::Error> {
    info!(tables = ?schema.tables(), "Recreating database schema...");

    for statement in schema.script().split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(&mut *conn).await?;
        }
    }

    info!("Schema recreated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ContextFactory;
    use tempfile::TempDir;

    async fn open_test_db(temp_dir: &TempDir) -> crate::db::DbContext {
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        ContextFactory::new(&format!("sqlite:{}", db_path))
            .expect("bad url")
            .open()
            .await
            .expect("open failed")
    }

    async fn table_names(conn: &mut SqliteConnection) -> Vec<String> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(conn)
        .await
        .expect("query failed");
        rows.into_iter().map(|r| r.0).collect()
    }

    #[tokio::test]
    async fn test_creates_train_table() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = open_test_db(&temp_dir).await;

        recreate_schema(ctx.conn(), Schema::Trains)
            .await
            .expect("recreate failed");

        assert_eq!(table_names(ctx.conn()).await, vec!["trains"]);
    }

    #[tokio::test]
    async fn test_creates_movie_and_task_tables() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = open_test_db(&temp_dir).await;

        recreate_schema(ctx.conn(), Schema::Movies)
            .await
            .expect("recreate failed");

        assert_eq!(table_names(ctx.conn()).await, vec!["movies", "tasks"]);
    }

    #[tokio::test]
    async fn test_recreate_drops_rows_and_restarts_ids() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = open_test_db(&temp_dir).await;

        recreate_schema(ctx.conn(), Schema::Movies).await.unwrap();
        sqlx::query("INSERT INTO movies (title, rating, release_year) VALUES ('A', 1.0, 2000)")
            .execute(ctx.conn())
            .await
            .unwrap();

        recreate_schema(ctx.conn(), Schema::Movies)
            .await
            .expect("second recreate failed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(ctx.conn())
            .await
            .unwrap();
        assert_eq!(count.0, 0);

        let id = sqlx::query("INSERT INTO movies (title, rating, release_year) VALUES ('B', 2.0, 2001)")
            .execute(ctx.conn())
            .await
            .unwrap()
            .last_insert_rowid();
        assert_eq!(id, 1);
    }
}
