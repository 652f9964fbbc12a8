//! Movie operations of [`MovieTaskService`].

use crate::db::{recreate_schema, ContextFactory, Schema};
use crate::domain::movie::OLD_MOVIE_RATING_BONUS;
use crate::domain::Movie;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::{debug, info, warn};

/// Data access for the `movies` and `tasks` tables.
///
/// Movie methods live here, task methods in `tasks.rs`. Every method opens
/// its own connection scope and closes it before returning.
#[derive(Debug, Clone)]
pub struct MovieTaskService {
    pub(super) contexts: ContextFactory,
}

impl MovieTaskService {
    pub fn new(contexts: ContextFactory) -> Self {
        MovieTaskService { contexts }
    }

    /// Build the service straight from a connection string.
    pub fn connect(connection_string: &str) -> Result<Self, AppError> {
        Ok(Self::new(ContextFactory::new(connection_string)?))
    }

    /// Drop and recreate the `movies` and `tasks` tables, both empty.
    pub async fn initialize_database(&self) -> Result<(), AppError> {
        let mut ctx = self.contexts.open().await?;
        recreate_schema(ctx.conn(), Schema::Movies).await?;
        ctx.close().await?;
        Ok(())
    }

    /// Insert all movies in one transaction.
    ///
    /// Returns the assigned ids in input order.
    pub async fn add_movies(&self, movies: &[Movie]) -> Result<Vec<i64>, AppError> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        let mut ids = Vec::with_capacity(movies.len());
        for movie in movies {
            let result = sqlx::query(
                r#"
                INSERT INTO movies (title, rating, release_year)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(&movie.title)
            .bind(movie.rating)
            .bind(movie.release_year)
            .execute(&mut *tx)
            .await?;
            ids.push(result.last_insert_rowid());
        }

        tx.commit().await?;
        ctx.close().await?;

        debug!(count = ids.len(), "Inserted movies");
        Ok(ids)
    }

    /// Movies with `min_rating <= rating <= max_rating`, in storage order.
    pub async fn get_movies_by_rating(
        &self,
        min_rating: f32,
        max_rating: f32,
    ) -> Result<Vec<Movie>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, title, rating, release_year
            FROM movies
            WHERE rating >= ? AND rating <= ?
            ORDER BY id ASC
            "#,
        )
        .bind(min_rating)
        .bind(max_rating)
        .fetch_all(ctx.conn())
        .await?;
        ctx.close().await?;

        Ok(rows.iter().map(movie_from_row).collect())
    }

    /// Overwrite every column of each movie's row in one transaction.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` and persists nothing if any id has no row.
    pub async fn update_movies(&self, movies: &[Movie]) -> Result<(), AppError> {
        if movies.is_empty() {
            return Ok(());
        }

        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        for movie in movies {
            if !update_movie(&mut tx, movie).await? {
                warn!(id = movie.id, "Update matched no movie, rolling back batch");
                return Err(AppError::NotFound(format!("movie {}", movie.id)));
            }
        }

        tx.commit().await?;
        ctx.close().await?;

        debug!(count = movies.len(), "Updated movies");
        Ok(())
    }

    /// Delete the given movies by id in one transaction.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` and deletes nothing if any id has no row.
    pub async fn delete_movies(&self, movies: &[Movie]) -> Result<u64, AppError> {
        if movies.is_empty() {
            return Ok(0);
        }

        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        for movie in movies {
            if !delete_movie(&mut tx, movie.id).await? {
                warn!(id = movie.id, "Delete matched no movie, rolling back batch");
                return Err(AppError::NotFound(format!("movie {}", movie.id)));
            }
        }

        tx.commit().await?;
        ctx.close().await?;

        let removed = movies.len() as u64;
        debug!(removed, "Deleted movies");
        Ok(removed)
    }

    /// Remove every movie rated strictly below `rating_threshold`.
    ///
    /// Returns the number of movies removed.
    pub async fn delete_low_rated_movies(&self, rating_threshold: f32) -> Result<u64, AppError> {
        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        let low_rated: Vec<i64> = sqlx::query("SELECT id FROM movies WHERE rating < ?")
            .bind(rating_threshold)
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(|row| row.get("id"))
            .collect();
        let mut removed = 0u64;
        for id in low_rated {
            if delete_movie(&mut tx, id).await? {
                removed += 1;
            }
        }

        tx.commit().await?;
        ctx.close().await?;

        info!(removed, rating_threshold, "Deleted low rated movies");
        Ok(removed)
    }

    /// Add [`OLD_MOVIE_RATING_BONUS`] to the rating of every movie released
    /// strictly before `year_threshold`, in one transaction.
    ///
    /// Returns the number of movies changed.
    pub async fn increment_old_movies_rating(&self, year_threshold: i32) -> Result<u64, AppError> {
        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, rating, release_year
            FROM movies
            WHERE release_year < ?
            ORDER BY id ASC
            "#,
        )
        .bind(year_threshold)
        .fetch_all(&mut *tx)
        .await?;

        let mut changed = 0u64;
        for mut movie in rows.iter().map(movie_from_row) {
            movie.rating += OLD_MOVIE_RATING_BONUS;
            if update_movie(&mut tx, &movie).await? {
                changed += 1;
            }
        }

        tx.commit().await?;
        ctx.close().await?;

        info!(changed, year_threshold, "Incremented old movie ratings");
        Ok(changed)
    }
}

async fn update_movie(conn: &mut SqliteConnection, movie: &Movie) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE movies
        SET title = ?, rating = ?, release_year = ?
        WHERE id = ?
        "#,
    )
    .bind(&movie.title)
    .bind(movie.rating)
    .bind(movie.release_year)
    .bind(movie.id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn delete_movie(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn movie_from_row(row: &SqliteRow) -> Movie {
    Movie {
        id: row.get("id"),
        title: row.get("title"),
        rating: row.get("rating"),
        release_year: row.get("release_year"),
    }
}
