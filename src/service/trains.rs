//! Train CRUD operations.

use crate::db::{recreate_schema, ContextFactory, Schema};
use crate::domain::Train;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::{debug, info, warn};

/// Data access for the `trains` table.
///
/// Every method opens its own connection scope and closes it before
/// returning.
#[derive(Debug, Clone)]
pub struct TrainService {
    contexts: ContextFactory,
}

impl TrainService {
    pub fn new(contexts: ContextFactory) -> Self {
        TrainService { contexts }
    }

    /// Build the service straight from a connection string.
    pub fn connect(connection_string: &str) -> Result<Self, AppError> {
        Ok(Self::new(ContextFactory::new(connection_string)?))
    }

    /// Drop and recreate the `trains` table, then seed [`Train::test_data`].
    ///
    /// Destroys existing rows. Afterwards the table holds exactly the two
    /// seed trains with ids 1 and 2.
    pub async fn ensure_populate(&self) -> Result<(), AppError> {
        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        recreate_schema(&mut tx, Schema::Trains).await?;
        for train in Train::test_data() {
            insert_train(&mut tx, &train).await?;
        }

        tx.commit().await?;
        ctx.close().await?;

        info!("Trains table populated with seed data");
        Ok(())
    }

    /// Get a train by id, or `None` if no row has that id.
    pub async fn get_train_by_id(&self, id: i64) -> Result<Option<Train>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let row = sqlx::query(
            r#"
            SELECT id, carrier, mileage, technical_number, registration_date, manager_phone_number
            FROM trains
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(ctx.conn())
        .await?;
        ctx.close().await?;

        Ok(row.as_ref().map(train_from_row))
    }

    /// All trains in storage order.
    pub async fn get_all_trains(&self) -> Result<Vec<Train>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, carrier, mileage, technical_number, registration_date, manager_phone_number
            FROM trains
            ORDER BY id ASC
            "#,
        )
        .fetch_all(ctx.conn())
        .await?;
        ctx.close().await?;

        Ok(rows.iter().map(train_from_row).collect())
    }

    /// Insert a train and return the id assigned by storage.
    ///
    /// The `id` field of `train` is ignored.
    pub async fn add_train(&self, train: &Train) -> Result<i64, AppError> {
        let mut ctx = self.contexts.open().await?;
        let id = insert_train(ctx.conn(), train).await?;
        ctx.close().await?;

        debug!(id, carrier = %train.carrier, "Inserted train");
        Ok(id)
    }

    /// Overwrite every column of the row with `train.id`.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row has that id.
    pub async fn update_train(&self, train: &Train) -> Result<(), AppError> {
        let mut ctx = self.contexts.open().await?;
        let result = sqlx::query(
            r#"
            UPDATE trains
            SET carrier = ?, mileage = ?, technical_number = ?,
                registration_date = ?, manager_phone_number = ?
            WHERE id = ?
            "#,
        )
        .bind(&train.carrier)
        .bind(train.mileage)
        .bind(&train.technical_number)
        .bind(train.registration_date)
        .bind(&train.manager_phone_number)
        .bind(train.id)
        .execute(ctx.conn())
        .await?;
        ctx.close().await?;

        if result.rows_affected() == 0 {
            warn!(id = train.id, "Update matched no train");
            return Err(AppError::NotFound(format!("train {}", train.id)));
        }
        Ok(())
    }

    /// Delete the row with `train.id`.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row has that id.
    pub async fn remove_train(&self, train: &Train) -> Result<(), AppError> {
        let mut ctx = self.contexts.open().await?;
        let result = sqlx::query("DELETE FROM trains WHERE id = ?")
            .bind(train.id)
            .execute(ctx.conn())
            .await?;
        ctx.close().await?;

        if result.rows_affected() == 0 {
            warn!(id = train.id, "Delete matched no train");
            return Err(AppError::NotFound(format!("train {}", train.id)));
        }
        Ok(())
    }
}

async fn insert_train(conn: &mut SqliteConnection, train: &Train) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO trains (carrier, mileage, technical_number, registration_date, manager_phone_number)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&train.carrier)
    .bind(train.mileage)
    .bind(&train.technical_number)
    .bind(train.registration_date)
    .bind(&train.manager_phone_number)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

fn train_from_row(row: &SqliteRow) -> Train {
    Train {
        id: row.get("id"),
        carrier: row.get("carrier"),
        mileage: row.get("mileage"),
        technical_number: row.get("technical_number"),
        registration_date: row.get("registration_date"),
        manager_phone_number: row.get("manager_phone_number"),
    }
}
