//! Daily task operations of [`MovieTaskService`].

use super::MovieTaskService;
use crate::domain::DailyTask;
use crate::error::AppError;
use chrono::{Local, NaiveDate};
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::{debug, info};

impl MovieTaskService {
    /// Insert a task and return the id assigned by storage.
    pub async fn add_task(&self, task: &DailyTask) -> Result<i64, AppError> {
        let mut ctx = self.contexts.open().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (description, is_completed, due_date)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.due_date)
        .execute(ctx.conn())
        .await?;
        ctx.close().await?;

        let id = result.last_insert_rowid();
        debug!(id, description = %task.description, "Inserted task");
        Ok(id)
    }

    /// All tasks in storage order.
    pub async fn get_all_tasks(&self) -> Result<Vec<DailyTask>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let tasks: Vec<DailyTask> = sqlx::query(
            r#"
            SELECT id, description, is_completed, due_date
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch(ctx.conn())
        .map_ok(|row| task_from_row(&row))
        .try_collect()
        .await?;
        ctx.close().await?;

        Ok(tasks)
    }

    /// Get a task by id, or `None` if no row has that id.
    pub async fn get_task_by_id(&self, id: i64) -> Result<Option<DailyTask>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let task = find_task(ctx.conn(), id).await?;
        ctx.close().await?;
        Ok(task)
    }

    /// Set the completion flag of task `id`.
    ///
    /// A missing id changes nothing and is not an error; the return value
    /// says whether a task was found.
    pub async fn mark_task_completed(&self, id: i64) -> Result<bool, AppError> {
        let mut ctx = self.contexts.open().await?;
        let mut tx = ctx.conn().begin().await?;

        let Some(mut task) = find_task(&mut tx, id).await? else {
            tx.commit().await?;
            ctx.close().await?;
            debug!(id, "No task to mark completed");
            return Ok(false);
        };

        task.is_completed = true;
        sqlx::query("UPDATE tasks SET description = ?, is_completed = ?, due_date = ? WHERE id = ?")
            .bind(&task.description)
            .bind(task.is_completed)
            .bind(task.due_date)
            .bind(task.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        ctx.close().await?;
        Ok(true)
    }

    /// Open tasks due today, by the local clock.
    pub async fn get_todays_tasks(&self) -> Result<Vec<DailyTask>, AppError> {
        self.get_tasks_due_on(Local::now().date_naive()).await
    }

    /// Open tasks whose due date falls on `day`, in storage order.
    pub async fn get_tasks_due_on(&self, day: NaiveDate) -> Result<Vec<DailyTask>, AppError> {
        let mut ctx = self.contexts.open().await?;
        let rows = sqlx::query(
            r#"
            SELECT id, description, is_completed, due_date
            FROM tasks
            WHERE date(due_date) = ? AND is_completed = 0
            ORDER BY id ASC
            "#,
        )
        .bind(day)
        .fetch_all(ctx.conn())
        .await?;
        ctx.close().await?;

        Ok(rows.iter().map(task_from_row).collect())
    }

    /// Remove every completed task. Returns the number removed.
    pub async fn delete_completed_tasks(&self) -> Result<u64, AppError> {
        let mut ctx = self.contexts.open().await?;
        let removed = sqlx::query("DELETE FROM tasks WHERE is_completed = 1")
            .execute(ctx.conn())
            .await?
            .rows_affected();
        ctx.close().await?;

        info!(removed, "Deleted completed tasks");
        Ok(removed)
    }
}

async fn find_task(conn: &mut SqliteConnection, id: i64) -> Result<Option<DailyTask>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, description, is_completed, due_date
        FROM tasks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(row.as_ref().map(task_from_row))
}

fn task_from_row(row: &SqliteRow) -> DailyTask {
    DailyTask {
        id: row.get("id"),
        description: row.get("description"),
        is_completed: row.get("is_completed"),
        due_date: row.get("due_date"),
    }
}
