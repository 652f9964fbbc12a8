//! Fixed demonstration sequence for the `movies` program.

use crate::domain::{DailyTask, Movie};
use crate::error::AppError;
use crate::service::MovieTaskService;
use chrono::NaiveDate;
use std::io::Write;
use tracing::info;

const LOW_RATING_THRESHOLD: f32 = 3.4;
const OLD_MOVIE_YEAR: i32 = 2005;

/// Run the movie and task walkthrough against a freshly reset database.
///
/// `today` decides which day the sample task is due and which tasks count
/// as "today's".
pub async fn run(
    service: &MovieTaskService,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), AppError> {
    service.initialize_database().await?;

    service.add_movies(&Movie::samples()).await?;

    let in_range = service.get_movies_by_rating(7.0, 8.5).await?;
    writeln!(out, "Movies in rating range:")?;
    for movie in &in_range {
        writeln!(out, "{} - {}", movie.title, movie.rating)?;
    }

    let mut to_update = service.get_movies_by_rating(8.5, 9.0).await?;
    for movie in &mut to_update {
        movie.rating += 0.1;
    }
    service.update_movies(&to_update).await?;

    service.delete_low_rated_movies(LOW_RATING_THRESHOLD).await?;

    let mut to_edit = service
        .get_movies_by_rating(8.0, 9.0)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("movie rated between 8 and 9".to_string()))?;
    to_edit.rating = 9.0;
    service.update_movies(std::slice::from_ref(&to_edit)).await?;

    service.increment_old_movies_rating(OLD_MOVIE_YEAR).await?;
    info!("Movie steps finished");

    service
        .add_task(&DailyTask::due_on("Buy groceries", today))
        .await?;

    let all_tasks = service.get_all_tasks().await?;
    writeln!(out, "\nAll tasks:")?;
    for task in &all_tasks {
        writeln!(
            out,
            "{} - {} - Completed: {}",
            task.description,
            task.due_date.format("%m/%d/%Y"),
            task.is_completed
        )?;
    }

    if let Some(first) = all_tasks.first() {
        service.mark_task_completed(first.id).await?;
    }

    let todays_tasks = service.get_tasks_due_on(today).await?;
    writeln!(out, "\nToday's tasks:")?;
    for task in &todays_tasks {
        writeln!(out, "{}", task.description)?;
    }

    service.delete_completed_tasks().await?;

    writeln!(out, "\nOperations completed!")?;
    Ok(())
}
