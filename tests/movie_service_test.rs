use chrono::{Local, NaiveDate};
use console_crud::{DailyTask, Movie, MovieTaskService};
use tempfile::TempDir;

async fn setup_test_service() -> (MovieTaskService, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("movies.db")
        .to_string_lossy()
        .to_string();
    let service =
        MovieTaskService::connect(&format!("sqlite:{}?mode=rwc", db_path)).expect("bad url");
    service.initialize_database().await.expect("init failed");
    (service, temp_dir)
}

async fn all_movies(service: &MovieTaskService) -> Vec<Movie> {
    service
        .get_movies_by_rating(f32::MIN, f32::MAX)
        .await
        .expect("query failed")
}

fn rating_of(movies: &[Movie], title: &str) -> f32 {
    movies
        .iter()
        .find(|m| m.title == title)
        .map(|m| m.rating)
        .unwrap_or_else(|| panic!("{} missing", title))
}

#[tokio::test]
async fn test_initialize_twice_leaves_tables_empty() {
    let (service, _temp) = setup_test_service().await;
    service.add_movies(&Movie::samples()).await.unwrap();
    service
        .add_task(&DailyTask::due_on("Leftover", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
        .await
        .unwrap();

    service.initialize_database().await.unwrap();
    service.initialize_database().await.unwrap();

    assert!(all_movies(&service).await.is_empty());
    assert!(service.get_all_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upper_bound_excludes_all_samples() {
    let (service, _temp) = setup_test_service().await;
    service.add_movies(&Movie::samples()).await.unwrap();

    let movies = service.get_movies_by_rating(7.0, 8.5).await.unwrap();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_range_returns_storage_order() {
    let (service, _temp) = setup_test_service().await;
    service.add_movies(&Movie::samples()).await.unwrap();

    let movies = service.get_movies_by_rating(8.5, 9.0).await.unwrap();
    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception", "The Matrix", "Interstellar"]);
}

#[tokio::test]
async fn test_delete_low_rated_uses_strict_threshold() {
    let (service, _temp) = setup_test_service().await;
    service
        .add_movies(&[
            Movie::new("Awful", 1.0, 2001),
            Movie::new("Poor", 3.3, 2002),
            Movie::new("Borderline", 3.4, 2003),
            Movie::new("Fine", 5.0, 2004),
        ])
        .await
        .unwrap();

    let removed = service.delete_low_rated_movies(3.4).await.unwrap();
    assert_eq!(removed, 2);

    let remaining = all_movies(&service).await;
    let titles: Vec<&str> = remaining.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Borderline", "Fine"]);
    assert!(remaining.iter().all(|m| m.rating >= 3.4));
}

#[tokio::test]
async fn test_increment_only_touches_movies_before_threshold() {
    let (service, _temp) = setup_test_service().await;
    service
        .add_movies(&[
            Movie::new("Old", 5.0, 1999),
            Movie::new("Boundary", 5.0, 2005),
            Movie::new("New", 6.0, 2010),
        ])
        .await
        .unwrap();

    let changed = service.increment_old_movies_rating(2005).await.unwrap();
    assert_eq!(changed, 1);

    let movies = all_movies(&service).await;
    assert!((rating_of(&movies, "Old") - 5.1).abs() < 1e-5);
    assert_eq!(rating_of(&movies, "Boundary"), 5.0);
    assert_eq!(rating_of(&movies, "New"), 6.0);
}

#[tokio::test]
async fn test_update_movies_overwrites_fetched_copies() {
    let (service, _temp) = setup_test_service().await;
    service.add_movies(&Movie::samples()).await.unwrap();

    let mut movies = service.get_movies_by_rating(8.5, 9.0).await.unwrap();
    for movie in &mut movies {
        movie.rating += 0.1;
    }
    service.update_movies(&movies).await.unwrap();

    let stored = all_movies(&service).await;
    assert_eq!(stored, movies);
}

#[tokio::test]
async fn test_mark_missing_task_is_noop() {
    let (service, _temp) = setup_test_service().await;
    let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    service
        .add_task(&DailyTask::due_on("Buy groceries", day))
        .await
        .unwrap();
    let before = service.get_all_tasks().await.unwrap();

    let found = service.mark_task_completed(999).await.expect("should not fail");
    assert!(!found);

    assert_eq!(service.get_all_tasks().await.unwrap(), before);
}

#[tokio::test]
async fn test_tasks_due_today_exclude_completed() {
    let (service, _temp) = setup_test_service().await;
    let today = Local::now().date_naive();

    let done = service
        .add_task(&DailyTask::due_on("Already done", today))
        .await
        .unwrap();
    service
        .add_task(&DailyTask::due_on("Still open", today))
        .await
        .unwrap();
    service.mark_task_completed(done).await.unwrap();

    let tasks = service.get_tasks_due_on(today).await.unwrap();
    let names: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Still open"]);

    // Reads the clock again, so only check it never returns completed tasks
    let todays = service.get_todays_tasks().await.unwrap();
    assert!(todays.iter().all(|t| !t.is_completed));
}

#[tokio::test]
async fn test_delete_completed_tasks() {
    let (service, _temp) = setup_test_service().await;
    let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let first = service
        .add_task(&DailyTask::due_on("First", day))
        .await
        .unwrap();
    let second = service
        .add_task(&DailyTask::due_on("Second", day))
        .await
        .unwrap();
    service.mark_task_completed(first).await.unwrap();
    service.mark_task_completed(second).await.unwrap();

    assert_eq!(service.delete_completed_tasks().await.unwrap(), 2);
    assert!(service.get_all_tasks().await.unwrap().is_empty());
}
