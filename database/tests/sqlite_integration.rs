use database::{
    NewTodo, PoolSettings, SqliteTodoRepository, TodoError, TodoRepository, UpdateTodo,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn create_test_repository() -> SqliteTodoRepository {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

#[tokio::test]
async fn test_repository_creation_and_health() {
    let repo = create_test_repository().await;

    assert!(repo.health_check().await.is_ok());
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_todo_lifecycle() {
    let repo = create_test_repository().await;

    let created = repo.create(NewTodo::new("Buy milk")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.task, "Buy milk");
    assert!(!created.completed);

    let listed = repo.list_all().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let updated = repo
        .update(created.id, UpdateTodo::new("Buy bread", true))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.task, "Buy bread");
    assert!(updated.completed);

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, updated);

    repo.delete(created.id).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_can_clear_completed_flag() {
    let repo = create_test_repository().await;

    let todo = repo.create(NewTodo::new("Water plants")).await.unwrap();
    repo.update(todo.id, UpdateTodo::new("Water plants", true))
        .await
        .unwrap();
    let reverted = repo
        .update(todo.id, UpdateTodo::new("Water plants", false))
        .await
        .unwrap();

    assert!(!reverted.completed);
}

#[tokio::test]
async fn test_not_found_signals() {
    let repo = create_test_repository().await;

    assert!(repo.find_by_id(99).await.unwrap().is_none());

    let error = repo
        .update(99, UpdateTodo::new("Nothing", false))
        .await
        .unwrap_err();
    assert_eq!(error, TodoError::NotFound(99));

    let error = repo.delete(99).await.unwrap_err();
    assert_eq!(error, TodoError::NotFound(99));
}

#[tokio::test]
async fn test_second_delete_reports_not_found() {
    let repo = create_test_repository().await;

    let todo = repo.create(NewTodo::new("Call mom")).await.unwrap();
    repo.delete(todo.id).await.unwrap();

    let error = repo.delete(todo.id).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let repo = create_test_repository().await;

    let first = repo.create(NewTodo::new("first")).await.unwrap();
    let second = repo.create(NewTodo::new("second")).await.unwrap();
    repo.delete(second.id).await.unwrap();

    let third = repo.create(NewTodo::new("third")).await.unwrap();
    assert!(third.id > second.id);

    let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let repo = create_test_repository().await;

    for task in ["one", "two", "three"] {
        repo.create(NewTodo::new(task)).await.unwrap();
    }

    let tasks: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.task)
        .collect();
    assert_eq!(tasks, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("todos.db");
    let database_url = format!("sqlite://{}", db_path.display());

    {
        let repo = SqliteTodoRepository::new(&database_url).await.unwrap();
        repo.migrate().await.unwrap();
        repo.create(NewTodo::new("Persisted")).await.unwrap();
        repo.close().await;
    }

    assert!(db_path.exists());

    let reopened = SqliteTodoRepository::new(&database_url).await.unwrap();
    reopened.migrate().await.unwrap();
    let todos = reopened.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].task, "Persisted");
}

#[tokio::test]
async fn test_bare_path_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("bare.db");

    let repo = SqliteTodoRepository::new(db_path.to_str().unwrap())
        .await
        .unwrap();
    repo.migrate().await.unwrap();
    assert!(repo.health_check().await.is_ok());
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let temp_dir = TempDir::new().unwrap();
    let database_url = format!("sqlite://{}", temp_dir.path().join("concurrent.db").display());

    let settings = PoolSettings {
        max_connections: 4,
        acquire_timeout: Duration::from_secs(10),
    };
    let repo = Arc::new(
        SqliteTodoRepository::with_settings(&database_url, settings)
            .await
            .unwrap(),
    );
    repo.migrate().await.unwrap();

    let handles = (0..20).map(|i| {
        let repo = repo.clone();
        tokio::spawn(async move { repo.create(NewTodo::new(format!("task {i}"))).await })
    });

    let mut ids: Vec<i64> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 20);
    assert_eq!(repo.list_all().await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_queries_fail_cleanly_without_schema() {
    // No migrate() call: the table does not exist
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();

    let error = repo.list_all().await.unwrap_err();
    assert!(error.is_database());

    let error = repo.create(NewTodo::new("orphan")).await.unwrap_err();
    assert!(error.is_database());
}
