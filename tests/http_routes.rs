use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tareas::model::{Project, ProjectStatus, Task, TaskStatus};
use tareas::storage::SqliteStorage;
use tareas::web::{AppState, create_router};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    db_path: std::path::PathBuf,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("tareas.db");
        let storage = SqliteStorage::open(&db_path).unwrap();
        Self {
            _dir: dir,
            db_path,
            router: create_router(AppState::new(storage)),
        }
    }

    /// A second handle on the same database, for seeding and inspection.
    fn storage(&self) -> SqliteStorage {
        SqliteStorage::open(&self.db_path).unwrap()
    }

    async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post_form(&self, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn assert_redirects_home(response: &Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
}

fn ids(values: &serde_json::Value) -> Vec<i64> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn index_lists_pending_tasks_by_due_date() {
    let app = TestApp::new();
    let storage = app.storage();
    storage
        .create_task(&Task::new("late", 0).with_due_date(Some("2025-03-10".to_string())))
        .unwrap();
    let early = storage
        .create_task(&Task::new("early", 0).with_due_date(Some("2025-03-01".to_string())))
        .unwrap();
    let done = storage.create_task(&Task::new("done", 0)).unwrap();
    storage
        .update_task_status(done.id, TaskStatus::COMPLETED)
        .unwrap();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;

    let titles: Vec<&str> = view["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["early", "late"]);
    assert_eq!(view["tasks"][0]["id"], early.id);
    assert_eq!(ids(&view["projects"]), vec![0]);
}

#[tokio::test]
async fn create_task_redirects_and_stores_pending_task() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/crear",
            "titulo=Write+report&descripcion=&fecha_limite=2025-03-01&prioridad=Alta&proyecto_id=",
        )
        .await;

    assert_redirects_home(&response);
    let tasks = app.storage().list_tasks(None).unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.title, "Write report");
    assert_eq!(task.status, TaskStatus::PENDING);
    assert_eq!(task.project_id, 0);
    assert!(task.description.is_none());
    assert!(task.created_at.is_some());
}

#[tokio::test]
async fn create_task_with_blank_title_is_rejected() {
    let app = TestApp::new();

    let response = app.post_form("/crear", "titulo=++&proyecto_id=0").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "REQUIRED_FIELD");
    assert!(app.storage().list_tasks(None).unwrap().is_empty());
}

#[tokio::test]
async fn new_task_form_offers_only_active_projects() {
    let app = TestApp::new();
    let storage = app.storage();
    let active = storage
        .create_project(&Project::new("Active", None))
        .unwrap();
    let mut inactive = storage
        .create_project(&Project::new("Paused", None))
        .unwrap();
    inactive.status = ProjectStatus::INACTIVE.to_string();
    storage.update_project(&inactive).unwrap();

    let view = body_json(app.get("/crear").await).await;

    assert_eq!(ids(&view["projects"]), vec![0, active.id]);
}

#[tokio::test]
async fn complete_and_delete_always_redirect() {
    let app = TestApp::new();
    let task = app.storage().create_task(&Task::new("t", 0)).unwrap();

    assert_redirects_home(&app.get(&format!("/completar/{}", task.id)).await);
    let stored = app.storage().get_task(task.id).unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::COMPLETED);

    assert_redirects_home(&app.get(&format!("/eliminar/{}", task.id)).await);
    assert!(app.storage().get_task(task.id).unwrap().is_none());

    assert_redirects_home(&app.get("/completar/999").await);
    assert_redirects_home(&app.get("/eliminar/999").await);
}

#[tokio::test]
async fn edit_routes_return_not_found_for_unknown_ids() {
    let app = TestApp::new();

    assert_eq!(
        app.get("/tarea/editar/42").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_form("/tarea/editar/42", "titulo=x").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/proyecto/editar/42").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_form("/proyecto/editar/42", "nombre=x").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn edit_task_overwrites_fields_but_keeps_status() {
    let app = TestApp::new();
    let storage = app.storage();
    let project = storage
        .create_project(&Project::new("Home", None))
        .unwrap();
    let task = storage
        .create_task(&Task::new("old", 0).with_priority(Some("Baja".to_string())))
        .unwrap();
    storage
        .update_task_status(task.id, TaskStatus::COMPLETED)
        .unwrap();

    let body = format!(
        "titulo=new&descripcion=details&fecha_limite=2025-04-01&prioridad=Alta&proyecto_id={}",
        project.id
    );
    assert_redirects_home(&app.post_form(&format!("/tarea/editar/{}", task.id), &body).await);

    let stored = storage.get_task(task.id).unwrap().unwrap();
    assert_eq!(stored.title, "new");
    assert_eq!(stored.description.as_deref(), Some("details"));
    assert_eq!(stored.due_date.as_deref(), Some("2025-04-01"));
    assert_eq!(stored.priority.as_deref(), Some("Alta"));
    assert_eq!(stored.project_id, project.id);
    assert_eq!(stored.status, TaskStatus::COMPLETED);
    assert_eq!(stored.created_at, task.created_at);
}

#[tokio::test]
async fn project_lifecycle_leaves_task_reference_dangling() {
    let app = TestApp::new();

    assert_redirects_home(
        &app.post_form("/proyecto/nuevo", "nombre=Casa&descripcion=Chores")
            .await,
    );
    let storage = app.storage();
    let project = storage
        .list_projects()
        .unwrap()
        .into_iter()
        .find(|p| p.name == "Casa")
        .unwrap();
    assert_eq!(project.status, ProjectStatus::ACTIVE);

    let body = format!("titulo=Sweep&proyecto_id={}", project.id);
    assert_redirects_home(&app.post_form("/crear", &body).await);

    let edit_view = body_json(app.get(&format!("/proyecto/editar/{}", project.id)).await).await;
    assert_eq!(edit_view["project"]["name"], "Casa");

    assert_redirects_home(
        &app.post_form(
            &format!("/proyecto/editar/{}", project.id),
            "nombre=Casa&descripcion=&estado=Inactivo",
        )
        .await,
    );
    let stored = storage.get_project(project.id).unwrap().unwrap();
    assert_eq!(stored.status, ProjectStatus::INACTIVE);
    assert!(stored.description.is_none());

    assert_redirects_home(&app.get(&format!("/proyecto/eliminar/{}", project.id)).await);
    assert!(storage.get_project(project.id).unwrap().is_none());

    let view = body_json(app.get("/").await).await;
    assert_eq!(view["tasks"][0]["title"], "Sweep");
    assert_eq!(view["tasks"][0]["project_id"], project.id);
}

#[tokio::test]
async fn default_project_survives_delete_route() {
    let app = TestApp::new();

    assert_redirects_home(&app.get("/proyecto/eliminar/0").await);

    assert!(app.storage().get_project(0).unwrap().is_some());
}

#[tokio::test]
async fn task_edit_view_includes_current_inactive_project() {
    let app = TestApp::new();
    let storage = app.storage();
    let mut paused = storage
        .create_project(&Project::new("Paused", None))
        .unwrap();
    let task = storage.create_task(&Task::new("t", paused.id)).unwrap();
    paused.status = ProjectStatus::INACTIVE.to_string();
    storage.update_project(&paused).unwrap();

    let view = body_json(app.get(&format!("/tarea/editar/{}", task.id)).await).await;

    assert_eq!(view["task"]["id"], task.id);
    assert_eq!(ids(&view["projects"]), vec![0, paused.id]);
}
