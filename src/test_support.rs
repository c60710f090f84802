//! An in-process stand-in for the record source, with json-server semantics, that records every call.

use crate::{
    config::{RecordSourceConfig, RuntimeConfiguration},
    data::{Department, Sex, Student, StudentDetails},
    source::RecordSource,
    state::RosterState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

pub fn department(id: i32, short_name: &str) -> Department {
    Department {
        id,
        name: format!("{short_name} Department"),
        short_name: short_name.to_string(),
        phone: "02-000-0000".to_string(),
    }
}

pub fn student(id: i32, student_no: &str, department_id: i32) -> Student {
    Student {
        id,
        details: StudentDetails {
            student_no: student_no.to_string(),
            name: format!("Student {id}"),
            phone: "010-0000-0000".to_string(),
            sex: if id % 2 == 0 { Sex::Female } else { Sex::Male },
            email: format!("s{id}@example.com"),
            department_id,
        },
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is(&self, method: &Method, path: &str) -> bool {
        &self.method == method && self.path == path
    }
}

#[derive(Debug, Default)]
struct MockDb {
    departments: Vec<Department>,
    students: Vec<Student>,
    calls: Vec<RecordedCall>,
    fail_departments: bool,
    fail_everything: bool,
}

type Db = Arc<Mutex<MockDb>>;

fn lock(db: &Db) -> std::sync::MutexGuard<'_, MockDb> {
    db.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record(db: &Db, method: Method, path: String, params: Vec<(String, String)>, body: Option<Value>) -> bool {
    let mut db = lock(db);
    db.calls.push(RecordedCall {
        method,
        path,
        params,
        body,
    });
    db.fail_everything
}

async fn list_departments(State(db): State<Db>) -> Response {
    let failing = record(&db, Method::GET, "/departments".into(), vec![], None);
    let db = lock(&db);
    if failing || db.fail_departments {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(db.departments.clone()).into_response()
}

async fn list_students(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if record(&db, Method::GET, "/students".into(), params.clone(), None) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let param = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    let mut found: Vec<Student> = lock(&db)
        .students
        .iter()
        .filter(|s| {
            param("departmentId").is_none_or(|d| d == s.details.department_id.to_string())
        })
        .filter(|s| param("sex").is_none_or(|sex| sex == s.details.sex.as_str()))
        .filter(|s| {
            param("q").is_none_or(|q| s.details.name.contains(&q) || s.details.student_no.contains(&q))
        })
        .cloned()
        .collect();

    match param("_sort").as_deref() {
        Some("studentNo") => found.sort_by(|a, b| a.details.student_no.cmp(&b.details.student_no)),
        Some("name") => found.sort_by(|a, b| a.details.name.cmp(&b.details.name)),
        _ => found.sort_by_key(|s| s.id),
    }
    if param("_order").as_deref() == Some("desc") {
        found.reverse();
    }

    let total = found.len();
    let page: usize = param("_page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = param("_limit").and_then(|l| l.parse().ok()).unwrap_or(total.max(1));
    let rows: Vec<Student> = found
        .into_iter()
        .skip(page.saturating_sub(1) * limit)
        .take(limit)
        .collect();

    ([("X-Total-Count", total.to_string())], Json(rows)).into_response()
}

async fn get_student(State(db): State<Db>, Path(id): Path<i32>) -> Response {
    if record(&db, Method::GET, format!("/students/{id}"), vec![], None) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match lock(&db).students.iter().find(|s| s.id == id) {
        Some(found) => Json(found.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({}))).into_response(),
    }
}

async fn create_student(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    if record(&db, Method::POST, "/students".into(), vec![], Some(body.clone())) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let Ok(details) = serde_json::from_value::<StudentDetails>(body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut db = lock(&db);
    let id = db.students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let created = Student { id, details };
    db.students.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Response {
    if record(&db, Method::PUT, format!("/students/{id}"), vec![], Some(body.clone())) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let Ok(replacement) = serde_json::from_value::<Student>(body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut db = lock(&db);
    match db.students.iter_mut().find(|s| s.id == id) {
        Some(existing) => {
            *existing = replacement.clone();
            Json(replacement).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_student(State(db): State<Db>, Path(id): Path<i32>) -> Response {
    if record(&db, Method::DELETE, format!("/students/{id}"), vec![], None) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let mut db = lock(&db);
    let before = db.students.len();
    db.students.retain(|s| s.id != id);
    if db.students.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        Json(serde_json::json!({})).into_response()
    }
}

pub struct MockSource {
    addr: SocketAddr,
    db: Db,
}

impl MockSource {
    pub async fn spawn(departments: Vec<Department>, students: Vec<Student>) -> Self {
        let db: Db = Arc::new(Mutex::new(MockDb {
            departments,
            students,
            ..MockDb::default()
        }));

        let app = Router::new()
            .route("/departments", get(list_departments))
            .route("/students", get(list_students).post(create_student))
            .route(
                "/students/{id}",
                get(get_student).put(update_student).delete(delete_student),
            )
            .with_state(db.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve mock") });

        Self { addr, db }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn source(&self) -> RecordSource {
        RecordSource::new(Arc::new(RecordSourceConfig::from_base_url(&self.base_url())))
            .expect("build record source")
    }

    pub fn state(&self) -> RosterState {
        let config =
            RuntimeConfiguration::from_parts("127.0.0.1:0", &self.base_url(), Duration::from_secs(3));
        RosterState::new(config).expect("build state")
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.db).calls.clone()
    }

    pub fn students(&self) -> Vec<Student> {
        lock(&self.db).students.clone()
    }

    pub fn fail_departments(&self) {
        lock(&self.db).fail_departments = true;
    }

    pub fn fail_everything(&self) {
        lock(&self.db).fail_everything = true;
    }
}

pub async fn body_string(rsp: Response) -> String {
    let bytes = axum::body::to_bytes(rsp.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
