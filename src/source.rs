use crate::{
    config::RecordSourceConfig,
    data::{Department, Student, StudentDetails},
    error::{
        BuildClientSnafu, CreateStudentSnafu, DeleteStudentSnafu, FetchDepartmentsSnafu,
        FetchStudentSnafu, FetchStudentsSnafu, RosterResult, UpdateStudentSnafu,
    },
    query::StudentQuery,
};
use reqwest::{Client, StatusCode};
use snafu::ResultExt;
use std::sync::Arc;

const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone)]
pub struct StudentPage {
    pub students: Vec<Student>,
    pub total_count: usize,
}

/// Client for the remote collection backing students and departments.
#[derive(Debug, Clone)]
pub struct RecordSource {
    client: Client,
    config: Arc<RecordSourceConfig>,
}

impl RecordSource {
    pub fn new(config: Arc<RecordSourceConfig>) -> RosterResult<Self> {
        let client = Client::builder().build().context(BuildClientSnafu)?;
        Ok(Self { client, config })
    }

    pub async fn list_departments(&self) -> RosterResult<Vec<Department>> {
        debug!("Fetching departments");

        self.client
            .get(self.config.url("/departments"))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(FetchDepartmentsSnafu)?
            .json()
            .await
            .context(FetchDepartmentsSnafu)
    }

    pub async fn list_students(&self, query: &StudentQuery) -> RosterResult<StudentPage> {
        let pairs = query.to_pairs();
        debug!(?pairs, "Fetching students");

        let rsp = self
            .client
            .get(self.config.url("/students"))
            .query(&pairs)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(FetchStudentsSnafu)?;

        let header_count = rsp
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().parse::<usize>());

        let students: Vec<Student> = rsp.json().await.context(FetchStudentsSnafu)?;

        let total_count = match header_count {
            Some(Ok(count)) => count,
            Some(Err(e)) => {
                warn!(?e, "Unparseable total count header, counting the page instead");
                students.len()
            }
            None => students.len(),
        };

        Ok(StudentPage {
            students,
            total_count,
        })
    }

    /// `Ok(None)` when the record source says 404 or hands back `null`.
    pub async fn get_student(&self, id: i32) -> RosterResult<Option<Student>> {
        debug!(?id, "Fetching student");

        let rsp = self
            .client
            .get(self.config.url(&format!("/students/{id}")))
            .send()
            .await
            .context(FetchStudentSnafu { id })?;

        if rsp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        rsp.error_for_status()
            .context(FetchStudentSnafu { id })?
            .json()
            .await
            .context(FetchStudentSnafu { id })
    }

    pub async fn create_student(&self, details: &StudentDetails) -> RosterResult<Student> {
        debug!(student_no = ?details.student_no, "Creating student");

        self.client
            .post(self.config.url("/students"))
            .json(details)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(CreateStudentSnafu)?
            .json()
            .await
            .context(CreateStudentSnafu)
    }

    /// Full replacement, the id goes in the body as well as the path.
    pub async fn update_student(&self, student: &Student) -> RosterResult<Student> {
        let id = student.id;
        debug!(?id, "Updating student");

        self.client
            .put(self.config.url(&format!("/students/{id}")))
            .json(student)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(UpdateStudentSnafu { id })?
            .json()
            .await
            .context(UpdateStudentSnafu { id })
    }

    pub async fn delete_student(&self, id: i32) -> RosterResult<()> {
        debug!(?id, "Deleting student");

        self.client
            .delete(self.config.url(&format!("/students/{id}")))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(DeleteStudentSnafu { id })?;
        Ok(())
    }
}
