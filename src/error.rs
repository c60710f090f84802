use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

pub const LOAD_FAILED: &str = "데이터를 불러오지 못했습니다.";
pub const DELETE_FAILED: &str = "삭제에 실패했습니다.";
pub const SAVE_FAILED: &str = "저장에 실패했습니다.";
pub const NOT_FOUND: &str = "학생 정보를 찾을 수 없습니다.";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as a number", name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Error building the HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Error fetching departments"))]
    FetchDepartments { source: reqwest::Error },
    #[snafu(display("Error fetching students"))]
    FetchStudents { source: reqwest::Error },
    #[snafu(display("Error fetching student {}", id))]
    FetchStudent { source: reqwest::Error, id: i32 },
    #[snafu(display("Error creating student"))]
    CreateStudent { source: reqwest::Error },
    #[snafu(display("Error updating student {}", id))]
    UpdateStudent { source: reqwest::Error, id: i32 },
    #[snafu(display("Error deleting student {}", id))]
    DeleteStudent { source: reqwest::Error, id: i32 },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: i32 },
    #[snafu(display("Required field `{}` was left blank", field))]
    BlankField { field: &'static str },
    #[snafu(display("Error with sessions"))]
    TowerSession {
        source: tower_sessions::session::Error,
    },
    #[snafu(display("No session on the request, is the session layer installed?"))]
    NoSession,
}

impl RosterError {
    /// The message shown to the user. Record Source failures are deliberately not told apart.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::DeleteStudent { .. } => DELETE_FAILED,
            Self::CreateStudent { .. } | Self::UpdateStudent { .. } | Self::BlankField { .. } => {
                SAVE_FAILED
            }
            Self::MissingStudent { .. } => NOT_FOUND,
            _ => LOAD_FAILED,
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //record source failed

        match self {
            Self::BadEnvVar { .. }
            | Self::ParseNumber { .. }
            | Self::BuildClient { .. }
            | Self::TowerSession { .. }
            | Self::NoSession => ISE,
            Self::FetchDepartments { .. }
            | Self::FetchStudents { .. }
            | Self::FetchStudent { .. }
            | Self::CreateStudent { .. }
            | Self::UpdateStudent { .. }
            | Self::DeleteStudent { .. } => BG,
            Self::MissingStudent { .. } => NF,
            Self::BlankField { .. } => BI,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::MissingStudent { .. } => html! {
                div class="text-gray-200 p-4" {
                    p {(NOT_FOUND)}
                    a href="/" class="text-blue-400 underline" {"목록으로 돌아가기"}
                }
            },
            _ => html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    span {(self.user_message())}
                }
            },
        };

        error!(?self, "Error!");
        (status_code, Html(body)).into_response()
    }
}
