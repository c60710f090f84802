use crate::{
    data::Student,
    error::{MissingStudentSnafu, RosterResult},
    lookup::DepartmentLookup,
    maud_conveniences::{loading_placeholder, title},
    routes::student_form::{StudentFormInput, hx_redirect, render_student_form},
    session::ToastClient,
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use maud::{Markup, html};
use snafu::OptionExt;

pub const UPDATED_TOAST: &str = "학생 정보가 수정되었습니다.";

pub async fn get_edit_page(State(state): State<RosterState>, Path(id): Path<i32>) -> Markup {
    state.render(html! {
        div id="in_focus" hx-get={"/internal/students/" (id) "/edit"} hx-trigger="load" {
            (loading_placeholder())
        }
    })
}

pub async fn internal_get_edit_form(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
) -> RosterResult<Markup> {
    let (departments, student) =
        tokio::try_join!(state.list_departments(), state.get_student(id))?;
    let student = student.context(MissingStudentSnafu { id })?;
    let lookup = DepartmentLookup::new(departments);

    Ok(html! {
        (title("학생 정보 수정"))
        (render_student_form(&format!("/students/{id}/edit"), &lookup, Some(&student.details), "수정하기"))
    })
}

pub async fn post_edit_student(
    State(state): State<RosterState>,
    ToastClient(client): ToastClient,
    Path(id): Path<i32>,
    Form(input): Form<StudentFormInput>,
) -> RosterResult<Response> {
    let details = input.into_details()?;
    state.update_student(&Student { id, details }).await?;
    info!(?id, "Updated student");

    state.notifier().post(client, UPDATED_TOAST);
    Ok(hx_redirect(&format!("/students/{id}")))
}
