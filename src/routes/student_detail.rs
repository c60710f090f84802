use crate::{
    error::{MissingStudentSnafu, RosterResult},
    lookup::DepartmentLookup,
    maud_conveniences::{ButtonKind, detail_row, loading_placeholder, title},
    state::RosterState,
};
use axum::extract::{Path, State};
use maud::{Markup, html};
use snafu::OptionExt;

pub async fn get_student_page(State(state): State<RosterState>, Path(id): Path<i32>) -> Markup {
    state.render(html! {
        div id="in_focus" hx-get={"/internal/students/" (id)} hx-trigger="load" {
            (loading_placeholder())
        }
    })
}

pub async fn internal_get_student_in_detail(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
) -> RosterResult<Markup> {
    let (student, departments) =
        tokio::try_join!(state.get_student(id), state.list_departments())?;
    let student = student.context(MissingStudentSnafu { id })?;
    let lookup = DepartmentLookup::new(departments);

    let details = &student.details;
    let department = lookup
        .get(details.department_id)
        .map_or_else(|| details.department_id.to_string(), |dept| dept.name.clone());

    Ok(html! {
        (title("학생 상세 정보"))
        div class="bg-gray-800 p-4 rounded-lg shadow-md" {
            (detail_row("이름", &details.name))
            (detail_row("학번", &details.student_no))
            (detail_row("성별", details.sex))
            (detail_row("학과", department))
            (detail_row("이메일", &details.email))
            (detail_row("전화번호", &details.phone))
        }
        div class="mt-4 flex flex-row space-x-2" {
            a href={"/students/" (id) "/edit"} class=(ButtonKind::Primary.classes()) {"수정하기"}
            a href="/" class=(ButtonKind::Secondary.classes()) {"뒤로가기"}
        }
    })
}
