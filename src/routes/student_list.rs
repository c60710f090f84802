use crate::{
    data::{Sex, StudentWithDepartment},
    error::RosterResult,
    lookup::{DepartmentLookup, join_departments},
    maud_conveniences::{ButtonKind, INPUT_CLASSES, render_table},
    query::{DepartmentFilter, ListParams, ListState, SexFilter, SortField, SortOrder, total_pages},
    state::RosterState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, Render, html};
use uuid::Uuid;

pub struct ListPage {
    pub students: Vec<StudentWithDepartment>,
    pub total_count: usize,
    pub lookup: DepartmentLookup,
}

/// Department failures are logged and swallowed, rows then show raw department ids.
async fn load_list(state: &RosterState, list_state: &ListState) -> RosterResult<ListPage> {
    let query = list_state.to_query();
    let (students, departments) = tokio::join!(state.list_students(&query), state.list_departments());

    let lookup = match departments {
        Ok(departments) => DepartmentLookup::new(departments),
        Err(e) => {
            warn!(?e, "Unable to load departments, showing raw department ids");
            DepartmentLookup::default()
        }
    };

    let page = students?;
    Ok(ListPage {
        students: join_departments(page.students, &lookup),
        total_count: page.total_count,
        lookup,
    })
}

fn stale_response() -> Response {
    (StatusCode::NO_CONTENT, [("HX-Reswap", "none")]).into_response()
}

fn delete_failed_response() -> Response {
    (
        StatusCode::OK,
        [("HX-Reswap", "none"), ("HX-Trigger", "studentDeleteFailed")],
    )
        .into_response()
}

/// Fetches and renders the list for `list_state`, unless a newer fetch for `view` was issued meanwhile.
async fn fetch_and_render(state: &RosterState, view: Uuid, list_state: &ListState) -> Option<RosterResult<Markup>> {
    let ticket = state.sequencer().issue(view);
    let loaded = load_list(state, list_state).await;

    if !state.sequencer().is_latest(ticket) {
        debug!(?ticket, "Dropping stale list response");
        return None;
    }

    Some(loaded.map(|page| render_list(view, list_state, &page)))
}

pub async fn internal_get_students(
    State(state): State<RosterState>,
    Query(params): Query<ListParams>,
) -> Response {
    let list_state = params.resolve();
    let view = params.view.unwrap_or_else(Uuid::new_v4);

    match fetch_and_render(&state, view, &list_state).await {
        None => stale_response(),
        Some(Ok(markup)) => markup.into_response(),
        Some(Err(e)) => e.into_response(),
    }
}

/// Deletes, then re-runs the same list query. Any failure leaves the page as it was and pops an alert.
pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    let list_state = params.resolve();
    let view = params.view.unwrap_or_else(Uuid::new_v4);

    if let Err(e) = state.delete_student(id).await {
        error!(?e, "Unable to delete student");
        return delete_failed_response();
    }
    info!(?id, "Deleted student");

    match fetch_and_render(&state, view, &list_state).await {
        None => stale_response(),
        Some(Ok(markup)) => markup.into_response(),
        Some(Err(e)) => {
            error!(?e, "Unable to refresh list after deleting");
            delete_failed_response()
        }
    }
}

fn sort_marker(list_state: &ListState, field: SortField) -> &'static str {
    if list_state.sort != field {
        return "";
    }
    match list_state.order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
    }
}

fn list_control(vals: String, label: impl Render, kind: ButtonKind, disabled: bool) -> Markup {
    html! {
        button type="button" disabled[disabled] hx-get="/internal/students" hx-include="#list_state" hx-target="#student_list" hx-vals=(vals) class=(kind.classes()) {
            (label)
        }
    }
}

fn render_filters(list_state: &ListState, lookup: &DepartmentLookup) -> Markup {
    let sex_options = [
        (SexFilter::All, "전체"),
        (SexFilter::Only(Sex::Male), "남"),
        (SexFilter::Only(Sex::Female), "여"),
    ];
    let sort_options = [(SortField::StudentNo, "학번"), (SortField::Name, "이름")];

    html! {
        div class="flex flex-row flex-wrap items-center gap-3" {
            label class="text-sm" {
                "학과: "
                select name="set_department" hx-get="/internal/students" hx-trigger="change" hx-include="#list_state" hx-target="#student_list" class="rounded py-1 px-2 bg-gray-700 border border-gray-600" {
                    option value="all" selected[list_state.department == DepartmentFilter::All] {"전체"}
                    @for dept in lookup.departments() {
                        option value=(dept.id) selected[list_state.department == DepartmentFilter::Only(dept.id)] {(dept.short_name)}
                    }
                }
            }
            label class="text-sm space-x-1" {
                "성별: "
                @for (filter, label) in sex_options {
                    (list_control(
                        format!(r#"{{"set_sex": "{filter}"}}"#),
                        label,
                        ButtonKind::active_if(list_state.sex == filter),
                        false,
                    ))
                }
            }
            label class="text-sm space-x-1" {
                "정렬: "
                @for (field, label) in sort_options {
                    (list_control(
                        format!(r#"{{"toggle_sort": "{}"}}"#, field.as_str()),
                        html! {(label) " " (sort_marker(list_state, field))},
                        ButtonKind::active_if(list_state.sort == field),
                        false,
                    ))
                }
            }
        }
    }
}

pub fn render_pagination(current_page: u32, total_pages: u32) -> Markup {
    if total_pages == 0 {
        return html! {};
    }

    let goto = |page: u32| format!(r#"{{"goto": {page}}}"#);

    html! {
        div class="mt-8 flex flex-row justify-center items-center space-x-2" {
            (list_control(goto(current_page.saturating_sub(1)), "이전", ButtonKind::Secondary, current_page <= 1))
            @for page in 1..=total_pages {
                (list_control(goto(page), page, ButtonKind::active_if(page == current_page), false))
            }
            (list_control(goto(current_page.saturating_add(1)), "다음", ButtonKind::Secondary, current_page >= total_pages))
        }
    }
}

fn student_to_row(joined: &StudentWithDepartment) -> [Markup; 5] {
    let id = joined.student.id;
    let details = &joined.student.details;

    [
        html! {(details.student_no)},
        html! {(details.name)},
        html! {(joined.department_label())},
        html! {(details.sex)},
        html! {
            div class="flex flex-row justify-center space-x-2" {
                a href={"/students/" (id)} class=(ButtonKind::Secondary.classes()) {"상세보기"}
                button type="button" hx-delete={"/students/" (id)} hx-include="#list_state" hx-target="#student_list" hx-confirm="정말 삭제하시겠습니까?" class=(ButtonKind::Danger.classes()) {
                    "삭제"
                }
            }
        },
    ]
}

pub fn render_list(view: Uuid, list_state: &ListState, page: &ListPage) -> Markup {
    let rows = page.students.iter().map(student_to_row).collect();

    html! {
        div class="flex flex-col space-y-4" {
            div class="flex flex-row items-center space-x-2 mt-4" {
                // enter submits the form, which is the only way a search is applied
                form id="list_state" hx-get="/internal/students" hx-target="#student_list" hx-vals=r#"{"search": "1"}"# {
                    input type="hidden" name="view" value=(view.to_string()) {}
                    input type="hidden" name="page" value=(list_state.page) {}
                    input type="hidden" name="sort" value=(list_state.sort.as_str()) {}
                    input type="hidden" name="order" value=(list_state.order.as_str()) {}
                    input type="hidden" name="department" value=(list_state.department.to_string()) {}
                    input type="hidden" name="sex" value=(list_state.sex.to_string()) {}
                    input type="hidden" name="q" value=(list_state.q) {}
                    input type="text" name="search_input" value=(list_state.search_input) placeholder="이름 / 학번 검색" class=(INPUT_CLASSES) {}
                }
                (list_control(r#"{"reset": "1"}"#.to_string(), "초기화", ButtonKind::Secondary, false))
            }

            div class="flex flex-row justify-between items-start" {
                (render_filters(list_state, &page.lookup))
                div class="font-semibold" {"총 " (page.total_count) "명"}
            }

            (render_table(["학번", "이름", "학과", "성별", "상세보기 & 삭제"], rows))

            (render_pagination(list_state.page, total_pages(page.total_count)))
        }
    }
}
