use crate::{
    error::RosterResult,
    lookup::DepartmentLookup,
    maud_conveniences::{loading_placeholder, title},
    routes::student_form::{StudentFormInput, hx_redirect, render_student_form},
    session::ToastClient,
    state::RosterState,
};
use axum::{Form, extract::State, response::Response};
use maud::{Markup, html};

pub const CREATED_TOAST: &str = "학생이 등록되었습니다";

pub async fn get_create_page(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div id="in_focus" hx-get="/internal/create" hx-trigger="load" {
            (loading_placeholder())
        }
    })
}

/// A department failure still renders the form, the selector then falls back to id 1.
pub async fn internal_get_create_form(State(state): State<RosterState>) -> Markup {
    let lookup = match state.list_departments().await {
        Ok(departments) => DepartmentLookup::new(departments),
        Err(e) => {
            warn!(?e, "Unable to load departments, creating with the fallback department");
            DepartmentLookup::default()
        }
    };

    html! {
        (title("학생 등록"))
        (render_student_form("/create", &lookup, None, "등록하기"))
    }
}

pub async fn post_new_student(
    State(state): State<RosterState>,
    ToastClient(client): ToastClient,
    Form(input): Form<StudentFormInput>,
) -> RosterResult<Response> {
    let details = input.into_details()?;
    let created = state.create_student(&details).await?;
    info!(id = created.id, "Created student");

    state.notifier().post(client, CREATED_TOAST);
    Ok(hx_redirect("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::Sex,
        error::SAVE_FAILED,
        test_support::{MockSource, department},
    };
    use axum::http::{Method, StatusCode};
    use uuid::Uuid;

    fn hong_gildong() -> StudentFormInput {
        StudentFormInput {
            name: "홍길동".to_string(),
            student_no: "20240001".to_string(),
            sex: Sex::Male,
            department_id: 1,
            email: "a@b.com".to_string(),
            phone: "010-0000-0000".to_string(),
        }
    }

    #[tokio::test]
    async fn create_sends_the_form_without_an_id_and_goes_home() {
        let mock = MockSource::spawn(vec![department(1, "CS")], vec![]).await;
        let state = mock.state();
        let client = Uuid::new_v4();

        let rsp = post_new_student(State(state.clone()), ToastClient(client), Form(hong_gildong()))
            .await
            .unwrap();
        assert_eq!(rsp.headers()["HX-Redirect"], "/");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is(&Method::POST, "/students"));
        assert_eq!(
            calls[0].body,
            Some(serde_json::json!({
                "name": "홍길동",
                "studentNo": "20240001",
                "sex": "남",
                "departmentId": 1,
                "email": "a@b.com",
                "phone": "010-0000-0000"
            }))
        );

        assert_eq!(mock.students().len(), 1);
        assert_eq!(
            state.notifier().current(client).map(|t| t.message.to_string()).as_deref(),
            Some(CREATED_TOAST)
        );
        assert!(state.notifier().current(Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn blank_fields_never_reach_the_record_source() {
        let mock = MockSource::spawn(vec![], vec![]).await;
        let input = StudentFormInput {
            name: String::new(),
            ..hong_gildong()
        };

        let err = post_new_student(State(mock.state()), ToastClient(Uuid::new_v4()), Form(input))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), SAVE_FAILED);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_create_posts_no_toast() {
        let mock = MockSource::spawn(vec![], vec![]).await;
        mock.fail_everything();
        let state = mock.state();
        let client = Uuid::new_v4();

        let err = post_new_student(State(state.clone()), ToastClient(client), Form(hong_gildong()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.user_message(), SAVE_FAILED);
        assert!(state.notifier().current(client).is_none());
    }

    #[tokio::test]
    async fn form_lists_departments() {
        let mock = MockSource::spawn(vec![department(1, "CS"), department(2, "EE")], vec![]).await;

        let markup = internal_get_create_form(State(mock.state())).await.into_string();
        assert!(markup.contains("CS Department"));
        assert!(markup.contains("EE Department"));
        assert!(markup.contains(r#"hx-post="/create""#));
    }

    #[tokio::test]
    async fn department_failure_still_renders_the_form() {
        let mock = MockSource::spawn(vec![department(1, "CS")], vec![]).await;
        mock.fail_departments();

        let markup = internal_get_create_form(State(mock.state())).await.into_string();
        assert!(markup.contains(r#"hx-post="/create""#));
        assert!(markup.contains(r#"<option value="1">1</option>"#));
        assert!(!markup.contains("CS Department"));
    }
}
