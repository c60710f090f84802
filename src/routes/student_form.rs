use crate::{
    data::{Sex, StudentDetails},
    error::{BlankFieldSnafu, RosterResult},
    lookup::DepartmentLookup,
    maud_conveniences::{ButtonKind, INPUT_CLASSES, form_element, simple_form_element},
};
use axum::response::{IntoResponse, Response};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::ensure;

/// Department used when the record source has none to offer.
const FALLBACK_DEPARTMENT_ID: i32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFormInput {
    pub name: String,
    pub student_no: String,
    pub sex: Sex,
    pub department_id: i32,
    pub email: String,
    pub phone: String,
}

impl StudentFormInput {
    pub fn into_details(self) -> RosterResult<StudentDetails> {
        for (field, value) in [
            ("name", &self.name),
            ("studentNo", &self.student_no),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            ensure!(!value.trim().is_empty(), BlankFieldSnafu { field });
        }

        Ok(StudentDetails {
            student_no: self.student_no,
            name: self.name,
            phone: self.phone,
            sex: self.sex,
            email: self.email,
            department_id: self.department_id,
        })
    }
}

/// Full-page navigation once an htmx request succeeds.
pub fn hx_redirect(location: &str) -> Response {
    ([("HX-Redirect", location.to_string())], ()).into_response()
}

pub fn render_student_form(
    action: &str,
    lookup: &DepartmentLookup,
    initial: Option<&StudentDetails>,
    submit_label: &'static str,
) -> Markup {
    let sex = initial.map(|details| details.sex).unwrap_or_default();
    let department_id = initial
        .map(|details| details.department_id)
        .or_else(|| lookup.first_id())
        .unwrap_or(FALLBACK_DEPARTMENT_ID);

    html! {
        form hx-post=(action) hx-target="#form_status" hx-disabled-elt="find button[type='submit']" class="bg-gray-800 p-4 rounded-lg shadow-md" {
            (simple_form_element("name", "이름", None, initial.map(|d| d.name.as_str())))
            (simple_form_element("studentNo", "학번", None, initial.map(|d| d.student_no.as_str())))
            (form_element("sex", "성별", html! {
                div class="flex flex-row items-center space-x-4" {
                    @for option in Sex::ALL {
                        label class="cursor-pointer" {
                            input type="radio" name="sex" value=(option) checked[option == sex] class="mr-1" {}
                            (option)
                        }
                    }
                }
            }))
            (form_element("departmentId", "학과", html! {
                select id="departmentId" name="departmentId" class=(INPUT_CLASSES) {
                    @if lookup.is_empty() {
                        option value=(department_id) {(department_id)}
                    }
                    @for dept in lookup.departments() {
                        option value=(dept.id) selected[dept.id == department_id] {(dept.name)}
                    }
                }
            }))
            (simple_form_element("email", "이메일", Some("email"), initial.map(|d| d.email.as_str())))
            (simple_form_element("phone", "전화번호", None, initial.map(|d| d.phone.as_str())))

            div id="form_status" {}

            div class="mt-4 flex flex-row space-x-2" {
                button type="submit" class=(ButtonKind::Primary.classes()) {(submit_label)}
                button type="button" onclick="history.back()" class=(ButtonKind::Secondary.classes()) {"취소"}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RosterError, test_support::department};

    fn input() -> StudentFormInput {
        StudentFormInput {
            name: "홍길동".to_string(),
            student_no: "20240001".to_string(),
            sex: Sex::Male,
            department_id: 1,
            email: "a@b.com".to_string(),
            phone: "010-0000-0000".to_string(),
        }
    }

    #[test]
    fn every_text_field_is_required() {
        assert!(input().into_details().is_ok());

        let blank = StudentFormInput {
            phone: "   ".to_string(),
            ..input()
        };
        assert!(matches!(
            blank.into_details(),
            Err(RosterError::BlankField { field: "phone" })
        ));
    }

    #[test]
    fn new_form_defaults_to_first_department_and_first_sex() {
        let lookup = DepartmentLookup::new(vec![department(3, "CS"), department(5, "EE")]);
        let markup = render_student_form("/create", &lookup, None, "등록하기").into_string();

        assert!(markup.contains(r#"<option value="3" selected>"#));
        assert!(markup.contains(r#"value="남" checked"#));
        assert!(!markup.contains(r#"value="여" checked"#));
    }

    #[test]
    fn submit_is_disabled_while_in_flight() {
        let markup =
            render_student_form("/create", &DepartmentLookup::default(), None, "등록하기").into_string();

        assert!(markup.contains(r#"hx-disabled-elt="find button[type='submit']""#));
        assert!(markup.contains(r#"<button type="submit""#));
        assert!(markup.contains(r##"hx-target="#form_status""##));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let lookup = DepartmentLookup::new(vec![department(3, "CS"), department(5, "EE")]);
        let details = StudentDetails {
            sex: Sex::Female,
            department_id: 5,
            ..input().into_details().unwrap()
        };
        let markup =
            render_student_form("/students/1/edit", &lookup, Some(&details), "수정하기").into_string();

        assert!(markup.contains(r#"<option value="5" selected>"#));
        assert!(markup.contains(r#"value="여" checked"#));
        assert!(markup.contains(r#"value="홍길동""#));
    }

    #[test]
    fn no_departments_falls_back_to_id_one() {
        let markup =
            render_student_form("/create", &DepartmentLookup::default(), None, "등록하기").into_string();
        assert!(markup.contains(r#"<option value="1">1</option>"#));
    }
}
