use crate::data::Department;
use maud::{Markup, Render, html};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
}

impl Sex {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "남",
            Self::Female => "여",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSex;

impl fmt::Display for UnknownSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of `남` or `여`")
    }
}

impl FromStr for Sex {
    type Err = UnknownSex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sex| sex.as_str() == s)
            .ok_or(UnknownSex)
    }
}

impl Render for Sex {
    fn render(&self) -> Markup {
        html! {(self.as_str())}
    }
}

/// Everything about a student except the id the record source assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub student_no: String,
    pub name: String,
    pub phone: String,
    pub sex: Sex,
    pub email: String,
    pub department_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    #[serde(flatten)]
    pub details: StudentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentWithDepartment {
    pub student: Student,
    pub department: Option<Department>,
}

impl StudentWithDepartment {
    /// Short name of the resolved department, or the raw id when it didn't resolve.
    pub fn department_label(&self) -> String {
        self.department.as_ref().map_or_else(
            || self.student.details.department_id.to_string(),
            |dept| dept.short_name.clone(),
        )
    }
}
