//! List-view state, its transitions, and the list query it produces.

use crate::data::Sex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    StudentNo,
    Name,
}

impl SortField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::StudentNo => "studentNo",
            Self::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadFilter(&'static str);

impl fmt::Display for BadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `all` or {}", self.0)
    }
}

/// `all` on the way in and out, never sent to the record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(i32),
}

impl FromStr for DepartmentFilter {
    type Err = BadFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            id => id
                .parse()
                .map(Self::Only)
                .map_err(|_| BadFilter("a department id")),
        }
    }
}

impl TryFrom<String> for DepartmentFilter {
    type Error = BadFilter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DepartmentFilter> for String {
    fn from(value: DepartmentFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SexFilter {
    #[default]
    All,
    Only(Sex),
}

impl FromStr for SexFilter {
    type Err = BadFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            sex => sex
                .parse()
                .map(Self::Only)
                .map_err(|_| BadFilter("`남` or `여`")),
        }
    }
}

impl TryFrom<String> for SexFilter {
    type Error = BadFilter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SexFilter> for String {
    fn from(value: SexFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(sex) => write!(f, "{sex}"),
        }
    }
}

/// Everything the list view remembers between requests.
///
/// `search_input` is what's in the text box, `q` is the search that was last
/// confirmed with enter. Only `q` reaches the record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub page: u32,
    pub sort: SortField,
    pub order: SortOrder,
    pub department: DepartmentFilter,
    pub sex: SexFilter,
    pub q: String,
    pub search_input: String,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortField::default(),
            order: SortOrder::default(),
            department: DepartmentFilter::default(),
            sex: SexFilter::default(),
            q: String::new(),
            search_input: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    SetDepartment(DepartmentFilter),
    SetSex(SexFilter),
    ToggleSort(SortField),
    SubmitSearch,
    Reset,
    GoToPage(u32),
}

impl ListState {
    pub fn apply(&mut self, change: ListChange) {
        match change {
            ListChange::SetDepartment(department) => {
                self.department = department;
                self.page = 1;
            }
            ListChange::SetSex(sex) => {
                self.sex = sex;
                self.page = 1;
            }
            ListChange::ToggleSort(field) => {
                if self.sort == field {
                    self.order = self.order.flipped();
                } else {
                    self.sort = field;
                    self.order = SortOrder::Asc;
                }
                self.page = 1;
            }
            ListChange::SubmitSearch => {
                self.q = self.search_input.trim().to_string();
                self.page = 1;
            }
            ListChange::Reset => *self = Self::default(),
            ListChange::GoToPage(page) => self.page = page.max(1),
        }
    }

    #[must_use]
    pub fn with(mut self, change: ListChange) -> Self {
        self.apply(change);
        self
    }

    pub fn to_query(&self) -> StudentQuery {
        StudentQuery {
            page: self.page.max(1),
            limit: PAGE_SIZE,
            sort: self.sort,
            order: self.order,
            department_id: match self.department {
                DepartmentFilter::All => None,
                DepartmentFilter::Only(id) => Some(id),
            },
            sex: match self.sex {
                SexFilter::All => None,
                SexFilter::Only(sex) => Some(sex),
            },
            q: Some(self.q.trim())
                .filter(|q| !q.is_empty())
                .map(ToString::to_string),
        }
    }
}

/// What actually gets sent to `GET /students`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortField,
    pub order: SortOrder,
    pub department_id: Option<i32>,
    pub sex: Option<Sex>,
    pub q: Option<String>,
}

impl StudentQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("_page", self.page.to_string()),
            ("_limit", self.limit.to_string()),
            ("_sort", self.sort.as_str().to_string()),
            ("_order", self.order.as_str().to_string()),
        ];

        if let Some(department_id) = self.department_id {
            pairs.push(("departmentId", department_id.to_string()));
        }
        if let Some(sex) = self.sex {
            pairs.push(("sex", sex.as_str().to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }

        pairs
    }
}

pub fn total_pages(total_count: usize) -> u32 {
    u32::try_from(total_count.div_ceil(PAGE_SIZE as usize)).unwrap_or(u32::MAX)
}

/// The list view's query string: the current state, at most one requested change, and the view id.
///
/// Kept flat because `serde_urlencoded` can't parse numbers inside `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub sort: SortField,
    pub order: SortOrder,
    pub department: DepartmentFilter,
    pub sex: SexFilter,
    pub q: String,
    pub search_input: String,
    pub view: Option<Uuid>,

    pub set_department: Option<DepartmentFilter>,
    pub set_sex: Option<SexFilter>,
    pub toggle_sort: Option<SortField>,
    pub search: Option<String>,
    pub reset: Option<String>,
    pub goto: Option<u32>,
}

impl ListParams {
    pub fn change(&self) -> Option<ListChange> {
        if self.reset.is_some() {
            Some(ListChange::Reset)
        } else if self.search.is_some() {
            Some(ListChange::SubmitSearch)
        } else if let Some(department) = self.set_department {
            Some(ListChange::SetDepartment(department))
        } else if let Some(sex) = self.set_sex {
            Some(ListChange::SetSex(sex))
        } else if let Some(field) = self.toggle_sort {
            Some(ListChange::ToggleSort(field))
        } else {
            self.goto.map(ListChange::GoToPage)
        }
    }

    /// The state after the requested change, if any.
    pub fn resolve(&self) -> ListState {
        let mut state = ListState {
            page: self.page.unwrap_or(1).max(1),
            sort: self.sort,
            order: self.order,
            department: self.department,
            sex: self.sex,
            q: self.q.clone(),
            search_input: self.search_input.clone(),
        };

        if let Some(change) = self.change() {
            state.apply(change);
        }

        state
    }
}
