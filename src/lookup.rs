use crate::data::{Department, Student, StudentWithDepartment};
use std::collections::HashMap;

/// Departments keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DepartmentLookup {
    by_id: HashMap<i32, Department>,
    in_order: Vec<Department>,
}

impl DepartmentLookup {
    pub fn new(departments: Vec<Department>) -> Self {
        let by_id = departments
            .iter()
            .map(|dept| (dept.id, dept.clone()))
            .collect();

        Self {
            by_id,
            in_order: departments,
        }
    }

    pub fn get(&self, id: i32) -> Option<&Department> {
        self.by_id.get(&id)
    }

    /// In the order the record source returned them, for selectors.
    pub fn departments(&self) -> &[Department] {
        &self.in_order
    }

    pub fn first_id(&self) -> Option<i32> {
        self.in_order.first().map(|dept| dept.id)
    }

    pub fn is_empty(&self) -> bool {
        self.in_order.is_empty()
    }
}

/// Best-effort: a student whose department isn't in `lookup` is kept with `department: None`.
pub fn join_departments(
    students: Vec<Student>,
    lookup: &DepartmentLookup,
) -> Vec<StudentWithDepartment> {
    students
        .into_iter()
        .map(|student| {
            let department = lookup.get(student.details.department_id).cloned();
            StudentWithDepartment {
                student,
                department,
            }
        })
        .collect()
}
