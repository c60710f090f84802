pub mod department;
pub mod student;

pub use department::Department;
pub use student::{Sex, Student, StudentDetails, StudentWithDepartment};
