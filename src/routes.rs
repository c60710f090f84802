pub mod index;
pub mod sse;
pub mod student_create;
pub mod student_detail;
pub mod student_edit;
pub mod student_form;
pub mod student_list;
