//! Students module - student records, their pages and admin actions.

mod students_model;
mod students_service;
mod students_traits;


pub use students_model::{
    Student, StudentDetailView, StudentListView, StudentRow, StudentStatsView, StudentStatus,
    StudentUpdate,
};
pub use students_service::StudentService;
pub use students_traits::StudentServiceTrait;
