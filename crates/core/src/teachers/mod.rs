//! Teachers module - teacher records, their pages and admin actions.

mod teachers_model;
mod teachers_service;
mod teachers_traits;

#[cfg(test)]
mod teachers_service_tests;

pub use teachers_model::{
    Teacher, TeacherDetailView, TeacherListView, TeacherOption, TeacherStatsView, TeacherStatus,
    TeacherUpdate,
};
pub use teachers_service::TeacherService;
pub use teachers_traits::TeacherServiceTrait;
