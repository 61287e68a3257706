//! Admin API module - wire types and the backend trait.

mod api_convert;
mod api_model;
mod api_traits;


pub use api_convert::{
    activity_log_from_dto, merge_student_list_item, student_from_detail, student_from_ref,
    teacher_from_detail, teacher_from_list_item, trade_from_dto,
};
pub use api_model::*;
pub use api_traits::AdminApiTrait;
