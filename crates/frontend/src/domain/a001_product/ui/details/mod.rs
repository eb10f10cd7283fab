pub mod form;
pub mod unique_id;
mod view;
pub mod view_model;

pub use view::{ProductEditPage, ProductFormView, ProductRegistrationPage};
