pub mod aggregate;
pub mod validation;

pub use aggregate::Product;
pub use validation::{FieldError, ProductField, ProductRules, ValidationRules};
