pub mod error;
pub mod feedback;
pub mod formatting;
pub mod pagination;
pub mod store;
pub mod validation;
