pub mod connectivity;
pub mod session;
