pub mod auth_repo;
pub use auth_repo::{AuthRepository, WhoAmI};
pub mod http;
pub use http::ApiClient;
pub mod resource;
pub use resource::{Entity, EntityLabels, QueryState, Resource, RestResource};
