pub mod auth;
pub mod budget;
pub mod car;
pub mod client;
pub mod driver;
pub mod user;

pub use budget::{Budget, BudgetStatus, BudgetUpdate, NewBudget, StatusUpdate, TripFields, TripView};
pub use car::{Car, CarPayload};
pub use client::{Client, ClientPayload};
pub use driver::{Driver, DriverPayload, Remuneration};
pub use user::{NewUser, User, UserPatch};
