pub mod budget_card;
pub mod budget_list;
pub mod budget_modal;
pub mod data_grid;
pub mod login;
pub mod password_reset;
pub mod registration;
pub mod settings;
pub mod two_factor;

pub use budget_card::{BudgetCard, CardMode};
pub use budget_list::BudgetList;
pub use budget_modal::{BudgetModal, Dropdown};
pub use data_grid::{DataGrid, RowState};
pub use login::{LoginForm, LoginOutcome, SignupForm, SignupOutcome};
pub use password_reset::{FlowOutcome, ForgotPasswordForm, ResetPasswordForm};
pub use registration::{CarFields, ClientFields, DriverFields, FormFields, RegistrationForm, SubmitOutcome};
pub use settings::ProfileSettings;
pub use two_factor::{TwoFactorModal, TwoFactorState};
