pub mod forms;
pub mod nested;
pub mod officers;
pub mod response_plans;
pub mod search;
pub mod session;
pub mod validation;

pub use forms::{Nested, PlanForm};
pub use officers::OfficerForm;
pub use response_plans::ResponsePlan;
pub use session::SessionResolver;
