pub mod driver;
pub mod normalizer;
pub mod pipeline;
pub mod planner;
pub mod validator;
