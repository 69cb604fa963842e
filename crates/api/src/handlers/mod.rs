pub mod actor;
pub mod consultation;
