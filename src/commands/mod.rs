pub mod combine;
pub mod create;
pub mod dashboard;
