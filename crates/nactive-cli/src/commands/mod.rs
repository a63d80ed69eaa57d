pub mod audit;
pub mod auth;
pub mod encounters;
pub mod patients;
pub mod prescriptions;
