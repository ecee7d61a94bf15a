//! Data transfer objects for the service layer

pub mod mappers;
pub mod requests;
pub mod responses;
