pub mod customer;
pub mod session;
