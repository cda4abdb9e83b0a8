pub mod route;
pub mod tcp;
pub mod transport;
