pub mod authorization;
pub mod middleware;
pub mod password;
pub mod session;
