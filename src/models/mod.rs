pub mod applications;
pub mod contracts;
pub mod notifications;
pub mod requirements;
pub mod reviews;
pub mod sessions;
pub mod users;
