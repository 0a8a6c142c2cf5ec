pub mod check;
pub mod messages;
pub mod roles;
pub mod simulate;
pub mod submit;
pub mod users;
