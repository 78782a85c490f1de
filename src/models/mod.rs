// Data models

pub mod analysis;
pub mod appointment;
pub mod article;
pub mod chat;
pub mod doctor;
pub mod quiz;
pub mod user;

pub use analysis::*;
pub use appointment::*;
pub use article::*;
pub use chat::*;
pub use doctor::*;
pub use quiz::*;
pub use user::*;
