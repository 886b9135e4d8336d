pub mod application;
pub mod attachment;
pub mod company;
pub mod note;
pub mod prep;
pub mod tutorial;
pub mod user;
