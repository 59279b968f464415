pub mod logging;
pub mod message;
pub mod slideshow;
pub mod stay;
pub mod team;
