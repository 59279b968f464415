pub mod app;
pub mod dispatch;
pub mod document;
pub mod events;
pub mod layout;
pub mod modal;
pub mod page;
pub mod requests;
pub mod theme;
pub mod views;
pub mod widgets;
