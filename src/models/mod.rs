pub mod event;
pub mod event_type;
pub mod position;
pub mod request;
pub mod site;
pub mod user;
