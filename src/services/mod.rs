pub mod controller;
pub mod dispatch;
pub mod udp_event;
pub mod validation;
