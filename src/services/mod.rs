pub mod ai;
pub mod calendar;
pub mod conversation;
pub mod dashboard;
pub mod handoff;
pub mod persistence;
pub mod promotions;
pub mod session;
