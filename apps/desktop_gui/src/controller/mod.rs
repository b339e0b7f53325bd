//! Controller layer: UI events, page state, reducer-like transitions, and command orchestration.

pub mod credentials;
pub mod department_details;
pub mod departments;
pub mod events;
pub mod form;
pub mod notifications;
pub mod orchestration;
pub mod pager;
pub mod reducer;
pub mod remote;
pub mod router;
