pub mod checklist;
pub mod checklist_task;
pub mod home;
pub mod task;
pub mod user;
