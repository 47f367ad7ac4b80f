pub mod prelude;

pub mod checklist;
pub mod checklist_entry;
pub mod task;
pub mod user;
