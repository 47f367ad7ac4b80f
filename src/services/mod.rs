pub mod checklist_service;
pub mod checklist_task_service;
pub mod task_service;
pub mod user_service;
