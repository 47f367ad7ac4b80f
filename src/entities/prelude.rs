pub use super::checklist::Entity as Checklist;
pub use super::checklist_entry::Entity as ChecklistEntry;
pub use super::task::Entity as Task;
pub use super::user::Entity as User;
