pub mod question;

pub use question::{QuestionId, QuestionSpec, Section, checklist_questions};
