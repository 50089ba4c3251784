pub mod toml_loader;

pub use toml_loader::{load_all_answer_sheets, load_answer_sheet, load_question_form, load_quiz_form};
