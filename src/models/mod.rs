pub mod answer_sheet;
pub mod auth;
pub mod envelope;
pub mod loaders;
pub mod question;
pub mod quiz;
pub mod roster;

pub use answer_sheet::AnswerSheet;
pub use auth::{AuthState, Profile, Role};
pub use envelope::{ApiEnvelope, MessageOnly};
pub use loaders::{load_all_answer_sheets, load_answer_sheet, load_question_form, load_quiz_form};
pub use question::{Category, Difficulty, OptionKey, Question, QuestionForm, QuestionOptions};
pub use quiz::{AnswerRecord, ExamPaper, Quiz, QuizForm, QuizResult, SubmitAnswersRequest};
pub use roster::{Group, GroupForm, Student};
