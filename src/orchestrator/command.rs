//! 命令行解析
//!
//! 只做参数切分，不做业务校验（校验交给 services::validation）

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::models::auth::{ChangePasswordRequest, RegisterRequest, ResetPasswordRequest};
use crate::models::question::OptionKey;
use crate::models::roster::GroupForm;

pub const USAGE: &str = "\
用法: quizwiz <命令> [参数]

认证:
  login <email> <password>
  logout
  register <first_name> <last_name> <email> <password> <role>
  forgot-password <email>
  reset-password <email> <otp> <password> <confirm_password>
  change-password <old_password> <new_password>

导航:
  menu                         当前用户可见的菜单
  route <path>                 检查页面是否可访问

讲师:
  groups | group-show <id> | group-delete <id>
  group-create <name> <student_id,...>
  group-update <id> <name> <student_id,...>
  students [--no-group] | student-show <id> | student-delete <id> | top-students
  questions [keyword] | question-create <form.toml>
  question-answer <id> <A-D> | question-delete <id>
  quizzes | quiz-show <id> | quiz-create <form.toml>
  quiz-rename <id> <title> | quiz-delete <id>

学生:
  dashboard
  join <code>
  exam <answer_sheet.toml>
  exam-all <folder>
  results [keyword]
";

/// 一条命令
#[derive(Debug, Clone)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    Register(RegisterRequest),
    ForgotPassword { email: String },
    ResetPassword(ResetPasswordRequest),
    ChangePassword(ChangePasswordRequest),
    Menu,
    Route { path: String },
    Dashboard,
    Groups,
    GroupShow { id: String },
    GroupCreate(GroupForm),
    GroupUpdate { id: String, form: GroupForm },
    GroupDelete { id: String },
    Students { without_group: bool },
    StudentShow { id: String },
    StudentDelete { id: String },
    TopStudents,
    Questions { keyword: Option<String> },
    QuestionCreate { form_file: PathBuf },
    QuestionAnswer { id: String, answer: OptionKey },
    QuestionDelete { id: String },
    Quizzes,
    QuizShow { id: String },
    QuizCreate { form_file: PathBuf },
    QuizRename { id: String, title: String },
    QuizDelete { id: String },
    Join { code: String },
    Exam { sheet: PathBuf },
    ExamAll { folder: String },
    Results { keyword: Option<String> },
    Help,
}

impl Command {
    /// 解析参数（不含程序名）
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "login" => {
                let [email, password] = take::<2>(name, rest)?;
                Command::Login { email, password }
            }
            "logout" => Command::Logout,
            "register" => {
                let [first_name, last_name, email, password, role] = take::<5>(name, rest)?;
                Command::Register(RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    role,
                })
            }
            "forgot-password" => {
                let [email] = take::<1>(name, rest)?;
                Command::ForgotPassword { email }
            }
            "reset-password" => {
                let [email, otp, password, confirm_password] = take::<4>(name, rest)?;
                Command::ResetPassword(ResetPasswordRequest {
                    email,
                    otp,
                    password,
                    confirm_password,
                })
            }
            "change-password" => {
                let [password, password_new] = take::<2>(name, rest)?;
                Command::ChangePassword(ChangePasswordRequest {
                    password,
                    password_new,
                })
            }
            "menu" => Command::Menu,
            "route" => {
                let [path] = take::<1>(name, rest)?;
                Command::Route { path }
            }
            "dashboard" => Command::Dashboard,
            "groups" => Command::Groups,
            "group-show" => {
                let [id] = take::<1>(name, rest)?;
                Command::GroupShow { id }
            }
            "group-create" => {
                let [group_name, ids] = take::<2>(name, rest)?;
                Command::GroupCreate(group_form(group_name, &ids))
            }
            "group-update" => {
                let [id, group_name, ids] = take::<3>(name, rest)?;
                Command::GroupUpdate {
                    id,
                    form: group_form(group_name, &ids),
                }
            }
            "group-delete" => {
                let [id] = take::<1>(name, rest)?;
                Command::GroupDelete { id }
            }
            "students" => Command::Students {
                without_group: rest.iter().any(|a| a == "--no-group"),
            },
            "student-show" => {
                let [id] = take::<1>(name, rest)?;
                Command::StudentShow { id }
            }
            "student-delete" => {
                let [id] = take::<1>(name, rest)?;
                Command::StudentDelete { id }
            }
            "top-students" => Command::TopStudents,
            "questions" => Command::Questions {
                keyword: rest.first().cloned(),
            },
            "question-create" => {
                let [path] = take::<1>(name, rest)?;
                Command::QuestionCreate {
                    form_file: PathBuf::from(path),
                }
            }
            "question-answer" => {
                let [id, key] = take::<2>(name, rest)?;
                let answer = key
                    .parse::<OptionKey>()
                    .map_err(|e| ConfigError::InvalidArgument(e.to_string()))?;
                Command::QuestionAnswer { id, answer }
            }
            "question-delete" => {
                let [id] = take::<1>(name, rest)?;
                Command::QuestionDelete { id }
            }
            "quizzes" => Command::Quizzes,
            "quiz-show" => {
                let [id] = take::<1>(name, rest)?;
                Command::QuizShow { id }
            }
            "quiz-create" => {
                let [path] = take::<1>(name, rest)?;
                Command::QuizCreate {
                    form_file: PathBuf::from(path),
                }
            }
            "quiz-rename" => {
                let [id, title] = take::<2>(name, rest)?;
                Command::QuizRename { id, title }
            }
            "quiz-delete" => {
                let [id] = take::<1>(name, rest)?;
                Command::QuizDelete { id }
            }
            "join" => {
                let [code] = take::<1>(name, rest)?;
                Command::Join { code }
            }
            "exam" => {
                let [path] = take::<1>(name, rest)?;
                Command::Exam {
                    sheet: PathBuf::from(path),
                }
            }
            "exam-all" => {
                let [folder] = take::<1>(name, rest)?;
                Command::ExamAll { folder }
            }
            "results" => Command::Results {
                keyword: rest.first().cloned(),
            },
            "help" | "-h" | "--help" => Command::Help,
            other => {
                return Err(ConfigError::InvalidArgument(format!("未知命令: {}", other)));
            }
        };
        Ok(command)
    }
}

/// 逗号分隔的学生ID
fn group_form(name: String, ids: &str) -> GroupForm {
    GroupForm {
        name,
        students: ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// 取出恰好 N 个位置参数
fn take<const N: usize>(command: &str, rest: &[String]) -> Result<[String; N], ConfigError> {
    <[String; N]>::try_from(rest.to_vec()).map_err(|got| {
        ConfigError::InvalidArgument(format!(
            "{} 需要 {} 个参数，实际 {} 个",
            command,
            N,
            got.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, ConfigError> {
        Command::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn empty_args_show_help() {
        assert!(matches!(parse(&[]), Ok(Command::Help)));
    }

    #[test]
    fn login_takes_two_arguments() {
        match parse(&["login", "a@b.io", "Secret123"]).unwrap() {
            Command::Login { email, password } => {
                assert_eq!(email, "a@b.io");
                assert_eq!(password, "Secret123");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            parse(&["login", "a@b.io"]),
            Err(ConfigError::InvalidArgument(_))
        ));
    }

    #[test]
    fn group_create_splits_student_ids() {
        match parse(&["group-create", "Frontend", "s1, s2,,s3"]).unwrap() {
            Command::GroupCreate(form) => {
                assert_eq!(form.name, "Frontend");
                assert_eq!(form.students, vec!["s1", "s2", "s3"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn group_update_keeps_id_and_form() {
        match parse(&["group-update", "g7", "Backend", "s4,s5"]).unwrap() {
            Command::GroupUpdate { id, form } => {
                assert_eq!(id, "g7");
                assert_eq!(form.name, "Backend");
                assert_eq!(form.students, vec!["s4", "s5"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn question_answer_accepts_only_a_to_d() {
        match parse(&["question-answer", "q9", "c"]).unwrap() {
            Command::QuestionAnswer { id, answer } => {
                assert_eq!(id, "q9");
                assert_eq!(answer, OptionKey::C);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            parse(&["question-answer", "q9", "E"]),
            Err(ConfigError::InvalidArgument(_))
        ));
    }

    #[test]
    fn single_id_commands() {
        assert!(matches!(
            parse(&["student-delete", "s1"]),
            Ok(Command::StudentDelete { id }) if id == "s1"
        ));
        assert!(matches!(
            parse(&["student-show", "s1"]),
            Ok(Command::StudentShow { id }) if id == "s1"
        ));
        assert!(matches!(
            parse(&["group-show", "g1"]),
            Ok(Command::GroupShow { id }) if id == "g1"
        ));
        assert!(matches!(
            parse(&["quiz-show", "qz1"]),
            Ok(Command::QuizShow { id }) if id == "qz1"
        ));
        assert!(matches!(
            parse(&["question-create", "q.toml"]),
            Ok(Command::QuestionCreate { form_file }) if form_file == PathBuf::from("q.toml")
        ));
        assert!(parse(&["quiz-show"]).is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse(&["teleport"]).is_err());
    }
}
