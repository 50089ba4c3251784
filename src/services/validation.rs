//! 表单校验
//!
//! 在发出任何网络请求之前检查表单，错误信息与界面提示一致

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::models::auth::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::models::quiz::QuizForm;

const PASSWORD_MIN: usize = 6;
const OTP_MIN: usize = 4;
const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex is valid")
    })
}

fn required(field: &'static str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, message))
    } else {
        Ok(())
    }
}

fn min_len(
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        Err(ValidationError::new(field, message))
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    required("email", value, "Email is required")?;
    if !email_regex().is_match(value.trim()) {
        return Err(ValidationError::new("email", "Invalid email address"));
    }
    Ok(())
}

pub fn password(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required(field, value, "Password is required")?;
    min_len(
        field,
        value,
        PASSWORD_MIN,
        "Password must be at least 6 characters",
    )
}

pub fn login(form: &LoginRequest) -> Result<(), ValidationError> {
    email(&form.email)?;
    password("password", &form.password)
}

pub fn register(form: &RegisterRequest) -> Result<(), ValidationError> {
    required("first_name", &form.first_name, "Firstname is required")?;
    required("last_name", &form.last_name, "Lastname is required")?;
    email(&form.email)?;
    password("password", &form.password)?;
    required("role", &form.role, "Role is required")
}

pub fn reset_password(form: &ResetPasswordRequest) -> Result<(), ValidationError> {
    email(&form.email)?;
    required("otp", &form.otp, "OTP is required")?;
    min_len("otp", &form.otp, OTP_MIN, "OTP must be at least 4 characters")?;
    password("password", &form.password)?;
    if form.password != form.confirm_password {
        return Err(ValidationError::new(
            "confirmPassword",
            "Passwords do not match",
        ));
    }
    Ok(())
}

pub fn change_password(form: &ChangePasswordRequest) -> Result<(), ValidationError> {
    password("password", &form.password)?;
    password("password_new", &form.password_new)
}

pub fn quiz(form: &QuizForm) -> Result<(), ValidationError> {
    required("title", &form.title, "Title is required")?;
    let len = form.title.chars().count();
    if len < TITLE_MIN {
        return Err(ValidationError::new(
            "title",
            "Title must be at least 3 characters",
        ));
    }
    if len > TITLE_MAX {
        return Err(ValidationError::new(
            "title",
            "Title must be less than 100 characters",
        ));
    }
    if form.duration == 0 {
        return Err(ValidationError::new("duration", "Duration is required"));
    }
    if form.number_of_questions == 0 {
        return Err(ValidationError::new(
            "numberOfQuestions",
            "Number of questions is required",
        ));
    }
    if form.score_per_question == 0 {
        return Err(ValidationError::new(
            "scorePerQuestion",
            "Score per question is required",
        ));
    }
    required("groupName", &form.group_id, "Group is required")?;
    required("scheduleDate", &form.schedule_date, "Schedule date is required")?;
    required("scheduleTime", &form.schedule_time, "Schedule time is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_is_case_insensitive() {
        assert!(email("Student@Example.COM").is_ok());
        assert_eq!(
            email("not-an-email").unwrap_err().message,
            "Invalid email address"
        );
        assert_eq!(email("  ").unwrap_err().message, "Email is required");
    }

    #[test]
    fn short_password_is_rejected() {
        let form = LoginRequest {
            email: "a@b.io".to_string(),
            password: "12345".to_string(),
        };
        let err = login(&form).unwrap_err();
        assert_eq!(err.field, "password");
    }

    #[test]
    fn reset_requires_four_char_otp() {
        let form = ResetPasswordRequest {
            email: "a@b.io".to_string(),
            otp: "123".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert_eq!(reset_password(&form).unwrap_err().field, "otp");
    }

    #[test]
    fn quiz_title_bounds() {
        let mut form = QuizForm {
            title: "JS".to_string(),
            description: String::new(),
            group_id: "g1".to_string(),
            number_of_questions: 5,
            difficulty: "easy".to_string(),
            category: "FE".to_string(),
            schedule_date: "2026-11-01".to_string(),
            schedule_time: "10:30".to_string(),
            duration: 10,
            score_per_question: 1,
        };
        assert_eq!(quiz(&form).unwrap_err().field, "title");
        form.title = "JS basics".to_string();
        assert!(quiz(&form).is_ok());
        form.title = "x".repeat(101);
        assert_eq!(
            quiz(&form).unwrap_err().message,
            "Title must be less than 100 characters"
        );
    }
}
