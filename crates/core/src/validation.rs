//! Edit-form validation. Messages are keyed by the camelCase form field.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::errors::{FormErrors, Result, ValidationError};
use crate::students::StudentUpdate;
use crate::teachers::TeacherUpdate;

static MOBILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid regex pattern"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern"));

/// International phone: optional `+` and 10 to 15 digits.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("Invalid regex pattern"));

pub const INVALID_MOBILE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";

pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_REGEX.is_match(mobile)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Spaces and dashes are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    PHONE_REGEX.is_match(&compact)
}

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !is_valid_email(email) {
        errors.insert("email".into(), "Please enter a valid email address".into());
    }
}

pub fn student_form_errors(form: &StudentUpdate) -> FormErrors {
    let mut errors = FormErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }
    check_email(&mut errors, &form.email);
    if form.mobile.trim().is_empty() {
        errors.insert("mobile".into(), "Mobile number is required".into());
    } else if !is_valid_mobile(form.mobile.trim()) {
        errors.insert("mobile".into(), INVALID_MOBILE_MESSAGE.into());
    }
    if form.teacher_id.trim().is_empty() {
        errors.insert("teacherId".into(), "Please select a teacher".into());
    }
    if form.initial_capital < Decimal::ZERO {
        errors.insert(
            "initialCapital".into(),
            "Initial capital cannot be negative".into(),
        );
    }
    if form.current_capital < Decimal::ZERO {
        errors.insert(
            "currentCapital".into(),
            "Current capital cannot be negative".into(),
        );
    }
    if !(0.0..=100.0).contains(&form.risk_percentage) {
        errors.insert(
            "riskPercentage".into(),
            "Risk percentage must be between 0 and 100".into(),
        );
    }
    errors
}

pub fn teacher_form_errors(form: &TeacherUpdate) -> FormErrors {
    let mut errors = FormErrors::new();

    if form.name.trim().is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }
    check_email(&mut errors, &form.email);
    if !form.phone.trim().is_empty() && !is_valid_phone(&form.phone) {
        errors.insert(
            "phone".into(),
            "Please enter a valid phone number (10-15 digits)".into(),
        );
    }
    errors
}

fn into_result(errors: FormErrors) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Form(errors).into())
    }
}

pub fn validate_student_update(form: &StudentUpdate) -> Result<()> {
    into_result(student_form_errors(form))
}

pub fn validate_teacher_update(form: &TeacherUpdate) -> Result<()> {
    into_result(teacher_form_errors(form))
}
