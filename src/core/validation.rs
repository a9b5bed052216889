//! Field-level form rules for the auth and settings screens.
//!
//! Every validator checks all fields and reports the first failing rule per
//! field, so a form can show all problems at once.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationErrors;
use crate::models::{
    DentistRegistration, LoginCredentials, PatientRegistration, Registration, UserIdentity,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Same loose check the forms have always used: something@something.something
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid")
});

pub const LOGIN_MIN_PASSWORD: usize = 6;
pub const REGISTRATION_MIN_PASSWORD: usize = 8;

/// New password and confirmation of the change-password screen.
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Editable subset of the signed-in user's profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ProfileEdit {
    pub fn from_user(user: &UserIdentity) -> Self {
        let phone = match &user.profile {
            crate::models::UserProfile::Dentist(p) => p.phone.clone(),
            crate::models::UserProfile::Patient(p) => p.phone.clone(),
        };
        Self {
            name: user.profile.name().to_string(),
            last_name: user.profile.last_name().to_string(),
            phone,
            email: user.email.clone(),
        }
    }
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &'static str,
) {
    if value.is_empty() {
        errors.add(field, message);
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "El email es requerido");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Email inválido");
    }
}

fn check_password(errors: &mut ValidationErrors, field: &'static str, password: &str, min: usize) {
    if password.is_empty() {
        errors.add(field, "La contraseña es requerida");
    } else if password.chars().count() < min {
        errors.add(
            field,
            if min >= REGISTRATION_MIN_PASSWORD {
                "La contraseña debe tener al menos 8 caracteres"
            } else {
                "La contraseña debe tener al menos 6 caracteres"
            },
        );
    }
}

pub fn validate_login(credentials: &LoginCredentials) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, &credentials.email);
    check_password(&mut errors, "password", &credentials.password, LOGIN_MIN_PASSWORD);
    errors.into_result()
}

fn check_registration_common(
    errors: &mut ValidationErrors,
    name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    password: &str,
    confirm_password: &str,
) {
    required(errors, "name", name, "El nombre es requerido");
    required(errors, "lastName", last_name, "El apellido es requerido");
    check_email(errors, email);
    required(errors, "phone", phone, "El teléfono es requerido");
    check_password(errors, "password", password, REGISTRATION_MIN_PASSWORD);
    if password != confirm_password {
        errors.add("confirmPassword", "Las contraseñas no coinciden");
    }
}

pub fn validate_dentist_registration(data: &DentistRegistration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_registration_common(
        &mut errors,
        &data.name,
        &data.last_name,
        &data.email,
        &data.phone,
        &data.password,
        &data.confirm_password,
    );
    required(
        &mut errors,
        "licenseNumber",
        &data.license_number,
        "El número de licencia es requerido",
    );
    errors.into_result()
}

pub fn validate_patient_registration(data: &PatientRegistration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_registration_common(
        &mut errors,
        &data.name,
        &data.last_name,
        &data.email,
        &data.phone,
        &data.password,
        &data.confirm_password,
    );
    required(&mut errors, "dni", &data.dni, "El DNI es requerido");
    if data.date_of_birth.is_none() {
        errors.add("dateOfBirth", "La fecha de nacimiento es requerida");
    }
    errors.into_result()
}

pub fn validate_registration(registration: &Registration) -> Result<(), ValidationErrors> {
    match registration {
        Registration::Dentist(data) => validate_dentist_registration(data),
        Registration::Patient(data) => validate_patient_registration(data),
    }
}

pub fn validate_password_change(change: &PasswordChange) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    required(
        &mut errors,
        "currentPassword",
        &change.current_password,
        "La contraseña actual es requerida",
    );
    if change.new_password.is_empty() {
        errors.add("newPassword", "La nueva contraseña es requerida");
    } else if change.new_password.chars().count() < LOGIN_MIN_PASSWORD {
        errors.add("newPassword", "La contraseña debe tener al menos 6 caracteres");
    }
    if change.confirm_password.is_empty() {
        errors.add("confirmPassword", "Debes confirmar la contraseña");
    } else if change.new_password != change.confirm_password {
        errors.add("confirmPassword", "Las contraseñas no coinciden");
    }
    errors.into_result()
}

/// Profile edits only require the fields to be present.
pub fn validate_profile_edit(edit: &ProfileEdit) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    required(&mut errors, "name", &edit.name, "El nombre es requerido");
    required(&mut errors, "lastName", &edit.last_name, "El apellido es requerido");
    required(&mut errors, "phone", &edit.phone, "El teléfono es requerido");
    required(&mut errors, "email", &edit.email, "El email es requerido");
    errors.into_result()
}
