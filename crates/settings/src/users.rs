use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Entity, UserId, next_id};

/// Staff role. Roles gate nothing here; they are shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Cashier,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Cashier => "Cashier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    /// `None` until the first login.
    pub last_login: Option<NaiveDateTime>,
}

impl Entity for StaffUser {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Fields of the add/edit user dialog. Passwords are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserForm {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("user name cannot be empty"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation(format!(
                "invalid email address {:?}",
                self.email
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_users(users: &[StaffUser]) -> DomainResult<()> {
    for (idx, user) in users.iter().enumerate() {
        if users[..idx].iter().any(|other| other.id == user.id) {
            return Err(DomainError::conflict(format!("duplicate user id {}", user.id)));
        }
    }
    Ok(())
}

pub(crate) fn add_user(users: &[StaffUser], form: &UserForm) -> DomainResult<Vec<StaffUser>> {
    form.validate()?;
    let id = next_id(users, UserId::FIRST, UserId::next);
    let mut next = users.to_vec();
    next.push(StaffUser {
        id,
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role,
        status: UserStatus::Active,
        last_login: None,
    });
    tracing::debug!(user_id = %id, role = form.role.label(), "user added");
    Ok(next)
}

/// Overwrite name, email and role; status and last login are kept.
pub(crate) fn edit_user(users: &[StaffUser], id: UserId, form: &UserForm) -> DomainResult<Vec<StaffUser>> {
    form.validate()?;
    let mut next = users.to_vec();
    let user = next
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(DomainError::not_found)?;
    user.name = form.name.trim().to_string();
    user.email = form.email.trim().to_string();
    user.role = form.role;
    Ok(next)
}

pub(crate) fn delete_user(users: &[StaffUser], id: UserId) -> Vec<StaffUser> {
    users.iter().filter(|u| u.id != id).cloned().collect()
}
