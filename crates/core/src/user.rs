//! User input validation for admin user management.

use serde::Deserialize;
use validator::Validate;

use crate::department::Department;
use crate::error::CoreError;
use crate::roles::Role;
use crate::validation::{collect, parsed, require, trimmed};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewUserDraft {
    #[validate(length(min = 1, max = 20))]
    #[serde(alias = "employeeNumber")]
    pub employee_number: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub designation: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidNewUser {
    pub employee_number: String,
    pub name: String,
    /// Lowercased.
    pub email: String,
    pub department: Department,
    pub designation: String,
    pub role: Role,
}

impl NewUserDraft {
    pub fn into_new_user(self) -> Result<ValidNewUser, CoreError> {
        let draft = Self {
            employee_number: trimmed(self.employee_number),
            name: trimmed(self.name),
            email: trimmed(self.email).map(|e| e.to_lowercase()),
            department: trimmed(self.department),
            designation: trimmed(self.designation),
            role: trimmed(self.role),
        };
        let mut errors = Vec::new();
        collect(&draft, &mut errors);

        require(&draft.employee_number, "employee_number", &mut errors);
        require(&draft.name, "name", &mut errors);
        require(&draft.email, "email", &mut errors);
        require(&draft.designation, "designation", &mut errors);
        let department = require(&draft.department, "department", &mut errors)
            .and_then(|d| parsed(Department::parse(d), "department", &mut errors));
        let role = match draft.role.as_deref() {
            Some(r) => parsed(Role::parse(r), "role", &mut errors),
            None => Some(Role::Employee),
        };

        CoreError::from_field_errors(errors)?;

        match (
            draft.employee_number,
            draft.name,
            draft.email,
            department,
            draft.designation,
            role,
        ) {
            (
                Some(employee_number),
                Some(name),
                Some(email),
                Some(department),
                Some(designation),
                Some(role),
            ) => Ok(ValidNewUser {
                employee_number,
                name,
                email,
                department,
                designation,
                role,
            }),
            _ => Err(CoreError::Internal(
                "user draft passed validation with missing fields".into(),
            )),
        }
    }
}

/// Admin edit of an existing user. Employee number and email are immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserChangesDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub department: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub designation: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub department: Option<Department>,
    pub designation: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserChangesDraft {
    pub fn into_changes(self) -> Result<UserChanges, CoreError> {
        let draft = Self {
            name: trimmed(self.name),
            department: trimmed(self.department),
            designation: trimmed(self.designation),
            role: trimmed(self.role),
            is_active: self.is_active,
        };
        let mut errors = Vec::new();
        collect(&draft, &mut errors);
        let department = draft
            .department
            .as_deref()
            .and_then(|d| parsed(Department::parse(d), "department", &mut errors));
        let role = draft
            .role
            .as_deref()
            .and_then(|r| parsed(Role::parse(r), "role", &mut errors));

        CoreError::from_field_errors(errors)?;

        Ok(UserChanges {
            name: draft.name,
            department,
            designation: draft.designation,
            role,
            is_active: draft.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewUserDraft {
        NewUserDraft {
            employee_number: Some(" 12345 ".into()),
            name: Some("John Doe".into()),
            email: Some("John.Doe@Company.com".into()),
            department: Some("Engineering".into()),
            designation: Some("Engineer".into()),
            role: None,
        }
    }

    fn fields(err: CoreError) -> Vec<String> {
        match err {
            CoreError::InvalidFields(errs) => errs.into_iter().map(|e| e.field).collect(),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn new_user_is_normalized_and_defaults_to_employee() {
        let user = draft().into_new_user().unwrap();
        assert_eq!(user.employee_number, "12345");
        assert_eq!(user.email, "john.doe@company.com");
        assert_eq!(user.role, Role::Employee);
    }

    #[test]
    fn invalid_email_and_role_are_reported() {
        let err = NewUserDraft {
            email: Some("not-an-email".into()),
            role: Some("owner".into()),
            ..draft()
        }
        .into_new_user()
        .unwrap_err();
        let mut got = fields(err);
        got.sort();
        assert_eq!(got, vec!["email", "role"]);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let mut got = fields(NewUserDraft::default().into_new_user().unwrap_err());
        got.sort();
        assert_eq!(
            got,
            vec!["department", "designation", "email", "employee_number", "name"]
        );
    }

    #[test]
    fn changes_parse_role_and_department() {
        let changes = UserChangesDraft {
            role: Some("reviewer".into()),
            department: Some("Quality".into()),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.role, Some(Role::Reviewer));
        assert_eq!(changes.department, Some(Department::Quality));
        assert_eq!(changes.name, None);

        let err = UserChangesDraft {
            department: Some("Sales".into()),
            ..Default::default()
        }
        .into_changes()
        .unwrap_err();
        assert_eq!(fields(err), vec!["department"]);
    }
}
