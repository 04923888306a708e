use crate::gate::Role;
use crate::store::EntityStore;
use crate::students::Student;
use crate::teachers::Teacher;
use serde::Serialize;

pub const ADMIN_ID: &str = "a001";
const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The signed-in identity. Permissions exist only on the admin variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum User {
    Base {
        #[serde(flatten)]
        info: UserInfo,
        role: Role,
    },
    AdminExtended {
        #[serde(flatten)]
        info: UserInfo,
        permissions: Vec<String>,
    },
}

impl User {
    pub fn role(&self) -> Role {
        match self {
            User::Base { role, .. } => *role,
            User::AdminExtended { .. } => Role::Admin,
        }
    }

    pub fn info(&self) -> &UserInfo {
        match self {
            User::Base { info, .. } | User::AdminExtended { info, .. } => info,
        }
    }

    fn admin() -> Self {
        User::AdminExtended {
            info: UserInfo {
                id: ADMIN_ID.to_string(),
                name: "Khalid Abu Eid".to_string(),
                avatar: None,
            },
            permissions: [
                "manage_teachers",
                "manage_students",
                "manage_experiences",
                "view_stats",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub authenticated: bool,
    pub notification_count: u32,
    /// Display role; stays `student` after logout even though the gate sees no session.
    pub user_type: Role,
}

impl Session {
    pub fn seeded() -> Self {
        Self {
            user: Some(User::admin()),
            authenticated: true,
            notification_count: 2,
            user_type: Role::Admin,
        }
    }

    /// Role as seen by the gate; `None` when nobody is signed in.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }

    /// `admin` (or the admin id), an active teacher id, or a student number.
    /// An unrecognised name leaves the session untouched.
    pub fn login(
        &mut self,
        username: &str,
        teachers: &EntityStore<Teacher>,
        students: &EntityStore<Student>,
    ) -> bool {
        let username = username.trim();
        let user = if username.eq_ignore_ascii_case(ADMIN_USERNAME) || username == ADMIN_ID {
            Some(User::admin())
        } else if let Some(t) = teachers.get(username).filter(|t| t.is_active) {
            Some(User::Base {
                info: UserInfo {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    avatar: None,
                },
                role: Role::Teacher,
            })
        } else {
            students.find_by_student_id(username).map(|s| User::Base {
                info: UserInfo {
                    id: s.student_id.clone(),
                    name: s.name.clone(),
                    avatar: None,
                },
                role: Role::Student,
            })
        };

        let Some(user) = user else {
            tracing::info!(username, "login rejected");
            return false;
        };
        tracing::info!(id = %user.info().id, role = user.role().as_str(), "login");
        self.user_type = user.role();
        self.user = Some(user);
        self.authenticated = true;
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(id = %user.info().id, "logout");
        }
        self.user = None;
        self.authenticated = false;
        self.user_type = Role::Student;
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        match &self.user {
            Some(User::AdminExtended { permissions, .. }) => {
                permissions.iter().any(|p| p == permission)
            }
            _ => false,
        }
    }

    pub fn set_notification_count(&mut self, count: u32) {
        self.notification_count = count;
    }

    pub fn mark_notifications_read(&mut self) {
        self.notification_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn stores() -> (EntityStore<Teacher>, EntityStore<Student>) {
        (
            EntityStore::new(seed::teachers()),
            EntityStore::new(seed::students()),
        )
    }

    #[test]
    fn seeded_session_is_the_admin() {
        let s = Session::seeded();
        assert_eq!(s.role(), Some(Role::Admin));
        assert_eq!(s.notification_count, 2);
        assert!(s.has_permission("view_stats"));
        assert!(!s.has_permission("delete_everything"));
    }

    #[test]
    fn teacher_and_student_logins_carry_no_permissions() {
        let (teachers, students) = stores();
        let mut s = Session::seeded();

        assert!(s.login("t002", &teachers, &students));
        assert_eq!(s.role(), Some(Role::Teacher));
        assert_eq!(s.user.as_ref().map(|u| u.info().name.as_str()), Some("Michael Jones"));
        assert!(!s.has_permission("view_stats"));

        assert!(s.login("1131", &teachers, &students));
        assert_eq!(s.role(), Some(Role::Student));
        assert_eq!(s.user_type, Role::Student);
    }

    #[test]
    fn deactivated_teacher_and_unknown_name_are_rejected() {
        let (teachers, students) = stores();
        let mut s = Session::seeded();
        assert!(!s.login("t006", &teachers, &students));
        assert!(!s.login("nobody", &teachers, &students));
        assert_eq!(s.role(), Some(Role::Admin));
    }

    #[test]
    fn logout_clears_identity() {
        let (teachers, students) = stores();
        let mut s = Session::seeded();
        s.logout();
        assert_eq!(s.role(), None);
        assert!(!s.authenticated);
        assert_eq!(s.user_type, Role::Student);
        assert!(!s.has_permission("view_stats"));

        assert!(s.login("ADMIN", &teachers, &students));
        assert!(s.has_permission("manage_teachers"));
    }

    #[test]
    fn notifications() {
        let mut s = Session::seeded();
        s.set_notification_count(7);
        assert_eq!(s.notification_count, 7);
        s.mark_notifications_read();
        assert_eq!(s.notification_count, 0);
    }

    #[test]
    fn admin_user_serializes_flat_with_kind_tag() {
        let v = serde_json::to_value(User::admin()).unwrap();
        assert_eq!(v["kind"], "adminExtended");
        assert_eq!(v["id"], "a001");
        assert_eq!(v["permissions"].as_array().map(|a| a.len()), Some(4));
    }
}
