use crate::error::LmsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    pub fn home_path(&self) -> String {
        format!("/{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = LmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            _ => Err(LmsError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum GateDecision {
    Admitted,
    Redirected { target: String },
}

/// Route admission. Admin may enter any role-scoped route; a missing session passes through.
pub fn evaluate(required: Option<Role>, session: Option<Role>) -> GateDecision {
    let Some(required) = required else {
        return GateDecision::Admitted;
    };
    let Some(actual) = session else {
        return GateDecision::Admitted;
    };
    if actual == required || actual == Role::Admin {
        GateDecision::Admitted
    } else {
        GateDecision::Redirected {
            target: actual.home_path(),
        }
    }
}

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, Default)]
pub struct GatePolicy {
    /// Send session-less visitors of role-scoped routes to the login path
    /// instead of letting them through.
    pub require_session: bool,
}

impl GatePolicy {
    pub fn evaluate(&self, required: Option<Role>, session: Option<Role>) -> GateDecision {
        if session.is_none() && required.is_some() {
            if self.require_session {
                return GateDecision::Redirected {
                    target: LOGIN_PATH.to_string(),
                };
            }
            tracing::warn!(
                required = required.map(|r| r.as_str()),
                "admitting role-scoped route without a session"
            );
        }
        evaluate(required, session)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub name: Option<&'static str>,
    pub role: Option<Role>,
    pub redirect: Option<&'static str>,
}

const fn route(pattern: &'static str, name: &'static str, role: Role) -> RouteDef {
    RouteDef {
        pattern,
        name: Some(name),
        role: Some(role),
        redirect: None,
    }
}

const fn redirect(pattern: &'static str, role: Option<Role>, to: &'static str) -> RouteDef {
    RouteDef {
        pattern,
        name: None,
        role,
        redirect: Some(to),
    }
}

pub const ROUTES: &[RouteDef] = &[
    redirect("/", None, "/teacher"),
    redirect("/teacher", Some(Role::Teacher), "/teacher/class/class001"),
    route("/teacher/class/:id", "ClassDetail", Role::Teacher),
    route("/admin", "AdminDashboard", Role::Admin),
    route("/admin/teachers", "TeacherList", Role::Admin),
    route("/admin/teachers/:id", "TeacherDetail", Role::Admin),
    route("/admin/experiences", "ExperienceList", Role::Admin),
    route("/admin/stats", "Statistics", Role::Admin),
    route("/student", "StudentHome", Role::Student),
];

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub path: String,
    pub route: &'static str,
    pub name: Option<&'static str>,
    pub params: BTreeMap<String, String>,
    pub required_role: Option<Role>,
    #[serde(flatten)]
    pub decision: GateDecision,
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pat: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let got: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pat.len() != got.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (p, g) in pat.iter().zip(got.iter()) {
        if let Some(name) = p.strip_prefix(':') {
            params.insert(name.to_string(), g.to_string());
        } else if p != g {
            return None;
        }
    }
    Some(params)
}

/// Follow static redirects, then gate the matched route. `None` for unknown paths
/// and redirect cycles. A redirected decision stops before the gate's target is resolved.
pub fn resolve(path: &str, session: Option<Role>, policy: &GatePolicy) -> Option<Resolution> {
    let mut current = normalize(path);
    for _ in 0..MAX_REDIRECTS {
        let (def, params) = ROUTES
            .iter()
            .find_map(|r| match_pattern(r.pattern, &current).map(|p| (r, p)))?;
        if let Some(next) = def.redirect {
            tracing::debug!(from = %current, to = next, "route redirect");
            current = next.to_string();
            continue;
        }
        return Some(Resolution {
            path: current,
            route: def.pattern,
            name: def.name,
            params,
            required_role: def.role,
            decision: policy.evaluate(def.role, session),
        });
    }
    tracing::warn!(path, "redirect limit reached");
    None
}
