//! 导航菜单与路由守卫
//!
//! 根据登录状态和角色决定可见的菜单项以及页面是否可访问

use crate::models::auth::{AuthState, Role};

/// 菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    /// `None` 表示所有角色可见
    pub only_for: Option<&'static [Role]>,
}

impl NavItem {
    pub fn visible_to(&self, role: Option<Role>) -> bool {
        match (self.only_for, role) {
            (None, _) => true,
            (Some(roles), Some(role)) => roles.contains(&role),
            (Some(_), None) => false,
        }
    }
}

const MANAGERS: &[Role] = &[Role::Admin, Role::Instructor];
const LEARNERS: &[Role] = &[Role::User, Role::Student];

/// 侧边栏菜单（按显示顺序）
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        href: "/dashboard",
        only_for: None,
    },
    NavItem {
        label: "Groups",
        href: "/groups",
        only_for: Some(MANAGERS),
    },
    NavItem {
        label: "Students",
        href: "/students",
        only_for: Some(MANAGERS),
    },
    NavItem {
        label: "Quizzes",
        href: "/quizes",
        only_for: Some(MANAGERS),
    },
    NavItem {
        label: "Quizzes",
        href: "/quizes-std",
        only_for: Some(LEARNERS),
    },
    NavItem {
        label: "Results",
        href: "/quiz-result",
        only_for: None,
    },
];

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectLogin,
    RedirectDashboard,
}

/// 按角色过滤菜单
pub fn visible_items(role: Option<Role>) -> Vec<&'static NavItem> {
    NAV_ITEMS.iter().filter(|item| item.visible_to(role)).collect()
}

/// 当前路径是否属于某个菜单项（精确匹配或子路径）
pub fn is_active(current: &str, href: &str) -> bool {
    current == href
        || current
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// 路由守卫
///
/// 未登录一律跳转登录；已登录但角色不允许时回到首页。
/// 不在菜单中的路径（如考试页、修改密码）只要求登录。
pub fn guard(path: &str, auth: &AuthState) -> RouteDecision {
    if !auth.is_logged_in() {
        return RouteDecision::RedirectLogin;
    }
    let role = auth.role();
    let owner = NAV_ITEMS
        .iter()
        .filter(|item| is_active(path, item.href))
        .max_by_key(|item| item.href.len());
    match owner {
        Some(item) if !item.visible_to(role) => RouteDecision::RedirectDashboard,
        _ => RouteDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Profile;

    fn logged_in(role: Role) -> AuthState {
        AuthState {
            token: Some("tok".to_string()),
            profile: Some(Profile {
                id: None,
                email: None,
                first_name: None,
                last_name: None,
                role: Some(role),
            }),
        }
    }

    fn hrefs(role: Option<Role>) -> Vec<&'static str> {
        visible_items(role).iter().map(|i| i.href).collect()
    }

    #[test]
    fn student_menu_hides_management_pages() {
        assert_eq!(
            hrefs(Some(Role::Student)),
            vec!["/dashboard", "/quizes-std", "/quiz-result"]
        );
    }

    #[test]
    fn instructor_menu_shows_management_pages() {
        assert_eq!(
            hrefs(Some(Role::Instructor)),
            vec!["/dashboard", "/groups", "/students", "/quizes", "/quiz-result"]
        );
    }

    #[test]
    fn missing_role_sees_only_public_items() {
        assert_eq!(hrefs(None), vec!["/dashboard", "/quiz-result"]);
    }

    #[test]
    fn guard_redirects_without_token() {
        let auth = AuthState::default();
        for path in ["/dashboard", "/groups", "/quiz-exam", "/quizes/abc"] {
            assert_eq!(guard(path, &auth), RouteDecision::RedirectLogin);
        }
    }

    #[test]
    fn guard_sends_students_back_to_dashboard() {
        let student = logged_in(Role::Student);
        assert_eq!(guard("/groups", &student), RouteDecision::RedirectDashboard);
        assert_eq!(guard("/quizes/123", &student), RouteDecision::RedirectDashboard);
        assert_eq!(guard("/quizes-std", &student), RouteDecision::Allow);
        assert_eq!(guard("/quiz-exam", &student), RouteDecision::Allow);

        let instructor = logged_in(Role::Instructor);
        assert_eq!(guard("/quizes/123", &instructor), RouteDecision::Allow);
        assert_eq!(guard("/quizes-std", &instructor), RouteDecision::RedirectDashboard);
    }

    #[test]
    fn active_matching_requires_segment_boundary() {
        assert!(is_active("/quizes", "/quizes"));
        assert!(is_active("/quizes/abc", "/quizes"));
        assert!(!is_active("/quizes-std", "/quizes"));
    }
}
