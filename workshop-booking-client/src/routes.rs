//! The client's route table and path resolution.

use crate::guard::{decide, Action, RouteTags};
use crate::session::Session;

#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    /// Pattern, `:name` segments match any single segment.
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub tags: RouteTags,
}

impl Route {
    const fn new(path: &'static str, name: &'static str, tags: RouteTags) -> Self {
        Self {
            path,
            name: Some(name),
            tags,
        }
    }

    fn static_segments(&self) -> usize {
        segments(self.path)
            .filter(|segment| !segment.starts_with(':'))
            .count()
    }

    fn matches(&self, path: &[&str]) -> bool {
        let mut pattern = segments(self.path);
        let mut path = path.iter();
        loop {
            match (pattern.next(), path.next()) {
                (None, None) => return true,
                (Some(expected), Some(actual)) => {
                    if !expected.starts_with(':') && expected != *actual {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

const PUBLIC_LOGGED_OUT: RouteTags = RouteTags::PUBLIC.union(RouteTags::ONLY_LOGGED_OUT);

pub static LOGIN: Route = Route::new("/login", "Login", PUBLIC_LOGGED_OUT);
pub static PROFILE: Route = Route::new("/profile", "Profile", RouteTags::NONE);
pub static NOT_FOUND: Route = Route {
    path: "/:pathMatch(.*)*",
    name: None,
    tags: RouteTags::NOT_FOUND,
};

pub static ROUTES: &[&Route] = &[
    &Route::new("/", "Home", RouteTags::PUBLIC),
    &Route::new("/articles", "Articles", RouteTags::PUBLIC),
    &Route::new("/articles/:id", "Article Details", RouteTags::PUBLIC),
    &Route::new("/about", "About", RouteTags::PUBLIC),
    &LOGIN,
    &Route::new("/register", "Register", PUBLIC_LOGGED_OUT),
    // workshops
    &Route::new("/workshop", "Workshops", RouteTags::NONE),
    &Route::new("/workshop/:id", "Workshop Details", RouteTags::NONE),
    &Route::new(
        "/profile/attended-workshops",
        "Past Workshops",
        RouteTags::NONE,
    ),
    &Route::new(
        "/profile/attended-workshops/:id",
        "Past Workshop Details",
        RouteTags::NONE,
    ),
    &Route::new(
        "/profile/upcoming-workshops",
        "Upcoming Workshops",
        RouteTags::NONE,
    ),
    // bookings
    &Route::new("/rooms", "Rooms", RouteTags::NONE),
    &Route::new("/rooms/:id", "Room Details", RouteTags::NONE),
    &Route::new(
        "/profile/past-bookings",
        "User Past Bookings",
        RouteTags::NONE,
    ),
    &Route::new("/profile/bookings", "User Bookings", RouteTags::NONE),
    &Route::new("/realtime", "Real-time Activities", RouteTags::NONE),
    &PROFILE,
    &Route::new("/profile-report", "Profile Report", RouteTags::NONE),
    // admin
    &Route::new("/admin", "Admin Home", RouteTags::IS_ADMIN),
    &Route::new("/admin/about", "Admin About", RouteTags::IS_ADMIN),
    &Route::new("/admin/articles", "Admin Articles", RouteTags::IS_ADMIN),
    &Route::new("/admin/workshop", "Admin Workshop", RouteTags::IS_ADMIN),
    &Route::new(
        "/admin/past-workshop",
        "Admin Past Workshop",
        RouteTags::IS_ADMIN,
    ),
    &Route::new("/admin/workshop/:id", "Workshop Users", RouteTags::IS_ADMIN),
    &Route::new(
        "/admin/past-workshop/:id",
        "Past Workshop Users",
        RouteTags::IS_ADMIN,
    ),
    &Route::new(
        "/admin/workshop/list/:id",
        "Admin Workshop Attendance",
        RouteTags::IS_ADMIN,
    ),
    &Route::new("/admin/booking/:id", "Admin Booking", RouteTags::IS_ADMIN),
    &Route::new("/admin/realtime", "Admin Real Time", RouteTags::IS_ADMIN),
    &Route::new("/admin/profile", "Admin Profile", RouteTags::IS_ADMIN),
    &Route::new("/admin/users", "Admin Users", RouteTags::IS_ADMIN),
    &Route::new("/admin/messages", "Admin Messages", RouteTags::IS_ADMIN),
];

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|segment| !segment.is_empty())
}

/// The route a path lands on, the catch-all if nothing else matches.
#[must_use]
pub fn resolve(path: &str) -> &'static Route {
    let path: Vec<&str> = segments(path).collect();
    ROUTES
        .iter()
        .copied()
        .filter(|route| route.matches(&path))
        // max_by_key keeps the last maximum, reversing makes the first listed route win
        .rev()
        .max_by_key(|route| route.static_segments())
        .unwrap_or(&NOT_FOUND)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed(&'static Route),
    Redirect(&'static Route),
}

impl Navigation {
    #[must_use]
    pub const fn route(self) -> &'static Route {
        match self {
            Self::Proceed(route) | Self::Redirect(route) => route,
        }
    }
}

/// Resolves `path` and asks the guard whether the session may go there.
#[must_use]
pub fn navigate(session: &Session, path: &str) -> Navigation {
    let route = resolve(path);
    let action = decide(session, route.tags);
    tracing::debug!(path, route = route.path, ?action, "navigation");
    match action {
        Action::Proceed => Navigation::Proceed(route),
        Action::RedirectLogin => Navigation::Redirect(&LOGIN),
        Action::RedirectProfile => Navigation::Redirect(&PROFILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> Option<&'static str> {
        resolve(path).name
    }

    #[test]
    fn resolves_static_and_parameter_routes() {
        assert_eq!(name("/"), Some("Home"));
        assert_eq!(name(""), Some("Home"));
        assert_eq!(name("/workshop"), Some("Workshops"));
        assert_eq!(name("/workshop/"), Some("Workshops"));
        assert_eq!(name("/workshop/abc123"), Some("Workshop Details"));
        assert_eq!(name("/workshop/abc123?tab=users#top"), Some("Workshop Details"));
        assert_eq!(
            name("/admin/workshop/list/abc123"),
            Some("Admin Workshop Attendance")
        );
        assert_eq!(name("/profile/attended-workshops"), Some("Past Workshops"));
    }

    #[test]
    fn counts_static_segments() {
        let route = Route::new("/admin/workshop/:id", "x", RouteTags::NONE);
        assert_eq!(route.static_segments(), 2);
        assert_eq!(name("/admin/workshop/list"), Some("Workshop Users"));
    }

    #[test]
    fn unknown_paths_hit_the_catch_all() {
        assert_eq!(resolve("/nope"), &NOT_FOUND);
        assert_eq!(resolve("/workshop/a/b"), &NOT_FOUND);
        assert!(resolve("/admin/unknown").tags.not_found);
    }

    #[test]
    fn anonymous_navigation() {
        let session = Session::anonymous();
        assert_eq!(navigate(&session, "/articles/7"), Navigation::Proceed(resolve("/articles/7")));
        assert_eq!(navigate(&session, "/login"), Navigation::Proceed(&LOGIN));
        assert_eq!(navigate(&session, "/workshop"), Navigation::Redirect(&LOGIN));
        assert_eq!(navigate(&session, "/admin"), Navigation::Redirect(&LOGIN));
        assert_eq!(navigate(&session, "/missing"), Navigation::Redirect(&LOGIN));
    }

    #[test]
    fn member_navigation() {
        let session = Session::anonymous().with_token("Bearer t");
        assert_eq!(
            navigate(&session, "/workshop/42").route().name,
            Some("Workshop Details")
        );
        assert_eq!(navigate(&session, "/register"), Navigation::Redirect(&PROFILE));
        assert_eq!(navigate(&session, "/missing"), Navigation::Redirect(&PROFILE));
        assert_eq!(navigate(&session, "/admin/users"), Navigation::Redirect(&PROFILE));
        assert_eq!(navigate(&session, "/profile"), Navigation::Proceed(&PROFILE));
    }

    #[test]
    fn admin_navigation() {
        let session = Session::anonymous().with_token("Bearer t").with_admin("true");
        assert_eq!(
            navigate(&session, "/admin/users").route().name,
            Some("Admin Users")
        );
        assert_eq!(navigate(&session, "/missing"), Navigation::Redirect(&PROFILE));
    }

    #[test]
    fn redirect_targets_are_reachable() {
        let anonymous = Session::anonymous();
        assert!(matches!(navigate(&anonymous, LOGIN.path), Navigation::Proceed(_)));
        let member = Session::anonymous().with_token("Bearer t");
        assert!(matches!(navigate(&member, PROFILE.path), Navigation::Proceed(_)));
    }
}
