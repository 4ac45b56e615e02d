use crate::api::ApiClient;
use crate::config::LoginSettings;

use super::session::{LoginError, Session};
use super::{AddEmployeeView, EmployeeDetailsView, PrefilledView, TrainingView, View};

const PREFILLED_PATH: &str = "/prediction/prefilled-predictions";

/// Navigable locations of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: home when logged in, otherwise the login form.
    Root,
    Training,
    AddEmployee,
    Prefilled,
    EmployeeDetails(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No view at {0}")]
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        let route = match normalized {
            "" => Self::Root,
            "/training" => Self::Training,
            "/prediction" => Self::AddEmployee,
            PREFILLED_PATH => Self::Prefilled,
            other => other
                .strip_prefix(PREFILLED_PATH)
                .and_then(|rest| rest.strip_prefix('/'))
                .and_then(|number| number.parse().ok())
                .map(Self::EmployeeDetails)
                .ok_or_else(|| RouteError::Unknown(trimmed.to_string()))?,
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Training => "/training".to_string(),
            Self::AddEmployee => "/prediction".to_string(),
            Self::Prefilled => PREFILLED_PATH.to_string(),
            Self::EmployeeDetails(number) => format!("{PREFILLED_PATH}/{number}"),
        }
    }
}

/// The controller behind the current route.
pub enum ActiveView {
    Login,
    Home,
    Training(TrainingView),
    AddEmployee(AddEmployeeView),
    Prefilled(PrefilledView),
    EmployeeDetails(EmployeeDetailsView),
}

impl ActiveView {
    fn controller(&mut self) -> Option<&mut dyn View> {
        match self {
            Self::Login | Self::Home => None,
            Self::Training(view) => Some(view as &mut dyn View),
            Self::AddEmployee(view) => Some(view as &mut dyn View),
            Self::Prefilled(view) => Some(view as &mut dyn View),
            Self::EmployeeDetails(view) => Some(view as &mut dyn View),
        }
    }
}

/// Session plus the active view; owns navigation between views.
pub struct App {
    api: ApiClient,
    session: Session,
    route: Route,
    view: ActiveView,
}

impl App {
    pub fn new(api: ApiClient, credentials: LoginSettings) -> Self {
        Self {
            api,
            session: Session::new(credentials),
            route: Route::Root,
            view: ActiveView::Login,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ActiveView {
        &mut self.view
    }

    /// Leave the current view and show the one at `path`.
    pub fn navigate(&mut self, path: &str) -> Result<(), RouteError> {
        let route = Route::parse(path)?;
        self.show(route);
        Ok(())
    }

    /// Log in; the root route switches to the home view on success.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        self.session.login(username, password)?;
        if self.route == Route::Root {
            self.show(Route::Root);
        }
        Ok(())
    }

    /// Clear the session and return to `/`.
    pub fn logout(&mut self) {
        self.session.logout();
        self.show(Route::Root);
    }

    /// Apply finished results to the active view.
    pub fn poll(&mut self) -> bool {
        self.view.controller().is_some_and(|view| view.poll())
    }

    pub fn is_busy(&mut self) -> bool {
        self.view.controller().is_some_and(|view| view.is_busy())
    }

    fn show(&mut self, route: Route) {
        if let Some(current) = self.view.controller() {
            current.teardown();
        }
        tracing::debug!("Navigating to {}", route.path());
        let api = self.api.clone();
        self.view = match route {
            Route::Root if self.session.is_logged_in() => ActiveView::Home,
            Route::Root => ActiveView::Login,
            Route::Training => ActiveView::Training(TrainingView::new(api)),
            Route::AddEmployee => ActiveView::AddEmployee(AddEmployeeView::new(api)),
            Route::Prefilled => ActiveView::Prefilled(PrefilledView::new(api)),
            Route::EmployeeDetails(number) => {
                ActiveView::EmployeeDetails(EmployeeDetailsView::new(api, number))
            }
        };
        self.route = route;
        if let Some(next) = self.view.controller() {
            next.activate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpSettings;

    #[test]
    fn parses_every_route() {
        assert_eq!(Route::parse("/"), Ok(Route::Root));
        assert_eq!(Route::parse("/training"), Ok(Route::Training));
        assert_eq!(Route::parse("/prediction/"), Ok(Route::AddEmployee));
        assert_eq!(
            Route::parse("/prediction/prefilled-predictions"),
            Ok(Route::Prefilled)
        );
        assert_eq!(
            Route::parse("/prediction/prefilled-predictions/1451"),
            Ok(Route::EmployeeDetails(1451))
        );
        assert!(Route::parse("/prediction/prefilled-predictions/abc").is_err());
        assert!(Route::parse("/models").is_err());
    }

    #[test]
    fn paths_parse_back_to_the_same_route() {
        for route in [
            Route::Root,
            Route::Training,
            Route::AddEmployee,
            Route::Prefilled,
            Route::EmployeeDetails(3),
        ] {
            assert_eq!(Route::parse(&route.path()), Ok(route));
        }
    }

    #[test]
    fn root_follows_login_state() {
        let api = ApiClient::with_base_url("http://127.0.0.1:9", &HttpSettings::default()).unwrap();
        let mut app = App::new(api, LoginSettings::default());
        assert!(matches!(app.view(), ActiveView::Login));
        assert_eq!(app.login("Admin", ""), Err(LoginError::MissingFields));
        app.login("Admin", "Admin").unwrap();
        assert!(matches!(app.view(), ActiveView::Home));
        app.navigate("/prediction").unwrap();
        assert!(matches!(app.view(), ActiveView::AddEmployee(_)));
        app.logout();
        assert_eq!(app.route(), Route::Root);
        assert!(matches!(app.view(), ActiveView::Login));
    }
}
