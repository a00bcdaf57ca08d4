//! Login page gate.
//!
//! Signed-in users are sent to the home route; everyone else gets the
//! sign-in view.

use axum::http::HeaderMap;
use tracing::debug;

use crate::session::{SessionError, SessionProvider};

mod view;

pub use view::{escape_html, LoginView};

/// Default post-login destination.
pub const DEFAULT_HOME_ROUTE: &str = "/app";

/// Default privacy policy document.
pub const DEFAULT_PRIVACY_POLICY_PATH: &str = "/privacy_policy.pdf";

/// Routes and providers the login page uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub home_route: String,
    pub privacy_policy_path: String,
    /// Sign-in provider ids, in display order.
    pub sign_in_providers: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            home_route: DEFAULT_HOME_ROUTE.to_string(),
            privacy_policy_path: DEFAULT_PRIVACY_POLICY_PATH.to_string(),
            sign_in_providers: vec!["google".to_string(), "github".to_string()],
        }
    }
}

/// What the login page resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginPage {
    /// Already signed in: go here, render nothing.
    Redirect(String),
    SignIn(LoginView),
}

/// Decide what the login page shows for this request.
///
/// `callback_url` is passed through to the sign-in affordances untouched.
/// Session lookup failures are returned to the caller.
pub fn render_login_page(
    provider: &dyn SessionProvider,
    headers: &HeaderMap,
    callback_url: Option<&str>,
    config: &GateConfig,
) -> Result<LoginPage, SessionError> {
    if let Some(session) = provider.current_session(headers)? {
        debug!("Session {} present, redirecting to {}", session.id, config.home_route);
        return Ok(LoginPage::Redirect(config.home_route.clone()));
    }

    Ok(LoginPage::SignIn(LoginView::new(config, callback_url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionStore, SESSION_COOKIE};
    use axum::http::{header, HeaderValue};
    use chrono::Utc;
    use uuid::Uuid;

    struct FixedProvider(Option<Session>);

    impl SessionProvider for FixedProvider {
        fn current_session(&self, _: &HeaderMap) -> Result<Option<Session>, SessionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl SessionProvider for FailingProvider {
        fn current_session(&self, _: &HeaderMap) -> Result<Option<Session>, SessionError> {
            Err(SessionError::Io {
                path: "session.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    fn session() -> Session {
        Session {
            id: Uuid::new_v4(),
            user: "ada".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_present_session_redirects() {
        let page = render_login_page(
            &FixedProvider(Some(session())),
            &HeaderMap::new(),
            Some("/app/prompts"),
            &GateConfig::default(),
        )
        .unwrap();
        assert_eq!(page, LoginPage::Redirect("/app".to_string()));
    }

    #[test]
    fn test_absent_session_renders_sign_in() {
        let page = render_login_page(
            &FixedProvider(None),
            &HeaderMap::new(),
            Some("/app/prompts"),
            &GateConfig::default(),
        )
        .unwrap();
        match page {
            LoginPage::SignIn(view) => {
                assert_eq!(view.callback_url.as_deref(), Some("/app/prompts"));
                assert_eq!(view.buttons.len(), 2);
                assert_eq!(view.privacy_policy_path, "/privacy_policy.pdf");
            }
            other => panic!("Expected SignIn, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_home_route() {
        let config = GateConfig {
            home_route: "/dashboard".to_string(),
            ..Default::default()
        };
        let page =
            render_login_page(&FixedProvider(Some(session())), &HeaderMap::new(), None, &config)
                .unwrap();
        assert_eq!(page, LoginPage::Redirect("/dashboard".to_string()));
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let result = render_login_page(
            &FailingProvider,
            &HeaderMap::new(),
            None,
            &GateConfig::default(),
        );
        assert!(matches!(result, Err(SessionError::Io { .. })));
    }

    #[test]
    fn test_malformed_store_renders_sign_in_and_keeps_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::new(tmp.path()).unwrap();
        std::fs::write(store.session_path(), r#"{"id":""#).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}=stale", SESSION_COOKIE)).unwrap(),
        );
        let page = render_login_page(&store, &headers, None, &GateConfig::default()).unwrap();

        assert!(matches!(page, LoginPage::SignIn(_)));
        assert!(store.session_path().exists());
    }
}
