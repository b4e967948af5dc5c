use std::{fmt, sync::Arc};

use url::Url;

use crate::error::NetResult;

/// Produces an `Authorization` header value per request.
///
/// This is the hook for schemes whose credentials are minted on demand, such
/// as Kerberos/SPNEGO tickets from a GSSAPI context, signed URLs or rotating
/// tokens.
pub trait CredentialProvider: Send + Sync {
    /// Complete header value (scheme included) for a request to `url`.
    ///
    /// # Errors
    ///
    /// Any error aborts the request before it is sent. Use
    /// [`NetError::Auth`](crate::NetError::Auth) for credential failures.
    fn authorization(&self, url: &Url) -> NetResult<String>;
}

/// Credentials handed to the transport unchanged.
///
/// Readers never look inside; only [`HttpClient`](crate::HttpClient) applies them.
#[derive(Clone, Default)]
pub enum Auth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer(String),
    /// Pre-obtained SPNEGO token, sent as `Authorization: Negotiate <token>`.
    Negotiate(String),
    /// Opaque credential object asked for a header value on every request.
    Custom(Arc<dyn CredentialProvider>),
}

impl Auth {
    pub fn basic<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer<T: Into<String>>(token: T) -> Self {
        Self::Bearer(token.into())
    }

    pub fn negotiate<T: Into<String>>(token: T) -> Self {
        Self::Negotiate(token.into())
    }

    pub fn custom<P: CredentialProvider + 'static>(provider: P) -> Self {
        Self::Custom(Arc::new(provider))
    }

    /// Basic auth when both halves are present, anonymous otherwise.
    pub fn from_credentials(username: Option<String>, password: Option<String>) -> Self {
        match (username, password) {
            (Some(username), Some(password)) => Self::Basic { username, password },
            _ => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Auth::None)
    }
}

/// `Custom` credentials are equal only when they share the same provider.
impl PartialEq for Auth {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (
                Self::Basic { username, password },
                Self::Basic {
                    username: other_user,
                    password: other_password,
                },
            ) => username == other_user && password == other_password,
            (Self::Bearer(a), Self::Bearer(b)) => a == b,
            (Self::Negotiate(a), Self::Negotiate(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Auth {}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Auth::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
            Auth::Negotiate(_) => f.debug_tuple("Negotiate").field(&"<redacted>").finish(),
            Auth::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::both(Some("user"), Some("pass"), Auth::basic("user", "pass"))]
    #[case::user_only(Some("user"), None, Auth::None)]
    #[case::password_only(None, Some("pass"), Auth::None)]
    #[case::neither(None, None, Auth::None)]
    fn test_from_credentials(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
        #[case] expected: Auth,
    ) {
        let auth = Auth::from_credentials(
            username.map(str::to_owned),
            password.map(str::to_owned),
        );
        assert_eq!(auth, expected);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let basic = format!("{:?}", Auth::basic("alice", "hunter2"));
        assert!(basic.contains("alice"));
        assert!(!basic.contains("hunter2"));

        let bearer = format!("{:?}", Auth::bearer("sk-123"));
        assert!(!bearer.contains("sk-123"));

        let negotiate = format!("{:?}", Auth::negotiate("YIIGhgYJKoZIhvcSAQICAQ"));
        assert!(!negotiate.contains("YIIG"));
    }

    struct Fixed;

    impl CredentialProvider for Fixed {
        fn authorization(&self, _url: &Url) -> NetResult<String> {
            Ok("Negotiate fixed".to_owned())
        }
    }

    #[test]
    fn test_custom_equality_is_by_provider_identity() {
        let auth = Auth::custom(Fixed);

        assert_eq!(auth, auth.clone());
        assert_ne!(auth, Auth::custom(Fixed));
        assert_ne!(auth, Auth::None);
        assert_eq!(format!("{auth:?}"), "Custom(..)");
    }

    #[rstest]
    #[case::bearer(Auth::bearer("t"), Auth::bearer("t"), true)]
    #[case::negotiate(Auth::negotiate("t"), Auth::negotiate("t"), true)]
    #[case::scheme_differs(Auth::bearer("t"), Auth::negotiate("t"), false)]
    #[case::password_differs(Auth::basic("u", "a"), Auth::basic("u", "b"), false)]
    fn test_equality(#[case] a: Auth, #[case] b: Auth, #[case] equal: bool) {
        assert_eq!(a == b, equal);
    }
}
