//! Session gate and the session derived from the stored marker.

use secrecy::{ExposeSecret, SecretString};

use crate::store::{PreferenceStore, Preferences};

/// Page shown when no session exists or after logout.
pub const ENTRY_PAGE: &str = "index.html";
/// Display name used when the marker carries none.
pub const GUEST_NAME: &str = "Misafir";
/// Role assumed when the marker carries none.
pub const DEFAULT_ROLE: &str = "user";

const ADMIN_ROLE: &str = "admin";

/// Raw session values as written by the external login flow.
#[derive(Debug, Default)]
pub struct SessionMarker {
    pub token: Option<SecretString>,
    pub logged_in: bool,
    pub username: Option<String>,
    pub legacy_user: Option<String>,
    pub role: Option<String>,
}

impl SessionMarker {
    /// Whether any session value is present.
    pub fn is_present(&self) -> bool {
        let has_token = self
            .token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().is_empty());

        has_token
            || self.logged_in
            || self.username.is_some()
            || self.role.is_some()
    }
}

/// Session role. Only the admin distinction gates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member(String),
}

impl Role {
    pub fn parse(value: &str) -> Self {
        if value == ADMIN_ROLE {
            Role::Admin
        } else {
            Role::Member(value.to_string())
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ADMIN_ROLE,
            Role::Member(name) => name,
        }
    }
}

/// Session admitted by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    fn from_marker(marker: SessionMarker) -> Self {
        let username = marker
            .username
            .or(marker.legacy_user)
            .unwrap_or_else(|| GUEST_NAME.to_string());
        let role = marker
            .role
            .as_deref()
            .map(Role::parse)
            .unwrap_or_else(|| Role::parse(DEFAULT_ROLE));

        Self { username, role }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}

/// Outcome of the startup session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Admit(Session),
    Redirect { target: String },
}

/// Check the stored session marker once.
///
/// A read failure is handled exactly like a missing marker.
pub fn check_gate<S: PreferenceStore>(
    prefs: &Preferences<S>,
    entry_page: &str,
) -> GateDecision {
    let redirect = || GateDecision::Redirect {
        target: entry_page.to_string(),
    };

    match prefs.session_marker() {
        Ok(marker) if marker.is_present() => {
            let session = Session::from_marker(marker);
            log::info!(
                "session admitted for {} ({})",
                session.username(),
                session.role().as_str()
            );
            GateDecision::Admit(session)
        },
        Ok(_) => {
            log::info!("no session marker, redirecting to {entry_page}");
            redirect()
        },
        Err(err) => {
            log::warn!("session marker unreadable, redirecting: {err}");
            redirect()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ENTRY_PAGE, GUEST_NAME, GateDecision, Role, Session, check_gate,
    };
    use crate::error::StoreError;
    use crate::store::{MemoryStore, PreferenceStore, Preferences, StoreKey};

    struct UnreadableStore;

    impl PreferenceStore for UnreadableStore {
        fn read(&self, _key: StoreKey) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable {
                reason: String::from("storage disabled"),
            })
        }

        fn write(
            &mut self,
            _key: StoreKey,
            _value: &str,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        fn remove(&mut self, _key: StoreKey) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn admitted(store: MemoryStore) -> Session {
        match check_gate(&Preferences::new(store), ENTRY_PAGE) {
            GateDecision::Admit(session) => session,
            other => panic!("expected admission, got {other:?}"),
        }
    }

    #[test]
    fn given_empty_store_when_checked_then_redirects_to_entry_page() {
        let decision =
            check_gate(&Preferences::new(MemoryStore::new()), "index.html");

        assert_eq!(
            decision,
            GateDecision::Redirect {
                target: String::from("index.html")
            }
        );
    }

    #[test]
    fn given_unreadable_store_when_checked_then_fails_closed() {
        let decision =
            check_gate(&Preferences::new(UnreadableStore), ENTRY_PAGE);

        assert!(matches!(decision, GateDecision::Redirect { .. }));
    }

    #[test]
    fn given_any_single_marker_when_checked_then_session_is_admitted() {
        let markers = [
            (StoreKey::Token, "opaque"),
            (StoreKey::IsLoggedIn, "true"),
            (StoreKey::Username, "mehmet"),
            (StoreKey::Role, "user"),
        ];

        for (key, value) in markers {
            let decision = check_gate(
                &Preferences::new(MemoryStore::new().with(key, value)),
                ENTRY_PAGE,
            );
            assert!(
                matches!(decision, GateDecision::Admit(_)),
                "{} alone should admit",
                key.as_str()
            );
        }
    }

    #[test]
    fn given_logged_in_flag_not_true_when_checked_then_redirects() {
        let decision = check_gate(
            &Preferences::new(
                MemoryStore::new().with(StoreKey::IsLoggedIn, "false"),
            ),
            ENTRY_PAGE,
        );

        assert!(matches!(decision, GateDecision::Redirect { .. }));
    }

    #[test]
    fn given_token_only_when_admitted_then_guest_name_and_user_role_apply() {
        let session = admitted(MemoryStore::new().with(StoreKey::Token, "t"));

        assert_eq!(session.username(), GUEST_NAME);
        assert_eq!(session.role(), &Role::Member(String::from("user")));
    }

    #[test]
    fn given_legacy_user_key_when_admitted_then_it_names_the_session() {
        let session = admitted(
            MemoryStore::new()
                .with(StoreKey::IsLoggedIn, "true")
                .with(StoreKey::LegacyUser, "zeynep"),
        );

        assert_eq!(session.username(), "zeynep");
    }

    #[test]
    fn given_admin_role_when_parsed_then_only_exact_match_is_admin() {
        assert!(Role::parse("admin").is_admin());
        assert!(!Role::parse("Admin").is_admin());
        assert!(!Role::parse("manager").is_admin());
    }
}
