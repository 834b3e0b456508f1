use tracing::{debug, info, warn};

use crate::{
    domain::{ports::Write, DomainError, Email, NewUser, Session, SessionId, User, UserId},
    error::AppResult,
    state::AppState,
};

/// Create the user and log them in.
///
/// The user and the first session are written in one unit of work. A
/// concurrent registration that wins the email is reported as a conflict.
pub async fn register(state: &AppState, input: NewUser<'_>) -> AppResult<(User, Session)> {
    let user = User::new(input, state.clock())?;

    if state.users.exists_by_email(user.email()).await? {
        warn!(email = %user.email(), "email already registered");
        return Err(DomainError::EmailAlreadyRegistered.into());
    }
    let session = Session::new_with_user_id(user.id(), state.clock())?;
    state
        .transactions
        .execute(&[Write::User(&user), Write::Session(&session)])
        .await?;
    info!(user_id = %user.id(), "user registered");
    Ok((user, session))
}

/// Unknown email and wrong password fail identically.
pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<(User, Session)> {
    let Ok(email) = Email::new(email) else {
        return Err(DomainError::InvalidCredentials.into());
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(DomainError::InvalidCredentials.into());
    };
    if !user.verify_password(password) {
        warn!(user_id = %user.id(), "login invalid password");
        return Err(DomainError::InvalidCredentials.into());
    }

    let session = open_session(state, user.id()).await?;
    info!(user_id = %user.id(), "user logged in");
    Ok((user, session))
}

/// Resolve a bearer token to its user and session; expired sessions are removed.
pub async fn authenticate(state: &AppState, token: &str) -> AppResult<(UserId, SessionId)> {
    let id = SessionId::parse(token)?;
    let session = state
        .sessions
        .find_by_id(&id)
        .await?
        .ok_or(DomainError::SessionNotFound)?;

    if let Err(e) = session.validate_not_expired(state.clock()) {
        warn!(user_id = %session.user_id(), "session expired");
        state.sessions.delete_by_id(&id).await?;
        return Err(e.into());
    }
    debug!(user_id = %session.user_id(), "session authenticated");
    Ok((session.user_id(), id))
}

pub async fn logout(state: &AppState, id: &SessionId) -> AppResult<()> {
    state.sessions.delete_by_id(id).await?;
    info!("session closed");
    Ok(())
}

async fn open_session(state: &AppState, user_id: UserId) -> AppResult<Session> {
    let session = Session::new_with_user_id(user_id, state.clock())?;
    state.sessions.save(&session).await?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ports::UserRepository, error::AppError, state::AppState, test_support::*,
    };
    use async_trait::async_trait;
    use std::sync::Arc;
    use time::{macros::datetime, Duration, OffsetDateTime};

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00 UTC);

    fn input(email: &'static str) -> NewUser<'static> {
        NewUser {
            email,
            password: "password123",
            nickname: "hanako",
            weight_kg: 52.0,
            height_cm: 158.0,
            birth_date: "1995-04-01",
            gender: "female",
            activity_level: "light",
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_session() {
        let app = test_app(NOW);
        let (user, session) = register(&app.state, input("hanako@example.com"))
            .await
            .expect("registered");

        assert_eq!(session.user_id(), user.id());
        assert_eq!(session.expires_at(), NOW + Duration::days(7));
        assert_eq!(app.sessions.len(), 1);
        let stored = app
            .state
            .users
            .find_by_id(user.id())
            .await
            .expect("lookup")
            .expect("user saved");
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn register_returns_all_validation_errors() {
        let app = test_app(NOW);
        let bad = NewUser {
            email: "",
            password: "x",
            ..input("unused@example.com")
        };
        match register(&app.state, bad).await {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_case_insensitively() {
        let app = test_app(NOW);
        register(&app.state, input("dup@example.com"))
            .await
            .expect("first registration");
        let err = register(&app.state, input("DUP@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(DomainError::EmailAlreadyRegistered)
        ));
    }

    /// Users view whose email check always misses, as when another request
    /// registers the same email between the check and the write.
    struct StaleEmailCheck(Arc<InMemoryUsers>);

    #[async_trait]
    impl UserRepository for StaleEmailCheck {
        async fn save(&self, user: &User) -> anyhow::Result<()> {
            self.0.save(user).await
        }

        async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
            self.0.find_by_id(id).await
        }

        async fn find_by_email(&self, email: &Email) -> anyhow::Result<Option<User>> {
            self.0.find_by_email(email).await
        }

        async fn exists_by_email(&self, _email: &Email) -> anyhow::Result<bool> {
            Ok(false)
        }

        async fn delete_by_id(&self, id: UserId) -> anyhow::Result<()> {
            self.0.delete_by_id(id).await
        }
    }

    #[tokio::test]
    async fn register_losing_email_race_is_a_conflict() {
        let app = test_app(NOW);
        register(&app.state, input("race@example.com"))
            .await
            .expect("first registration");

        let stale = AppState {
            users: Arc::new(StaleEmailCheck(app.users.clone())),
            ..app.state.clone()
        };
        let err = register(&stale, input("race@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(DomainError::EmailAlreadyRegistered)
        ));
        assert_eq!(app.users.len(), 1);
        assert_eq!(app.sessions.len(), 1);
    }

    #[tokio::test]
    async fn register_leaves_no_user_when_session_write_fails() {
        let app = test_app(NOW);
        app.transactions.fail_session_writes(true);

        let err = register(&app.state, input("atomic@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(app.users.len(), 0);
        assert_eq!(app.sessions.len(), 0);

        app.transactions.fail_session_writes(false);
        register(&app.state, input("atomic@example.com"))
            .await
            .expect("retry is not blocked by a half-written user");
        assert_eq!(app.users.len(), 1);
    }

    #[tokio::test]
    async fn login_checks_password_and_hides_which_field_failed() {
        let app = test_app(NOW);
        register(&app.state, input("login@example.com"))
            .await
            .expect("registered");

        let (user, _) = login(&app.state, " Login@Example.com", "password123")
            .await
            .expect("login ok");
        assert_eq!(user.email().as_str(), "login@example.com");

        for (email, password) in [
            ("login@example.com", "wrong-password"),
            ("nobody@example.com", "password123"),
            ("not an email", "password123"),
        ] {
            let err = login(&app.state, email, password).await.unwrap_err();
            assert!(
                matches!(err, AppError::Unauthorized(DomainError::InvalidCredentials)),
                "{email}"
            );
        }
    }

    #[tokio::test]
    async fn authenticate_resolves_live_session() {
        let app = test_app(NOW);
        let (user, session) = register(&app.state, input("auth@example.com"))
            .await
            .expect("registered");

        let later = with_clock(&app, NOW + Duration::days(7));
        let (user_id, session_id) = authenticate(&later, session.id().as_str())
            .await
            .expect("still valid at expiry instant");
        assert_eq!(user_id, user.id());
        assert_eq!(&session_id, session.id());
    }

    #[tokio::test]
    async fn authenticate_rejects_and_removes_expired_session() {
        let app = test_app(NOW);
        let (_, session) = register(&app.state, input("exp@example.com"))
            .await
            .expect("registered");

        let later = with_clock(&app, NOW + Duration::days(7) + Duration::seconds(1));
        let err = authenticate(&later, session.id().as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(DomainError::SessionExpired)));
        assert_eq!(app.sessions.len(), 0);
    }

    #[tokio::test]
    async fn authenticate_distinguishes_malformed_and_unknown_tokens() {
        let app = test_app(NOW);
        let err = authenticate(&app.state, "garbage").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(DomainError::InvalidSessionId)));

        let unknown = SessionId::generate().expect("rng");
        let err = authenticate(&app.state, unknown.as_str()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(DomainError::SessionNotFound)));
    }

    #[tokio::test]
    async fn logout_deletes_session() {
        let app = test_app(NOW);
        let (_, session) = register(&app.state, input("bye@example.com"))
            .await
            .expect("registered");
        logout(&app.state, session.id()).await.expect("logout");
        assert_eq!(app.sessions.len(), 0);
    }
}
