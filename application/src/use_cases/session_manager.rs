//! Session lifecycle management.
//!
//! Owns the current session context: identity, credit balance, transcript,
//! and the per-identity storage capability. All state transitions notify
//! the display surface through [`SessionNotifier`].

use crate::ports::account_store::{AccountRecord, AccountStore};
use crate::ports::history_store::HistoryStore;
use crate::ports::identity_provider::{AuthError, IdentityProvider, ProviderUser};
use crate::ports::notifier::SessionNotifier;
use crate::use_cases::account_access::{AccountAccess, account_access_for};
use pdraft_domain::session::entities::{GUEST_CREDITS, NEW_ACCOUNT_CREDITS};
use pdraft_domain::{Identity, Message, Session, Transcript};
use std::sync::Arc;
use tracing::{info, warn};

/// The state owned by an active session: the session itself, its storage
/// capability, and the running transcript.
///
/// Single-writer: there is at most one in-flight pipeline run, so no
/// locking is needed around the mutable parts.
pub struct SessionContext {
    session: Session,
    access: Arc<dyn AccountAccess>,
    transcript: Transcript,
}

impl SessionContext {
    pub fn new(session: Session, access: Arc<dyn AccountAccess>) -> Self {
        Self {
            session,
            access,
            transcript: Transcript::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn access(&self) -> &Arc<dyn AccountAccess> {
        &self.access
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Debit the balance (clamped at zero) and persist it for sessions
    /// whose capability is remote-backed. Persistence failure is logged,
    /// never surfaced — the local balance is already authoritative for
    /// this process.
    pub async fn debit(&mut self, units: u64) -> u64 {
        let balance = self.session.debit(units);
        if let Err(e) = self.access.persist_credits(balance).await {
            warn!("Failed to persist credit balance: {}", e);
        }
        balance
    }
}

/// Use case for session lifecycle: sign-in, sign-up, guest entry,
/// sign-out.
pub struct SessionManager {
    identity: Arc<dyn IdentityProvider>,
    accounts: Arc<dyn AccountStore>,
    history: Arc<dyn HistoryStore>,
    notifier: Arc<dyn SessionNotifier>,
    context: Option<SessionContext>,
}

impl SessionManager {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        accounts: Arc<dyn AccountStore>,
        history: Arc<dyn HistoryStore>,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        Self {
            identity,
            accounts,
            history,
            notifier,
            context: None,
        }
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SessionContext> {
        self.context.as_mut()
    }

    pub fn has_session(&self) -> bool {
        self.context.is_some()
    }

    /// Sign in with email and password.
    ///
    /// Loads the account profile, initializing it with the new-account
    /// balance when the provider reports a fresh account (or when no
    /// profile exists yet).
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session, AuthError> {
        let user = self.identity.sign_in(email, password).await?;
        self.open_account_session(user).await
    }

    /// Create an account and sign in.
    ///
    /// The password confirmation mismatch is detected locally; the
    /// provider is never contacted in that case.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<&Session, AuthError> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let user = self.identity.sign_up(email, password).await?;
        self.open_account_session(user).await
    }

    /// Enter guest mode. Never fails and creates no remote record.
    pub fn enter_as_guest(&mut self) -> &Session {
        let uid = format!("guest-{}", chrono::Utc::now().timestamp_millis());
        let session = Session::guest(uid);
        info!("Entering guest mode with {} credits", GUEST_CREDITS);
        self.install(session)
    }

    /// Clear the session and all in-memory transcript state
    /// unconditionally.
    pub fn sign_out(&mut self) {
        if let Some(ctx) = self.context.take() {
            info!("Signed out {}", ctx.session().uid());
        }
        self.notifier.on_signed_out();
    }

    /// Debit the active session and notify the display surface.
    pub async fn debit(&mut self, units: u64) -> Option<u64> {
        let ctx = self.context.as_mut()?;
        let balance = ctx.debit(units).await;
        self.notifier.on_balance_changed(balance);
        Some(balance)
    }

    async fn open_account_session(&mut self, user: ProviderUser) -> Result<&Session, AuthError> {
        let identity = Identity::Authenticated {
            uid: user.uid.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone().unwrap_or_default(),
        };

        let credits = self.load_or_initialize_profile(&user).await?;

        info!("Signed in {} with {} credits", user.uid, credits);
        Ok(self.install(Session::new(identity, credits)))
    }

    /// Fetch the account record, creating one with the starting balance
    /// for accounts that have none yet.
    async fn load_or_initialize_profile(&self, user: &ProviderUser) -> Result<u64, AuthError> {
        let existing = if user.is_new {
            None
        } else {
            self.accounts
                .fetch(&user.uid)
                .await
                .map_err(|e| AuthError::ProfileUnavailable(e.to_string()))?
        };

        match existing {
            Some(record) => Ok(record.credits),
            None => {
                let display_name = user
                    .display_name
                    .clone()
                    .unwrap_or_else(|| local_part(&user.email));
                let record = AccountRecord::new_account(NEW_ACCOUNT_CREDITS);
                self.accounts
                    .initialize(&user.uid, &user.email, &display_name, &record)
                    .await
                    .map_err(|e| AuthError::ProfileUnavailable(e.to_string()))?;
                Ok(NEW_ACCOUNT_CREDITS)
            }
        }
    }

    fn install(&mut self, session: Session) -> &Session {
        self.notifier
            .on_signed_in(session.identity().display_name(), session.credits());
        let access = account_access_for(
            session.identity(),
            self.accounts.clone(),
            self.history.clone(),
        );
        self.context = Some(SessionContext::new(session, access));
        self.context.as_ref().map(|c| c.session()).unwrap()
    }
}

fn local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
