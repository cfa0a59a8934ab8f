use crate::credentials::CredentialDirectory;
use crate::errors::TrackerError;
use crate::export::{ExportFile, export_range};
use crate::models::{CommentOutcome, DayRecord, Outcome, Prompt, RangeKind, Reply};
use crate::navigator::DateNavigator;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::tasks::{UserLog, clock_time};
use tracing::info;

/// Application state for one profile.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    credentials: CredentialDirectory,
    session: Session,
    log: Option<UserLog>,
    navigator: DateNavigator,
    clock: fn() -> String,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads persisted state. A stored session is resumed as logged in.
    pub fn open(store: S, navigator: DateNavigator) -> Self {
        let credentials = CredentialDirectory::load(&store);
        let session = Session::restore(&store);
        let log = session.user().map(|user| UserLog::load(&store, user));
        if let Some(user) = session.user() {
            info!(user, "restored session");
        }

        Self {
            store,
            credentials,
            session,
            log,
            navigator,
            clock: clock_time,
        }
    }

    /// Replaces the clock used to stamp new comments.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn credentials(&self) -> &CredentialDirectory {
        &self.credentials
    }

    pub fn user(&self) -> Option<&str> {
        self.session.user()
    }

    pub fn current_date(&self) -> &str {
        self.navigator.current()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), TrackerError> {
        self.credentials.register(&mut self.store, username, password)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), TrackerError> {
        self.credentials.authenticate(username, password)?;
        self.session.login(&mut self.store, username)?;
        self.log = Some(UserLog::load(&self.store, username));
        info!(user = username, "logged in");
        Ok(())
    }

    /// Ends the session. The stored log is kept; only the loaded copy is dropped.
    pub fn logout(&mut self) -> Result<(), TrackerError> {
        if let Some(user) = self.session.user() {
            info!(user, "logged out");
        }
        self.session.logout(&mut self.store)?;
        self.log = None;
        Ok(())
    }

    pub fn log(&self) -> Result<&UserLog, TrackerError> {
        self.log.as_ref().ok_or(TrackerError::NotLoggedIn)
    }

    /// Record for the viewed date, empty if nothing was recorded yet.
    pub fn current_day(&self) -> Result<DayRecord, TrackerError> {
        Ok(self.log()?.day(self.navigator.current()))
    }

    pub fn shift_date(&mut self, delta_days: i64) -> Result<&str, TrackerError> {
        self.navigator.shift(delta_days)
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), TrackerError> {
        self.navigator.set_date(date)
    }

    pub fn adjust_count(&mut self, delta: i64) -> Result<u64, TrackerError> {
        let log = self.log.as_mut().ok_or(TrackerError::NotLoggedIn)?;
        log.adjust_count(&mut self.store, self.navigator.current(), delta)
    }

    pub fn add_comment(&mut self, text: &str) -> Result<CommentOutcome, TrackerError> {
        let time = (self.clock)();
        let log = self.log.as_mut().ok_or(TrackerError::NotLoggedIn)?;
        log.add_comment(&mut self.store, self.navigator.current(), text, time)
    }

    pub fn copy_comment(&self, index: usize) -> Result<String, TrackerError> {
        Ok(self.log()?.comment(self.navigator.current(), index)?.text.clone())
    }

    pub fn request_edit(&self, index: usize) -> Result<Prompt, TrackerError> {
        let date = self.navigator.current();
        let comment = self.log()?.comment(date, index)?;
        Ok(Prompt::EditComment {
            date: date.to_string(),
            index,
            current: comment.text.clone(),
        })
    }

    pub fn request_delete(&self, index: usize) -> Result<Prompt, TrackerError> {
        let date = self.navigator.current();
        let comment = self.log()?.comment(date, index)?;
        Ok(Prompt::DeleteComment {
            date: date.to_string(),
            index,
            text: comment.text.clone(),
        })
    }

    /// Applies the caller's decision on a prompt from `request_edit` or
    /// `request_delete`. The index is checked again against the current log.
    pub fn answer(&mut self, prompt: Prompt, reply: Reply) -> Result<Outcome, TrackerError> {
        let log = self.log.as_mut().ok_or(TrackerError::NotLoggedIn)?;
        let store = &mut self.store;
        match (prompt, reply) {
            (_, Reply::Cancel) => Ok(Outcome::Cancelled),
            (Prompt::EditComment { date, index, .. }, Reply::Text(text)) => {
                log.edit_comment(store, &date, index, &text)?;
                Ok(Outcome::Applied)
            }
            (Prompt::EditComment { .. }, Reply::Confirm) => Ok(Outcome::Cancelled),
            (Prompt::DeleteComment { date, index, .. }, Reply::Confirm | Reply::Text(_)) => {
                log.delete_comment(store, &date, index)?;
                Ok(Outcome::Applied)
            }
        }
    }

    pub fn export(&self, range: RangeKind) -> Result<ExportFile, TrackerError> {
        let log = self.log()?;
        let file = export_range(log.days(), self.navigator.current(), range, log.user())?;
        info!(
            user = log.user(),
            range = range.as_str(),
            rows = file.rows.len(),
            "built export"
        );
        Ok(file)
    }
}
