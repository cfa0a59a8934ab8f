use crate::errors::TrackerError;
use crate::models::{Comment, CommentOutcome, DayRecord, TaskLog};
use crate::storage::{KeyValueStore, load_record, save_record, tasks_key};
use chrono::Local;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLog {
    user: String,
    days: TaskLog,
}

impl UserLog {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, user: &str) -> Self {
        Self {
            user: user.to_string(),
            days: load_record(store, &tasks_key(user)),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn days(&self) -> &TaskLog {
        &self.days
    }

    /// Record for `date`, or an empty one. Never creates an entry.
    pub fn day(&self, date: &str) -> DayRecord {
        self.days.get(date).cloned().unwrap_or_default()
    }

    pub fn adjust_count<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        date: &str,
        delta: i64,
    ) -> Result<u64, TrackerError> {
        let count = self.commit(store, |days| {
            let entry = days.entry(date.to_string()).or_default();
            entry.count = apply_delta(entry.count, delta);
            Ok(entry.count)
        })?;
        debug!(user = %self.user, date, delta, count, "adjusted count");
        Ok(count)
    }

    pub fn add_comment<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        date: &str,
        text: &str,
        time: String,
    ) -> Result<CommentOutcome, TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(CommentOutcome::Rejected);
        }

        self.commit(store, |days| {
            days.entry(date.to_string()).or_default().comments.push(Comment {
                text: text.to_string(),
                time,
            });
            Ok(())
        })?;
        debug!(user = %self.user, date, "added comment");
        Ok(CommentOutcome::Added)
    }

    pub fn comment(&self, date: &str, index: usize) -> Result<&Comment, TrackerError> {
        let comments = self
            .days
            .get(date)
            .map(|record| record.comments.as_slice())
            .unwrap_or_default();
        comments.get(index).ok_or(TrackerError::IndexOutOfRange {
            index,
            len: comments.len(),
        })
    }

    pub fn edit_comment<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        date: &str,
        index: usize,
        new_text: &str,
    ) -> Result<(), TrackerError> {
        self.comment(date, index)?;
        self.commit(store, |days| {
            let comment = days
                .get_mut(date)
                .and_then(|record| record.comments.get_mut(index))
                .ok_or(TrackerError::IndexOutOfRange { index, len: 0 })?;
            comment.text = new_text.to_string();
            Ok(())
        })?;
        debug!(user = %self.user, date, index, "edited comment");
        Ok(())
    }

    pub fn delete_comment<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        date: &str,
        index: usize,
    ) -> Result<Comment, TrackerError> {
        self.comment(date, index)?;
        let removed = self.commit(store, |days| {
            let record = days
                .get_mut(date)
                .ok_or(TrackerError::IndexOutOfRange { index, len: 0 })?;
            Ok(record.comments.remove(index))
        })?;
        debug!(user = %self.user, date, index, "deleted comment");
        Ok(removed)
    }

    fn commit<S, T, F>(&mut self, store: &mut S, mutate: F) -> Result<T, TrackerError>
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&mut TaskLog) -> Result<T, TrackerError>,
    {
        let mut next = self.days.clone();
        let value = mutate(&mut next)?;
        save_record(store, &tasks_key(&self.user), &next)?;
        self.days = next;
        Ok(value)
    }
}

fn apply_delta(count: u64, delta: i64) -> u64 {
    if delta >= 0 {
        count.saturating_add(delta.unsigned_abs())
    } else {
        count.saturating_sub(delta.unsigned_abs())
    }
}

/// Local clock time as shown next to each comment, e.g. `09:05 PM`.
pub fn clock_time() -> String {
    Local::now().format("%I:%M %p").to_string()
}
