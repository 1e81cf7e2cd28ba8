//! Query builder for the read-events endpoint

use chrono::{DateTime, Utc};
use meridian_domain::{format_instant, Date, DEFAULT_TZID};

/// Query parameters of `GET /v1/events`.
///
/// Times in the response are rendered under `tzid`, which defaults to
/// `Etc/UTC`. `last_modified` takes the `changes_since` cursor from a push
/// notification to fetch only what changed.
#[derive(Debug, Clone, Default)]
pub struct ReadEventsQuery {
    from: Option<Date>,
    to: Option<Date>,
    tzid: Option<String>,
    last_modified: Option<DateTime<Utc>>,
    include_deleted: Option<bool>,
    include_moved: Option<bool>,
    include_managed: Option<bool>,
    only_managed: Option<bool>,
    calendar_ids: Vec<String>,
}

impl ReadEventsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from(mut self, from: Date) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn to(mut self, to: Date) -> Self {
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn tzid(mut self, tzid: impl Into<String>) -> Self {
        self.tzid = Some(tzid.into());
        self
    }

    #[must_use]
    pub fn last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    #[must_use]
    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = Some(include);
        self
    }

    #[must_use]
    pub fn include_moved(mut self, include: bool) -> Self {
        self.include_moved = Some(include);
        self
    }

    #[must_use]
    pub fn include_managed(mut self, include: bool) -> Self {
        self.include_managed = Some(include);
        self
    }

    #[must_use]
    pub fn only_managed(mut self, only: bool) -> Self {
        self.only_managed = Some(only);
        self
    }

    /// Restrict to a specific calendar. Repeatable.
    #[must_use]
    pub fn calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_ids.push(calendar_id.into());
        self
    }

    /// Render as query pairs. `tzid` is always present (defaulted), every
    /// other pair only when set.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        pairs.push(("tzid".into(), self.tzid.clone().unwrap_or_else(|| DEFAULT_TZID.into())));

        if let Some(from) = &self.from {
            pairs.push(("from".into(), from.to_string()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to".into(), to.to_string()));
        }
        if let Some(last_modified) = &self.last_modified {
            pairs.push(("last_modified".into(), format_instant(last_modified)));
        }

        push_flag(&mut pairs, "include_deleted", self.include_deleted);
        push_flag(&mut pairs, "include_moved", self.include_moved);
        push_flag(&mut pairs, "include_managed", self.include_managed);
        push_flag(&mut pairs, "only_managed", self.only_managed);

        for calendar_id in &self.calendar_ids {
            pairs.push(("calendar_ids[]".into(), calendar_id.clone()));
        }

        pairs
    }
}

pub(crate) fn push_flag(pairs: &mut Vec<(String, String)>, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        pairs.push((name.into(), value.to_string()));
    }
}
