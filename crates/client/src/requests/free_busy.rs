//! Query builder for the free-busy endpoint

use meridian_domain::{Date, DEFAULT_TZID};

use super::read_events::push_flag;

/// Query parameters of `GET /v1/free_busy`.
#[derive(Debug, Clone, Default)]
pub struct FreeBusyQuery {
    from: Option<Date>,
    to: Option<Date>,
    tzid: Option<String>,
    include_managed: Option<bool>,
    calendar_ids: Vec<String>,
}

impl FreeBusyQuery {
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
    pub fn include_managed(mut self, include: bool) -> Self {
        self.include_managed = Some(include);
        self
    }

    /// Restrict to a specific calendar. Repeatable.
    #[must_use]
    pub fn calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_ids.push(calendar_id.into());
        self
    }

    /// Render as query pairs, `tzid` always present.
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

        push_flag(&mut pairs, "include_managed", self.include_managed);

        for calendar_id in &self.calendar_ids {
            pairs.push(("calendar_ids[]".into(), calendar_id.clone()));
        }

        pairs
    }
}
