use super::scoring::{calculate_score, classify, initialize_sites};
use super::types::{SensationResponse, SensationSession, SensationSite};
use anyhow::{bail, Result};
use chrono::Utc;

/// A sensation test in progress.
///
/// Owned value threaded through the response flow: `record` consumes the
/// test and returns a new one with the next site answered, so there is no
/// shared array being mutated behind the UI's back. All six sites must be
/// answered before `finalize` will produce a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SensationTest {
    sites: Vec<SensationSite>,
}

impl Default for SensationTest {
    fn default() -> Self {
        Self::new()
    }
}

impl SensationTest {
    /// Start a fresh test with all six sites unanswered.
    pub fn new() -> Self {
        Self {
            sites: initialize_sites(),
        }
    }

    pub fn sites(&self) -> &[SensationSite] {
        &self.sites
    }

    /// The next site to test, or `None` once every site is answered.
    pub fn current_site(&self) -> Option<&SensationSite> {
        self.sites.iter().find(|site| site.response.is_none())
    }

    pub fn answered_count(&self) -> usize {
        self.sites
            .iter()
            .filter(|site| site.response.is_some())
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.sites.iter().all(|site| site.response.is_some())
    }

    /// Record a response for the next unanswered site, returning the
    /// advanced test. A no-op once the test is complete.
    pub fn record(mut self, response: SensationResponse) -> Self {
        if let Some(site) = self.sites.iter_mut().find(|site| site.response.is_none()) {
            site.response = Some(response);
        }
        self
    }

    /// Turn a completed test into an immutable session record, stamping the
    /// id and completion time.
    pub fn finalize(self) -> Result<SensationSession> {
        if !self.is_complete() {
            bail!(
                "sensation test incomplete: {} of {} sites answered",
                self.answered_count(),
                self.sites.len()
            );
        }

        let now = Utc::now().timestamp_millis();
        let total_score = calculate_score(&self.sites);
        let classification = classify(total_score);

        Ok(SensationSession {
            id: now.to_string(),
            date: now,
            results: self.sites,
            total_score,
            classification,
        })
    }
}
