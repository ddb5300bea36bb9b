use crate::error::WeatherError;
use crate::model::WeatherReport;

/// Sequence number issued per query attempt and checked at apply time.
///
/// Only the most recently issued token may settle the state; an outcome
/// carrying an older token is dropped, so a slow response can never
/// overwrite the result of a newer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken(u64);

/// The in-memory representation of the latest query, its result, and its
/// error. All mutation goes through the transition methods below, which
/// maintain two invariants:
///
/// - `result` and `error_message` are mutually exclusive outcomes of the
///   most recent attempt; a new attempt clears both before resolving.
/// - `is_loading` is true exactly while the current attempt is outstanding.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub query_text: String,
    result: Option<WeatherReport>,
    error_message: Option<String>,
    is_loading: bool,
    issued: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&WeatherReport> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Start a new query attempt: clear the previous outcome, raise the
    /// loading flag, and issue the token the outcome must present later.
    pub fn begin_query(&mut self) -> QueryToken {
        self.issued += 1;
        self.result = None;
        self.error_message = None;
        self.is_loading = true;
        QueryToken(self.issued)
    }

    /// Start a refresh round trip: raise the loading flag and issue a
    /// token, but keep the displayed outcome. A refresh only becomes a
    /// query attempt once a city is resolved and the fetch begins; until
    /// then a silent abort must leave the outcome as it was.
    pub fn begin_refresh(&mut self) -> QueryToken {
        self.issued += 1;
        self.is_loading = true;
        QueryToken(self.issued)
    }

    /// Settle the attempt identified by `token` with a result.
    ///
    /// Also clears the stored query text so the next lookup starts from a
    /// blank input. Returns false (and changes nothing) when a newer
    /// attempt has been issued since.
    pub fn apply_success(&mut self, token: QueryToken, report: WeatherReport) -> bool {
        if self.is_stale(token) {
            return false;
        }

        self.result = Some(report);
        self.error_message = None;
        self.is_loading = false;
        self.query_text.clear();
        true
    }

    /// Settle the attempt identified by `token` with a classified failure.
    pub fn apply_failure(&mut self, token: QueryToken, error: &WeatherError) -> bool {
        if self.is_stale(token) {
            return false;
        }

        self.result = None;
        self.error_message = Some(error.user_message().to_string());
        self.is_loading = false;
        true
    }

    /// Lower the loading flag for an attempt that ended without an outcome
    /// (the silent location/geocoding abort paths). Stale tokens are
    /// ignored here too.
    pub fn settle_without_outcome(&mut self, token: QueryToken) {
        if !self.is_stale(token) {
            self.is_loading = false;
        }
    }

    fn is_stale(&self, token: QueryToken) -> bool {
        token.0 != self.issued
    }
}
