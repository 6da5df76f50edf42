//! Note search expressions
//!
//! Builds the `words` string of a note filter in the service's search
//! grammar. Terms are appended in call order and separated by single spaces.
//!
//! ```rust
//! use enml_content::search::NoteSearch;
//!
//! let search = NoteSearch::new()
//!     .in_title(["weekly report"])
//!     .excludes(["draft"])
//!     .weeks(2)
//!     .desc();
//!
//! assert_eq!(search.words(), Some(r#"intitle:"weekly report" -draft updated:week-2"#));
//! assert_eq!(search.ascending(), Some(false));
//! ```
//!
//! Running the search is left to the service client; this module only holds
//! the expression, ordering and paging bounds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Default page size of a note search
pub const DEFAULT_LIMIT: usize = 50;

/// A point in time as understood by the search grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTime {
    /// Calendar date, written `YYYYMMDD`
    Date(NaiveDate),
    /// Date and time, written `YYYYMMDDTHHMMSS`
    DateTime(NaiveDateTime),
    /// Relative expression such as `day-1` or `week`, written as is
    Relative(String),
}

impl SearchTime {
    fn to_term(&self) -> String {
        match self {
            SearchTime::Date(date) => date.format("%Y%m%d").to_string(),
            SearchTime::DateTime(datetime) => datetime.format("%Y%m%dT%H%M%S").to_string(),
            SearchTime::Relative(expression) => expression.clone(),
        }
    }
}

impl From<NaiveDate> for SearchTime {
    fn from(date: NaiveDate) -> Self {
        SearchTime::Date(date)
    }
}

impl From<NaiveDateTime> for SearchTime {
    fn from(datetime: NaiveDateTime) -> Self {
        SearchTime::DateTime(datetime)
    }
}

impl From<&str> for SearchTime {
    fn from(expression: &str) -> Self {
        SearchTime::Relative(expression.to_string())
    }
}

/// Paging bounds of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Builder for a note search expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSearch {
    words: String,
    ascending: Option<bool>,
    bounds: Bounds,
}

impl NoteSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The search expression, `None` while no term has been added
    pub fn words(&self) -> Option<&str> {
        if self.words.is_empty() {
            None
        } else {
            Some(&self.words)
        }
    }

    /// Requested sort direction, `None` for the service default
    pub fn ascending(&self) -> Option<bool> {
        self.ascending
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn asc(mut self) -> Self {
        self.ascending = Some(true);
        self
    }

    pub fn desc(mut self) -> Self {
        self.ascending = Some(false);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.bounds.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.bounds.limit = limit;
        self
    }

    /// Match notes containing any of the words
    pub fn any<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("any:", words)
    }

    /// Exclude notes containing any of the words
    pub fn not_any<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("-any:", words)
    }

    /// Match notes containing all of the words
    pub fn contains<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("", words)
    }

    /// Match notes containing none of the words
    pub fn excludes<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("-", words)
    }

    pub fn in_title<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("intitle:", words)
    }

    pub fn not_in_title<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms("-intitle:", words)
    }

    pub fn created_after(self, time: impl Into<SearchTime>) -> Self {
        self.time_term("created:", time.into())
    }

    pub fn created_before(self, time: impl Into<SearchTime>) -> Self {
        self.time_term("-created:", time.into())
    }

    pub fn updated_after(self, time: impl Into<SearchTime>) -> Self {
        self.time_term("updated:", time.into())
    }

    pub fn updated_before(self, time: impl Into<SearchTime>) -> Self {
        self.time_term("-updated:", time.into())
    }

    /// Notes updated today
    pub fn today(self) -> Self {
        self.days(0)
    }

    /// Notes updated since `count` days ago
    pub fn days(self, count: u32) -> Self {
        self.relative("day", count)
    }

    pub fn weeks(self, count: u32) -> Self {
        self.relative("week", count)
    }

    pub fn months(self, count: u32) -> Self {
        self.relative("month", count)
    }

    pub fn years(self, count: u32) -> Self {
        self.relative("year", count)
    }

    /// Append an expression verbatim
    pub fn raw(self, expression: &str) -> Self {
        self.append(expression.trim())
    }

    fn relative(self, unit: &str, count: u32) -> Self {
        let expression = if count == 0 {
            unit.to_string()
        } else {
            format!("{unit}-{count}")
        };
        self.time_term("updated:", SearchTime::Relative(expression))
    }

    fn time_term(self, prefix: &str, time: SearchTime) -> Self {
        self.terms(prefix, [time.to_term()])
    }

    fn terms<I, S>(self, prefix: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = words
            .into_iter()
            .filter_map(|word| format_word(word.as_ref()))
            .map(|word| format!("{prefix}{word}"))
            .collect::<Vec<_>>()
            .join(" ");
        self.append(&terms)
    }

    fn append(mut self, terms: &str) -> Self {
        if terms.is_empty() {
            return self;
        }
        if !self.words.is_empty() {
            self.words.push(' ');
        }
        self.words.push_str(terms);
        self
    }
}

/// Trim a word and quote it when it holds a phrase
fn format_word(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        None
    } else if word.contains(' ') {
        Some(format!("\"{word}\""))
    } else {
        Some(word.to_string())
    }
}

/// How a notebook or tag name is compared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Is(String),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
}

impl NameMatch {
    /// Compare case-insensitively
    ///
    /// ```rust
    /// use enml_content::search::NameMatch;
    ///
    /// assert!(NameMatch::StartsWith("Work".to_string()).matches("work notes"));
    /// assert!(!NameMatch::Is("Work".to_string()).matches("work notes"));
    /// ```
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            NameMatch::Is(pattern) => name == pattern.to_lowercase(),
            NameMatch::StartsWith(pattern) => name.starts_with(&pattern.to_lowercase()),
            NameMatch::EndsWith(pattern) => name.ends_with(&pattern.to_lowercase()),
            NameMatch::Contains(pattern) => name.contains(&pattern.to_lowercase()),
        }
    }
}

/// Convert a service timestamp (milliseconds since the epoch) to UTC
///
/// Zero means "not set" and yields `None`, as does a value outside chrono's
/// range.
pub fn convert_timestamp(millis: i64) -> Option<DateTime<Utc>> {
    if millis == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
}
