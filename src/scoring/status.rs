use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    #[default]
    Partial,
    Final,
}

impl SummaryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryStatus::Partial => "partial",
            SummaryStatus::Final => "final",
        }
    }
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partial" => Ok(SummaryStatus::Partial),
            "final" => Ok(SummaryStatus::Final),
            other => Err(format!("unknown summary status {other:?}")),
        }
    }
}

/// A day is `final` once it has at least `min_entries` logged meals.
#[derive(Debug, Clone, Copy)]
pub struct StatusPolicy {
    min_entries: usize,
}

impl StatusPolicy {
    pub fn new(min_entries: usize) -> Self {
        Self { min_entries }
    }

    pub fn status(&self, entry_count: usize) -> SummaryStatus {
        if entry_count >= self.min_entries {
            SummaryStatus::Final
        } else {
            SummaryStatus::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_three_entries() {
        let policy = StatusPolicy::new(3);
        assert_eq!(policy.status(0), SummaryStatus::Partial);
        assert_eq!(policy.status(2), SummaryStatus::Partial);
        assert_eq!(policy.status(3), SummaryStatus::Final);
        assert_eq!(policy.status(10), SummaryStatus::Final);
    }

    #[test]
    fn status_text_round_trips_through_the_column_format() {
        for s in [SummaryStatus::Partial, SummaryStatus::Final] {
            assert_eq!(s.as_str().parse::<SummaryStatus>(), Ok(s));
        }
        assert!("done".parse::<SummaryStatus>().is_err());
    }
}
