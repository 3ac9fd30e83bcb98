use std::fmt;

/// Requested forecast day, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Day {
    #[default]
    Today,
    Tomorrow,
    Yesterday,
}

impl Day {
    /// Index into the upstream per-day summary list.
    /// `None` for days the forecast source never covers.
    pub fn forecast_index(&self) -> Option<usize> {
        match self {
            Day::Today => Some(0),
            Day::Tomorrow => Some(1),
            Day::Yesterday => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Today => "今日",
            Day::Tomorrow => "明日",
            Day::Yesterday => "昨日",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Structured weather query extracted from a message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub region: Option<String>,
    pub day: Day,
}

impl Query {
    pub fn new(region: Option<String>, day: Day) -> Self {
        Self { region, day }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}
