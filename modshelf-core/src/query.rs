/// Result ordering offered by the catalog search endpoint.
///
/// The discriminant is the value sent as the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    DateCreated,
    Popularity,
    LastUpdated,
    Name,
    Author,
    TotalDownloads,
}

const ALL_SORT_MODES: &[SortMode] = &[
    SortMode::DateCreated,
    SortMode::Popularity,
    SortMode::LastUpdated,
    SortMode::Name,
    SortMode::Author,
    SortMode::TotalDownloads,
];

impl SortMode {
    /// Index in 0..=5, as sent to the catalog.
    pub fn index(&self) -> i32 {
        match self {
            Self::DateCreated => 0,
            Self::Popularity => 1,
            Self::LastUpdated => 2,
            Self::Name => 3,
            Self::Author => 4,
            Self::TotalDownloads => 5,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| ALL_SORT_MODES.get(i))
            .copied()
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::DateCreated => "created",
            Self::Popularity => "popularity",
            Self::LastUpdated => "updated",
            Self::Name => "name",
            Self::Author => "author",
            Self::TotalDownloads => "downloads",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DateCreated => "Date Created",
            Self::Popularity => "Popularity",
            Self::LastUpdated => "Last Updated",
            Self::Name => "Name",
            Self::Author => "Author",
            Self::TotalDownloads => "Total Downloads",
        }
    }

    /// All six modes in index order.
    pub fn all() -> &'static [SortMode] {
        ALL_SORT_MODES
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `SortMode`.
#[derive(Debug, Clone)]
pub struct SortModeParseError(pub String);

impl std::fmt::Display for SortModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort mode: '{}' (expected 0-5 or a name)", self.0)
    }
}

impl std::error::Error for SortModeParseError {}

impl std::str::FromStr for SortMode {
    type Err = SortModeParseError;

    /// Parse a sort mode from its short name or its index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Ok(index) = lower.parse::<i32>() {
            return Self::from_index(index).ok_or_else(|| SortModeParseError(s.to_string()));
        }
        ALL_SORT_MODES
            .iter()
            .copied()
            .find(|m| m.short_name() == lower)
            .ok_or_else(|| SortModeParseError(s.to_string()))
    }
}

/// Parameters for a single search invocation.
///
/// `game_version` is only a hint: when the page has an installed version
/// selected, the version embedded in that version's jar wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub game_version: String,
    /// Category filter; 0 means no filter.
    pub category_id: i32,
    /// Index of the first result to return.
    pub page_offset: i32,
    pub name_filter: String,
    pub sort: SortMode,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = version.into();
        self
    }

    pub fn with_category(mut self, category_id: i32) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_page_offset(mut self, offset: i32) -> Self {
        self.page_offset = offset;
        self
    }

    pub fn with_name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = filter.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}
