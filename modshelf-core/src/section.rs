/// Catalog sections: the coarse listing a search or category query runs in.
///
/// Each section has a fixed numeric id on the catalog side. Category trees
/// hang off the section id (a top-level category's parent is the section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Mod,
    ResourcePack,
    World,
    Modpack,
    Customization,
}

const ALL_SECTIONS: &[Section] = &[
    Section::Mod,
    Section::Modpack,
    Section::ResourcePack,
    Section::World,
    Section::Customization,
];

impl Section {
    /// Numeric section id used by the catalog API.
    pub fn id(&self) -> i32 {
        match self {
            Self::Mod => 6,
            Self::ResourcePack => 12,
            Self::World => 17,
            Self::Modpack => 4471,
            Self::Customization => 4546,
        }
    }

    /// Look up a section by its catalog id.
    pub fn from_id(id: i32) -> Option<Self> {
        ALL_SECTIONS.iter().copied().find(|s| s.id() == id)
    }

    /// Canonical short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Mod => "mod",
            Self::ResourcePack => "resourcepack",
            Self::World => "world",
            Self::Modpack => "modpack",
            Self::Customization => "customization",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mod => "Mods",
            Self::ResourcePack => "Resource Packs",
            Self::World => "Worlds",
            Self::Modpack => "Modpacks",
            Self::Customization => "Customization",
        }
    }

    /// Alternative names accepted when parsing (lowercase).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Mod => &["mod", "mods"],
            Self::ResourcePack => &["resourcepack", "resourcepacks", "resource-pack", "texturepack"],
            Self::World => &["world", "worlds", "map", "maps"],
            Self::Modpack => &["modpack", "modpacks", "pack"],
            Self::Customization => &["customization", "customizations"],
        }
    }

    pub fn all() -> &'static [Section] {
        ALL_SECTIONS
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `Section`.
#[derive(Debug, Clone)]
pub struct SectionParseError(pub String);

impl std::fmt::Display for SectionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown section: '{}'", self.0)
    }
}

impl std::error::Error for SectionParseError {}

impl std::str::FromStr for Section {
    type Err = SectionParseError;

    /// Parse a section from its name, an alias, or its numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if let Ok(id) = lower.parse::<i32>() {
            return Self::from_id(id).ok_or_else(|| SectionParseError(s.to_string()));
        }
        ALL_SECTIONS
            .iter()
            .copied()
            .find(|section| section.aliases().contains(&lower.as_str()))
            .ok_or_else(|| SectionParseError(s.to_string()))
    }
}
