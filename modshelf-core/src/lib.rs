//! Domain types shared by the catalog client, the search page, and the
//! frontends: catalog entries, category trees, sections, and queries.

pub mod addon;
pub mod category;
pub mod query;
pub mod section;
pub mod util;

pub use addon::{AddonFile, Attachment, Author, CatalogEntry, CategoryTag, FileDependency, ReleaseType};
pub use category::{
    Category, IndentedCategory, find_category, flatten_categories, reorganize_categories,
};
pub use query::{SearchQuery, SortMode, SortModeParseError};
pub use section::{Section, SectionParseError};

/// Catalog game id for Minecraft.
pub const MINECRAFT_GAME_ID: i32 = 432;
