//! Search page orchestration for the mod catalog.
//!
//! The [`SearchPage`] owns page state and runs searches on a tokio runtime;
//! completions are applied back on the thread that owns the page. Frontends
//! subscribe to [`PageEvent`]s and render from [`PageState`].

pub mod class_file;
pub mod detail;
pub mod error;
pub mod game_version;
pub mod observer;
pub mod page;
pub mod repository;
pub mod settings;

pub use detail::{EntryDetail, compare_game_versions, load_detail};
pub use error::{SearchError, VersionError};
pub use game_version::{JarVersionResolver, VersionResolver, inspect_jar, minecraft_version};
pub use observer::{Observers, PageEvent, SubscriptionId};
pub use page::{
    DownloadCallback, Navigator, PageMessage, PageState, SearchOutcome, SearchPage,
    resolve_game_version,
};
pub use repository::{GameRepository, Profile, ProfileVersion};
