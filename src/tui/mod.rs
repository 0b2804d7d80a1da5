pub mod app;
pub mod document;
pub mod input;
pub mod markdown;
pub mod notice;
pub mod references;
pub mod versions;

pub use app::{App, Focus};
pub use document::DocumentView;
pub use input::InputWidget;
pub use notice::{NoticeEntry, NoticeKind, NoticeLog};
pub use versions::VersionPicker;
