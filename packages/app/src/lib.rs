// ABOUTME: Application layer: cached domain collections, bootstrap fan-out and view selection
// ABOUTME: Collections are replaced wholesale from the server; never patched incrementally

pub mod banner;
pub mod collection;
pub mod error;
pub mod selectors;
pub mod view;
pub mod workspace;

pub use banner::Banners;
pub use collection::Collection;
pub use error::{AppError, AppResult};
pub use selectors::{grouped_tasks, my_tasks, target_summary, task_totals, user_map};
pub use view::ActiveMenu;
pub use workspace::Workspace;
