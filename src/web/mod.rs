pub mod auth;
pub mod responses;
pub mod router;
pub mod state;

pub use responses::{ActionResult, ApiError, ApiMessage, ArticleList, json_error};
pub use state::AppState;
