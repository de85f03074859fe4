pub mod api;
pub mod config;
pub mod controller;
pub mod dates;
pub mod error;
pub mod filter;
pub mod http;
pub mod model;

pub use api::IdeaApi;
pub use config::IdeasConfig;
pub use controller::IdeaList;
pub use dates::{format_relative_date, format_relative_date_at};
pub use error::{IdeasError, Result};
pub use filter::{filter_ideas, matches_query};
pub use http::{HttpIdeaApi, DEFAULT_ENDPOINT};
pub use model::{Health, Idea, IdeaDraft, IdeaId, Priority, PriorityBreakdown, Stats};
