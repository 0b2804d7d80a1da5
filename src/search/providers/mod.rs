pub mod serper;
pub mod tavily;

pub use serper::SerperSearchProvider;
pub use tavily::TavilySearchProvider;
