pub mod config;
pub mod error;
pub mod reconciler;
pub mod runtime;
pub mod source;
pub mod view;

pub use config::ListingConfig;
pub use error::{Error, Result};
pub use reconciler::{NavigationIntent, NavigationRequest, Observation, Phase, Reconciler};
pub use runtime::{ListingCommand, ListingEvent, ListingRuntime, RuntimeConfig};
pub use source::{CountsSource, PageSource};
pub use view::ListingView;
