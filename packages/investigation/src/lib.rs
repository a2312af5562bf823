//! Grounded public-record investigation pipeline
//!
//! Takes a free-text subject name, asks a search-grounded generation
//! provider for a public-record narrative, and normalizes the reply into
//! a stable result shape with citation sources. Consumers drive the
//! pipeline through [`Investigator::investigate`] and observe the
//! [`PipelineState`] it publishes.
//!
//! # Example
//!
//! ```rust,ignore
//! use investigation::{Investigator, PipelineState};
//!
//! let investigator = Investigator::from_env()?;
//! investigator.investigate("Jane Doe").await;
//!
//! match investigator.state() {
//!     PipelineState::Succeeded(result) => {
//!         println!("{}", result.summary);
//!         for source in &result.sources {
//!             println!("  {} ({})", source.title, source.uri);
//!         }
//!     }
//!     PipelineState::Failed(err) => eprintln!("{}", err.message),
//!     _ => {}
//! }
//! ```

pub mod normalize;
pub mod pipeline;
pub mod prompt;

pub use normalize::{normalize, SearchResult, Source, NO_INFORMATION};
pub use pipeline::{ErrorInfo, Investigator, PipelineState, GENERIC_ERROR, MAX_SUBJECT_LEN};
pub use prompt::build_request;
