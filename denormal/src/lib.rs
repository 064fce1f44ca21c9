//! denormal - find the strings that normalize to a given string
//!
//! Given a normalization form and a base string, this crate enumerates,
//! counts or randomly samples the source strings whose normalization is the
//! base string. This is useful for generating confusable input when testing
//! how a system treats visually or semantically equivalent text.
//!
//! The pieces, leaf first:
//! - [`index::ReverseIndex`]: which characters normalize to a given value
//! - [`cache::IndexCache`]: builds each form's index once and shares it
//! - [`choices::resolve`]: the depth-limited choices for one character
//! - [`search`]: lazy exhaustive and random iteration over all positions
//! - [`count::count_combinations`]: exact totals as big integers
//!
//! ```no_run
//! use denormal::{DenormalizationQuery, Denormalizer, Form};
//!
//! let denormalizer = Denormalizer::new();
//! let total = denormalizer.count_denormalizations(Form::Nfkc, "<->", None);
//! println!("{total} strings normalize to <->");
//!
//! let query = DenormalizationQuery::new(Form::Nfkc, "admin").random(true).count(3).seed(7);
//! for spoof in denormalizer.denormalize(&query) {
//!     println!("{spoof}");
//! }
//! ```

pub mod cache;
pub mod choices;
pub mod count;
pub mod denormalizer;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub use cache::IndexCache;
pub use choices::{ChoiceSet, DepthPolicy};
pub use count::count_combinations;
pub use denormalizer::{CharacterDetails, Denormalizer, FormDetails};
pub use error::{DenormalError, Result};
pub use index::ReverseIndex;
pub use normforms::Form;
pub use query::DenormalizationQuery;
pub use search::{Combinations, Denormalizations, Plan, Samples, DEFAULT_RANDOM_COUNT};
