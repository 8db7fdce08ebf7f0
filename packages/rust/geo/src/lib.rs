//! Static geographic and icon lookups used to enrich catalog entries.
//!
//! - [`CountryTable`] — country name (or alias) → approximate coordinates
//! - [`FaviconResolver`] — website → icon-service URL
//!
//! Neither does any network I/O.

pub mod countries;
pub mod favicon;

pub use countries::{BUILTIN_COUNTRIES, CountryTable};
pub use favicon::FaviconResolver;
