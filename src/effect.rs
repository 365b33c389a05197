//! Effects - side effects declared by the reducer

use crate::config::CatalogSource;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Read the static catalog
    LoadCatalog { source: CatalogSource },
    /// Fetch the detail record at `url`, tagged with its request sequence
    FetchDetail { id: u32, seq: u64, url: String },
}
