use serde::Serialize;

/// Address of a stored image: the gist id and the file name inside it.
///
/// Both parts are trimmed and non-empty; construct through
/// [`crate::validation::validate_retrieval`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievalLocator {
    pub storage_id: String,
    pub resource_name: String,
}

impl RetrievalLocator {
    /// Path under which this gateway serves the image.
    pub fn path(&self) -> String {
        format!(
            "/{}/{}/{}",
            crate::constants::GIST_ROUTE_SEGMENT,
            self.storage_id,
            self.resource_name
        )
    }
}
