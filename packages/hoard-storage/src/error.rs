#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read catalog at {path:?}.")]
	ReadCatalog { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse catalog at {path:?}: {source}")]
	ParseCatalog { path: std::path::PathBuf, source: toml::de::Error },
	#[error("Catalog lists item {id} more than once.")]
	DuplicateItem { id: i64 },
}
