use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
	#[serde(default)]
	pub items: Vec<CatalogItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogItem {
	pub id: i64,
	pub owner_id: i64,
	#[serde(default)]
	pub shared_with: Vec<i64>,
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub container: String,
	pub image: Option<PathBuf>,
}
impl CatalogItem {
	pub fn visible_to(&self, user_id: i64) -> bool {
		self.owner_id == user_id || self.shared_with.contains(&user_id)
	}
}
