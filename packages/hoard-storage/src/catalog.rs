use std::{
	collections::HashSet,
	fs,
	path::{Path, PathBuf},
};

use hoard_domain::{ItemImage, StoredItem};

use crate::{
	Error, Result,
	models::{CatalogFile, CatalogItem},
};

/// Items loaded from a TOML catalog file. Image files are read on every lookup.
#[derive(Debug)]
pub struct Catalog {
	items: Vec<CatalogItem>,
	base_dir: PathBuf,
}
impl Catalog {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.map_err(|err| Error::ReadCatalog { path: path.to_path_buf(), source: err })?;
		let file: CatalogFile = toml::from_str(&raw)
			.map_err(|err| Error::ParseCatalog { path: path.to_path_buf(), source: err })?;
		let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

		Self::from_file(file, base_dir)
	}

	pub fn from_file(file: CatalogFile, base_dir: PathBuf) -> Result<Self> {
		let mut seen = HashSet::with_capacity(file.items.len());

		for item in &file.items {
			if !seen.insert(item.id) {
				return Err(Error::DuplicateItem { id: item.id });
			}
		}

		tracing::debug!(items = file.items.len(), base_dir = %base_dir.display(), "Catalog loaded.");

		Ok(Self { items: file.items, base_dir })
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Items owned by or shared with `user_id`, in catalog order.
	pub fn items_for_user(&self, user_id: i64) -> Vec<StoredItem> {
		self.items
			.iter()
			.filter(|item| item.visible_to(user_id))
			.map(|item| StoredItem {
				id: item.id,
				name: item.name.clone(),
				description: item.description.clone(),
				container_name: item.container.clone(),
				image: item.image.as_deref().and_then(|path| self.load_image(item.id, path)),
			})
			.collect()
	}

	fn load_image(&self, item_id: i64, path: &Path) -> Option<ItemImage> {
		let resolved = if path.is_absolute() { path.to_path_buf() } else { self.base_dir.join(path) };

		match fs::read(&resolved) {
			Ok(bytes) => Some(ItemImage { mime_type: mime_type_for(&resolved).to_string(), bytes }),
			Err(err) => {
				tracing::warn!(
					item_id,
					path = %resolved.display(),
					error = %err,
					"Item image is unreadable. Continuing without it."
				);

				None
			},
		}
	}
}

pub fn mime_type_for(path: &Path) -> &'static str {
	let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("").to_ascii_lowercase();

	match ext.as_str() {
		"jpg" | "jpeg" => "image/jpeg",
		"png" => "image/png",
		"gif" => "image/gif",
		"webp" => "image/webp",
		_ => "application/octet-stream",
	}
}
