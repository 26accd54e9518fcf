//! Asset addressing and the asset provider seam.
//!
//! Paths are pure functions of mode and move so they can be checked without
//! touching the filesystem. Loading itself is asynchronous: the driver hands
//! a [`LoadTicket`] to the provider and receives it back with the result.
pub mod bounds;
pub mod gltf;

use crate::character::{Mode, Move};
use crate::settings::AssetSettings;

/// Which scene slot a load is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    Character,
    World,
}

/// Tag attached to every load request.
///
/// `seq` increases monotonically across all requests of a driver; only the
/// newest ticket of a slot is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub slot: AssetSlot,
    pub seq: u64,
}

/// Starts asynchronous loads. Completion is reported through
/// [`Driver::complete_load`](crate::character::Driver::complete_load).
pub trait AssetProvider {
    fn load(&mut self, ticket: LoadTicket, path: &str);
}

/// Where character and world assets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    pub character_root: String,
    pub extension: String,
    pub world_base: String,
    pub world_alternate: String,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::from_settings(&AssetSettings::default())
    }
}

impl AssetCatalog {
    #[must_use]
    pub fn from_settings(settings: &AssetSettings) -> Self {
        Self {
            character_root: settings.character_root.clone(),
            extension: settings.extension.clone(),
            world_base: settings.world.base.clone(),
            world_alternate: settings.world.alternate.clone(),
        }
    }

    #[must_use]
    pub fn character_path(&self, mode: Mode, mv: Move) -> String {
        character_path(&self.character_root, &self.extension, mode, mv)
    }

    #[must_use]
    pub fn world_path(&self, mode: Mode) -> &str {
        match mode {
            Mode::Base => &self.world_base,
            Mode::Alternate => &self.world_alternate,
        }
    }
}

/// `{root}/{mode}/{move}.{ext}`; a trailing slash on `root` is tolerated.
#[must_use]
pub fn character_path(root: &str, extension: &str, mode: Mode, mv: Move) -> String {
    let ext = extension.trim_start_matches('.');
    format!(
        "{}/{}/{}.{ext}",
        root.trim_end_matches('/'),
        mode.dir_name(),
        mv.file_stem()
    )
}
