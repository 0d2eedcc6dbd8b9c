#![deny(unsafe_code)]
//! Named projects of saved palettes, persisted as a single JSON file.
//!
//! The store is loaded whole, edited in memory, and written back with
//! [`ProjectStore::save`]. Nothing touches the disk until then.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tonekit_core::{SavedPalette, StudioError};

/// A named collection of saved palettes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub palettes: Vec<SavedPalette>,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            palettes: Vec::new(),
        }
    }

    pub fn palette(&self, name: &str) -> Option<&SavedPalette> {
        self.palettes.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Projects backed by a JSON file.
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    projects: Vec<Project>,
}

fn checked_name(name: &str) -> Result<&str, StudioError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StudioError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}

impl ProjectStore {
    /// Loads the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StudioError> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<StoreFile>(&text).map_err(|e| {
                StudioError::Io(format!("cannot parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no store at {}, starting empty", path.display());
                StoreFile::default()
            }
            Err(e) => {
                return Err(StudioError::Io(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        log::debug!(
            "opened {} with {} project(s)",
            path.display(),
            file.projects.len()
        );
        Ok(Self {
            path,
            projects: file.projects,
        })
    }

    /// Writes the store back to its file as pretty-printed JSON.
    pub fn save(&self) -> Result<(), StudioError> {
        let file = StoreFile {
            projects: self.projects.clone(),
        };
        let mut json = serde_json::to_string_pretty(&file)
            .map_err(|e| StudioError::Io(format!("cannot serialize store: {e}")))?;
        json.push('\n');
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StudioError::Io(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, json)
            .map_err(|e| StudioError::Io(format!("cannot write {}: {e}", self.path.display())))?;
        log::info!("saved {} project(s) to {}", self.projects.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All projects in creation order.
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks a project up by name; surrounding whitespace is ignored, as on
    /// creation.
    pub fn project(&self, name: &str) -> Option<&Project> {
        let name = name.trim();
        self.projects.iter().find(|p| p.name == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, StudioError> {
        let name = name.trim();
        self.projects
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| StudioError::UnknownProject(name.to_string()))
    }

    fn project_mut(&mut self, name: &str) -> Result<&mut Project, StudioError> {
        let index = self.index_of(name)?;
        Ok(&mut self.projects[index])
    }

    /// Adds an empty project. Names are trimmed and must be unique.
    pub fn create_project(&mut self, name: &str) -> Result<&Project, StudioError> {
        let name = checked_name(name)?;
        if self.project(name).is_some() {
            return Err(StudioError::DuplicateProject(name.to_string()));
        }
        log::info!("creating project {name:?}");
        self.projects.push(Project::new(name));
        let index = self.projects.len() - 1;
        Ok(&self.projects[index])
    }

    pub fn rename_project(&mut self, from: &str, to: &str) -> Result<(), StudioError> {
        let to = checked_name(to)?;
        if to != from.trim() && self.project(to).is_some() {
            return Err(StudioError::DuplicateProject(to.to_string()));
        }
        let project = self.project_mut(from)?;
        log::info!("renaming project {from:?} to {to:?}");
        project.name = to.to_string();
        Ok(())
    }

    /// Removes a project and returns it.
    pub fn delete_project(&mut self, name: &str) -> Result<Project, StudioError> {
        let index = self.index_of(name)?;
        log::info!("deleting project {:?}", self.projects[index].name);
        Ok(self.projects.remove(index))
    }

    /// Stores `palette` in `project`, replacing any palette with the same
    /// name. Returns true if an existing palette was replaced.
    pub fn save_palette(
        &mut self,
        project: &str,
        palette: SavedPalette,
    ) -> Result<bool, StudioError> {
        palette.validate()?;
        let target = self.project_mut(project)?;
        match target.palettes.iter_mut().find(|p| p.name == palette.name) {
            Some(existing) => {
                log::debug!("replacing palette {:?} in {project:?}", palette.name);
                *existing = palette;
                Ok(true)
            }
            None => {
                log::debug!("adding palette {:?} to {project:?}", palette.name);
                target.palettes.push(palette);
                Ok(false)
            }
        }
    }

    /// Removes the palette named `name` from `project` and returns it.
    pub fn remove_palette(
        &mut self,
        project: &str,
        name: &str,
    ) -> Result<SavedPalette, StudioError> {
        let target = self.project_mut(project)?;
        let index = target
            .palettes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| {
                StudioError::InvalidPalette(format!("no palette {name:?} in project {project:?}"))
            })?;
        Ok(target.palettes.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonekit_core::{ColorConfig, PaletteKey, Studio};

    fn saved(name: &str, hue: f64) -> SavedPalette {
        let config = ColorConfig::new(hue, 0.1, false);
        let palette = Studio::uncached().generate_palette(&config);
        SavedPalette::new(name, config, &palette)
    }

    fn temp_store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::open(dir.path().join("projects.json")).unwrap();
        (dir, store)
    }

    // -- Open / save --

    #[test]
    fn missing_file_opens_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_projects().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_and_reopen_round_trip() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        store.save_palette("brand", saved("ocean", 220.0)).unwrap();
        store.save().unwrap();

        let reopened = ProjectStore::open(store.path()).unwrap();
        assert_eq!(reopened.list_projects(), store.list_projects());
        let palette = reopened.project("brand").unwrap().palette("ocean").unwrap();
        assert_eq!(
            palette.palette().unwrap().get(PaletteKey::Primary),
            "oklch(76% 0.1 220)"
        );
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/projects.json");
        let mut store = ProjectStore::open(&path).unwrap();
        store.create_project("a").unwrap();
        store.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(ProjectStore::open(&path), Err(StudioError::Io(_))));
    }

    #[test]
    fn saved_file_is_pretty_json() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        store.save().unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"projects\": ["), "{text}");
        assert!(text.ends_with('\n'));
    }

    // -- Projects --

    #[test]
    fn create_project_trims_and_rejects_duplicates() {
        let (_dir, mut store) = temp_store();
        assert_eq!(store.create_project("  brand ").unwrap().name, "brand");
        assert!(matches!(
            store.create_project("brand"),
            Err(StudioError::DuplicateProject(_))
        ));
        assert!(matches!(
            store.create_project("   "),
            Err(StudioError::InvalidName(_))
        ));
        assert_eq!(store.list_projects().len(), 1);
    }

    #[test]
    fn rename_project_checks_both_names() {
        let (_dir, mut store) = temp_store();
        store.create_project("a").unwrap();
        store.create_project("b").unwrap();

        assert!(matches!(
            store.rename_project("a", "b"),
            Err(StudioError::DuplicateProject(_))
        ));
        assert!(matches!(
            store.rename_project("zzz", "c"),
            Err(StudioError::UnknownProject(_))
        ));
        store.rename_project("a", "a").unwrap();
        store.rename_project("a", "c").unwrap();
        assert!(store.project("a").is_none());
        assert!(store.project("c").is_some());
    }

    #[test]
    fn lookups_ignore_surrounding_whitespace() {
        let (_dir, mut store) = temp_store();
        store.create_project(" brand ").unwrap();
        assert_eq!(store.project(" brand ").unwrap().name, "brand");
        store.save_palette(" brand", saved("main", 10.0)).unwrap();
        assert!(store.remove_palette("brand ", "main").is_ok());

        store.rename_project(" brand ", "brand").unwrap();
        store.rename_project("brand\t", " logo ").unwrap();
        assert!(store.project("logo").is_some());
        assert_eq!(store.delete_project("  logo").unwrap().name, "logo");
        assert!(store.list_projects().is_empty());
    }

    #[test]
    fn delete_project_returns_it() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        store.save_palette("brand", saved("ocean", 220.0)).unwrap();
        let deleted = store.delete_project("brand").unwrap();
        assert_eq!(deleted.palettes.len(), 1);
        assert!(store.list_projects().is_empty());
        assert!(matches!(
            store.delete_project("brand"),
            Err(StudioError::UnknownProject(_))
        ));
    }

    // -- Palettes --

    #[test]
    fn save_palette_replaces_same_name() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        assert!(!store.save_palette("brand", saved("main", 10.0)).unwrap());
        assert!(!store.save_palette("brand", saved("alt", 20.0)).unwrap());
        assert!(store.save_palette("brand", saved("main", 30.0)).unwrap());

        let project = store.project("brand").unwrap();
        assert_eq!(project.palettes.len(), 2);
        assert_eq!(project.palettes[0].name, "main");
        assert_eq!(project.palette("main").unwrap().config.hue, 30.0);
    }

    #[test]
    fn save_palette_validates_the_record() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        let mut broken = saved("broken", 10.0);
        broken.colors.truncate(3);
        assert!(matches!(
            store.save_palette("brand", broken),
            Err(StudioError::InvalidPalette(_))
        ));
        assert!(matches!(
            store.save_palette("nope", saved("x", 10.0)),
            Err(StudioError::UnknownProject(_))
        ));
    }

    #[test]
    fn remove_palette_returns_it() {
        let (_dir, mut store) = temp_store();
        store.create_project("brand").unwrap();
        store.save_palette("brand", saved("main", 10.0)).unwrap();
        assert_eq!(store.remove_palette("brand", "main").unwrap().name, "main");
        assert!(store.remove_palette("brand", "main").is_err());
        assert!(store.project("brand").unwrap().palettes.is_empty());
    }
}
