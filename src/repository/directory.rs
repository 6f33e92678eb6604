use super::{RecipeRepository, RepositoryError};
use crate::model::Recipe;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

/// File extensions recognized as recipe documents, in lookup priority order.
const RECIPE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A repository reading one recipe document per file from a directory tree.
///
/// Every `*.yaml`, `*.yml` and `*.json` file below the base directory is a
/// recipe. Documents that fail to decode are logged and skipped when listing,
/// but reported as errors when requested by name.
///
/// # Examples
///
/// ```no_run
/// use pantry_find::{DirectoryRepository, RecipeRepository};
///
/// let repo = DirectoryRepository::new("./recipes");
/// let stew = repo.get_recipe("beef_stew")?;
/// let all = repo.recipes()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    base_dir: Utf8PathBuf,
}

impl DirectoryRepository {
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        DirectoryRepository {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Paths of every recipe document below the base directory.
    pub fn recipe_paths(&self) -> Result<Vec<Utf8PathBuf>, RepositoryError> {
        let mut paths = Vec::new();

        for ext in RECIPE_EXTENSIONS {
            let pattern = self.base_dir.join(format!("**/*.{ext}"));
            for entry in glob::glob(pattern.as_str())? {
                let path = entry?;
                let path = Utf8PathBuf::from_path_buf(path).map_err(|_| {
                    RepositoryError::IoError(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "Path contains invalid UTF-8",
                    ))
                })?;
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }
}

impl RecipeRepository for DirectoryRepository {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let mut recipes = Vec::new();

        for path in self.recipe_paths()? {
            match load_recipe(&path) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => warn!(%path, error = %e, "skipping undecodable recipe document"),
            }
        }

        debug!(base_dir = %self.base_dir, count = recipes.len(), "loaded recipes");
        Ok(recipes)
    }

    /// Loads a recipe by file name relative to the base directory.
    ///
    /// A name with an extension is used as-is; otherwise each recipe extension
    /// is tried in turn.
    fn get_recipe(&self, name: &str) -> Result<Recipe, RepositoryError> {
        let name = Utf8Path::new(name);

        if name.extension().is_some() {
            let path = self.base_dir.join(name);
            if path.exists() {
                return load_recipe(&path);
            }
        } else {
            for ext in RECIPE_EXTENSIONS {
                let path = self.base_dir.join(format!("{name}.{ext}"));
                if path.exists() {
                    return load_recipe(&path);
                }
            }
        }

        Err(RepositoryError::NotFound(name.to_string()))
    }
}

/// Reads and decodes one recipe document, choosing the format by extension.
pub fn load_recipe(path: &Utf8Path) -> Result<Recipe, RepositoryError> {
    let content = std::fs::read_to_string(path)?;

    match path.extension() {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|source| RepositoryError::YamlError {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("json") => {
            serde_json::from_str(&content).map_err(|source| RepositoryError::JsonError {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(RepositoryError::UnsupportedFormat(path.to_path_buf())),
    }
}
