//! Loads the site configuration from a `folio.yaml` project file.

use crate::nav::{default_links, NavLink};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILE: &str = "folio.yaml";

#[derive(Deserialize)]
struct PageSize(usize);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(5)
    }
}

#[derive(Deserialize)]
struct BasePath(String);
impl Default for BasePath {
    fn default() -> Self {
        BasePath(String::from("blog"))
    }
}

#[derive(Deserialize)]
struct PostsDirectory(PathBuf);
impl Default for PostsDirectory {
    fn default() -> Self {
        PostsDirectory(PathBuf::from("posts"))
    }
}

#[derive(Deserialize)]
struct Project {
    #[serde(default)]
    posts_directory: PostsDirectory,

    #[serde(default)]
    base_path: BasePath,

    #[serde(default)]
    posts_per_page: PageSize,

    #[serde(default = "default_links")]
    nav_links: Vec<NavLink>,
}

#[derive(Debug)]
pub struct Config {
    /// The directory containing post source files, resolved against the
    /// project root.
    pub posts_directory: PathBuf,

    /// The first path segment of the listing, e.g. `blog` for `/blog/` and
    /// `/blog/page/2`. Post paths are also prefixed with it.
    pub base_path: String,

    /// The number of posts per listing page. Always at least 1.
    pub posts_per_page: usize,

    pub nav_links: Vec<NavLink>,
}

impl Config {
    /// Finds `folio.yaml` in `dir` or its nearest ancestor and loads it.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        match Config::_from_project_file(path) {
            Ok(config) => Ok(config),
            Err(e) => Err(Error::Annotated(
                format!("loading `{}`", path.display()),
                Box::new(e),
            )),
        }
    }

    fn _from_project_file(path: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(File::open(path)?)?;
        if project.posts_per_page.0 < 1 {
            return Err(Error::InvalidPageSize);
        }
        // `path` is a file, so it always has a parent.
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        debug!(root = %project_root.display(), "found project");
        Ok(Config {
            posts_directory: project_root.join(project.posts_directory.0),
            base_path: project.base_path.0.trim_matches('/').to_owned(),
            posts_per_page: project.posts_per_page.0,
            nav_links: project.nav_links,
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no `folio.yaml` exists in the directory or any ancestor.
    NotFound,

    /// Returned when `posts_per_page` is zero.
    InvalidPageSize,

    /// Returned when the project file isn't valid YAML or has the wrong
    /// shape.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for I/O errors reading the project file.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::InvalidPageSize => {
                write!(f, "`posts_per_page` must be at least 1")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::InvalidPageSize => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "{}")?;

        let config = Config::from_directory(dir.path())?;
        assert_eq!(dir.path().join("posts"), config.posts_directory);
        assert_eq!("blog", config.base_path);
        assert_eq!(5, config.posts_per_page);
        assert_eq!(default_links(), config.nav_links);
        Ok(())
    }

    #[test]
    fn test_found_in_ancestor() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(PROJECT_FILE),
            "posts_directory: content\nbase_path: /writing/\nposts_per_page: 2\n\
             nav_links:\n  - title: Home\n    href: /\n",
        )?;
        let nested = dir.path().join("content").join("drafts");
        fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!(dir.path().join("content"), config.posts_directory);
        assert_eq!("writing", config.base_path);
        assert_eq!(2, config.posts_per_page);
        assert_eq!(vec![NavLink::new("Home", "/")], config.nav_links);
        Ok(())
    }

    #[test]
    fn test_zero_page_size() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "posts_per_page: 0\n")?;

        match Config::from_project_file(&path) {
            Err(Error::Annotated(_, err)) => {
                assert!(matches!(*err, Error::InvalidPageSize))
            }
            other => panic!("wanted InvalidPageSize, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_testdata_project() -> Result<()> {
        let config = Config::from_directory(Path::new("./testdata"))?;
        assert_eq!(Path::new("./testdata").join("posts"), config.posts_directory);
        assert_eq!(2, config.posts_per_page);
        Ok(())
    }
}
