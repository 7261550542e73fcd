//! Defines the [`Loader`] and [`Error`] types: the logic for reading post
//! source files from disk into [`PostSummary`] records.

use std::{collections::HashSet, fmt, fs::File, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::post::PostSummary;

const MARKDOWN_EXTENSION: &str = "md";
const BUNDLE_INDEX: &str = "index.md";
const FOLD_TAG: &str = "<!-- more -->";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads [`PostSummary`] objects from source files.
pub struct Loader<'a> {
    /// `base_path` prefixes every post path (i.e., the path for a post whose
    /// source file is `hello.md` is `{base_path}/hello`).
    base_path: &'a str,
}

impl<'a> Loader<'a> {
    /// Constructs a new loader. See fields on [`Loader`] for argument
    /// descriptions.
    pub fn new(base_path: &'a str) -> Loader<'a> {
        Loader { base_path }
    }

    /// Searches `source_directory` for posts and returns their summaries
    /// sorted by date (most recent first). A post is either a markdown file
    /// directly in `source_directory` or a bundle directory containing an
    /// `index.md`. Each post file must be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with fields `title`, `date`, and optionally
    ///    `summary`, `tags`, and `draft`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// date: 2021-04-16
    /// tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    ///
    /// Drafts are skipped.
    pub fn load(&self, source_directory: &Path) -> Result<Vec<PostSummary>> {
        let mut posts: Vec<(NaiveDate, PostSummary)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let walker = WalkDir::new(source_directory)
            .min_depth(1)
            .max_depth(2)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));
        for result in walker {
            let entry = result?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative_path = match entry.path().strip_prefix(source_directory) {
                Ok(p) => p,
                Err(_) => continue,
            };
            let slug = match Self::post_slug(relative_path) {
                Some(slug) => slug,
                None => {
                    debug!(path = %relative_path.display(), "skipping non-post file");
                    continue;
                }
            };

            match self.load_post(entry.path(), &slug)? {
                None => {
                    info!(path = %relative_path.display(), "skipping draft");
                }
                Some((date, post)) => {
                    if !seen.insert(post.path.clone()) {
                        return Err(Error::DuplicatePath(post.path));
                    }
                    posts.push((date, post));
                }
            }
        }

        posts.sort_by(|a, b| b.0.cmp(&a.0));
        info!(count = posts.len(), "loaded posts");
        Ok(posts.into_iter().map(|(_, post)| post).collect())
    }

    /// Maps a source path to the post slug it defines: `foo.md` → `foo` and
    /// `foo/index.md` → `foo`. Anything else isn't a post.
    fn post_slug(relative_path: &Path) -> Option<String> {
        let components: Vec<&str> = relative_path
            .iter()
            .map(|c| c.to_str())
            .collect::<Option<Vec<&str>>>()?;
        match components.as_slice() {
            [file] => {
                let path = Path::new(file);
                match path.extension().and_then(|e| e.to_str()) {
                    Some(MARKDOWN_EXTENSION) => {
                        path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
                    }
                    _ => None,
                }
            }
            [dir, BUNDLE_INDEX] => Some((*dir).to_owned()),
            _ => None,
        }
    }

    /// Reads a single post file. Returns `Ok(None)` for drafts.
    fn load_post(
        &self,
        full_path: &Path,
        slug: &str,
    ) -> Result<Option<(NaiveDate, PostSummary)>> {
        match self._load_post(full_path, slug) {
            Ok(p) => Ok(p),
            Err(e) => Err(Error::Annotated(
                format!("loading post `{}`", full_path.display()),
                Box::new(e),
            )),
        }
    }

    fn _load_post(
        &self,
        full_path: &Path,
        slug: &str,
    ) -> Result<Option<(NaiveDate, PostSummary)>> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(full_path)?.read_to_string(&mut contents)?;
        let (frontmatter, body) = split_frontmatter(&contents)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(frontmatter)?;

        if frontmatter.draft {
            return Ok(None);
        }

        let date = NaiveDate::parse_from_str(&frontmatter.date, DATE_FORMAT)
            .map_err(|err| Error::InvalidDate(frontmatter.date.clone(), err))?;

        let summary = match frontmatter.summary {
            Some(summary) => summary,
            None => {
                if !body.contains(FOLD_TAG) {
                    warn!(
                        path = %full_path.display(),
                        "no summary or fold; using the whole body"
                    );
                }
                fold(body).trim().to_owned()
            }
        };

        Ok(Some((
            date,
            PostSummary {
                path: format!("{}/{}", self.base_path, slug),
                title: frontmatter.title,
                summary,
                date: date.format(DATE_FORMAT).to_string(),
                tags: frontmatter.tags.unwrap_or_default(),
            },
        )))
    }
}

/// Splits a post source into its frontmatter YAML and its body.
fn split_frontmatter(input: &str) -> Result<(&str, &str)> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::FrontmatterMissingStartFence);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::FrontmatterMissingEndFence),
        Some(offset) => Ok((
            &input[FENCE.len()..FENCE.len() + offset],
            &input[FENCE.len() + offset + FENCE.len()..],
        )),
    }
}

/// Returns the part of `body` above the fold, or all of it if there is none.
fn fold(body: &str) -> &str {
    match body.find(FOLD_TAG) {
        Some(i) => &body[..i],
        None => body,
    }
}

#[derive(Deserialize)]
struct Frontmatter {
    /// The title of the post.
    title: String,

    /// The date of the post.
    date: String,

    summary: Option<String>,

    /// The tags associated with the post. `tags:` with no value is the same
    /// as omitting it.
    #[serde(default)]
    tags: Option<Vec<String>>,

    #[serde(default)]
    draft: bool,
}

/// Represents the result of a load operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading [`PostSummary`] objects.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence.
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the frontmatter date isn't a `YYYY-MM-DD` date.
    InvalidDate(String, chrono::ParseError),

    /// Returned when two source files resolve to the same post path.
    DuplicatePath(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl Error {
    /// Returns the underlying error, skipping annotations.
    pub fn root(&self) -> &Error {
        match self {
            Error::Annotated(_, err) => err.root(),
            err => err,
        }
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::InvalidDate(date, err) => {
                write!(f, "invalid date `{}`: {}", date, err)
            }
            Error::DuplicatePath(path) => {
                write!(f, "more than one post has path `{}`", path)
            }
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::InvalidDate(_, err) => Some(err),
            Error::DuplicatePath(_) => None,
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
