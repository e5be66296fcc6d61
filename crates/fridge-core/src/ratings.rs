//! Append-only rating log.
//!
//! One CSV row per user verdict, header written when the file is first
//! created. Appends are atomic per `writeln!` but the log does not lock;
//! hosts serving concurrent requests must funnel appends through a single
//! writer.

use anyhow::Result;
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CSV_HEADER: &str = "timestamp,receta,match_pct,ingredientes_detectados,gusto,relevancia";

/// Did the user like the recipe?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Liked,
    Disliked,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Liked => write!(f, "me gusta"),
            Verdict::Disliked => write!(f, "no me gusta"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" | "liked" | "me gusta" => Ok(Verdict::Liked),
            "dislike" | "disliked" | "no me gusta" => Ok(Verdict::Disliked),
            other => Err(format!("unknown verdict '{other}'")),
        }
    }
}

/// Did the recommendation actually use what the user had on hand?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relevance {
    UsesWhatIHave,
    MissingItems,
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relevance::UsesWhatIHave => write!(f, "usa lo que tengo"),
            Relevance::MissingItems => write!(f, "faltan cosas"),
        }
    }
}

impl FromStr for Relevance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevant" | "usa lo que tengo" => Ok(Relevance::UsesWhatIHave),
            "irrelevant" | "faltan cosas" => Ok(Relevance::MissingItems),
            other => Err(format!("unknown relevance '{other}'")),
        }
    }
}

/// One row of the rating log.
#[derive(Debug, Clone)]
pub struct RatingRecord {
    pub timestamp: String,
    pub recipe_name: String,
    pub match_percent: String,
    pub detected_ingredients: String,
    pub liked: Verdict,
    pub relevant: Relevance,
}

impl RatingRecord {
    pub fn new(
        recipe_name: &str,
        match_percent: &str,
        detected_ingredients: &[String],
        liked: Verdict,
        relevant: Relevance,
    ) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            recipe_name: recipe_name.to_string(),
            match_percent: match_percent.to_string(),
            detected_ingredients: detected_ingredients.join(", "),
            liked,
            relevant,
        }
    }
}

pub struct RatingsLog {
    path: PathBuf,
}

impl RatingsLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &RatingRecord) -> Result<()> {
        let write_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if write_header {
            writeln!(file, "{CSV_HEADER}")?;
        }
        writeln!(
            file,
            "{},{},{},{},{},{}",
            csv_field(&record.timestamp),
            csv_field(&record.recipe_name),
            csv_field(&record.match_percent),
            csv_field(&record.detected_ingredients),
            csv_field(&record.liked.to_string()),
            csv_field(&record.relevant.to_string()),
        )?;
        Ok(())
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
