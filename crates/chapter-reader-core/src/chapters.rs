//! The book: five chapters, each with a title and plain text body.

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const CHAPTER_COUNT: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub number: u8,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChapterCatalog {
    chapters: Vec<Chapter>,
}

impl ChapterCatalog {
    /// Placeholder book used when no chapter files are available.
    pub fn builtin() -> Self {
        Self {
            chapters: (1..=CHAPTER_COUNT).map(placeholder_chapter).collect(),
        }
    }

    /// Read `chapter-N.txt` for N in 1..=5 from `dir`.
    ///
    /// A missing or empty file is replaced by a placeholder so the catalog
    /// always holds exactly [`CHAPTER_COUNT`] chapters.
    pub fn load_dir(dir: &Path) -> Self {
        let chapters = (1..=CHAPTER_COUNT)
            .map(|number| {
                let path = dir.join(format!("chapter-{number}.txt"));
                match fs::read_to_string(&path) {
                    Ok(raw) if !raw.trim().is_empty() => {
                        debug!(path = %path.display(), "Loaded chapter text");
                        parse_chapter(number, &raw)
                    }
                    Ok(_) => {
                        warn!(path = %path.display(), "Chapter file is empty; using placeholder");
                        placeholder_chapter(number)
                    }
                    Err(err) => {
                        debug!(path = %path.display(), "Chapter file unavailable: {err}");
                        placeholder_chapter(number)
                    }
                }
            })
            .collect();
        info!(dir = %dir.display(), "Prepared chapter catalog");
        Self { chapters }
    }

    /// Chapter by 1-based number.
    pub fn get(&self, number: u8) -> Option<&Chapter> {
        self.chapters
            .iter()
            .find(|chapter| chapter.number == number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl Default for ChapterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn is_valid_chapter(number: i64) -> bool {
    (1..=i64::from(CHAPTER_COUNT)).contains(&number)
}

pub fn default_title(number: u8) -> String {
    format!("Chapter {number}")
}

/// A leading `# Heading` line becomes the title; the rest is the body.
fn parse_chapter(number: u8, raw: &str) -> Chapter {
    let trimmed = raw.trim_start_matches(['\u{feff}', '\n', '\r']);
    let mut lines = trimmed.splitn(2, '\n');
    let first = lines.next().unwrap_or_default().trim();
    match first.strip_prefix('#') {
        Some(heading) if !heading.trim().is_empty() => Chapter {
            number,
            title: heading.trim_start_matches('#').trim().to_string(),
            text: lines.next().unwrap_or_default().trim().to_string(),
        },
        _ => Chapter {
            number,
            title: default_title(number),
            text: trimmed.trim().to_string(),
        },
    }
}

fn placeholder_chapter(number: u8) -> Chapter {
    Chapter {
        number,
        title: default_title(number),
        text: format!(
            "This is the text of chapter {number}. Place a file named chapter-{number}.txt \
             in the chapters directory to replace it."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_numbered_chapters() {
        let catalog = ChapterCatalog::builtin();
        assert_eq!(catalog.len(), usize::from(CHAPTER_COUNT));
        assert_eq!(catalog.get(3).map(|c| c.title.as_str()), Some("Chapter 3"));
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(6).is_none());
    }

    #[test]
    fn heading_line_becomes_title() {
        let chapter = parse_chapter(2, "# The Crossing\n\nThey left at dawn.\n");
        assert_eq!(chapter.title, "The Crossing");
        assert_eq!(chapter.text, "They left at dawn.");
    }

    #[test]
    fn text_without_heading_keeps_default_title() {
        let chapter = parse_chapter(4, "Plain body text.");
        assert_eq!(chapter.title, "Chapter 4");
        assert_eq!(chapter.text, "Plain body text.");
    }

    #[test]
    fn load_dir_mixes_files_and_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chapter-1.txt"), "# Opening\nFirst words.").unwrap();
        fs::write(dir.path().join("chapter-2.txt"), "   \n").unwrap();

        let catalog = ChapterCatalog::load_dir(dir.path());

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get(1).unwrap().title, "Opening");
        assert_eq!(catalog.get(1).unwrap().text, "First words.");
        assert_eq!(catalog.get(2).unwrap().title, "Chapter 2");
        assert!(catalog.get(5).unwrap().text.contains("chapter-5.txt"));
    }

    #[test]
    fn chapter_bounds() {
        assert!(!is_valid_chapter(0));
        assert!(is_valid_chapter(1));
        assert!(is_valid_chapter(5));
        assert!(!is_valid_chapter(6));
    }
}
