use serde::{Deserialize, Serialize};

/// One line-numbered window of a source file.
///
/// `content` carries the numbered form handed to the model (`00001: ...`);
/// the raw text and absolute position are recoverable from the prefixes.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FileChunk {
    /// Path relative to the scan root.
    pub file_path: String,
    /// Position of this chunk within its file, starting at 0.
    pub chunk_index: usize,
    pub language: String,
    pub content: String,
}

const LINE_NUMBER_WIDTH: usize = 5;
const LINE_NUMBER_SEP: &str = ": ";

impl FileChunk {
    /// Absolute 1-based line number of the first line in this chunk.
    pub fn start_line(&self) -> usize {
        self.content
            .lines()
            .next()
            .and_then(split_line_number)
            .map_or(1, |(number, _)| number)
    }

    /// Chunk body with the line-number prefixes stripped.
    pub fn raw_content(&self) -> String {
        self.content
            .lines()
            .map(|line| split_line_number(line).map_or(line, |(_, rest)| rest))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// The prefix is zero-padded to 5 digits but grows for longer files.
fn split_line_number(line: &str) -> Option<(usize, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end < LINE_NUMBER_WIDTH || !line[digits_end..].starts_with(LINE_NUMBER_SEP) {
        return None;
    }
    let number = line[..digits_end].parse().ok()?;
    Some((number, &line[digits_end + LINE_NUMBER_SEP.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> FileChunk {
        FileChunk {
            file_path: "app.py".to_string(),
            chunk_index: 0,
            language: "Python".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn start_line_reads_the_first_prefix() {
        assert_eq!(chunk("00001: import os\n00002: x = 1").start_line(), 1);
        assert_eq!(chunk("00361: def f():\n00362:     pass").start_line(), 361);
    }

    #[test]
    fn start_line_defaults_to_one_without_a_prefix() {
        assert_eq!(chunk("plain text").start_line(), 1);
        assert_eq!(chunk("").start_line(), 1);
    }

    #[test]
    fn raw_content_strips_every_prefix() {
        let c = chunk("00001: import os\n00002: password = \"x\"");
        assert_eq!(c.raw_content(), "import os\npassword = \"x\"");
    }

    #[test]
    fn raw_content_keeps_unprefixed_lines_untouched() {
        let c = chunk("00001: a\nnot numbered\n00003: b");
        assert_eq!(c.raw_content(), "a\nnot numbered\nb");
    }

    #[test]
    fn short_lines_do_not_panic() {
        assert_eq!(chunk("123").raw_content(), "123");
        assert_eq!(chunk("00001:x").raw_content(), "00001:x");
    }

    #[test]
    fn wide_prefixes_past_five_digits_still_parse() {
        let c = chunk("100000: tail()");
        assert_eq!(c.start_line(), 100_000);
        assert_eq!(c.raw_content(), "tail()");
    }

    #[test]
    fn plain_numbered_prose_is_not_mistaken_for_a_prefix() {
        // Too few digits to be one of ours.
        assert_eq!(chunk("42: answer").raw_content(), "42: answer");
    }
}
