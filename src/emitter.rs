use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::error::{ConvertError, Result};
use crate::post::NormalizedPost;

pub fn render_post(delimiter: &str, post: &NormalizedPost) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "{}", delimiter);
    for field in &post.header {
        let _ = writeln!(&mut buf, "{}: {}", field.key, field.value);
    }
    let _ = writeln!(&mut buf, "{}", delimiter);
    buf.push_str(&post.body);

    buf
}

/// Writes one file per post into an existing directory.
pub struct PostWriter {
    output_dir: PathBuf,
    extension: String,
    delimiter: String,
}

impl PostWriter {
    pub fn new(output_dir: &Path, extension: &str, delimiter: &str) -> Self {
        PostWriter {
            output_dir: output_dir.to_path_buf(),
            extension: extension.to_string(),
            delimiter: delimiter.to_string(),
        }
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, self.extension))
    }

    /// Creates or truncates `<output_dir>/<name>.<extension>`.
    pub fn write(&self, name: &str, post: &NormalizedPost) -> Result<PathBuf> {
        let path = self.file_path(name);
        let content = render_post(&self.delimiter, post);

        if let Err(source) = fs::write(&path, content.as_bytes()) {
            return Err(ConvertError::WriteError { path, source });
        }
        debug!("Wrote {} ({} bytes)", path.display(), content.len());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::post::HeaderField;
    use crate::test_data::{CONVERTED_DRAFT, CONVERTED_POST};

    use super::*;

    fn field(key: &'static str, value: &str) -> HeaderField {
        HeaderField { key, value: value.to_string() }
    }

    fn published_post() -> NormalizedPost {
        NormalizedPost {
            header: vec![
                field("title", r#""Hi \"there\"""#),
                field("date", "2023-11-14"),
                field("lastmod", "2023-11-14"),
                field("summary", r#""A test""#),
            ],
            body: "Hello\nWorld\n".to_string(),
        }
    }

    #[test]
    fn test_render_post() {
        assert_eq!(render_post("---", &published_post()), CONVERTED_POST);
    }

    #[test]
    fn test_render_draft() {
        let post = NormalizedPost {
            header: vec![
                field("title", r#""Work in progress""#),
                field("draft", "true"),
                field("lastmod", "2011-03-02"),
                field("summary", r#""Not yet""#),
            ],
            body: "Nothing to see here\n".to_string(),
        };
        assert_eq!(render_post("---", &post), CONVERTED_DRAFT);
    }

    #[test]
    fn test_custom_delimiter() {
        let rendered = render_post("+++", &published_post());
        assert!(rendered.starts_with("+++\ntitle: "));
        assert!(rendered.contains("\n+++\nHello\nWorld\n"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PostWriter::new(dir.path(), "md", "---");

        fs::write(dir.path().join("hello.md"), "old content that is longer than the new one").unwrap();
        let path = writer.write("hello", &published_post()).unwrap();

        assert_eq!(path, dir.path().join("hello.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), CONVERTED_POST);
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("converted");
        let writer = PostWriter::new(&missing, "md", "---");

        match writer.write("hello", &published_post()) {
            Err(ConvertError::WriteError { path, .. }) => assert_eq!(path, missing.join("hello.md")),
            other => panic!("expected a write error, got {:?}", other),
        }
        assert!(!missing.exists());
    }
}
