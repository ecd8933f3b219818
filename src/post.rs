use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Local, TimeZone};

use crate::error::{ConvertError, Result};
use crate::text_utils::{format_date, json_quote, normalize_body};

/// One row of the old blog table.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub text: String,
    pub name: String,
    pub title: String,
    /// `None` or `Some(0)` means the post is still a draft
    pub published: Option<i64>,
    pub modified: i64,
    pub summary: String,
}

impl PostRecord {
    pub fn is_published(&self) -> bool {
        matches!(self.published, Some(ts) if ts != 0)
    }
}

/// Progress line: `<published> <modified> <name> <title>`
impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.published {
            Some(published) => write!(f, "{} ", published)?,
            None => write!(f, "- ")?,
        }
        write!(f, "{} {} {}", self.modified, self.name, self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderField {
    pub key: &'static str,
    pub value: String,
}

impl HeaderField {
    fn new(key: &'static str, value: String) -> Self {
        HeaderField { key, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPost {
    /// Always title, date or draft, lastmod, summary. In that order.
    pub header: Vec<HeaderField>,
    pub body: String,
}

impl NormalizedPost {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.header.iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }
}

pub struct PostTransformer<Tz: TimeZone> {
    tz: Tz,
    ascii_json: bool,
}

impl PostTransformer<Local> {
    pub fn local(ascii_json: bool) -> Self {
        Self::new(Local, ascii_json)
    }
}

impl<Tz> PostTransformer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz, ascii_json: bool) -> Self {
        PostTransformer { tz, ascii_json }
    }

    pub fn transform(&self, record: &PostRecord) -> Result<NormalizedPost> {
        let mut header = Vec::with_capacity(4);

        header.push(HeaderField::new("title", json_quote(&record.title, self.ascii_json)));
        match record.published {
            Some(published) if record.is_published() => {
                header.push(HeaderField::new("date", self.date(record, "published", published)?));
            }
            _ => header.push(HeaderField::new("draft", "true".to_string())),
        }
        header.push(HeaderField::new("lastmod", self.date(record, "modified", record.modified)?));
        header.push(HeaderField::new("summary", json_quote(&record.summary, self.ascii_json)));

        Ok(NormalizedPost {
            header,
            body: normalize_body(&record.text),
        })
    }

    fn date(&self, record: &PostRecord, column: &str, timestamp: i64) -> Result<String> {
        format_date(timestamp, &self.tz).ok_or_else(|| ConvertError::MalformedRecord {
            name: record.name.clone(),
            reason: format!("{} timestamp {} is out of the calendar range", column, timestamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn hello_record() -> PostRecord {
        PostRecord {
            text: "Hello\r\nWorld".to_string(),
            name: "hello".to_string(),
            title: r#"Hi "there""#.to_string(),
            published: Some(1700000000),
            modified: 1700000100,
            summary: "A test".to_string(),
        }
    }

    fn keys(post: &NormalizedPost) -> Vec<&'static str> {
        post.header.iter().map(|field| field.key).collect()
    }

    #[test]
    fn test_published_post() {
        let transformer = PostTransformer::new(Utc, true);
        let post = transformer.transform(&hello_record()).unwrap();

        assert_eq!(keys(&post), ["title", "date", "lastmod", "summary"]);
        assert_eq!(post.field("title"), Some(r#""Hi \"there\"""#));
        assert_eq!(post.field("date"), Some("2023-11-14"));
        assert_eq!(post.field("lastmod"), Some("2023-11-14"));
        assert_eq!(post.field("summary"), Some(r#""A test""#));
        assert_eq!(post.field("draft"), None);
        assert_eq!(post.body, "Hello\nWorld\n");
    }

    #[test]
    fn test_draft_post() {
        let transformer = PostTransformer::new(Utc, true);
        for published in [None, Some(0)] {
            let record = PostRecord { published, ..hello_record() };
            let post = transformer.transform(&record).unwrap();

            assert_eq!(keys(&post), ["title", "draft", "lastmod", "summary"]);
            assert_eq!(post.field("draft"), Some("true"));
            assert_eq!(post.field("date"), None);
        }
    }

    #[test]
    fn test_transform_is_pure() {
        let transformer = PostTransformer::local(true);
        let record = hello_record();
        let first = transformer.transform(&record).unwrap();
        let second = transformer.transform(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_local_dates() {
        let transformer = PostTransformer::local(true);
        let post = transformer.transform(&hello_record()).unwrap();
        let expected = Local.timestamp_opt(1700000000, 0).unwrap().format("%Y-%m-%d").to_string();
        assert_eq!(post.field("date"), Some(expected.as_str()));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let transformer = PostTransformer::new(Utc, true);
        let record = PostRecord { modified: i64::MAX, ..hello_record() };
        match transformer.transform(&record) {
            Err(ConvertError::MalformedRecord { name, reason }) => {
                assert_eq!(name, "hello");
                assert!(reason.contains("modified"));
            }
            other => panic!("expected a malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(hello_record().to_string(), r#"1700000000 1700000100 hello Hi "there""#);
        let draft = PostRecord { published: None, ..hello_record() };
        assert_eq!(draft.to_string(), r#"- 1700000100 hello Hi "there""#);
    }
}
