//! The line-record corpus format shared by the parser (writer) and the
//! index builder (reader): one document per line, `title`, `url` and
//! `content` separated by a single 0x03 byte.

use crate::error::IndexError;

pub const SEPARATOR: char = '\x03';
pub const FIELD_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl Record {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), content: content.into() }
    }

    /// Encode as one corpus line, including the trailing newline. Newlines
    /// inside fields become spaces and stray separators are dropped, so the
    /// line always parses back into three fields.
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(self.title.len() + self.url.len() + self.content.len() + 3);
        push_field(&mut line, &self.title);
        line.push(SEPARATOR);
        push_field(&mut line, &self.url);
        line.push(SEPARATOR);
        push_field(&mut line, &self.content);
        line.push('\n');
        line
    }
}

fn push_field(out: &mut String, field: &str) {
    for c in field.chars() {
        match c {
            '\n' | '\r' => out.push(' '),
            SEPARATOR => {}
            c => out.push(c),
        }
    }
}

/// Split one line (without its `\n`) into a record. `line_no` is only used
/// for the error.
pub fn parse_record(line: &str, line_no: usize) -> Result<Record, IndexError> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(IndexError::Parse { line: line_no, fields: fields.len() });
    }
    Ok(Record::new(fields[0], fields[1], fields[2]))
}
