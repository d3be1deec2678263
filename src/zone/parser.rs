use super::label::Label;
use super::value::{value_to, value_to_int};
use super::zone::Zone;
use super::{Result, ZoneError, soa};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Compiler for JSON zone documents
pub struct ZoneParser {
    /// Zone name the document is compiled for
    origin: String,
}

impl ZoneParser {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Parse a zone file from path
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Zone> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ZoneError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_named(&contents, &path.display().to_string())
    }

    /// Parse zone document contents
    pub fn parse(&self, contents: &str) -> Result<Zone> {
        self.parse_named(contents, &self.origin)
    }

    fn parse_named(&self, contents: &str, file: &str) -> Result<Zone> {
        let document: Value = serde_json::from_str(contents).map_err(|e| {
            let (offset, excerpt) = highlight_position(contents, e.line(), e.column());
            ZoneError::ZoneSyntax {
                file: file.to_string(),
                line: e.line(),
                column: e.column(),
                offset,
                excerpt,
                message: e.to_string(),
            }
        })?;
        self.parse_document(&document)
    }

    /// Compile an already decoded zone document.
    ///
    /// Top-level `ttl`, `serial`, `contact` and `max_hosts` override the
    /// zone defaults; `data` maps label names to label objects and is
    /// required. Other keys are ignored.
    pub fn parse_document(&self, document: &Value) -> Result<Zone> {
        let top = document.as_object().ok_or_else(|| {
            ZoneError::ZoneSemantic(format!("{}: top level is not an object", self.origin))
        })?;

        let mut zone = Zone::new(self.origin.as_str());

        if let Some(ttl) = top.get("ttl") {
            zone.options.ttl = value_to(ttl)?;
        }
        if let Some(serial) = top.get("serial") {
            zone.options.serial = value_to_int(serial)?;
        }
        if let Some(contact) = top.get("contact") {
            zone.options.contact = contact
                .as_str()
                .ok_or_else(|| {
                    ZoneError::ZoneSemantic(format!(
                        "{}: contact must be a string, got {}",
                        self.origin, contact
                    ))
                })?
                .to_string();
        }
        if let Some(max_hosts) = top.get("max_hosts") {
            zone.options.max_hosts = value_to(max_hosts)?;
        }
        trace!("{} options: {:?}", self.origin, zone.options);

        let data = match top.get("data") {
            Some(Value::Object(data)) => data,
            Some(other) => {
                return Err(ZoneError::ZoneSemantic(format!(
                    "{}: data must be an object, got {}",
                    self.origin, other
                )));
            }
            None => {
                return Err(ZoneError::ZoneSemantic(format!(
                    "{}: missing data section",
                    self.origin
                )));
            }
        };

        for (name, raw) in data {
            let label = Label::compile(name, raw, &zone.origin, &zone.options)?;
            zone.labels.insert(name.clone(), label);
        }

        soa::setup_soa(&mut zone)?;

        let stats = zone.stats();
        debug!(
            "Compiled zone {}: {} labels, {} records",
            zone.origin, stats.labels, stats.records
        );
        Ok(zone)
    }
}

/// Locate a 1-based line/column in `contents`, returning the byte offset
/// and an excerpt of the preceding and offending lines with a caret under
/// the error column.
fn highlight_position(contents: &str, line: usize, column: usize) -> (usize, String) {
    let lines: Vec<&str> = contents.split('\n').collect();
    let index = line.saturating_sub(1).min(lines.len().saturating_sub(1));

    let line_start: usize = lines[..index].iter().map(|l| l.len() + 1).sum();
    let offset = (line_start + column.saturating_sub(1)).min(contents.len());

    let mut excerpt = String::new();
    if index > 0 {
        excerpt.push_str(&format!("{:5}: {}\n", index, lines[index - 1].trim_end_matches('\r')));
    }
    excerpt.push_str(&format!(
        "{:5}: {}\n",
        index + 1,
        lines[index].trim_end_matches('\r')
    ));
    excerpt.push_str(&format!("{}^", " ".repeat(7 + column.saturating_sub(1))));

    (offset, excerpt)
}
