//! Parser for the remote job listing payload
//!
//! The remote endpoint `{location}api/xml?tree=jobs[name,url,description]`
//! answers with an XML document whose root element names the node kind
//! (`<folder>` for structural containers) and which carries zero or more
//! `<job>` elements, each with `name`, `url` and an optional `description`.

use quick_xml::events::Event;
use quick_xml::Reader;

use jobferry_types::{ImportError, ImportResult};

/// One `<job>` element of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobEntry {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// A parsed listing: the declared jobs plus whether the listed node is a folder
#[derive(Debug, Clone, Default)]
pub struct JobListing {
    pub jobs: Vec<JobEntry>,
    pub folder: bool,
}

/// Fields captured inside a `<job>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobField {
    Name,
    Url,
    Description,
}

/// Parse a listing document
///
/// A `folder` element anywhere in the document (usually the root element)
/// marks the listed node as a folder. Malformed XML fails the whole parse;
/// missing job fields default to empty strings.
pub fn parse_listing(payload: &[u8]) -> ImportResult<JobListing> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| ImportError::MalformedListing(format!("invalid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(text);
    let mut listing = JobListing::default();
    let mut current: Option<JobEntry> = None;
    let mut field: Option<JobField> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"folder" => listing.folder = true,
                b"job" => {
                    current = Some(JobEntry::default());
                    field = None;
                }
                b"name" if current.is_some() => field = Some(JobField::Name),
                b"url" if current.is_some() => field = Some(JobField::Url),
                b"description" if current.is_some() => field = Some(JobField::Description),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"folder" {
                    listing.folder = true;
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let value = t
                        .unescape()
                        .map_err(|e| ImportError::MalformedListing(e.to_string()))?;
                    append_field(entry, f, &value);
                }
            }
            Ok(Event::CData(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let raw = t.into_inner();
                    let value = std::str::from_utf8(&raw)
                        .map_err(|e| ImportError::MalformedListing(e.to_string()))?;
                    append_field(entry, f, value);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"job" => {
                    if let Some(entry) = current.take() {
                        listing.jobs.push(entry);
                    }
                    field = None;
                }
                b"name" | b"url" | b"description" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ImportError::MalformedListing(e.to_string())),
        }
    }

    Ok(listing)
}

fn append_field(entry: &mut JobEntry, field: JobField, value: &str) {
    let target = match field {
        JobField::Name => &mut entry.name,
        JobField::Url => &mut entry.url,
        JobField::Description => &mut entry.description,
    };
    target.push_str(value);
}
