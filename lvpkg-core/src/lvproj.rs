//! LabVIEW project file (.lvproj) reader.
//!
//! A .lvproj is an XML document whose root `<Project>` element carries the
//! saving LabVIEW version in its `LVVersion` attribute (e.g. "20.0f1").
//! The only format contract here is that single attribute.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Errors from reading a .lvproj file
#[derive(Debug, thiserror::Error)]
pub enum LvprojError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no <Project> element with an LVVersion attribute found")]
    MissingVersion,
    #[error("unusable LVVersion attribute: {0:?}")]
    BadVersion(String),
}

/// Read the raw `LVVersion` attribute from a project file.
pub fn read_lv_version(path: &Path) -> Result<String, LvprojError> {
    let xml = std::fs::read_to_string(path)?;
    lv_version_from_str(&xml)
}

/// Read the raw `LVVersion` attribute from project XML.
pub fn lv_version_from_str(xml: &str) -> Result<String, LvprojError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if e.name().as_ref() == b"Project" {
                    return project_version_attribute(e);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Err(LvprojError::MissingVersion)
}

fn project_version_attribute(e: &BytesStart) -> Result<String, LvprojError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"LVVersion" {
            return Ok(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    Err(LvprojError::MissingVersion)
}

/// Map an `LVVersion` attribute to the full LabVIEW release year.
///
/// The attribute encodes the release as a two-digit year prefix:
/// "20.0f1" was saved by LabVIEW 2020. The mapping breaks in 2100; so
/// does LabVIEW's own versioning.
pub fn labview_year(lv_version: &str) -> Result<String, LvprojError> {
    let prefix: String = lv_version.chars().take(2).collect();

    if prefix.len() < 2 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err(LvprojError::BadVersion(lv_version.to_string()));
    }

    Ok(format!("20{}", prefix))
}

/// Read a project file and resolve the LabVIEW release year in one step.
pub fn project_labview_year(path: &Path) -> Result<String, LvprojError> {
    let raw = read_lv_version(path)?;
    labview_year(&raw)
}
