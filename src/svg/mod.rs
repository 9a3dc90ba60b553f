//! SVG document patching
//!
//! Loads an Inkscape SVG into memory as a list of XML events, rewrites the
//! attributes of its single path, and writes it back. Everything that is not
//! patched is written out exactly as it was read.

pub mod style;

use crate::error::{DocumentError, Error, Result};
use quick_xml::escape::{escape, unescape};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::{NsReader, Writer};
use std::fs;
use std::path::Path;

pub use style::StyleMap;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Qualified name used when a namedview has no document-units attribute yet
const DOCUMENT_UNITS_ATTR: &[u8] = b"inkscape:document-units";

#[derive(Debug, Clone)]
struct NamedView {
    event: usize,
    /// Qualified name of the existing `inkscape:document-units` attribute
    units_key: Option<Vec<u8>>,
    /// Whether the `inkscape` prefix is bound to the Inkscape namespace here
    inkscape_bound: bool,
}

/// An SVG file held as the sequence of XML events it was parsed from.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    events: Vec<Event<'static>>,
    /// Event indices of every SVG `path` element
    paths: Vec<usize>,
    /// `sodipodi:namedview` elements that are direct children of the root
    named_views: Vec<NamedView>,
    /// Name of the first element carrying a `transform` attribute
    transformed: Option<String>,
}

fn bound_to(ns: &ResolveResult<'_>, uri: &str) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(n)) if *n == uri.as_bytes())
}

impl SvgDocument {
    /// Parse an SVG document from a string
    pub fn parse(xml: &str) -> std::result::Result<Self, DocumentError> {
        let mut reader = NsReader::from_str(xml);
        let mut doc = SvgDocument::default();
        let mut depth = 0usize;

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let is_svg = bound_to(&ns, SVG_NS);
            let is_sodipodi = bound_to(&ns, SODIPODI_NS);

            match &event {
                Event::Start(e) | Event::Empty(e) => {
                    let index = doc.events.len();
                    let local = e.local_name();

                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        if attr.key.as_ref() == b"transform" && doc.transformed.is_none() {
                            doc.transformed =
                                Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                        }
                    }

                    if is_svg && local.as_ref() == b"path" {
                        doc.paths.push(index);
                    }

                    if is_sodipodi && local.as_ref() == b"namedview" && depth == 1 {
                        let mut units_key = None;
                        for attr in e.attributes().flatten() {
                            let (attr_ns, attr_local) = reader.resolve_attribute(attr.key);
                            if bound_to(&attr_ns, INKSCAPE_NS)
                                && attr_local.as_ref() == b"document-units"
                            {
                                units_key = Some(attr.key.as_ref().to_vec());
                            }
                        }
                        let (prefix_ns, _) = reader.resolve_attribute(QName(DOCUMENT_UNITS_ATTR));
                        doc.named_views.push(NamedView {
                            event: index,
                            units_key,
                            inkscape_bound: bound_to(&prefix_ns, INKSCAPE_NS),
                        });
                    }

                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }

            doc.events.push(event.into_owned());
        }

        Ok(doc)
    }

    /// Read and parse an SVG file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        SvgDocument::parse(&xml).map_err(|e| Error::malformed(path, e))
    }

    /// Serialize the document back to XML
    pub fn serialize(&self) -> std::result::Result<String, DocumentError> {
        let mut writer = Writer::new(Vec::new());
        for event in &self.events {
            writer
                .write_event(event.borrow())
                .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| DocumentError::Serialize(e.to_string()))
    }

    /// Write the document to a file, replacing it if it exists
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let xml = self.serialize().map_err(|e| Error::malformed(path, e))?;
        fs::write(path, xml).map_err(|e| Error::io(path, e))
    }

    /// Number of SVG `path` elements in the document
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Set the id and stroke width of the document's only path.
    ///
    /// Fails when the document does not hold exactly one path, when any
    /// element has a `transform`, or when there is not exactly one top-level
    /// `sodipodi:namedview`, or when the path has no valid `style`. The
    /// document units are switched to millimeters.
    pub fn patch(
        &mut self,
        path_id: &str,
        stroke_width: &str,
    ) -> std::result::Result<(), DocumentError> {
        let path = self.single_path()?;
        if let Some(element) = &self.transformed {
            return Err(DocumentError::UnsupportedTransform(element.clone()));
        }
        self.single_named_view()?;
        let mut style = self.path_style()?;
        self.set_document_units("mm")?;

        style.set("stroke-width", stroke_width);
        self.set_attribute(path, b"style", &style.to_string());
        self.set_attribute(path, b"id", path_id);
        Ok(())
    }

    /// Value of an attribute on the only path element
    pub fn path_attribute(&self, name: &str) -> std::result::Result<Option<String>, DocumentError> {
        let path = self.single_path()?;
        self.attribute(path, name.as_bytes())
    }

    /// Parsed `style` of the only path element
    pub fn path_style(&self) -> std::result::Result<StyleMap, DocumentError> {
        let raw = self
            .path_attribute("style")?
            .ok_or(DocumentError::MissingStyle)?;
        StyleMap::parse(&raw)
    }

    /// The `inkscape:document-units` value of the namedview, if set
    pub fn document_units(&self) -> std::result::Result<Option<String>, DocumentError> {
        let view = self.single_named_view()?;
        match &view.units_key {
            Some(key) => self.attribute(view.event, key),
            None => Ok(None),
        }
    }

    fn single_path(&self) -> std::result::Result<usize, DocumentError> {
        match self.paths.as_slice() {
            [] => Err(DocumentError::PathNotFound),
            [path] => Ok(*path),
            paths => Err(DocumentError::AmbiguousPath(paths.len())),
        }
    }

    fn single_named_view(&self) -> std::result::Result<&NamedView, DocumentError> {
        match self.named_views.as_slice() {
            [view] => Ok(view),
            views => Err(DocumentError::NamedViewCount(views.len())),
        }
    }

    fn set_document_units(&mut self, units: &str) -> std::result::Result<(), DocumentError> {
        let view = self.single_named_view()?.clone();
        let key = match view.units_key {
            Some(key) => key,
            None => {
                if !view.inkscape_bound {
                    self.set_attribute(view.event, b"xmlns:inkscape", INKSCAPE_NS);
                }
                DOCUMENT_UNITS_ATTR.to_vec()
            }
        };
        self.set_attribute(view.event, &key, units);
        if let Some(view) = self.named_views.first_mut() {
            view.units_key = Some(key);
            view.inkscape_bound = true;
        }
        Ok(())
    }

    fn start(&self, index: usize) -> Option<&BytesStart<'static>> {
        match self.events.get(index)? {
            Event::Start(e) | Event::Empty(e) => Some(e),
            _ => None,
        }
    }

    fn attribute(
        &self,
        index: usize,
        key: &[u8],
    ) -> std::result::Result<Option<String>, DocumentError> {
        let Some(start) = self.start(index) else {
            return Ok(None);
        };
        for attr in start.attributes().flatten() {
            if attr.key.as_ref() == key {
                let raw = String::from_utf8_lossy(&attr.value);
                return Ok(Some(unescape(&raw)?.into_owned()));
            }
        }
        Ok(None)
    }

    /// Replace an attribute value, or append the attribute when missing
    fn set_attribute(&mut self, index: usize, key: &[u8], value: &str) {
        let Some(Event::Start(start) | Event::Empty(start)) = self.events.get_mut(index) else {
            return;
        };
        let escaped = escape(value);
        let mut attrs: Vec<(Vec<u8>, Vec<u8>)> = start
            .attributes()
            .flatten()
            .map(|attr| (attr.key.as_ref().to_vec(), attr.value.to_vec()))
            .collect();

        match attrs.iter_mut().find(|(k, _)| k == key) {
            Some(attr) => attr.1 = escaped.as_bytes().to_vec(),
            None => attrs.push((key.to_vec(), escaped.as_bytes().to_vec())),
        }

        start.clear_attributes();
        for (k, v) in &attrs {
            start.push_attribute(Attribute::from((k.as_slice(), v.as_slice())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="50mm" height="50mm" viewBox="0 0 50 50">
  <sodipodi:namedview id="namedview1" inkscape:document-units="px"/>
  <g id="layer1">
    <path id="path1" d="M 10,10 L 40,10 L 25,40 Z" style="fill:none;stroke:#000;stroke-width:1"/>
  </g>
</svg>"#;

    #[test]
    fn test_parse_counts_paths() {
        let doc = SvgDocument::parse(SIMPLE).unwrap();
        assert_eq!(doc.path_count(), 1);
        assert_eq!(doc.path_attribute("id").unwrap().as_deref(), Some("path1"));
    }

    #[test]
    fn test_patch_sets_width_and_id() {
        let mut doc = SvgDocument::parse(SIMPLE).unwrap();
        doc.patch("path_1p", "0.45").unwrap();

        let style = doc.path_style().unwrap();
        assert_eq!(style.get("stroke-width"), Some("0.45"));
        assert_eq!(style.get("fill"), Some("none"));
        assert_eq!(style.get("stroke"), Some("#000"));
        assert_eq!(doc.path_attribute("id").unwrap().as_deref(), Some("path_1p"));
        assert_eq!(doc.document_units().unwrap().as_deref(), Some("mm"));
    }

    #[test]
    fn test_serialize_keeps_untouched_content() {
        let doc = SvgDocument::parse(SIMPLE).unwrap();
        assert_eq!(doc.serialize().unwrap(), SIMPLE);
    }

    #[test]
    fn test_patched_document_reparses() {
        let mut doc = SvgDocument::parse(SIMPLE).unwrap();
        doc.patch("path_2p", "1.14").unwrap();
        let xml = doc.serialize().unwrap();
        assert!(xml.contains(r#"style="fill:none;stroke:#000;stroke-width:1.14""#));
        assert!(xml.contains(r#"d="M 10,10 L 40,10 L 25,40 Z""#));

        let reparsed = SvgDocument::parse(&xml).unwrap();
        assert_eq!(
            reparsed.path_attribute("id").unwrap().as_deref(),
            Some("path_2p")
        );
    }

    #[test]
    fn test_units_attribute_added_when_missing() {
        let xml = SIMPLE.replace(r#" inkscape:document-units="px""#, "");
        let mut doc = SvgDocument::parse(&xml).unwrap();
        assert_eq!(doc.document_units().unwrap(), None);
        doc.patch("path_1p", "0.45").unwrap();
        assert_eq!(doc.document_units().unwrap().as_deref(), Some("mm"));
        let out = doc.serialize().unwrap();
        assert!(out.contains(r#"inkscape:document-units="mm""#));
        assert_eq!(out.matches("xmlns:inkscape=").count(), 1);
    }

    #[test]
    fn test_units_without_inkscape_namespace_declares_it() {
        let xml = SIMPLE
            .replace(r#" inkscape:document-units="px""#, "")
            .replace(
                "\n     xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\"",
                "",
            );
        assert!(!xml.contains("xmlns:inkscape"));
        let mut doc = SvgDocument::parse(&xml).unwrap();
        doc.patch("path_1p", "0.45").unwrap();

        let out = doc.serialize().unwrap();
        assert!(out.contains(
            r#"<sodipodi:namedview id="namedview1" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" inkscape:document-units="mm"/>"#
        ));
        let reparsed = SvgDocument::parse(&out).unwrap();
        assert_eq!(reparsed.document_units().unwrap().as_deref(), Some("mm"));
    }

    #[test]
    fn test_missing_style_is_error() {
        let xml = SIMPLE.replace(r#" style="fill:none;stroke:#000;stroke-width:1""#, "");
        let mut doc = SvgDocument::parse(&xml).unwrap();
        let err = doc.patch("path_3p", "1.57").unwrap_err();
        assert!(matches!(err, DocumentError::MissingStyle));
        assert_eq!(doc.path_attribute("id").unwrap().as_deref(), Some("path1"));
    }

    #[test]
    fn test_trailing_semicolon_in_style_is_error() {
        let xml = SIMPLE.replace("stroke-width:1\"", "stroke-width:1;\"");
        let mut doc = SvgDocument::parse(&xml).unwrap();
        let err = doc.patch("path_1p", "0.45").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidStyle(_)));
    }

    #[test]
    fn test_path_in_foreign_namespace_is_ignored() {
        let xml = SIMPLE.replace(
            "<g id=\"layer1\">",
            "<g id=\"layer1\"><x:path xmlns:x=\"urn:other\" d=\"M 0,0\"/>",
        );
        let doc = SvgDocument::parse(&xml).unwrap();
        assert_eq!(doc.path_count(), 1);
    }

    #[test]
    fn test_nested_namedview_is_not_counted() {
        let xml = SIMPLE.replace(
            "<g id=\"layer1\">",
            "<g id=\"layer1\"><sodipodi:namedview id=\"nested\"/>",
        );
        let mut doc = SvgDocument::parse(&xml).unwrap();
        assert!(doc.patch("path_1p", "0.45").is_ok());
    }

    #[test]
    fn test_escaped_attribute_values() {
        let xml = SIMPLE.replace(
            "fill:none;stroke:#000",
            "fill:none;font-family:&quot;Sans&quot;;stroke:#000",
        );
        let mut doc = SvgDocument::parse(&xml).unwrap();
        assert_eq!(doc.path_style().unwrap().get("font-family"), Some("\"Sans\""));
        doc.patch("path_1p", "0.45").unwrap();
        let out = doc.serialize().unwrap();
        assert!(out.contains("font-family:&quot;Sans&quot;"));
    }

    #[test]
    fn test_broken_xml_is_error() {
        let err = SvgDocument::parse("<svg><path></svg>").unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }
}
