//! XML helpers shared by the SOAP transport, the descriptor builder and the
//! response accessors.
//!
//! Only a handful of fixed fields are ever read from responses, so every read
//! goes through [`extract_xml_text`]: a forgiving event scan that stops at the
//! first matching element and ignores mismatched end tags elsewhere in the body.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

// ─────────────────────────────────────────────────────────────────────────────
// XML Parsing Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Extracts the raw text content of the first `element_name` element.
///
/// The element is matched by its local name (namespace prefix ignored), ASCII
/// case-insensitively. A self-closing element yields an empty string. The
/// content is returned exactly as it appears (entities are NOT decoded).
///
/// # Arguments
/// * `xml` - The XML string to search
/// * `element_name` - Local name of the element, without namespace prefix
///
/// # Example
/// ```ignore
/// let xml = r#"<u:Resp><CurrentTransportState>PLAYING</CurrentTransportState></u:Resp>"#;
/// assert_eq!(extract_xml_text(xml, "currenttransportstate"), Some("PLAYING".to_string()));
/// ```
pub fn extract_xml_text(xml: &str, element_name: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = false;
    let target = element_name.as_bytes();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref().eq_ignore_ascii_case(target) => {
                let end = e.to_end().into_owned();
                return reader.read_text(end.name()).ok().map(|text| text.into_owned());
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref().eq_ignore_ascii_case(target) => {
                return Some(String::new());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// Like [`extract_xml_text`], with XML/HTML entities decoded and surrounding
/// whitespace trimmed.
pub fn extract_xml_text_decoded(xml: &str, element_name: &str) -> Option<String> {
    extract_xml_text(xml, element_name)
        .map(|raw| html_escape::decode_html_entities(raw.trim()).into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// XML Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes XML special characters for embedding in XML content.
///
/// All five reserved characters are escaped:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&apos;`
///
/// Used for SOAP arguments and DIDL-Lite values.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_xml("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape_xml("<title>"), "&lt;title&gt;");
/// ```
pub fn escape_xml(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_element() {
        let xml = "<u:GetTransportInfoResponse><CurrentTransportState>PLAYING</CurrentTransportState></u:GetTransportInfoResponse>";
        assert_eq!(
            extract_xml_text(xml, "CurrentTransportState"),
            Some("PLAYING".to_string())
        );
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        let xml = "<ERRORCODE>714</ERRORCODE>";
        assert_eq!(extract_xml_text(xml, "errorCode"), Some("714".to_string()));
    }

    #[test]
    fn prefix_sharing_tags_are_not_confused() {
        let xml = "<CurrentURIMetaData>meta</CurrentURIMetaData><CurrentURI>http://x/y</CurrentURI>";
        assert_eq!(
            extract_xml_text(xml, "CurrentURI"),
            Some("http://x/y".to_string())
        );
        assert_eq!(
            extract_xml_text(xml, "CurrentURIMetaData"),
            Some("meta".to_string())
        );
    }

    #[test]
    fn attributes_and_self_closing_tags() {
        assert_eq!(
            extract_xml_text(r#"<Volume channel="Master">42</Volume>"#, "Volume"),
            Some("42".to_string())
        );
        assert_eq!(extract_xml_text("<CurrentURI/>", "CurrentURI"), Some(String::new()));
        assert_eq!(
            extract_xml_text(r#"<CurrentURI a="b" />"#, "CurrentURI"),
            Some(String::new())
        );
    }

    #[test]
    fn matches_local_name_ignoring_prefix() {
        let xml = r#"<s:Body><u:GetVolumeResponse xmlns:u="urn:x"><u:CurrentVolume>42</u:CurrentVolume></u:GetVolumeResponse></s:Body>"#;
        assert_eq!(
            extract_xml_text(xml, "CurrentVolume"),
            Some("42".to_string())
        );
    }

    #[test]
    fn mismatched_end_tags_before_the_element_are_tolerated() {
        let xml = "<a><b></a><errorCode>701</errorCode>";
        assert_eq!(extract_xml_text(xml, "errorCode"), Some("701".to_string()));
    }

    #[test]
    fn missing_or_unterminated_element_is_none() {
        assert_eq!(extract_xml_text("<a>1</a>", "b"), None);
        assert_eq!(extract_xml_text("<b>1", "b"), None);
    }

    #[test]
    fn raw_text_keeps_entities_decoded_variant_does_not() {
        let xml = "<CurrentURI> http://h/s?a=1&amp;b=2 </CurrentURI>";
        assert_eq!(
            extract_xml_text(xml, "CurrentURI"),
            Some(" http://h/s?a=1&amp;b=2 ".to_string())
        );
        assert_eq!(
            extract_xml_text_decoded(xml, "CurrentURI"),
            Some("http://h/s?a=1&b=2".to_string())
        );
    }

    #[test]
    fn escape_xml_escapes_all_reserved_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }
}
