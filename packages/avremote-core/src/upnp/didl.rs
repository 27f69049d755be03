//! DIDL-Lite metadata for `SetAVTransportURI`.
//!
//! Strict renderers refuse a transport URI (UPnP error 714) unless it comes
//! with a content description naming its MIME type. This module infers that
//! MIME type and renders the minimal single-item document they accept.

use reqwest::Url;

use crate::protocol_constants::{
    AUDIO_ITEM_CLASS, DC_NS, DIDL_LITE_NS, FALLBACK_MIME_TYPE, UPNP_METADATA_NS,
};
use crate::upnp::utils::escape_xml;

/// Path suffix → MIME type. Checked in order against the lowercased URI path.
const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    (".mp3", "audio/mpeg"),
    (".aac", "audio/aac"),
    (".m4a", "audio/aac"),
    (".aacp", "audio/aacp"),
    (".flac", "audio/flac"),
    (".wav", "audio/wav"),
    (".ogg", "audio/ogg"),
    (".oga", "audio/ogg"),
    (".m3u", "audio/mpegurl"),
    (".m3u8", "audio/mpegurl"),
    (".pls", "audio/x-scpls"),
];

/// Determines the MIME type to announce for a stream URI.
///
/// An explicit, non-blank MIME type is used verbatim. Otherwise the URI path
/// extension is looked up in a fixed table; unknown extensions and
/// unparsable URIs fall back to `audio/mpeg`.
#[must_use]
pub fn infer_mime_type(uri: &str, explicit_mime: Option<&str>) -> String {
    if let Some(mime) = explicit_mime.filter(|m| !m.trim().is_empty()) {
        return mime.to_string();
    }

    let Ok(url) = Url::parse(uri) else {
        return FALLBACK_MIME_TYPE.to_string();
    };
    let path = url.path().to_ascii_lowercase();

    MIME_BY_EXTENSION
        .iter()
        .find(|(ext, _)| path.ends_with(ext))
        .map_or(FALLBACK_MIME_TYPE, |(_, mime)| mime)
        .to_string()
}

/// Renders the content description for a stream, ready to be used as the
/// `CurrentURIMetaData` argument.
///
/// Title and URI are entity-escaped inside the document. The document as a
/// whole is then escaped once more: receivers read the argument as
/// pre-escaped text, so a single unescape must yield well-formed DIDL-Lite.
///
/// # Arguments
/// * `uri` - The stream URL (placed in `<res>`)
/// * `title` - Display title (`dc:title`)
/// * `mime` - MIME type encoded as `http-get:*:<mime>:*`
pub fn build_descriptor(uri: &str, title: &str, mime: &str) -> String {
    log::debug!("[DIDL] title={:?}, mime={}, uri={}", title, mime, uri);

    let mut didl = format!(
        r#"<DIDL-Lite xmlns="{}" xmlns:dc="{}" xmlns:upnp="{}">"#,
        DIDL_LITE_NS, DC_NS, UPNP_METADATA_NS
    );
    didl.push_str(r#"<item id="0" parentID="-1" restricted="1">"#);
    didl.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    didl.push_str(&format!("<upnp:class>{}</upnp:class>", AUDIO_ITEM_CLASS));
    didl.push_str(&format!(
        r#"<res protocolInfo="http-get:*:{}:*">{}</res>"#,
        escape_xml(mime),
        escape_xml(uri)
    ));
    didl.push_str("</item>");
    didl.push_str("</DIDL-Lite>");

    escape_xml(&didl)
}

#[cfg(test)]
mod tests {
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    use super::*;

    #[test]
    fn known_extensions_map_to_table_values() {
        let cases = [
            ("http://h/a.mp3", "audio/mpeg"),
            ("http://h/a.aac", "audio/aac"),
            ("http://h/a.m4a", "audio/aac"),
            ("http://h/a.aacp", "audio/aacp"),
            ("http://h/a.flac", "audio/flac"),
            ("http://h/a.wav", "audio/wav"),
            ("http://h/a.ogg", "audio/ogg"),
            ("http://h/a.oga", "audio/ogg"),
            ("http://h/list.m3u", "audio/mpegurl"),
            ("http://h/live.m3u8", "audio/mpegurl"),
            ("http://h/radio.pls", "audio/x-scpls"),
        ];
        for (uri, mime) in cases {
            assert_eq!(infer_mime_type(uri, None), mime, "uri: {uri}");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive_and_ignores_query() {
        assert_eq!(infer_mime_type("http://h/A.FLAC?token=1", None), "audio/flac");
        assert_eq!(infer_mime_type("http://h/a.ogg#frag", None), "audio/ogg");
    }

    #[test]
    fn unknown_or_unparsable_uris_fall_back_to_mpeg() {
        assert_eq!(infer_mime_type("http://stream/y", None), "audio/mpeg");
        assert_eq!(infer_mime_type("http://h/a.txt", None), "audio/mpeg");
        assert_eq!(infer_mime_type("not a uri.flac", None), "audio/mpeg");
        assert_eq!(infer_mime_type("", None), "audio/mpeg");
    }

    #[test]
    fn explicit_mime_wins() {
        assert_eq!(
            infer_mime_type("http://h/a.mp3", Some("audio/L16;rate=44100")),
            "audio/L16;rate=44100"
        );
        assert_eq!(infer_mime_type("http://h/a.flac", Some("  ")), "audio/flac");
    }

    /// Checks that `xml` parses without error and returns the `protocolInfo` of `<res>`.
    fn parse_protocol_info(xml: &str) -> Option<Vec<u8>> {
        let mut reader = Reader::from_str(xml);
        let mut protocol_info = None;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"res" => {
                    protocol_info = e
                        .try_get_attribute("protocolInfo")
                        .ok()
                        .flatten()
                        .map(|a| a.value.into_owned());
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("descriptor is not well-formed: {e}"),
            }
        }
        protocol_info
    }

    #[test]
    fn descriptor_is_escaped_one_level_deeper() {
        let out = build_descriptor("http://h/s?a=1&b=2", "Tom & Jerry <Live>", "audio/flac");

        // No raw markup survives at the outer level
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
        assert!(out.starts_with("&lt;DIDL-Lite"));

        let inner = html_escape::decode_html_entities(&out).into_owned();
        assert!(inner.starts_with("<DIDL-Lite"));
        assert!(inner.contains("<dc:title>Tom &amp; Jerry &lt;Live&gt;</dc:title>"));
        assert!(inner.contains("<upnp:class>object.item.audioItem</upnp:class>"));
        assert!(inner.contains(">http://h/s?a=1&amp;b=2</res>"));
        assert!(inner.contains(r#"xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/""#));
        assert!(inner.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
        assert!(inner.contains(r#"xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/""#));

        assert_eq!(
            parse_protocol_info(&inner),
            Some(b"http-get:*:audio/flac:*".to_vec())
        );
    }

    #[test]
    fn descriptor_for_fallback_mime() {
        let mime = infer_mime_type("http://stream/y", None);
        let inner = html_escape::decode_html_entities(&build_descriptor(
            "http://stream/y",
            "Spotify",
            &mime,
        ))
        .into_owned();
        assert_eq!(
            parse_protocol_info(&inner),
            Some(b"http-get:*:audio/mpeg:*".to_vec())
        );
        assert!(inner.contains("<dc:title>Spotify</dc:title>"));
    }
}
