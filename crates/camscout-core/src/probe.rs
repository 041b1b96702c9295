//! WS-Discovery Probe message construction.
//!
//! Pure construction, no network side effects. Every envelope must be built
//! with a fresh message ID because responders may treat MessageID as a
//! deduplication key.

use std::collections::BTreeMap;

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// WS-Addressing namespace.
pub const WSA_NAMESPACE: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";

/// WS-Discovery namespace.
pub const WSD_NAMESPACE: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery";

/// SOAP 1.2 envelope namespace.
pub const SOAP_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Action URI of the Probe message.
pub const PROBE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe";

/// Anonymous reply-to role of WS-Addressing.
pub const ANONYMOUS_ROLE: &str =
    "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

/// Adhoc discovery target URN.
pub const DISCOVERY_TARGET: &str = "urn:schemas-xmlsoap-org:ws:2005:04:discovery";

/// Build a serialized WS-Discovery Probe envelope.
///
/// `message_id` must be unique per send (a fresh v4 UUID); it is emitted as
/// `uuid:<message_id>`. `types` and `scopes` are space-joined into the
/// optional `d:Types` / `d:Scopes` body children; empty slices emit no
/// element at all. Every entry of `namespaces` becomes an `xmlns:<prefix>`
/// declaration on the `d:Types` element so type tokens can use the prefixes.
pub fn build_probe_message(
    message_id: &str,
    scopes: &[String],
    types: &[String],
    namespaces: &BTreeMap<String, String>,
) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("s:Envelope")
        .with_attributes([
            ("xmlns:s", SOAP_NAMESPACE),
            ("xmlns:a", WSA_NAMESPACE),
        ])
        .write_inner_content(|writer| -> quick_xml::Result<()> {
            write_header(writer, message_id)?;
            write_body(writer, scopes, types, namespaces)?;
            Ok(())
        })?;

    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_header(writer: &mut Writer<Vec<u8>>, message_id: &str) -> quick_xml::Result<()> {
    writer
        .create_element("s:Header")
        .write_inner_content(|writer| -> quick_xml::Result<()> {
            writer
                .create_element("a:Action")
                .with_attribute(("mustUnderstand", "1"))
                .write_text_content(BytesText::new(PROBE_ACTION))?;

            let message_id = format!("uuid:{}", message_id);
            writer
                .create_element("a:MessageID")
                .write_text_content(BytesText::new(&message_id))?;

            writer
                .create_element("a:ReplyTo")
                .write_inner_content(|writer| -> quick_xml::Result<()> {
                    writer
                        .create_element("a:Address")
                        .write_text_content(BytesText::new(ANONYMOUS_ROLE))?;
                    Ok(())
                })?;

            writer
                .create_element("a:To")
                .with_attribute(("mustUnderstand", "1"))
                .write_text_content(BytesText::new(DISCOVERY_TARGET))?;
            Ok(())
        })?;
    Ok(())
}

fn write_body(
    writer: &mut Writer<Vec<u8>>,
    scopes: &[String],
    types: &[String],
    namespaces: &BTreeMap<String, String>,
) -> quick_xml::Result<()> {
    writer
        .create_element("s:Body")
        .write_inner_content(|writer| -> quick_xml::Result<()> {
            writer
                .create_element("Probe")
                .with_attribute(("xmlns", WSD_NAMESPACE))
                .write_inner_content(|writer| -> quick_xml::Result<()> {
                    if !types.is_empty() {
                        let mut element = writer.create_element("d:Types");
                        for (prefix, uri) in namespaces {
                            let declaration = format!("xmlns:{}", prefix);
                            element =
                                element.with_attribute((declaration.as_str(), uri.as_str()));
                        }
                        element
                            .with_attribute(("xmlns:d", WSD_NAMESPACE))
                            .write_text_content(BytesText::new(&types.join(" ")))?;
                    }

                    if !scopes.is_empty() {
                        writer
                            .create_element("d:Scopes")
                            .write_text_content(BytesText::new(&scopes.join(" ")))?;
                    }
                    Ok(())
                })?;
            Ok(())
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            "dn".to_string(),
            "http://www.onvif.org/ver10/network/wsdl".to_string(),
        );
        map
    }

    #[test]
    fn test_probe_contains_single_message_id() {
        let envelope = build_probe_message(
            "4b9cbf0e-7d26-4d6e-9d0d-2db4a1f1b6a4",
            &[],
            &["dn:NetworkVideoTransmitter".to_string()],
            &namespaces(),
        )
        .unwrap();

        let needle = "uuid:4b9cbf0e-7d26-4d6e-9d0d-2db4a1f1b6a4";
        assert_eq!(envelope.matches(needle).count(), 1);
        assert_eq!(envelope.matches("<a:MessageID>").count(), 1);
    }

    #[test]
    fn test_probe_header_fields() {
        let envelope =
            build_probe_message("abc", &[], &[], &BTreeMap::new()).unwrap();

        assert!(envelope.contains(PROBE_ACTION));
        assert!(envelope.contains(ANONYMOUS_ROLE));
        assert!(envelope.contains(DISCOVERY_TARGET));
        assert_eq!(envelope.matches("mustUnderstand=\"1\"").count(), 2);
    }

    #[test]
    fn test_empty_inputs_omit_body_children() {
        let envelope =
            build_probe_message("abc", &[], &[], &BTreeMap::new()).unwrap();

        assert!(!envelope.contains("d:Types"));
        assert!(!envelope.contains("d:Scopes"));
        assert!(envelope.contains("<Probe"));
    }

    #[test]
    fn test_types_carry_namespace_declarations() {
        let envelope = build_probe_message(
            "abc",
            &[],
            &["dn:NetworkVideoTransmitter".to_string()],
            &namespaces(),
        )
        .unwrap();

        assert!(envelope.contains("xmlns:dn=\"http://www.onvif.org/ver10/network/wsdl\""));
        assert!(envelope.contains(&format!("xmlns:d=\"{}\"", WSD_NAMESPACE)));
        assert!(envelope.contains(">dn:NetworkVideoTransmitter</d:Types>"));
    }

    #[test]
    fn test_scopes_are_space_joined() {
        let envelope = build_probe_message(
            "abc",
            &[
                "onvif://www.onvif.org/location/Lobby".to_string(),
                "onvif://www.onvif.org/name/Cam".to_string(),
            ],
            &[],
            &BTreeMap::new(),
        )
        .unwrap();

        assert!(envelope.contains(
            ">onvif://www.onvif.org/location/Lobby onvif://www.onvif.org/name/Cam</d:Scopes>"
        ));
    }

    #[test]
    fn test_different_message_ids_differ() {
        let first =
            build_probe_message("id-one", &[], &[], &BTreeMap::new()).unwrap();
        let second =
            build_probe_message("id-two", &[], &[], &BTreeMap::new()).unwrap();
        assert_ne!(first, second);
    }
}
