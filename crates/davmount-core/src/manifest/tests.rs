use super::*;

fn manifest(body: &str) -> String {
    format!(r#"<mount xmlns="{}">{}</mount>"#, MANIFEST_NS, body)
}

#[test]
fn extracts_url_and_open() {
    let xml = manifest("<url>http://example.com/dav</url><open>docs/a.txt</open>");
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "http://example.com/dav");
    assert_eq!(r.open_target, "docs/a.txt");
}

#[test]
fn pretty_printed_manifest_with_prefix() {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<dm:mount xmlns:dm="http://purl.org/NET/webdav/mount">
  <!-- generated -->
  <dm:url>https://files.example.org/remote.php/webdav/</dm:url>
  <dm:open>Shared/plan.ods</dm:open>
</dm:mount>
"#;
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "https://files.example.org/remote.php/webdav/");
    assert_eq!(r.open_target, "Shared/plan.ods");
}

#[test]
fn latin1_manifest_is_decoded() {
    let xml: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
<mount xmlns=\"http://purl.org/NET/webdav/mount\">\
<url>http://example.com/dav</url><open>caf\xe9.txt</open></mount>";
    let r = parse_manifest(xml).unwrap();
    assert_eq!(r.mount_base, "http://example.com/dav");
    assert_eq!(r.open_target, "caf\u{e9}.txt");
}

#[test]
fn duplicate_attribute_is_malformed() {
    let xml = format!(
        r#"<mount xmlns="{}" a="1" a="2"><url>http://h/</url><open>x</open></mount>"#,
        MANIFEST_NS
    );
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::MalformedXml(_))
    ));
}

#[test]
fn duplicate_url_last_wins() {
    let xml = manifest(
        "<url>http://first.example.com/</url>\
         <open>a.txt</open>\
         <url>http://second.example.com/</url>",
    );
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "http://second.example.com/");
}

#[test]
fn duplicate_open_last_wins() {
    let xml = manifest("<open>one.txt</open><url>http://h/</url><open>two.txt</open>");
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.open_target, "two.txt");
}

#[test]
fn unknown_elements_and_attributes_ignored() {
    let xml = format!(
        r#"<mount xmlns="{ns}" version="2"><title>Team share</title><url kind="x">http://h/</url><open>p</open><extra xmlns="urn:other"><url>http://evil/</url></extra></mount>"#,
        ns = MANIFEST_NS
    );
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "http://h/");
    assert_eq!(r.open_target, "p");
}

#[test]
fn children_in_other_namespace_do_not_count() {
    let xml = format!(
        r#"<mount xmlns="{ns}" xmlns:o="urn:other"><o:url>http://h/</o:url><open>p</open></mount>"#,
        ns = MANIFEST_NS
    );
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::IncompleteManifest)
    ));
}

#[test]
fn nested_url_is_not_a_direct_child() {
    let xml = manifest("<group><url>http://h/</url></group><open>p</open>");
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::IncompleteManifest)
    ));
}

#[test]
fn missing_open_is_incomplete() {
    let xml = manifest("<url>http://h/</url>");
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::IncompleteManifest)
    ));
}

#[test]
fn missing_url_is_incomplete() {
    let xml = manifest("<open>p</open>");
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::IncompleteManifest)
    ));
}

#[test]
fn wrong_root_name_is_schema_mismatch() {
    let xml = format!(
        r#"<mnt xmlns="{}"><url>http://h/</url><open>p</open></mnt>"#,
        MANIFEST_NS
    );
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::SchemaMismatch)
    ));
}

#[test]
fn root_name_is_case_sensitive() {
    let xml = format!(
        r#"<Mount xmlns="{}"><url>http://h/</url><open>p</open></Mount>"#,
        MANIFEST_NS
    );
    assert!(matches!(
        parse_manifest(xml.as_bytes()),
        Err(RunError::SchemaMismatch)
    ));
}

#[test]
fn wrong_or_missing_namespace_is_schema_mismatch() {
    for xml in [
        r#"<mount xmlns="urn:not-it"><url>http://h/</url><open>p</open></mount>"#,
        r#"<mount><url>http://h/</url><open>p</open></mount>"#,
    ] {
        assert!(matches!(
            parse_manifest(xml.as_bytes()),
            Err(RunError::SchemaMismatch)
        ));
    }
}

#[test]
fn namespace_case_is_ignored() {
    let xml = r#"<mount xmlns="HTTP://purl.org/net/WEBDAV/mount"><url>http://h/</url><open>p</open></mount>"#;
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "http://h/");
}

#[test]
fn empty_root_is_empty_document() {
    for xml in [
        format!(r#"<mount xmlns="{}"/>"#, MANIFEST_NS),
        format!("<mount xmlns=\"{}\">\n   \n</mount>", MANIFEST_NS),
        String::new(),
    ] {
        assert!(matches!(
            parse_manifest(xml.as_bytes()),
            Err(RunError::EmptyDocument)
        ));
    }
}

#[test]
fn empty_check_runs_before_schema_check() {
    assert!(matches!(
        parse_manifest(b"<something-else/>"),
        Err(RunError::EmptyDocument)
    ));
}

#[test]
fn malformed_xml_is_distinct_from_schema_errors() {
    assert!(matches!(
        parse_manifest(b"<mount><url>http://h/</mount>"),
        Err(RunError::MalformedXml(_))
    ));
    assert!(matches!(
        parse_manifest(b"not xml at all"),
        Err(RunError::MalformedXml(_))
    ));
}

#[test]
fn text_content_is_not_trimmed() {
    let xml = manifest("<url>http://h/</url><open> spaced name.txt</open>");
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.open_target, " spaced name.txt");
}

#[test]
fn empty_url_element_is_captured_as_empty() {
    let xml = manifest("<url/><open>p</open>");
    let r = parse_manifest(xml.as_bytes()).unwrap();
    assert_eq!(r.mount_base, "");
}
