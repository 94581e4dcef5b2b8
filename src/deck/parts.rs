//! Office Open XML parts of a presentation package.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;

use super::layout::{emu, SlideSpec, TextBox, SLIDE_HEIGHT_IN, SLIDE_WIDTH_IN};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

/// Relationship id of the first slide in `presentation.xml.rels`
const FIRST_SLIDE_REL: usize = 6;

/// Path of the n-th slide part (1-based)
pub fn slide_part_name(n: usize) -> String {
    format!("ppt/slides/slide{}.xml", n)
}

/// Path of the n-th slide's relationships part (1-based)
pub fn slide_rels_part_name(n: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", n)
}

fn relationships(rels: &[(String, &str, String)]) -> String {
    let mut xml = format!("{}<Relationships xmlns=\"{}\">", XML_DECL, NS_PKG_RELS);
    for (id, kind, target) in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            id, kind, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `[Content_Types].xml`
pub fn content_types(slide_count: usize) -> String {
    let pml = "application/vnd.openxmlformats-officedocument.presentationml";
    let mut xml = format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"{pml}.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"{pml}.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"{pml}.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/presProps.xml\" ContentType=\"{pml}.presProps+xml\"/>\
         <Override PartName=\"/ppt/viewProps.xml\" ContentType=\"{pml}.viewProps+xml\"/>\
         <Override PartName=\"/ppt/tableStyles.xml\" ContentType=\"{pml}.tableStyles+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         <Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
         <Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
        XML_DECL,
        pml = pml
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/{}\" ContentType=\"{}.slide+xml\"/>",
            slide_part_name(n),
            pml
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// `_rels/.rels`
pub fn root_rels() -> String {
    relationships(&[
        ("rId1".to_string(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        ("rId2".to_string(), REL_CORE_PROPS, "docProps/core.xml".to_string()),
        ("rId3".to_string(), REL_EXTENDED_PROPS, "docProps/app.xml".to_string()),
    ])
}

/// `docProps/core.xml`
pub fn core_props(title: &str, created: DateTime<Utc>) -> String {
    let timestamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{}</dc:title><dc:creator>{}</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\
         <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>\
         </cp:coreProperties>",
        XML_DECL,
        xml_text(title),
        env!("CARGO_PKG_NAME"),
        timestamp,
        timestamp
    )
}

/// `docProps/app.xml`
pub fn app_props(slide_count: usize) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
         <Application>{}</Application><PresentationFormat>On-screen Show (16:9)</PresentationFormat>\
         <Slides>{}</Slides></Properties>",
        XML_DECL,
        env!("CARGO_PKG_NAME"),
        slide_count
    )
}

/// `ppt/presentation.xml`
pub fn presentation(slide_count: usize) -> String {
    let mut xml = format!(
        "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" saveSubsetFonts=\"1\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>",
        XML_DECL, NS_A, NS_R, NS_P
    );
    for n in 0..slide_count {
        xml.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + n,
            FIRST_SLIDE_REL + n
        ));
    }
    xml.push_str(&format!(
        "</p:sldIdLst><p:sldSz cx=\"{}\" cy=\"{}\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>",
        emu(SLIDE_WIDTH_IN),
        emu(SLIDE_HEIGHT_IN)
    ));
    xml
}

/// `ppt/_rels/presentation.xml.rels`
pub fn presentation_rels(slide_count: usize) -> String {
    let mut rels = vec![
        ("rId1".to_string(), REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
        ("rId3".to_string(), REL_PRES_PROPS, "presProps.xml".to_string()),
        ("rId4".to_string(), REL_VIEW_PROPS, "viewProps.xml".to_string()),
        ("rId5".to_string(), REL_TABLE_STYLES, "tableStyles.xml".to_string()),
    ];
    for n in 0..slide_count {
        rels.push((
            format!("rId{}", FIRST_SLIDE_REL + n),
            REL_SLIDE,
            format!("slides/slide{}.xml", n + 1),
        ));
    }
    relationships(&rels)
}

/// `ppt/presProps.xml`
pub fn pres_props() -> String {
    format!(
        "{}<p:presentationPr xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"/>",
        XML_DECL, NS_A, NS_R, NS_P
    )
}

/// `ppt/viewProps.xml`
pub fn view_props() -> String {
    format!(
        "{}<p:viewPr xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:gridSpacing cx=\"76200\" cy=\"76200\"/></p:viewPr>",
        XML_DECL, NS_A, NS_R, NS_P
    )
}

/// `ppt/tableStyles.xml`
pub fn table_styles() -> String {
    format!(
        "{}<a:tblStyleLst xmlns:a=\"{}\" def=\"{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}\"/>",
        XML_DECL, NS_A
    )
}

fn empty_shape_tree() -> &'static str {
    "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
     <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
}

/// `ppt/slideMasters/slideMaster1.xml`
pub fn slide_master() -> String {
    format!(
        "{}<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>\
         <p:spTree>{}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
         accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         <p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>\
         </p:sldMaster>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_shape_tree()
    )
}

/// `ppt/slideMasters/_rels/slideMaster1.xml.rels`
pub fn slide_master_rels() -> String {
    relationships(&[
        ("rId1".to_string(), REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "../theme/theme1.xml".to_string()),
    ])
}

/// `ppt/slideLayouts/slideLayout1.xml`
pub fn slide_layout() -> String {
    format!(
        "{}<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" type=\"blank\" preserve=\"1\">\
         <p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_shape_tree()
    )
}

/// `ppt/slideLayouts/_rels/slideLayout1.xml.rels`
pub fn slide_layout_rels() -> String {
    relationships(&[(
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml".to_string(),
    )])
}

/// Relationships of every slide (all slides share the blank layout)
pub fn slide_rels() -> String {
    relationships(&[(
        "rId1".to_string(),
        REL_SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml".to_string(),
    )])
}

/// Escape `text` for element content, dropping characters XML 1.0 forbids.
fn xml_text(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r' | ' '..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
        })
        .collect();
    escape(kept.as_str()).into_owned()
}

fn text_shape(id: usize, name: &str, text: &str, layout: &TextBox) -> String {
    let size = layout.font_pt * 100;
    let bold = if layout.bold { " b=\"1\"" } else { "" };
    let align = if layout.centered {
        "<a:pPr algn=\"ctr\"/>"
    } else {
        ""
    };

    let mut paragraphs = String::new();
    for line in text.split('\n') {
        paragraphs.push_str("<a:p>");
        paragraphs.push_str(align);
        if !line.is_empty() {
            paragraphs.push_str(&format!(
                "<a:r><a:rPr lang=\"en-US\" sz=\"{}\"{} dirty=\"0\"/><a:t>{}</a:t></a:r>",
                size,
                bold,
                xml_text(line)
            ));
        }
        paragraphs.push_str(&format!(
            "<a:endParaRPr lang=\"en-US\" sz=\"{}\"{} dirty=\"0\"/></a:p>",
            size, bold
        ));
    }

    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"{}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody>\
         </p:sp>",
        id,
        name,
        emu(layout.x),
        emu(layout.y),
        emu(layout.w),
        emu(layout.h),
        paragraphs
    )
}

/// `ppt/slides/slideN.xml`
pub fn slide(spec: &SlideSpec) -> String {
    let (heading_box, body_box) = spec.role.boxes();
    format!(
        "{}<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"><p:cSld><p:spTree>{}{}{}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_shape_tree(),
        text_shape(2, "Heading", &spec.heading, &heading_box),
        text_shape(3, "Body", &spec.body, &body_box)
    )
}

/// `ppt/theme/theme1.xml`
pub fn theme() -> String {
    let solid = |clr: &str| format!("<a:solidFill><a:schemeClr val=\"{}\"/></a:solidFill>", clr);
    let line = |w: u32| {
        format!(
            "<a:ln w=\"{}\" cap=\"flat\" cmpd=\"sng\" algn=\"ctr\">{}<a:prstDash val=\"solid\"/></a:ln>",
            w,
            solid("phClr")
        )
    };

    format!(
        "{}<a:theme xmlns:a=\"{}\" name=\"Seminar\"><a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1><a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3><a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5><a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink><a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst>{}{}{}</a:fillStyleLst>\
         <a:lnStyleLst>{}{}{}</a:lnStyleLst>\
         <a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
         <a:bgFillStyleLst>{}{}{}</a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>",
        XML_DECL,
        NS_A,
        solid("phClr"),
        solid("phClr"),
        solid("phClr"),
        line(6350),
        line(12700),
        line(19050),
        solid("phClr"),
        solid("phClr"),
        solid("phClr")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types(3);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide3.xml"));
        assert!(!xml.contains("/ppt/slides/slide4.xml"));
    }

    #[test]
    fn test_presentation_ids_match_rels() {
        let pres = presentation(2);
        let rels = presentation_rels(2);

        assert!(pres.contains("<p:sldId id=\"256\" r:id=\"rId6\"/>"));
        assert!(pres.contains("<p:sldId id=\"257\" r:id=\"rId7\"/>"));
        assert!(rels.contains("Id=\"rId6\""));
        assert!(rels.contains("Target=\"slides/slide2.xml\""));
        assert!(pres.contains("<p:sldSz cx=\"9144000\" cy=\"5143500\"/>"));
    }

    #[test]
    fn test_slide_escapes_and_splits_lines() {
        let spec = SlideSpec::body("Q&A", "first <line>\n\nthird");
        let xml = slide(&spec);

        assert!(xml.contains("<a:t>Q&amp;A</a:t>"));
        assert!(xml.contains("<a:t>first &lt;line&gt;</a:t>"));
        assert!(xml.contains("<a:t>third</a:t>"));
        assert_eq!(xml.matches("<a:p>").count(), 4);
        assert!(xml.contains("sz=\"3200\""));
        assert!(xml.contains("sz=\"1800\""));
    }

    #[test]
    fn test_forbidden_control_chars_are_dropped() {
        let xml = slide(&SlideSpec::body("Bell\u{0007}", "a\u{0000}b\tc\u{FFFF}"));
        assert!(xml.contains("<a:t>Bell</a:t>"));
        assert!(xml.contains("<a:t>ab\tc</a:t>"));
        assert!(!xml.contains('\u{0007}'));

        let core = core_props("Topic\u{001B}", Utc::now());
        assert!(core.contains("<dc:title>Topic</dc:title>"));

        assert_eq!(xml_text("caf\u{00E9} & \u{1F600}"), "caf\u{00E9} &amp; \u{1F600}");
    }

    #[test]
    fn test_title_slide_is_bold_and_centered() {
        let xml = slide(&SlideSpec::title("Diabetes", "Subtitle"));
        assert!(xml.contains("sz=\"4400\" b=\"1\""));
        assert!(xml.contains("<a:pPr algn=\"ctr\"/>"));
        assert!(xml.contains("<a:off x=\"914400\" y=\"914400\"/>"));
    }

    #[test]
    fn test_core_props_timestamp() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let xml = core_props("Heart & Lungs", created);
        assert!(xml.contains("<dc:title>Heart &amp; Lungs</dc:title>"));
        assert!(xml.contains("2024-03-01T12:30:00Z"));
    }
}
