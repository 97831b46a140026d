//! OOXML part names and XML content for a minimal presentation package
//!
//! The fixed parts (master, blank layout, theme, property parts) are the
//! bare structure PowerPoint and LibreOffice need to open a deck; the
//! generated parts carry the slides and their pictures.

use std::fmt::Write as FmtWrite;

pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

// Part names
pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS: &str = "_rels/.rels";
pub(crate) const PRESENTATION: &str = "ppt/presentation.xml";
pub(crate) const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
pub(crate) const SLIDE_MASTER: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const SLIDE_MASTER_RELS: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub(crate) const SLIDE_LAYOUT: &str = "ppt/slideLayouts/slideLayout1.xml";
pub(crate) const SLIDE_LAYOUT_RELS: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub(crate) const THEME: &str = "ppt/theme/theme1.xml";
pub(crate) const PRES_PROPS: &str = "ppt/presProps.xml";
pub(crate) const VIEW_PROPS: &str = "ppt/viewProps.xml";
pub(crate) const TABLE_STYLES: &str = "ppt/tableStyles.xml";
pub(crate) const CORE_PROPS: &str = "docProps/core.xml";
pub(crate) const APP_PROPS: &str = "docProps/app.xml";

/// Fixed relationship IDs in presentation.xml.rels; slides follow them
const PRESENTATION_FIXED_RELS: usize = 5;

/// Slide-level relationship ID of the layout; pictures follow it
pub(crate) const SLIDE_LAYOUT_REL_ID: &str = "rId1";

pub(crate) fn slide_part(number: usize) -> String {
    format!("ppt/slides/slide{number}.xml")
}

pub(crate) fn slide_rels_part(number: usize) -> String {
    format!("ppt/slides/_rels/slide{number}.xml.rels")
}

pub(crate) fn media_part(number: usize, extension: &str) -> String {
    format!("ppt/media/image{number}.{extension}")
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

fn relationship(xml: &mut String, id: &str, kind: &str, target: &str) {
    let _ = write!(
        xml,
        r#"<Relationship Id="{id}" Type="{REL_BASE}/{kind}" Target="{target}"/>"#
    );
}

fn relationships(body: impl FnOnce(&mut String)) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{PKG_REL}">"#);
    body(&mut xml);
    xml.push_str("</Relationships>");
    xml
}

/// `[Content_Types].xml` for `slide_count` slides and the given media
/// `(extension, content type)` defaults
pub(crate) fn content_types_xml(slide_count: usize, media_types: &[(&str, &str)]) -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for (extension, content_type) in media_types {
        let _ = write!(
            xml,
            r#"<Default Extension="{extension}" ContentType="{content_type}"/>"#
        );
    }

    let overrides = [
        (PRESENTATION, CT_PRESENTATION),
        (SLIDE_MASTER, CT_SLIDE_MASTER),
        (SLIDE_LAYOUT, CT_SLIDE_LAYOUT),
        (THEME, CT_THEME),
        (PRES_PROPS, CT_PRES_PROPS),
        (VIEW_PROPS, CT_VIEW_PROPS),
        (TABLE_STYLES, CT_TABLE_STYLES),
        (CORE_PROPS, CT_CORE),
        (APP_PROPS, CT_APP),
    ];
    for (part, content_type) in overrides {
        let _ = write!(
            xml,
            r#"<Override PartName="/{part}" ContentType="{content_type}"/>"#
        );
    }
    for number in 1..=slide_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/{}" ContentType="{CT_SLIDE}"/>"#,
            slide_part(number)
        );
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn root_rels_xml() -> String {
    relationships(|xml| {
        relationship(xml, "rId1", "officeDocument", PRESENTATION);
        let _ = write!(
            xml,
            r#"<Relationship Id="rId2" Type="{PKG_REL}/metadata/core-properties" Target="{CORE_PROPS}"/>"#
        );
        relationship(xml, "rId3", "extended-properties", APP_PROPS);
    })
}

/// Relationship ID of the slide with 1-based `number` in presentation.xml.rels
pub(crate) fn presentation_slide_rel_id(number: usize) -> String {
    format!("rId{}", PRESENTATION_FIXED_RELS + number)
}

pub(crate) fn presentation_rels_xml(slide_count: usize) -> String {
    relationships(|xml| {
        relationship(xml, "rId1", "slideMaster", "slideMasters/slideMaster1.xml");
        relationship(xml, "rId2", "theme", "theme/theme1.xml");
        relationship(xml, "rId3", "presProps", "presProps.xml");
        relationship(xml, "rId4", "viewProps", "viewProps.xml");
        relationship(xml, "rId5", "tableStyles", "tableStyles.xml");
        for number in 1..=slide_count {
            relationship(
                xml,
                &presentation_slide_rel_id(number),
                "slide",
                &format!("slides/slide{number}.xml"),
            );
        }
    })
}

pub(crate) fn presentation_xml(slide_count: usize, width_emu: i64, height_emu: i64) -> String {
    let (notes_cx, notes_cy) = crate::constants::NOTES_SIZE_EMU;
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:presentation xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}" saveSubsetFonts="1">"#
    );
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for number in 1..=slide_count {
            // Slide IDs start at 256
            let _ = write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                255 + number,
                presentation_slide_rel_id(number)
            );
        }
        xml.push_str("</p:sldIdLst>");
    }
    let _ = write!(xml, r#"<p:sldSz cx="{width_emu}" cy="{height_emu}"/>"#);
    let _ = write!(xml, r#"<p:notesSz cx="{notes_cx}" cy="{notes_cy}"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

/// A picture shape on a slide, geometry in EMU
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PictureXml<'a> {
    pub shape_id: u32,
    pub rel_id: &'a str,
    pub description: &'a str,
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

const GROUP_SHAPE_PROPS: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

pub(crate) fn slide_xml(pictures: &[PictureXml<'_>]) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:sld xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}">"#
    );
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);

    for pic in pictures {
        xml.push_str("<p:pic><p:nvPicPr>");
        let _ = write!(
            xml,
            r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
            pic.shape_id,
            pic.shape_id - 1,
            escape_xml(pic.description)
        );
        xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
        xml.push_str("</p:nvPicPr>");

        xml.push_str("<p:blipFill>");
        let _ = write!(xml, r#"<a:blip r:embed="{}"/>"#, pic.rel_id);
        xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
        xml.push_str("</p:blipFill>");

        xml.push_str("<p:spPr><a:xfrm>");
        let _ = write!(xml, r#"<a:off x="{}" y="{}"/>"#, pic.x, pic.y);
        let _ = write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, pic.cx, pic.cy);
        xml.push_str("</a:xfrm>");
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("</p:spPr></p:pic>");
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

/// Relationships of one slide: the layout, then one entry per
/// `(rel_id, media part name)`
pub(crate) fn slide_rels_xml(images: &[(String, String)]) -> String {
    relationships(|xml| {
        relationship(
            xml,
            SLIDE_LAYOUT_REL_ID,
            "slideLayout",
            "../slideLayouts/slideLayout1.xml",
        );
        for (rel_id, media_part) in images {
            // Media parts live under ppt/, slides one level below it
            let target = media_part.trim_start_matches("ppt/");
            relationship(xml, rel_id, "image", &format!("../{target}"));
        }
    })
}

pub(crate) fn slide_master_rels_xml() -> String {
    relationships(|xml| {
        relationship(xml, "rId1", "slideLayout", "../slideLayouts/slideLayout1.xml");
        relationship(xml, "rId2", "theme", "../theme/theme1.xml");
    })
}

pub(crate) fn slide_layout_rels_xml() -> String {
    relationships(|xml| {
        relationship(xml, "rId1", "slideMaster", "../slideMasters/slideMaster1.xml");
    })
}

pub(crate) fn slide_master_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:sldMaster xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}">"#
    );
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" "#,
        r#"accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" "#,
        r#"accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    ));
    xml.push_str(
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
    );
    xml.push_str("<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>");
    xml.push_str("</p:sldMaster>");
    xml
}

pub(crate) fn slide_layout_xml() -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:sldLayout xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}" type="blank" preserve="1">"#
    );
    xml.push_str(r#"<p:cSld name="Blank"><p:spTree>"#);
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

fn solid_fill(xml: &mut String) {
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
}

pub(crate) fn theme_xml() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<a:theme xmlns:a="{NS_DRAWING}" name="Office Theme">"#);
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    let scheme = [
        ("dk2", "44546A"),
        ("lt2", "E7E6E6"),
        ("accent1", "4472C4"),
        ("accent2", "ED7D31"),
        ("accent3", "A5A5A5"),
        ("accent4", "FFC000"),
        ("accent5", "5B9BD5"),
        ("accent6", "70AD47"),
        ("hlink", "0563C1"),
        ("folHlink", "954F72"),
    ];
    for (name, rgb) in scheme {
        let _ = write!(xml, r#"<a:{name}><a:srgbClr val="{rgb}"/></a:{name}>"#);
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    for group in ["majorFont", "minorFont"] {
        let typeface = if group == "majorFont" {
            "Calibri Light"
        } else {
            "Calibri"
        };
        let _ = write!(
            xml,
            r#"<a:{group}><a:latin typeface="{typeface}"/><a:ea typeface=""/><a:cs typeface=""/></a:{group}>"#
        );
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        solid_fill(&mut xml);
    }
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        let _ = write!(xml, r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr">"#);
        solid_fill(&mut xml);
        xml.push_str(r#"<a:prstDash val="solid"/></a:ln>"#);
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    for _ in 0..3 {
        solid_fill(&mut xml);
    }
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements>");
    xml.push_str("<a:objectDefaults/><a:extraClrSchemeLst/>");
    xml.push_str("</a:theme>");
    xml
}

pub(crate) fn pres_props_xml() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}"/>"#)
}

pub(crate) fn view_props_xml() -> String {
    format!(
        r#"{XML_DECL}<p:viewPr xmlns:a="{NS_DRAWING}" xmlns:r="{NS_REL}" xmlns:p="{NS_MAIN}" lastView="sldView"/>"#
    )
}

pub(crate) fn table_styles_xml() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_DRAWING}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(crate) fn core_props_xml(created: &str) -> String {
    format!(
        concat!(
            r#"{}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:title>Presentation</dc:title><dc:creator>pptx-builder</dc:creator>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            r#"</cp:coreProperties>"#,
        ),
        XML_DECL, created, created
    )
}

pub(crate) fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            r#"{}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            r#"<Application>pptx-builder</Application><Slides>{}</Slides></Properties>"#,
        ),
        XML_DECL, slide_count
    )
}
