use svg_studio_core::raster::ensure_xmlns;
use svg_studio_core::{SvgInfo, SvgParser};
use web_sys::{Document, DomParser, Element, SupportedType, XmlSerializer};

use crate::browser_io::js_err;

/// Parses editor text as `image/svg+xml`, adding the SVG namespace when the
/// markup omits it. A document with a
/// `<parsererror>` or a non-`svg` root counts as a parse failure.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DomSvgParser;

impl SvgParser for DomSvgParser {
    fn inspect(&self, markup: &str) -> Option<SvgInfo> {
        let root = parse_root(markup).ok()??;
        Some(SvgInfo {
            width: root.get_attribute("width"),
            height: root.get_attribute("height"),
            view_box: root.get_attribute("viewBox"),
        })
    }
}

fn parse_document(markup: &str) -> Result<Document, String> {
    let parser = DomParser::new().map_err(js_err)?;
    parser
        .parse_from_string(&ensure_xmlns(markup), SupportedType::ImageSvgXml)
        .map_err(js_err)
}

fn parse_root(markup: &str) -> Result<Option<Element>, String> {
    let document = parse_document(markup)?;
    if document.get_elements_by_tag_name("parsererror").length() > 0 {
        return Ok(None);
    }
    Ok(document
        .document_element()
        .filter(|root| root.tag_name().eq_ignore_ascii_case("svg")))
}

/// Replaces the preview pane's children with a live copy of the parsed
/// root. Returns `false` when the markup no longer parses.
pub(crate) fn mount_preview(container: &Element, markup: &str) -> Result<bool, String> {
    container.set_inner_html("");
    let Some(root) = parse_root(markup)? else {
        return Ok(false);
    };
    let document = container
        .owner_document()
        .ok_or_else(|| "preview detached from document".to_string())?;
    let node = document.import_node_with_deep(&root, true).map_err(js_err)?;
    container.append_child(&node).map_err(js_err)?;
    Ok(true)
}

pub(crate) fn clear_preview(container: &Element) {
    container.set_inner_html("");
}

/// Serialized markup of the `<svg>` currently shown in the preview pane.
pub(crate) fn rendered_markup(container: &Element) -> Result<Option<String>, String> {
    let Some(svg) = container.query_selector("svg").map_err(js_err)? else {
        return Ok(None);
    };
    let serializer = XmlSerializer::new().map_err(js_err)?;
    serializer
        .serialize_to_string(&svg)
        .map(Some)
        .map_err(js_err)
}

#[cfg(test)]
fn create_container() -> Result<Element, String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "document unavailable".to_string())?;
    document.create_element("div").map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg_studio_core::preview::classify;
    use svg_studio_core::PreviewState;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn reads_sizing_attributes() {
        let info = DomSvgParser
            .inspect(r#"<svg xmlns="http://www.w3.org/2000/svg" width="120px" viewBox="0 0 40 20"></svg>"#)
            .expect("parsed");
        assert_eq!(info.width.as_deref(), Some("120px"));
        assert_eq!(info.height, None);
        assert_eq!(info.intrinsic_size(), (120.0, 20.0));
    }

    #[wasm_bindgen_test]
    fn malformed_markup_is_a_parse_error() {
        let state = classify("<svg><g></svg>", &DomSvgParser);
        assert_eq!(state, PreviewState::ParseError);
    }

    #[wasm_bindgen_test]
    fn mounted_preview_serializes_back() {
        let container = create_container().expect("container");
        let mounted = mount_preview(
            &container,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#,
        )
        .expect("mount");
        assert!(mounted);
        let markup = rendered_markup(&container).expect("serialize").expect("svg present");
        assert!(markup.contains("<circle"));
        clear_preview(&container);
        assert_eq!(rendered_markup(&container).expect("serialize"), None);
    }
}
