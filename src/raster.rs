use svg_studio_core::export::{PNG_MIME, SVG_BLOB_MIME};
use svg_studio_core::raster::{ensure_xmlns, target_size};
use svg_studio_core::{RasterError, RasterSize, SizePolicy, SvgInfo};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlImageElement};

use crate::browser_io::{js_err, revoke_object_url, text_object_url};
use crate::svg_dom;

pub(crate) struct RasterImage {
    pub(crate) data_url: String,
    pub(crate) size: RasterSize,
}

/// Draws the `<svg>` mounted in `preview` onto an offscreen canvas sized by
/// `policy` and returns it as a PNG data URL.
pub(crate) async fn rasterize_preview(
    preview: &Element,
    info: &SvgInfo,
    policy: SizePolicy,
) -> Result<RasterImage, RasterError> {
    let markup = svg_dom::rendered_markup(preview)
        .map_err(RasterError::ImageLoad)?
        .ok_or(RasterError::NoSvg)?;
    let size = target_size(info.intrinsic_size(), policy);
    let url = text_object_url(&ensure_xmlns(&markup), SVG_BLOB_MIME).map_err(RasterError::ImageLoad)?;
    let result = draw_to_png(&url, size).await;
    revoke_object_url(&url);
    result.map(|data_url| RasterImage { data_url, size })
}

async fn draw_to_png(url: &str, size: RasterSize) -> Result<String, RasterError> {
    let image = HtmlImageElement::new().map_err(|err| RasterError::ImageLoad(js_err(err)))?;
    let decode = image.decode();
    image.set_src(url);
    JsFuture::from(decode)
        .await
        .map_err(|err| RasterError::ImageLoad(js_err(err)))?;

    let export = |err: JsValue| RasterError::Export(js_err(err));
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| RasterError::Export("document unavailable".into()))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(export)?
        .dyn_into()
        .map_err(|_| RasterError::Export("canvas cast failed".into()))?;
    canvas.set_width(size.width);
    canvas.set_height(size.height);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(export)?
        .ok_or_else(|| RasterError::Export("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| RasterError::Export("context cast failed".into()))?;
    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            f64::from(size.width),
            f64::from(size.height),
        )
        .map_err(export)?;
    canvas.to_data_url_with_type(PNG_MIME).map_err(export)
}
