use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Clipboard, Document, File, HtmlAnchorElement, Url};

pub(crate) fn js_err(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::JSON::stringify(&err)
                .ok()
                .and_then(|value| value.as_string())
        })
        .unwrap_or_else(|| "js error".to_string())
}

pub(crate) fn now_ms() -> u64 {
    Date::now().max(0.0) as u64
}

/// Locale-formatted wall clock, stored alongside history entries.
pub(crate) fn locale_timestamp() -> String {
    Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .as_string()
        .unwrap_or_default()
}

fn document() -> Result<Document, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "document unavailable".to_string())
}

pub(crate) fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

pub(crate) fn confirm(message: &str) -> bool {
    gloo::dialogs::confirm(message)
}

/// Triggers a browser download of `href` through a throwaway anchor.
pub(crate) fn download_href(filename: &str, href: &str) -> Result<(), String> {
    let document = document()?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "anchor cast failed".to_string())?;
    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or_else(|| "missing body".to_string())?
        .append_child(&anchor)
        .map_err(js_err)?;
    anchor.click();
    anchor.remove();
    Ok(())
}

pub(crate) fn text_object_url(text: &str, mime: &str) -> Result<String, String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    Url::create_object_url_with_blob(&blob).map_err(js_err)
}

pub(crate) fn revoke_object_url(url: &str) {
    let _ = Url::revoke_object_url(url);
}

pub(crate) fn download_text(filename: &str, text: &str, mime: &str) -> Result<(), String> {
    let url = text_object_url(text, mime)?;
    let result = download_href(filename, &url);
    revoke_object_url(&url);
    result
}

/// `navigator.clipboard` is undefined outside secure contexts.
fn clipboard_of(navigator: &JsValue) -> Result<Clipboard, String> {
    let clipboard = js_sys::Reflect::get(navigator, &JsValue::from_str("clipboard")).map_err(js_err)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard unavailable".to_string());
    }
    Ok(clipboard.unchecked_into())
}

pub(crate) async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let clipboard = clipboard_of(window.navigator().as_ref())?;
    JsFuture::from(clipboard.write_text(text)).await.map_err(js_err)?;
    Ok(())
}

pub(crate) fn is_image(file: &File) -> bool {
    file.type_().starts_with("image/")
}

pub(crate) async fn read_data_url(file: File) -> Result<String, String> {
    let blob = gloo::file::Blob::from(file);
    gloo::file::futures::read_as_data_url(&blob)
        .await
        .map_err(|err| err.to_string())
}
