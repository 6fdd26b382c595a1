//! Client-side file downloads.

/// Offer `contents` to the user as a CSV file called `filename`.
#[cfg(target_arch = "wasm32")]
pub fn download_csv(filename: &str, contents: &str) -> Result<(), String> {
    use wasm_bindgen::{JsCast, JsValue};

    fn js_err(e: JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    let window = web_sys::window().ok_or("No window available")?;
    let document = window.document().ok_or("No document available")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob =
        web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "Failed to create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_err)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn download_csv(filename: &str, _contents: &str) -> Result<(), String> {
    tracing::warn!("Download of {} requested outside the browser", filename);
    Err("Downloads are only available in the browser".to_string())
}
