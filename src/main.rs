mod api;
mod app_config;
mod boot;
mod browser_io;
mod browser_store;
mod raster;
mod studio_core;
mod svg_dom;
mod yew_app;

use studio_core::StudioCore;
use yew_app::{App, AppProps};

fn main() {
    console_error_panic_hook::set_once();
    boot::set_phase("config", "reading build configuration");
    let config = app_config::load_config();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        boot::fail(
            "no-document",
            "The studio needs a browser document to start.",
            "Open the page in a web browser.",
        );
        return;
    };
    let Some(body) = document.body() else {
        boot::fail("no-body", "The page has no <body> element.", "Reload the page.");
        return;
    };

    boot::set_phase("studio", "restoring session history and preferences");
    let core = StudioCore::new(config);
    gloo::console::log!(
        "studio ready",
        core.with(|studio| studio.history_rows().len() as u32)
    );

    boot::set_phase("render", "mounting the interface");
    yew::Renderer::<App>::with_root_and_props(body.into(), AppProps { core }).render();
    boot::ready();
}
