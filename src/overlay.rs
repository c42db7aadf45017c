use web_sys as web;

const START_OVERLAY_ID: &str = "start-overlay";
const LOADING_ID: &str = "loading";

fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if hidden {
            _ = cl.add_1("hidden");
            // fallback for pages without the CSS class
            _ = el.set_attribute("style", "display:none");
        } else {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        }
    }
}

#[inline]
pub fn show(document: &web::Document) {
    set_hidden(document, START_OVERLAY_ID, false);
}

#[inline]
pub fn hide(document: &web::Document) {
    set_hidden(document, START_OVERLAY_ID, true);
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Remove the loading indicator once the first scene is on screen.
pub fn hide_loading(document: &web::Document) {
    set_hidden(document, LOADING_ID, true);
}
