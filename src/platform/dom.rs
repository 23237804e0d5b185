//! DOM helpers for the HUD overlay

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}

/// Toggle the `hidden` class by replacing the element's class list
pub fn set_visible(id: &str, visible: bool) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
    }
}

/// Replace the children of `id` with one `<p>` per line
pub fn set_lines(id: &str, lines: &[String]) {
    let Some(doc) = document() else {
        return;
    };
    let Some(el) = doc.get_element_by_id(id) else {
        return;
    };
    el.set_inner_html("");
    for line in lines {
        if let Ok(p) = doc.create_element("p") {
            p.set_text_content(Some(line));
            let _ = el.append_child(&p);
        }
    }
}
