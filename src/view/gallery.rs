//! Tea-ware gallery panel

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use super::{create_div, document, on_click_id, set_text};
use crate::sim::{GalleryBrowser, song_tea_set};
use crate::{SetupError, Settings};

pub type SharedGallery = Rc<RefCell<GalleryBrowser>>;

pub fn mount(
    document: &Document,
    container: &Element,
    settings: &Settings,
) -> Result<SharedGallery, SetupError> {
    let gallery =
        GalleryBrowser::new(song_tea_set())?.with_rotation_step(settings.rotation_step_deg);

    let html = r#"<h3>🏺 宋代茶具</h3>
        <div class="teaware-stage" id="teaware3D"></div>
        <div class="teaware-info">
            <h4 id="wareName"></h4>
            <p id="wareDesc"></p>
        </div>
        <div class="teaware-controls">
            <button id="prevWareBtn">←</button>
            <button id="rotateWareBtn">⟳</button>
            <button id="nextWareBtn">→</button>
        </div>"#;

    let panel_el = create_div(document, "teaware-display-panel", html)?;
    container
        .append_child(&panel_el)
        .map_err(|_| SetupError::Dom("teaware-display-panel"))?;

    let gallery = Rc::new(RefCell::new(gallery));
    {
        let gallery = gallery.clone();
        on_click_id(document, "prevWareBtn", move || previous(&gallery));
    }
    {
        let gallery = gallery.clone();
        on_click_id(document, "nextWareBtn", move || next(&gallery));
    }
    {
        let gallery = gallery.clone();
        on_click_id(document, "rotateWareBtn", move || rotate(&gallery));
    }

    render(&gallery.borrow());
    log::info!("Tea-ware gallery mounted");
    Ok(gallery)
}

pub fn next(gallery: &SharedGallery) {
    gallery.borrow_mut().next();
    render(&gallery.borrow());
}

pub fn previous(gallery: &SharedGallery) {
    gallery.borrow_mut().previous();
    render(&gallery.borrow());
}

pub fn rotate(gallery: &SharedGallery) {
    gallery.borrow_mut().rotate();
    render(&gallery.borrow());
}

fn render(gallery: &GalleryBrowser) {
    let Ok(document) = document() else { return };
    let ware = gallery.current();
    let rotation = gallery.state().rotation_deg;

    if let Some(stage) = document.get_element_by_id("teaware3D") {
        stage.set_inner_html(&format!(
            r#"<div class="teaware-model" style="background: {}; border-radius: {}; transform: rotateY({}deg);">
                <div class="teaware-highlight"></div>
            </div>"#,
            ware.preview_background(),
            ware.silhouette.border_radius(),
            rotation
        ));
    }
    set_text(&document, "wareName", &ware.name);
    set_text(&document, "wareDesc", &ware.description);
}
