use crate::constants::{IDLE_HINT_ID, ITEM_LIST_ID, SELECTED_PANEL_ID};
use crate::core::{ItemStore, MediaKind};
use crate::dom::{escape_html, set_visible};
use web_sys as web;

/// Rebuild the item list and toggle the selected-item panel.
pub fn render(document: &web::Document, store: &ItemStore) {
    if let Some(el) = document.get_element_by_id(ITEM_LIST_ID) {
        el.set_inner_html(&item_list_html(store));
    }
    let has_selection = store.selected().is_some();
    set_visible(document, SELECTED_PANEL_ID, has_selection);
    set_visible(document, IDLE_HINT_ID, !has_selection);
}

fn item_list_html(store: &ItemStore) -> String {
    let mut html = String::new();
    for item in store.items() {
        let class = if store.is_selected(&item.id) {
            "item selected"
        } else {
            "item"
        };
        let thumb = match item.kind {
            MediaKind::Image => format!(
                "<img class='thumb' src='{}' alt=''>",
                escape_html(item.source.as_str())
            ),
            MediaKind::Video => "<div class='thumb video'>Video</div>".to_string(),
        };
        let label = store.label(&item.id).unwrap_or_default();
        html.push_str(&format!(
            "<div class='{}' data-id='{}'>{}<span>{}</span></div>",
            class,
            escape_html(&item.id),
            thumb,
            escape_html(&label)
        ));
    }
    html
}
