use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS size (pixel density 1).
/// Returns the new size in canvas pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() as u32).max(1);
    let h_px = (rect.height() as u32).max(1);
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (w_px as f32, h_px as f32)
}

#[inline]
pub fn document_hidden() -> bool {
    window_document().map(|d| d.hidden()).unwrap_or(false)
}
