/// Callbacks into the application hosting the viewer
///
/// All callbacks are fire-and-forget. `on_close` is only ever invoked by the
/// playback controller, at most once per viewer.
pub trait StoryHost {
    fn on_close(&mut self) {}

    fn on_add_to_cart(&mut self, _product_id: &str) {}

    fn on_view_product(&mut self, _product_id: &str) {}

    fn on_view_store(&mut self, _store_id: &str) {}
}

/// Host that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl StoryHost for NoopHost {}

impl<H: StoryHost + ?Sized> StoryHost for Box<H> {
    fn on_close(&mut self) {
        (**self).on_close()
    }

    fn on_add_to_cart(&mut self, product_id: &str) {
        (**self).on_add_to_cart(product_id)
    }

    fn on_view_product(&mut self, product_id: &str) {
        (**self).on_view_product(product_id)
    }

    fn on_view_store(&mut self, store_id: &str) {
        (**self).on_view_store(store_id)
    }
}
