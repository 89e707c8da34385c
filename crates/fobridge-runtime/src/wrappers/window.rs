//! Interface windows and screen refresh

use crate::ffi::HostArg;
use crate::host::Host;
use crate::view::{read_global, write_global, ObjectHandle, RawView, WindowRef, WindowView};
use std::ptr;

impl Host {
    /// Open windows in stacking order, bottom first
    fn windows(&self) -> impl Iterator<Item = WindowView<'_>> + '_ {
        let variables = &self.layout().variables;
        let count: i32 = unsafe { read_global(variables.num_windows) };
        let table = RawView::new(variables.window);
        (0..usize::try_from(count).unwrap_or(0)).filter_map(move |index| {
            let addr = unsafe { table?.read_indexed::<usize>(0, index) };
            let window = unsafe { WindowRef::from_addr(addr)? };
            Some(unsafe { WindowView::new(window, &self.layout().window) })
        })
    }

    /// Id of the topmost window covering screen point `(x, y)`
    ///
    /// When no window covers the point this is the bottom window, which the
    /// host keeps as the full-screen background. `None` when no window is
    /// open.
    pub fn top_window_id(&self, x: i32, y: i32) -> Option<i32> {
        let windows: Vec<_> = self.windows().collect();
        windows
            .iter()
            .rev()
            .find(|window| window.contains(x, y))
            .or_else(|| windows.first())
            .map(WindowView::id)
    }

    /// Fill window `id` with palette index 0
    ///
    /// With `refresh` the host redraws the window afterwards. Returns
    /// `false` when the window does not exist or has no pixel buffer.
    pub fn clear_window(&self, id: i32, refresh: bool) -> bool {
        let found = unsafe {
            self.call(
                "gnw_find",
                self.layout().functions.gnw_find,
                &[HostArg::Int(id)],
            )
        };
        let Some(window) = found.and_then(|value| unsafe { WindowRef::from_addr(value.as_addr()) })
        else {
            return false;
        };
        let view = unsafe { WindowView::new(window, &self.layout().window) };
        let (Ok(width), Ok(height)) = (usize::try_from(view.width()), usize::try_from(view.height()))
        else {
            return false;
        };
        if view.buffer() == 0 {
            return false;
        }

        unsafe { ptr::write_bytes(view.buffer() as *mut u8, 0, width * height) };
        if refresh {
            self.refresh_window(window, view.rect_addr());
        }
        true
    }

    /// Redraw every window from index `from` upward
    pub fn refresh_all_windows(&self, from: usize) {
        let variables = &self.layout().variables;
        unsafe { write_global::<i32>(variables.doing_refresh_all, 1) };
        for window in self.windows().skip(from) {
            self.refresh_window(window.window(), variables.scr_size);
        }
        unsafe { write_global::<i32>(variables.doing_refresh_all, 0) };
    }

    fn refresh_window(&self, window: WindowRef, rect: usize) {
        unsafe {
            self.call(
                "gnw_win_refresh",
                self.layout().functions.gnw_win_refresh,
                &[HostArg::Ptr(window.addr()), HostArg::Ptr(rect), HostArg::Ptr(0)],
            );
        }
    }

    /// Ask the host to redraw the screen area covered by `object`
    pub fn redraw_object(&self, object: ObjectHandle) {
        // left, top, right, bottom
        let mut bounds = [0i32; 4];
        let functions = &self.layout().functions;
        unsafe {
            if self
                .call(
                    "obj_bound",
                    functions.obj_bound,
                    &[HostArg::Ptr(object.addr()), HostArg::out(bounds.as_mut_ptr())],
                )
                .is_none()
            {
                return;
            }
            self.call(
                "tile_refresh_rect",
                functions.tile_refresh_rect,
                &[
                    HostArg::ptr(bounds.as_ptr()),
                    HostArg::Int(self.object(object).elevation()),
                ],
            );
        }
    }
}
