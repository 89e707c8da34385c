//! Message window output, font metrics and text drawing
//!
//! Font metrics go through function pointers the host swaps when the
//! current font changes. A null pointer (no font loaded yet) reads as 0.
//!
//! Text arguments take anything convertible to [`HostText`]: a `&CStr` from
//! host memory is passed through byte for byte, `&str` is copied.

use crate::ffi::{HostArg, HostText};
use crate::host::Host;
use crate::surface::SurfaceMut;

impl Host {
    /// Print a line into the host's message window
    ///
    /// Text past an interior NUL is dropped.
    pub fn display_print<'t>(&self, text: impl Into<HostText<'t>>) {
        let text = text.into();
        unsafe {
            self.call(
                "display_print",
                self.layout().functions.display_print,
                &[HostArg::ptr(text.as_ptr())],
            );
        }
    }

    fn font_metric(&self, symbol: &'static str, variable: usize, args: &[HostArg]) -> i32 {
        unsafe { self.call_pointer(symbol, variable, args) }.map_or(0, |value| value.as_i32())
    }

    /// Line height of the current font
    pub fn text_height(&self) -> i32 {
        self.font_metric("text_height", self.layout().variables.text_height, &[])
    }

    /// Width of `text` in the current font
    pub fn text_width<'t>(&self, text: impl Into<HostText<'t>>) -> i32 {
        let text = text.into();
        self.font_metric(
            "text_width",
            self.layout().variables.text_width,
            &[HostArg::ptr(text.as_ptr())],
        )
    }

    pub fn char_width(&self, ch: u8) -> i32 {
        self.font_metric(
            "text_char_width",
            self.layout().variables.text_char_width,
            &[HostArg::Int(i32::from(ch))],
        )
    }

    /// Width of `text` if every glyph were as wide as the widest one
    pub fn max_text_width<'t>(&self, text: impl Into<HostText<'t>>) -> i32 {
        let text = text.into();
        self.font_metric(
            "text_mono_width",
            self.layout().variables.text_mono_width,
            &[HostArg::ptr(text.as_ptr())],
        )
    }

    /// Spacing between glyphs
    pub fn char_gap_width(&self) -> i32 {
        self.font_metric("text_spacing", self.layout().variables.text_spacing, &[])
    }

    pub fn max_char_width(&self) -> i32 {
        self.font_metric("text_max", self.layout().variables.text_max, &[])
    }

    /// Draw `text` in palette `color` onto `dst` with its top left corner at
    /// `(x, y)`, using the current font
    ///
    /// The host renders at most `max_width` pixels, clipped to the right
    /// edge of `dst`. Returns `false` without drawing when no font is
    /// loaded or a full line of text does not fit below `y`.
    pub fn print_text<'t>(
        &self,
        text: impl Into<HostText<'t>>,
        color: u8,
        (x, y): (usize, usize),
        max_width: usize,
        dst: &mut SurfaceMut<'_>,
    ) -> bool {
        let Ok(line_height) = usize::try_from(self.text_height()) else {
            return false;
        };
        let fits_below = y
            .checked_add(line_height)
            .is_some_and(|bottom| bottom <= dst.height());
        if line_height == 0 || x >= dst.width() || !fits_below {
            return false;
        }
        let width = max_width.min(dst.width() - x);
        let (Ok(width), Ok(pitch)) = (i32::try_from(width), i32::try_from(dst.pitch())) else {
            return false;
        };
        if width == 0 {
            return false;
        }

        let text = text.into();
        let target = dst.pixel_ptr(x, y);
        let drawn = unsafe {
            self.call_pointer(
                "text_to_buf",
                self.layout().variables.text_to_buf,
                &[
                    HostArg::out(target),
                    HostArg::ptr(text.as_ptr()),
                    HostArg::Int(width),
                    HostArg::Int(pitch),
                    HostArg::Int(i32::from(color)),
                ],
            )
        };
        drawn.is_some()
    }
}
