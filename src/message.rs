//! Message bodies a report can carry.
//!
//! A [`Message`] is only rendered after the gate has let the report through,
//! so building one must stay cheap: `format_args!` output, a borrowed string,
//! or a [`Printf`] pair of format string and argument slice. None of them do
//! any formatting work until [`Message::write_to`] is called.

use core::fmt::{self, Write};

use crate::printf::{self, Printf};

/// Text that can be expanded into a report line.
pub trait Message {
    /// Write the expanded text to `out`.
    ///
    /// `out` returns `fmt::Error` once it is full; implementations should stop
    /// at the first error.
    fn write_to(
        &self,
        out: &mut dyn Write,
    ) -> fmt::Result;
}

impl Message for fmt::Arguments<'_> {
    fn write_to(
        &self,
        out: &mut dyn Write,
    ) -> fmt::Result {
        out.write_fmt(*self)
    }
}

impl Message for str {
    fn write_to(
        &self,
        out: &mut dyn Write,
    ) -> fmt::Result {
        out.write_str(self)
    }
}

impl Message for Printf<'_> {
    fn write_to(
        &self,
        out: &mut dyn Write,
    ) -> fmt::Result {
        printf::expand(out, self.format, self.args)
    }
}

impl<M: Message + ?Sized> Message for &M {
    fn write_to(
        &self,
        out: &mut dyn Write,
    ) -> fmt::Result {
        (**self).write_to(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printf::Arg;

    fn expand<M: Message + ?Sized>(message: &M) -> std::string::String {
        let mut out = std::string::String::new();
        message.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_str_is_verbatim() {
        assert_eq!(expand("100% %d {}"), "100% %d {}");
    }

    #[test]
    fn test_format_arguments() {
        assert_eq!(expand(&format_args!("retry {}", 4)), "retry 4");
    }

    #[test]
    fn test_printf() {
        let args = [Arg::from(4)];
        assert_eq!(expand(&Printf::new("retry %d", &args)), "retry 4");
    }

    #[test]
    fn test_reference_forwards() {
        let text: &str = "link up";
        assert_eq!(expand(&text), "link up");
    }
}
