//! printf-style expansion with typed arguments.
//!
//! Firmware that keeps C-style format tables can report them unchanged:
//!
//! ```ignore
//! use report::printf::{Arg, Printf};
//!
//! report::debug(5, "NET", Printf::new("retry %d of %u", &[Arg::from(4), Arg::from(8u32)]));
//! ```
//!
//! # Conversions
//!
//! | Spec        | Output                                        |
//! |-------------|-----------------------------------------------|
//! | `%d` `%i`   | signed decimal                                |
//! | `%u`        | unsigned decimal                              |
//! | `%x` `%X`   | unsigned hexadecimal                          |
//! | `%o`        | unsigned octal                                |
//! | `%c`        | character                                     |
//! | `%s`        | string                                        |
//! | `%f` `%F`   | fixed-point float, 6 decimals by default      |
//! | `%e` `%E`   | exponent float, at least two exponent digits  |
//! | `%g` `%G`   | shorter of `%e` / `%f`, trailing zeros removed |
//! | `%p`        | `0x` + hexadecimal address                    |
//! | `%%`        | literal `%`                                   |
//!
//! Flags `-`, `0`, `+`, space and `#`, field width and precision (digits or
//! `*`) follow the C rules. Length modifiers are parsed: `hh` and `h` narrow
//! integers to 8 and 16 bits, `ll` and `j` keep 64 bits, everything else
//! (including `l`, which is 32 bits on the target) works on 32 bits.
//!
//! # Misuse
//!
//! Mismatched arguments never produce undefined output. A missing argument
//! renders nothing, surplus arguments are ignored, an unknown conversion is
//! copied verbatim and an argument of the wrong kind is rendered in its own
//! natural form (integers in decimal, floats as `%f`, strings as text).

use core::fmt::{self, Write};

use crate::config::MAX_FLOAT_PRECISION;

/// Default precision of the float conversions.
const DEFAULT_FLOAT_PRECISION: usize = 6;

/// A printf-style message: format string plus its arguments.
#[derive(Clone, Copy, Debug)]
pub struct Printf<'a> {
    /// C-style format string.
    pub format: &'a str,
    /// Arguments consumed left to right by the conversions in `format`.
    pub args: &'a [Arg<'a>],
}

impl<'a> Printf<'a> {
    /// Pair a format string with its arguments.
    pub const fn new(
        format: &'a str,
        args: &'a [Arg<'a>],
    ) -> Self {
        Self { format, args }
    }
}

/// One typed printf argument.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Arg<'a> {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Single character.
    Char(char),
    /// Borrowed string.
    Str(&'a str),
    /// Address, for `%p`.
    Ptr(usize),
}

macro_rules! arg_from {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self { Self::$variant(value as $target) }
            }
        )+
    };
}

arg_from!(Int(i64): i8, i16, i32, i64, isize);
arg_from!(Uint(u64): u8, u16, u32, u64, usize);
arg_from!(Float(f64): f32, f64);

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self { Self::Char(value) }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self { Self::Str(value) }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self { Self::Int(i64::from(value)) }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self { Self::Ptr(value as usize) }
}

// =============================================================================
// Conversion Spec
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Length {
    Char,
    Short,
    Default,
    Wide,
}

#[derive(Clone, Copy, Debug)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
    length: Length,
}

impl Spec {
    const fn new() -> Self {
        Self {
            left: false,
            zero: false,
            plus: false,
            space: false,
            alt: false,
            width: 0,
            precision: None,
            length: Length::Default,
        }
    }

    /// Sign character for a value, honoring `+` and space.
    const fn sign(
        &self,
        negative: bool,
    ) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }
}

/// Cursor over the argument slice. Running out yields `None`.
struct Args<'s, 'a> {
    iter: core::slice::Iter<'s, Arg<'a>>,
}

impl<'a> Args<'_, 'a> {
    fn next(&mut self) -> Option<Arg<'a>> { self.iter.next().copied() }

    /// Next argument as an integer for `*` width or precision.
    fn next_int(&mut self) -> i64 {
        match self.next() {
            Some(Arg::Int(v)) => v,
            Some(Arg::Uint(v)) => v.min(i64::MAX as u64) as i64,
            Some(Arg::Float(v)) => v as i64,
            Some(Arg::Char(c)) => i64::from(u32::from(c)),
            Some(Arg::Ptr(p)) => p as i64,
            Some(Arg::Str(_)) | None => 0,
        }
    }
}

// =============================================================================
// Expansion
// =============================================================================

/// Expand `format` against `args` into `out`.
///
/// Stops at the first error from `out`, which for a report line means the
/// line is full.
pub fn expand(
    out: &mut dyn Write,
    format: &str,
    args: &[Arg<'_>],
) -> fmt::Result {
    let mut args = Args { iter: args.iter() };
    let bytes = format.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        out.write_str(&format[literal_start..i])?;
        let spec_start = i;
        i += 1;

        let mut spec = Spec::new();

        // Flags
        while i < bytes.len() {
            match bytes[i] {
                b'-' => spec.left = true,
                b'0' => spec.zero = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'#' => spec.alt = true,
                _ => break,
            }
            i += 1;
        }

        // Width
        if i < bytes.len() && bytes[i] == b'*' {
            let width = args.next_int();
            if width < 0 {
                spec.left = true;
            }
            spec.width = width.unsigned_abs() as usize;
            i += 1;
        } else {
            spec.width = parse_digits(bytes, &mut i);
        }

        // Precision
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            if i < bytes.len() && bytes[i] == b'*' {
                let precision = args.next_int();
                spec.precision = usize::try_from(precision).ok();
                i += 1;
            } else {
                spec.precision = Some(parse_digits(bytes, &mut i));
            }
        }

        // Length modifier
        while i < bytes.len() {
            spec.length = match (bytes[i], spec.length) {
                (b'h', Length::Short) => Length::Char,
                (b'h', _) => Length::Short,
                (b'l', Length::Default) if bytes.get(i + 1) == Some(&b'l') => {
                    i += 1;
                    Length::Wide
                }
                (b'j', _) => Length::Wide,
                (b'l' | b'z' | b't' | b'L', length) => length,
                _ => break,
            };
            i += 1;
        }

        let Some(conversion) = format[i..].chars().next() else {
            // Dangling spec at the end of the format string.
            out.write_str(&format[spec_start..])?;
            return Ok(());
        };
        i += conversion.len_utf8();
        literal_start = i;

        if conversion == '%' {
            out.write_char('%')?;
            continue;
        }
        if !"diuxXocsfFeEgGp".contains(conversion) {
            out.write_str(&format[spec_start..i])?;
            continue;
        }
        if let Some(arg) = args.next() {
            convert(out, &spec, conversion, arg)?;
        }
    }

    out.write_str(&format[literal_start..])
}

fn parse_digits(
    bytes: &[u8],
    i: &mut usize,
) -> usize {
    let mut value: usize = 0;
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        value = value.saturating_mul(10).saturating_add(usize::from(bytes[*i] - b'0'));
        *i += 1;
    }
    value
}

fn convert(
    out: &mut dyn Write,
    spec: &Spec,
    conversion: char,
    arg: Arg<'_>,
) -> fmt::Result {
    match (conversion, arg) {
        ('d' | 'i', _) | ('u' | 'x' | 'X' | 'o', Arg::Str(_)) => signed(out, spec, arg),
        ('u' | 'x' | 'X' | 'o', _) => unsigned(out, spec, conversion, arg),
        ('c', _) => character(out, spec, arg),
        ('s', Arg::Str(s)) => string(out, spec, s),
        ('s', Arg::Char(c)) => string(out, spec, c.encode_utf8(&mut [0u8; 4])),
        ('s', Arg::Float(v)) => float(out, spec, 'f', v),
        ('s', _) => signed(out, spec, arg),
        ('p', _) => pointer(out, spec, arg),
        (_, Arg::Float(v)) => float(out, spec, conversion, v),
        (_, Arg::Int(v)) => float(out, spec, conversion, v as f64),
        (_, Arg::Uint(v)) => float(out, spec, conversion, v as f64),
        (_, Arg::Ptr(p)) => float(out, spec, conversion, p as f64),
        (_, Arg::Char(c)) => string(out, spec, c.encode_utf8(&mut [0u8; 4])),
        (_, Arg::Str(s)) => string(out, spec, s),
    }
}

// =============================================================================
// Padding
// =============================================================================

fn repeat(
    out: &mut dyn Write,
    c: char,
    count: usize,
) -> fmt::Result {
    for _ in 0..count {
        out.write_char(c)?;
    }
    Ok(())
}

/// Write `prefix`, `zeros` leading zeros and `body`, padded to the field width.
///
/// `body_len` is the width `body` occupies. With `zero_fill` the field is
/// padded with zeros between prefix and body instead of leading spaces.
fn field(
    out: &mut dyn Write,
    spec: &Spec,
    zero_fill: bool,
    prefix: &str,
    zeros: usize,
    body_len: usize,
    body: &mut dyn FnMut(&mut dyn Write) -> fmt::Result,
) -> fmt::Result {
    let used = prefix.len().saturating_add(zeros).saturating_add(body_len);
    let fill = spec.width.saturating_sub(used);

    if spec.left {
        out.write_str(prefix)?;
        repeat(out, '0', zeros)?;
        body(out)?;
        repeat(out, ' ', fill)
    } else if zero_fill {
        out.write_str(prefix)?;
        repeat(out, '0', zeros + fill)?;
        body(out)
    } else {
        repeat(out, ' ', fill)?;
        out.write_str(prefix)?;
        repeat(out, '0', zeros)?;
        body(out)
    }
}

fn text_field(
    out: &mut dyn Write,
    spec: &Spec,
    zero_fill: bool,
    prefix: &str,
    zeros: usize,
    text: &str,
) -> fmt::Result {
    field(out, spec, zero_fill, prefix, zeros, text.chars().count(), &mut |out| {
        out.write_str(text)
    })
}

// =============================================================================
// Integers
// =============================================================================

/// Digits of `value` in `radix`, most significant first.
struct Digits {
    buf: [u8; 22],
    start: usize,
}

impl Digits {
    fn new(
        mut value: u64,
        radix: u64,
        upper: bool,
    ) -> Self {
        let table: &[u8; 16] = if upper { b"0123456789ABCDEF" } else { b"0123456789abcdef" };
        let mut buf = [0u8; 22];
        let mut start = buf.len();
        loop {
            start -= 1;
            buf[start] = table[(value % radix) as usize];
            value /= radix;
            if value == 0 {
                break;
            }
        }
        Self { buf, start }
    }

    fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        core::str::from_utf8(&self.buf[self.start..]).unwrap_or("")
    }
}

fn integer(
    out: &mut dyn Write,
    spec: &Spec,
    sign: &str,
    magnitude: u64,
    radix: u64,
    upper: bool,
) -> fmt::Result {
    let digits = Digits::new(magnitude, radix, upper);
    // Zero printed with an explicit zero precision has no digits at all.
    let digits = if magnitude == 0 && spec.precision == Some(0) { "" } else { digits.as_str() };

    let mut zeros = spec.precision.unwrap_or(0).saturating_sub(digits.len());
    let prefix = match radix {
        16 if spec.alt && magnitude != 0 => {
            if upper {
                "0X"
            } else {
                "0x"
            }
        }
        8 if spec.alt && zeros == 0 && !digits.starts_with('0') => {
            zeros = 1;
            sign
        }
        _ => sign,
    };

    let zero_fill = spec.zero && !spec.left && spec.precision.is_none();
    text_field(out, spec, zero_fill, prefix, zeros, digits)
}

/// Narrow a signed value the way the length modifier says.
fn narrow_signed(
    value: i64,
    length: Length,
) -> i64 {
    match length {
        Length::Char => i64::from(value as i8),
        Length::Short => i64::from(value as i16),
        Length::Default => i64::from(value as i32),
        Length::Wide => value,
    }
}

/// Narrow an unsigned value the way the length modifier says.
fn narrow_unsigned(
    value: u64,
    length: Length,
) -> u64 {
    match length {
        Length::Char => u64::from(value as u8),
        Length::Short => u64::from(value as u16),
        Length::Default => u64::from(value as u32),
        Length::Wide => value,
    }
}

fn signed(
    out: &mut dyn Write,
    spec: &Spec,
    arg: Arg<'_>,
) -> fmt::Result {
    let value = match arg {
        Arg::Int(v) => narrow_signed(v, spec.length),
        Arg::Uint(v) => {
            // Unsigned values keep their magnitude when printed with %d.
            let v = narrow_unsigned(v, spec.length);
            return integer(out, spec, spec.sign(false), v, 10, false);
        }
        Arg::Float(v) => v as i64,
        Arg::Char(c) => i64::from(u32::from(c)),
        Arg::Ptr(p) => p as i64,
        Arg::Str(s) => return string(out, spec, s),
    };
    integer(out, spec, spec.sign(value < 0), value.unsigned_abs(), 10, false)
}

fn unsigned(
    out: &mut dyn Write,
    spec: &Spec,
    conversion: char,
    arg: Arg<'_>,
) -> fmt::Result {
    let raw = match arg {
        Arg::Int(v) => v as u64,
        Arg::Uint(v) => v,
        Arg::Float(v) => v as u64,
        Arg::Char(c) => u64::from(u32::from(c)),
        Arg::Ptr(p) => p as u64,
        Arg::Str(s) => return string(out, spec, s),
    };
    let value = narrow_unsigned(raw, spec.length);
    let (radix, upper) = match conversion {
        'x' => (16, false),
        'X' => (16, true),
        'o' => (8, false),
        _ => (10, false),
    };
    // Unsigned conversions never print a sign.
    integer(out, spec, "", value, radix, upper)
}

fn pointer(
    out: &mut dyn Write,
    spec: &Spec,
    arg: Arg<'_>,
) -> fmt::Result {
    let address = match arg {
        Arg::Ptr(p) => p as u64,
        Arg::Int(v) => v as u64,
        Arg::Uint(v) => v,
        Arg::Float(_) | Arg::Char(_) | Arg::Str(_) => return convert(out, spec, 's', arg),
    };
    let digits = Digits::new(address, 16, false);
    text_field(out, spec, false, "0x", 0, digits.as_str())
}

// =============================================================================
// Characters and Strings
// =============================================================================

fn character(
    out: &mut dyn Write,
    spec: &Spec,
    arg: Arg<'_>,
) -> fmt::Result {
    let c = match arg {
        Arg::Char(c) => c,
        Arg::Int(v) => char::from_u32(v as u32).unwrap_or(char::REPLACEMENT_CHARACTER),
        Arg::Uint(v) => char::from_u32(v as u32).unwrap_or(char::REPLACEMENT_CHARACTER),
        Arg::Str(s) => s.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
        Arg::Float(_) | Arg::Ptr(_) => char::REPLACEMENT_CHARACTER,
    };
    text_field(out, spec, false, "", 0, c.encode_utf8(&mut [0u8; 4]))
}

fn string(
    out: &mut dyn Write,
    spec: &Spec,
    s: &str,
) -> fmt::Result {
    // Precision limits the number of characters taken from the string.
    let s = match spec.precision {
        Some(max) => match s.char_indices().nth(max) {
            Some((end, _)) => &s[..end],
            None => s,
        },
        None => s,
    };
    text_field(out, spec, false, "", 0, s)
}

// =============================================================================
// Floats
// =============================================================================

/// Counts bytes instead of writing them.
struct Counter(usize);

impl Write for Counter {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Forwards the mantissa of `{:e}` output and drops its exponent.
struct Mantissa<'w> {
    out: &'w mut dyn Write,
    done: bool,
}

impl Write for Mantissa<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        if self.done {
            return Ok(());
        }
        match s.find('e') {
            Some(end) => {
                self.done = true;
                self.out.write_str(&s[..end])
            }
            None => self.out.write_str(s),
        }
    }
}

/// Reads the exponent out of `{:e}` output.
#[derive(Default)]
struct Exponent {
    seen: bool,
    negative: bool,
    value: i32,
}

impl Write for Exponent {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if c == 'e' {
                self.seen = true;
            } else if self.seen && c == '-' {
                self.negative = true;
            } else if self.seen
                && let Some(digit) = c.to_digit(10)
            {
                self.value = self.value.saturating_mul(10).saturating_add(digit as i32);
            }
        }
        Ok(())
    }
}

/// Drops trailing fraction zeros, and the point when no digit follows it.
struct TrimZeros<'w> {
    out: &'w mut dyn Write,
    fraction: bool,
    point_written: bool,
    zeros: usize,
}

impl<'w> TrimZeros<'w> {
    fn new(out: &'w mut dyn Write) -> Self {
        Self {
            out,
            fraction: false,
            point_written: false,
            zeros: 0,
        }
    }
}

impl Write for TrimZeros<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            match c {
                '.' => self.fraction = true,
                '0' if self.fraction => self.zeros += 1,
                _ => {
                    if self.fraction && !self.point_written {
                        self.out.write_char('.')?;
                        self.point_written = true;
                    }
                    repeat(self.out, '0', self.zeros)?;
                    self.zeros = 0;
                    self.out.write_char(c)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Notation {
    /// `ddd.ddd`
    Fixed,
    /// `d.ddde+XX`
    Scientific,
}

/// How a float body is laid out.
#[derive(Clone, Copy, Debug)]
struct Layout {
    notation: Notation,
    /// Fraction digits produced by `core::fmt`, at most `MAX_FLOAT_PRECISION`.
    precision: usize,
    /// Zeros appended after the fraction digits to reach the requested precision.
    padding: usize,
    /// Trailing point with no fraction digits (`#` flag).
    point: bool,
    /// Strip trailing fraction zeros (`%g` without `#`).
    trim: bool,
    upper: bool,
}

impl Layout {
    fn new(
        notation: Notation,
        requested: usize,
        alt: bool,
        upper: bool,
    ) -> Self {
        let precision = requested.min(MAX_FLOAT_PRECISION);
        Self {
            notation,
            precision,
            padding: requested - precision,
            point: alt && requested == 0,
            trim: false,
            upper,
        }
    }
}

fn float(
    out: &mut dyn Write,
    spec: &Spec,
    conversion: char,
    value: f64,
) -> fmt::Result {
    let upper = conversion.is_ascii_uppercase();
    let sign = spec.sign(value.is_sign_negative() && !value.is_nan());

    if !value.is_finite() {
        let text = match (value.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return text_field(out, spec, false, sign, 0, text);
    }

    let magnitude = value.abs();
    let requested = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let layout = match conversion {
        'f' | 'F' => Layout::new(Notation::Fixed, requested, spec.alt, upper),
        'e' | 'E' => Layout::new(Notation::Scientific, requested, spec.alt, upper),
        _ => general(magnitude, requested, spec.alt, upper)?,
    };

    // Padding zeros are counted, not written, so a huge precision costs nothing here.
    let mut counter = Counter(0);
    float_body(&mut counter, magnitude, &layout, 0)?;
    let body_len = counter.0.saturating_add(layout.padding);

    let zero_fill = spec.zero && !spec.left;
    field(out, spec, zero_fill, sign, 0, body_len, &mut |out| {
        float_body(out, magnitude, &layout, layout.padding)
    })
}

/// `%g`: scientific for very small or large exponents, fixed otherwise.
fn general(
    magnitude: f64,
    requested: usize,
    alt: bool,
    upper: bool,
) -> Result<Layout, fmt::Error> {
    let requested = requested.max(1);
    let significant = requested.min(MAX_FLOAT_PRECISION);
    let exp = if magnitude == 0.0 { 0 } else { decimal_exponent(magnitude, significant - 1)? };

    let scientific = exp < -4 || usize::try_from(exp).is_ok_and(|exp| exp >= requested);
    let (notation, wanted) = if scientific {
        (Notation::Scientific, requested - 1)
    } else if exp < 0 {
        (Notation::Fixed, (requested - 1).saturating_add(exp.unsigned_abs() as usize))
    } else {
        (Notation::Fixed, requested - 1 - exp as usize)
    };

    let precision = wanted.min(MAX_FLOAT_PRECISION);
    Ok(Layout {
        notation,
        precision,
        padding: if alt { wanted - precision } else { 0 },
        point: alt && precision == 0,
        trim: !alt,
        upper,
    })
}

/// Write a float body: digits, `padding` zeros, optional point and exponent.
fn float_body(
    out: &mut dyn Write,
    magnitude: f64,
    layout: &Layout,
    padding: usize,
) -> fmt::Result {
    if layout.trim {
        float_digits(&mut TrimZeros::new(out), magnitude, layout)?;
    } else {
        float_digits(out, magnitude, layout)?;
        repeat(out, '0', padding)?;
        if layout.point {
            out.write_char('.')?;
        }
    }

    if layout.notation == Notation::Fixed {
        return Ok(());
    }
    let exp = decimal_exponent(magnitude, layout.precision)?;
    out.write_char(if layout.upper { 'E' } else { 'e' })?;
    out.write_char(if exp < 0 { '-' } else { '+' })?;
    write!(out, "{:02}", exp.unsigned_abs())
}

/// Integer and fraction digits, without any exponent.
fn float_digits(
    out: &mut dyn Write,
    magnitude: f64,
    layout: &Layout,
) -> fmt::Result {
    let precision = layout.precision;
    match layout.notation {
        Notation::Fixed => write!(out, "{magnitude:.precision$}"),
        Notation::Scientific => {
            let mut mantissa = Mantissa { out, done: false };
            write!(mantissa, "{magnitude:.precision$e}")
        }
    }
}

/// Decimal exponent of `magnitude` once rounded to `precision` fraction digits.
fn decimal_exponent(
    magnitude: f64,
    precision: usize,
) -> Result<i32, fmt::Error> {
    let mut exponent = Exponent::default();
    write!(exponent, "{magnitude:.precision$e}")?;
    Ok(if exponent.negative { -exponent.value } else { exponent.value })
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================
