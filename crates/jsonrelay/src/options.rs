/// How decimal numbers are rendered when they exceed native precision.
///
/// The number scanner escalates to the arbitrary-precision path on its own
/// when a value cannot be represented exactly in native types; this option
/// can force either path regardless of what the scanner decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BigDecLoad {
    /// Let the scanner decide: native types when they are exact, big
    /// decimals otherwise.
    #[default]
    Auto,
    /// Every number takes the arbitrary-precision path.
    BigDec,
    /// Numbers that would escalate are coerced back to `f64`.
    Float,
}

/// Configuration for a single parse.
///
/// # Examples
///
/// ```rust
/// use jsonrelay::{parse_with, BigDecLoad, Options};
///
/// let options = Options {
///     bigdec_load: BigDecLoad::BigDec,
///     ..Default::default()
/// };
/// let value = parse_with("0.1", options).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Decimal rendering policy. See [`BigDecLoad`].
    ///
    /// # Default
    ///
    /// `BigDecLoad::Auto`
    pub bigdec_load: BigDecLoad,

    /// Whether the handler should track cyclic references between the
    /// values it builds. The core does not interpret this; it is delivered
    /// to the handler through `parse_start`.
    ///
    /// # Default
    ///
    /// `false`
    pub circular: bool,

    /// Whether the host may run collection or relocation of handler-built
    /// values while the parse is in flight. Advisory: delivered to the
    /// handler through `parse_start` for hosts that need to bracket the
    /// parse with global-invariant suspension.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_gc: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bigdec_load: BigDecLoad::Auto,
            circular: false,
            allow_gc: true,
        }
    }
}
