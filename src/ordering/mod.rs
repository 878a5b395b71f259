//! Profile-guided method ordering.
//!
//! [`ProfiledComparator`] turns a parsed [`MethodProfiles`](crate::profiles::MethodProfiles)
//! into a strict weak ordering over methods. Each interaction owns a numeric
//! range of width [`RANGE_SIZE`]; ranges are laid out every [`RANGE_STRIDE`],
//! cold start first and the rest by name. A method's sort key lands in the
//! range of the first interaction where it is hot enough, and at [`VERY_END`]
//! otherwise.
//!
//! ```text
//! 0.0        1.0   1.1        2.1   2.2            f64::MAX
//! [ColdStart )     [AppSwitch )     [ ...  )   ...  VERY_END
//! ```

mod comparator;

pub use comparator::{ProfiledComparator, SortKeyCache};

/// Width of the key range allotted to each interaction.
pub const RANGE_SIZE: f64 = 1.0;

/// Distance between the starts of consecutive interaction ranges.
pub const RANGE_STRIDE: f64 = 1.1;

/// Start of the cold start range; cold start is always laid out first.
pub const COLD_START_RANGE_BEGIN: f64 = 0.0;

/// Key for methods with no qualifying profile data.
pub const VERY_END: f64 = f64::MAX;

/// Minimum appear percent for placement in an interaction range.
pub const APPEAR_THRESHOLD: f64 = 90.0;

/// Minimum appear percent under the legacy ordering.
pub const LEGACY_APPEAR_THRESHOLD: f64 = 95.0;

/// Instrumented method executed first during cold start.
pub const COLD_START_BEGIN_MARKER: &str = "Lcom/facebook/common/methodpreloader/primarydeps/StartColdStartMethodPreloaderMethodMarker;.startColdStartMethods:()V";

/// Instrumented method executed last during cold start.
pub const COLD_START_END_MARKER: &str = "Lcom/facebook/common/methodpreloader/primarydeps/EndColdStartMethodPreloaderMethodMarker;.endColdStartMethods:()V";
