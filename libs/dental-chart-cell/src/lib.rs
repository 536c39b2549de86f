//! Pure coordinate math for dental charts. Two layouts: an anatomical
//! parabolic arch and an oval path. No rendering dependencies; output is
//! limited to coordinate structs and SVG path strings.

pub mod arch;
pub mod orders;
pub mod oval;

pub use arch::{
    arch_guide_path, tooth_crown_path, tooth_position, ArchSide, ToothPosition,
};
pub use orders::{fdi_quadrant, ALL_TEETH, DECIDUOUS_ORDER, LOWER_TEETH, PERMANENT_ORDER, UPPER_TEETH};
pub use oval::{connector_segments, oval_positions, ConnectorSegment, OvalOptions, OvalToothPosition};
