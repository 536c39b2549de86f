//! FDI tooth numbering sequences. These are fixed, closed sets: 16 teeth per
//! permanent arch, 32 in the continuous permanent path, 20 deciduous.

/// Upper arch, patient right to left: 18→11 then 21→28.
pub const UPPER_TEETH: [u8; 16] = [18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28];

/// Lower arch, patient right to left: 48→41 then 31→38.
pub const LOWER_TEETH: [u8; 16] = [48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38];

pub const ALL_TEETH: [u8; 32] = [
    18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28, //
    48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38,
];

/// Permanent dentition in continuous oval path order (32 entries).
pub const PERMANENT_ORDER: [u8; 32] = [
    18, 17, 16, 15, 14, 13, 12, 11, //
    21, 22, 23, 24, 25, 26, 27, 28, //
    38, 37, 36, 35, 34, 33, 32, 31, //
    48, 47, 46, 45, 44, 43, 42, 41,
];

/// Deciduous dentition in continuous oval path order (20 entries).
pub const DECIDUOUS_ORDER: [u8; 20] = [
    55, 54, 53, 52, 51, //
    61, 62, 63, 64, 65, //
    75, 74, 73, 72, 71, //
    81, 82, 83, 84, 85,
];

/// Quadrant digit of an FDI number (1-4 permanent, 5-8 deciduous).
pub fn fdi_quadrant(fdi: u8) -> u8 {
    fdi / 10
}
