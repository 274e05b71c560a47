//! Grid coordinates and colors
//!
//! Both types can only be built through validating constructors, so a
//! `Coordinate` is always inside the 8×4 grid and a `Color` never has a
//! channel above [`MAX_CHANNEL`].

/// Grid width in buttons
pub const GRID_COLUMNS: u8 = 8;

/// Grid height in buttons
pub const GRID_ROWS: u8 = 4;

/// Number of addressable cells
pub const LED_COUNT: u8 = GRID_COLUMNS * GRID_ROWS;

/// Largest accepted color channel value (7-bit brightness)
pub const MAX_CHANNEL: u8 = 127;

/// A field was outside its valid domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Flat LED index not in `0..32`
    LedIndex(u8),
    /// Row not in `0..4`
    Row(u8),
    /// Column not in `0..8`
    Column(u8),
    /// Color channel above 127
    Channel(u8),
}

/// Position of a button on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    row: u8,
    column: u8,
}

impl Coordinate {
    /// Create a coordinate from a row and column
    pub fn new(row: u8, column: u8) -> Result<Self, RangeError> {
        if row >= GRID_ROWS {
            return Err(RangeError::Row(row));
        }
        if column >= GRID_COLUMNS {
            return Err(RangeError::Column(column));
        }
        Ok(Self { row, column })
    }

    /// Decode a flat LED index (`row = index / 8`, `column = index % 8`)
    pub fn from_led_index(index: u8) -> Result<Self, RangeError> {
        if index >= LED_COUNT {
            return Err(RangeError::LedIndex(index));
        }
        Ok(Self {
            row: index / GRID_COLUMNS,
            column: index % GRID_COLUMNS,
        })
    }

    /// Flat LED index of this coordinate
    pub fn led_index(&self) -> u8 {
        self.row * GRID_COLUMNS + self.column
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// Every cell of the grid in row-major order
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..LED_COUNT).map(|index| Coordinate {
            row: index / GRID_COLUMNS,
            column: index % GRID_COLUMNS,
        })
    }
}

/// RGB color with 7-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// All channels off
    pub const OFF: Color = Color::saturating(0, 0, 0);

    /// Dim white shown while the controller boots
    pub const BOOT: Color = Color::saturating(16, 16, 16);

    /// Create a color, rejecting any channel above [`MAX_CHANNEL`]
    pub fn new(r: u8, g: u8, b: u8) -> Result<Self, RangeError> {
        for channel in [r, g, b] {
            if channel > MAX_CHANNEL {
                return Err(RangeError::Channel(channel));
            }
        }
        Ok(Self { r, g, b })
    }

    /// Create a color, clamping each channel to [`MAX_CHANNEL`]
    ///
    /// Meant for compile-time palette constants.
    pub const fn saturating(r: u8, g: u8, b: u8) -> Self {
        const fn clamp(v: u8) -> u8 {
            if v > MAX_CHANNEL {
                MAX_CHANNEL
            } else {
                v
            }
        }
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Channels as `[r, g, b]`
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_index_mapping() {
        let first = Coordinate::from_led_index(0).unwrap();
        assert_eq!((first.row(), first.column()), (0, 0));

        let ninth = Coordinate::from_led_index(9).unwrap();
        assert_eq!((ninth.row(), ninth.column()), (1, 1));

        let last = Coordinate::from_led_index(31).unwrap();
        assert_eq!((last.row(), last.column()), (3, 7));
        assert_eq!(last.led_index(), 31);
    }

    #[test]
    fn test_led_index_out_of_range() {
        assert_eq!(Coordinate::from_led_index(32), Err(RangeError::LedIndex(32)));
        assert_eq!(Coordinate::from_led_index(0xFE), Err(RangeError::LedIndex(0xFE)));
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(3, 7).is_ok());
        assert_eq!(Coordinate::new(4, 0), Err(RangeError::Row(4)));
        assert_eq!(Coordinate::new(0, 8), Err(RangeError::Column(8)));
    }

    #[test]
    fn test_all_covers_grid_in_order() {
        let mut count = 0u8;
        for (i, coord) in Coordinate::all().enumerate() {
            assert_eq!(coord.led_index() as usize, i);
            count += 1;
        }
        assert_eq!(count, LED_COUNT);
    }

    #[test]
    fn test_color_channel_limit() {
        assert!(Color::new(127, 127, 127).is_ok());
        assert_eq!(Color::new(0, 128, 0), Err(RangeError::Channel(128)));
        assert_eq!(Color::new(200, 0, 255), Err(RangeError::Channel(200)));
    }

    #[test]
    fn test_saturating_clamps() {
        let c = Color::saturating(255, 10, 128);
        assert_eq!(c.to_array(), [127, 10, 127]);
        assert_eq!(Color::OFF.to_array(), [0, 0, 0]);
    }
}
