//! Panel wiring topology
//!
//! A panel is one or more stacked single-scan modules sharing a shift chain.
//! Each module has two data chains (upper and lower half). On every scan
//! step the driver shifts one row for each chain of each module, starting
//! with the module farthest from the input connector.
//!
//! ```text
//!            ┌────────────────────────┐
//!  module 0  │ rows 0..Hm   (far end) │  shifted first
//!            ├────────────────────────┤
//!  module 1  │ rows Hm..2Hm           │  shifted last
//!            └────────────────────────┘
//!                        ▲ input connector
//! ```
//!
//! A module mounted upside down sees its rows and columns in reverse, so
//! its rows are addressed back-to-front and its columns are shifted in
//! reverse order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of row-address lines on the panel connector (A-E)
pub const MAX_ADDRESS_BITS: u8 = 5;

/// Maximum number of stacked modules
pub const MAX_MODULES: usize = 2;

/// Errors for topologies that cannot drive a given buffer or bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopologyError {
    /// Buffer width is zero
    ZeroWidth,
    /// Buffer height does not split evenly into row groups
    UnevenHeight,
    /// Rows per scan step need more address lines than the connector has
    TooManyRows,
    /// The panel bus has fewer address lines than the topology needs
    NotEnoughAddressLines,
}

/// Scan addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanMode {
    /// One module, two rows lit per step
    Single,
    /// Two stacked modules, four rows lit per step
    #[default]
    Dual,
}

impl ScanMode {
    /// Number of stacked modules in this mode
    pub const fn module_count(self) -> usize {
        match self {
            ScanMode::Single => 1,
            ScanMode::Dual => 2,
        }
    }
}

/// Physical mounting of a module relative to the logical image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModuleOrientation {
    Upright,
    Inverted,
}

/// Column order in which a module's pixels are shifted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainOrder {
    /// Column 0 first
    Forward,
    /// Last column first
    Reverse,
}

impl ChainOrder {
    /// Buffer column for the `n`th pixel shifted into a `width` wide chain
    #[inline]
    pub const fn column(self, n: usize, width: usize) -> usize {
        match self {
            ChainOrder::Forward => n,
            ChainOrder::Reverse => width - 1 - n,
        }
    }
}

/// Buffer rows fed to the two chains of one module during one scan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSegment {
    /// Buffer row presented on the R1/G1/B1 chain
    pub upper_row: usize,
    /// Buffer row presented on the R2/G2/B2 chain
    pub lower_row: usize,
    /// Column order for this module
    pub order: ChainOrder,
}

/// Wiring topology of a panel
///
/// Fixed at startup; the scan driver never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelTopology {
    scan: ScanMode,
    /// Orientation per module, in shift order (far module first)
    modules: [ModuleOrientation; MAX_MODULES],
    /// Invert the y axis on pixel writes (`y' = H - y - 1`)
    flip_y: bool,
}

impl Default for PanelTopology {
    fn default() -> Self {
        Self::dual_scan()
    }
}

impl PanelTopology {
    /// Single module driven two rows at a time, mounted upside down
    pub const fn single_scan() -> Self {
        Self {
            scan: ScanMode::Single,
            modules: [ModuleOrientation::Upright; MAX_MODULES],
            flip_y: true,
        }
    }

    /// Two stacked modules, the far one rotated 180° relative to the near one
    pub const fn dual_scan() -> Self {
        Self {
            scan: ScanMode::Dual,
            modules: [ModuleOrientation::Inverted, ModuleOrientation::Upright],
            flip_y: false,
        }
    }

    /// Default topology for a scan mode
    pub const fn for_mode(scan: ScanMode) -> Self {
        match scan {
            ScanMode::Single => Self::single_scan(),
            ScanMode::Dual => Self::dual_scan(),
        }
    }

    /// Override the y-axis inversion
    pub const fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Override the orientation of one module
    pub const fn with_module(mut self, module: usize, orientation: ModuleOrientation) -> Self {
        self.modules[module] = orientation;
        self
    }

    pub const fn scan_mode(&self) -> ScanMode {
        self.scan
    }

    pub const fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub const fn module_count(&self) -> usize {
        self.scan.module_count()
    }

    pub const fn orientation(&self, module: usize) -> ModuleOrientation {
        self.modules[module]
    }

    /// Number of scan steps in one full refresh
    pub const fn rows_per_scan(&self, height: usize) -> usize {
        height / (2 * self.module_count())
    }

    /// Address lines needed to select every scan step
    pub const fn address_bits(&self, height: usize) -> u8 {
        let rows = self.rows_per_scan(height);
        let mut bits = 0;
        while (1usize << bits) < rows {
            bits += 1;
        }
        bits
    }

    /// Check that this topology can scan a `W` x `H` buffer
    pub fn validate<const W: usize, const H: usize>(&self) -> Result<(), TopologyError> {
        if W == 0 {
            return Err(TopologyError::ZeroWidth);
        }

        let groups = 2 * self.module_count();
        if H == 0 || H % groups != 0 {
            return Err(TopologyError::UnevenHeight);
        }

        if self.address_bits(H) > MAX_ADDRESS_BITS {
            return Err(TopologyError::TooManyRows);
        }

        Ok(())
    }

    /// Rows and column order for `module` at scan step `index`
    pub const fn segment(&self, height: usize, module: usize, index: usize) -> ScanSegment {
        let module_height = height / self.module_count();
        let half = module_height / 2;
        let base = module * module_height;

        match self.modules[module] {
            ModuleOrientation::Upright => ScanSegment {
                upper_row: base + index,
                lower_row: base + half + index,
                order: ChainOrder::Forward,
            },
            ModuleOrientation::Inverted => {
                let mirrored = half - 1 - index;
                ScanSegment {
                    upper_row: base + half + mirrored,
                    lower_row: base + mirrored,
                    order: ChainOrder::Reverse,
                }
            }
        }
    }
}
