//! xs6 is a toolchain library for the Xilinx Spartan-6 XC6SLX9: an
//! in-memory model of the chip's tile fabric and a bit-exact codec
//! between the vendor's configuration bitstream and that model.
//!
//! The model is built deterministically from a compact column/wiring
//! descriptor and carries every tile, named connection point,
//! inter-tile wire and programmable switch of the die. The codec pair
//! parses the framed packet stream into a canonical bit-array indexed
//! by (row, major, minor, bit) and extracts device and switch state out
//! of it, or runs the same translation in reverse.
//!
//! # Examples
//!
//! ```no_run
//! let bytes = std::fs::read("design.bit").unwrap();
//! let bs = xs6::read_bitstream(&bytes)?;
//! let mut model = xs6::FpgaModel::xc6slx9().unwrap();
//! let mut bits = bs.bits.clone();
//! xs6::extract_model(&mut model, &mut bits).unwrap();
//! # Ok::<(), xs6::BitError>(())
//! ```

pub mod builder;
pub mod consts;
pub mod emit;
pub mod extract;
pub mod frame;
pub mod lut;
pub mod model;
pub mod parts;
pub mod reader;
pub mod strarray;

pub use flagset;

pub use builder::{bitstream_for_model, write_bitstream};
pub use consts::{Cmd, ConfigReg, TileFlag, TileKind, XCheck, YCheck, YxCheck};
pub use emit::{write_model, EmitError};
pub use extract::{extract_model, ExtractError};
pub use frame::FrameBits;
pub use lut::{lut2bool, parse_boolexpr, BoolExpr, LutError};
pub use model::{DevKind, Device, FpgaModel, ModelError, Net, SwDir, SwitchChain, Tile, WNet};
pub use parts::{parse_bitpos_catalogue, RoutingBitPos};
pub use reader::{read_bitstream, BitError, Bitstream, RegAction};
pub use strarray::{HashedStrarray, StrIdx, STRIDX_NO_ENTRY};
