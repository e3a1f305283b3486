pub const COMMAND_START: u8 = b'['; // every command and response begins here
pub const MNEMONIC_END: u8 = b']';
pub const TERMINATOR_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const TERMINATOR_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub const TERMINATOR: [u8; 2] = [TERMINATOR_CHAR_1, TERMINATOR_CHAR_2];

pub const CHECKSUM_MARKER: u8 = b'*';
pub(crate) const CHECKSUM_DIGITS: usize = 4;
// '*' + 4 hex digits + CR LF
pub(crate) const CHECKSUM_TRAILER_LEN: usize = 1 + CHECKSUM_DIGITS + TERMINATOR.len();

pub const PVT1B_MNEMONIC: &str = "[PVT1B]";

pub(crate) const PVT1B_LATITUDE_OFFSET: usize = 17;
pub(crate) const PVT1B_LONGITUDE_OFFSET: usize = 21;
pub(crate) const PVT1B_FRACTION_OFFSET: usize = 25; // high nibble: latitude, low nibble: longitude
pub(crate) const PVT1B_VEL_NORTH_OFFSET: usize = 42;
pub(crate) const PVT1B_VEL_EAST_OFFSET: usize = 45;
pub(crate) const PVT1B_VEL_UP_OFFSET: usize = 48;
pub(crate) const PVT1B_VELOCITY_LEN: usize = 3;
/// Smallest PVT1B message that still holds every decoded field
pub const PVT1B_MIN_LEN: usize = PVT1B_VEL_UP_OFFSET + PVT1B_VELOCITY_LEN;

pub(crate) const LAT_LON_SCALE: f64 = 2048.0; // 2^-11 arc-seconds per LSB
pub(crate) const LAT_LON_FRACTION_SCALE: f64 = 32768.0; // 2^-15 arc-seconds per nibble LSB
pub(crate) const ARC_SECONDS_PER_DEGREE: f64 = 3600.0;
pub(crate) const VELOCITY_SCALE: f64 = 1024.0;

pub const USB_VENDOR_ID: u16 = 0x1c45;
pub const USB_PRODUCT_ID: u16 = 0x3050;
pub const DEVICE_NODE_PREFIX: &str = "/dev/usb/navcom-SF-3050-"; // followed by the minor index
pub const DEFAULT_DEVICE_PATH: &str = "/dev/usb/navcom-SF-3050-0";

pub const DEFAULT_CHUNK_SIZE: usize = 64;
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;
