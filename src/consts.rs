use fugit::MillisDurationU32;

/// Default 7-bit address of the PN532 on the I2C bus.
pub const DEFAULT_ADDRESS: u8 = 0x24;

/// Prefix of every frame sent to the device.
pub const WRITE_MARKER: u8 = 0x01;
/// Written on its own to ask the device for data or for its status byte.
pub const READ_MARKER: u8 = 0x01;

/// Largest single bus write issued by the frame writer, marker included.
pub const CHUNK_SIZE: usize = 32;
/// Pause after each chunk of a frame.
pub const CHUNK_PAUSE: MillisDurationU32 = MillisDurationU32::millis(2);

/// Interval between two attempts at taking a contended bus lock.
pub const LOCK_POLL_INTERVAL: MillisDurationU32 = MillisDurationU32::millis(100);
/// Number of attempts before giving up on a contended bus lock (~2 s).
pub const LOCK_POLL_ATTEMPTS: u32 = 20;

/// Used by `wait_ready_default`.
pub const DEFAULT_READY_TIMEOUT: MillisDurationU32 = MillisDurationU32::millis(1000);
/// Delay before the first status probe.
pub const READY_SETTLE: MillisDurationU32 = MillisDurationU32::millis(50);
/// Delay between the status request and the status read.
pub const READY_PROBE_PAUSE: MillisDurationU32 = MillisDurationU32::millis(1);
/// Delay after a "not ready" status or a bus error.
pub const READY_RETRY: MillisDurationU32 = MillisDurationU32::millis(50);

/// Bytes clocked out to pull the device out of power-down.
pub const WAKE_PATTERN: [u8; 5] = [0x55, 0x55, 0x00, 0x00, 0x00];
/// Delay between the address probe and the wake pattern.
pub const WAKE_PROBE_PAUSE: MillisDurationU32 = MillisDurationU32::millis(100);
/// Delay right after the wake pattern.
pub const WAKE_PATTERN_PAUSE: MillisDurationU32 = MillisDurationU32::millis(10);
/// Final delay letting the device stabilize.
pub const WAKE_STABILIZE: MillisDurationU32 = MillisDurationU32::millis(500);
