//! GATT Constants
//!
//! ATT framing limits and the identity of the EEG service as advertised
//! to the central. UUID byte arrays are little-endian, the order they
//! appear on air.

// ===== ATT FRAMING =====

/// Bytes of a Handle Value Notification that are not payload
/// (1 byte opcode + 2 bytes attribute handle).
pub const ATT_NOTIFY_OVERHEAD: usize = 3;

/// ATT MTU before any exchange takes place.
pub const DEFAULT_ATT_MTU: u16 = 23;

/// Largest ATT MTU a peer may negotiate.
pub const MAX_ATT_MTU: u16 = 517;

// ===== CLIENT CHARACTERISTIC CONFIGURATION =====

/// CCC descriptor value enabling notifications.
pub const CCC_NOTIFY: u16 = 0x0001;

/// CCC descriptor value enabling indications.
pub const CCC_INDICATE: u16 = 0x0002;

// ===== SERVICE IDENTITY =====

/// Complete local name in the advertising payload.
pub const DEVICE_NAME: &str = "EEG Sensor";

/// EEG service, `0000745d-0000-1100-8800-00605f9c34ca`.
pub const EEG_SERVICE_UUID: [u8; 16] = [
    0xCA, 0x34, 0x9C, 0x5F, 0x60, 0x00, 0x00, 0x88,
    0x00, 0x11, 0x00, 0x00, 0x5D, 0x74, 0x00, 0x00,
];

/// Notify-only data characteristic, `00002a27-0000-4300-8900-00805a4a21fb`.
pub const EEG_DATA_CHAR_UUID: [u8; 16] = [
    0xFB, 0x21, 0x4A, 0x5A, 0x80, 0x00, 0x00, 0x89,
    0x00, 0x43, 0x00, 0x00, 0x27, 0x2A, 0x00, 0x00,
];

/// Writable one-byte mode characteristic, `bb54968e-e5f8-c6ad-eb11-982cdfb71a46`.
pub const CONFIG_CHAR_UUID: [u8; 16] = [
    0x46, 0x1A, 0xB7, 0xDF, 0x2C, 0x98, 0x11, 0xEB,
    0xAD, 0xC6, 0xF8, 0xE5, 0x8E, 0x96, 0x54, 0xBB,
];
