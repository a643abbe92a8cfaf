//! Security Control field reader, carried for wire-layout completeness.
//!
//! OSNP's current stack transmits and accepts cleartext headers — no
//! AES-CCM* verification or decryption is implemented here. The structural
//! layout (security level, key identifier mode, frame counter width, key
//! identifier width) is preserved so a future implementation can add
//! cryptographic processing without changing the wire codec.

/// The IEEE 802.15.4 Security Control octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityControl {
    octet: u8,
}

impl SecurityControl {
    /// Wrap a raw Security Control octet.
    pub fn new(octet: u8) -> Self {
        Self { octet }
    }

    /// Return the raw octet.
    pub fn octet(&self) -> u8 {
        self.octet
    }

    /// Return the security level field (bits `[0..3]`).
    pub fn security_level(&self) -> SecurityLevel {
        SecurityLevel::from(self.octet & 0b111)
    }

    /// Return the key identifier mode field (bits `[3..5]`).
    pub fn key_identifier_mode(&self) -> KeyIdentifierMode {
        KeyIdentifierMode::from((self.octet >> 3) & 0b11)
    }
}

/// Security level, as carried in the low 3 bits of [`SecurityControl`].
///
/// Discriminants match the original header's `SL_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    /// No security applied.
    None = 0x00,
    /// 32-bit MIC only.
    Mic32 = 0x01,
    /// 64-bit MIC only.
    Mic64 = 0x02,
    /// 128-bit MIC only.
    Mic128 = 0x03,
    /// Encryption only.
    Enc = 0x04,
    /// Encryption with 32-bit MIC.
    EncMic32 = 0x05,
    /// Encryption with 64-bit MIC.
    EncMic64 = 0x06,
    /// Encryption with 128-bit MIC.
    EncMic128 = 0x07,
}

impl From<u8> for SecurityLevel {
    fn from(value: u8) -> Self {
        match value & 0b111 {
            0x00 => Self::None,
            0x01 => Self::Mic32,
            0x02 => Self::Mic64,
            0x03 => Self::Mic128,
            0x04 => Self::Enc,
            0x05 => Self::EncMic32,
            0x06 => Self::EncMic64,
            _ => Self::EncMic128,
        }
    }
}

/// Key Identifier Mode (KIM), selecting the width of the key identifier
/// field in the security header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIdentifierMode {
    /// Key is implicit from other context; no key identifier field.
    Implicit = 0x00,
    /// Key identifier is a 1-octet index.
    OneIndex = 0x01,
    /// Key identifier is a 4-octet source plus a 1-octet index.
    FourSourceOneIndex = 0x02,
    /// Key identifier is an 8-octet source plus a 1-octet index.
    EightSourceOneIndex = 0x03,
}

impl KeyIdentifierMode {
    /// Return the width, in octets, of the key identifier field for this
    /// mode: `{0, 1, 5, 9}`.
    pub fn key_id_len(&self) -> usize {
        match self {
            Self::Implicit => 0,
            Self::OneIndex => 1,
            Self::FourSourceOneIndex => 5,
            Self::EightSourceOneIndex => 9,
        }
    }
}

impl From<u8> for KeyIdentifierMode {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0x00 => Self::Implicit,
            0x01 => Self::OneIndex,
            0x02 => Self::FourSourceOneIndex,
            _ => Self::EightSourceOneIndex,
        }
    }
}
