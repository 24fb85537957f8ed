//! GF(2^8) arithmetic over a configurable primitive polynomial.
//!
//! A [`Field`] holds precomputed exp/log tables for the 256-element field
//! generated by α = 2. Two instances cover the supported barcode
//! symbologies: [`QR_CODE_FIELD`] and [`DATA_MATRIX_FIELD`].

/// GF(256) under the QR code primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub static QR_CODE_FIELD: Field = Field::new(0x011D);

/// GF(256) under the Data Matrix primitive polynomial x^8 + x^5 + x^3 + x^2 + 1.
pub static DATA_MATRIX_FIELD: Field = Field::new(0x012D);

/// GF(256) represented as exp/log tables.
///
/// The tables are deterministic given the primitive polynomial and are built
/// at compile time, so a `Field` can live in a `static` and be shared by any
/// number of concurrent decoders.
pub struct Field {
    exp: [u8; 256],
    log: [u8; 256],
}

impl Field {
    /// Build the field tables for a 9-bit primitive polynomial.
    ///
    /// Walks x = α^i for i in 0..256, reducing by `primitive` whenever bit 8
    /// is set. The multiplicative group has order 255, so `exp[255]` wraps
    /// back to `exp[0] = 1`. `log[0]` is left untouched and is never read.
    pub const fn new(primitive: u16) -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];

        let mut x: u16 = 1;
        let mut i = 0;
        while i < 256 {
            exp[i] = x as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= primitive;
            }
            i += 1;
        }

        let mut i = 0;
        while i < 255 {
            log[exp[i] as usize] = i as u8;
            i += 1;
        }

        Field { exp, log }
    }

    /// α^(i mod 255).
    #[inline]
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i % 255]
    }

    /// The unique i in 0..=254 with α^i = v. Undefined for v = 0.
    #[inline]
    pub fn log(&self, v: u8) -> u8 {
        debug_assert!(v != 0, "log(0) is undefined");
        self.log[v as usize]
    }

    /// Multiplicative inverse of a non-zero element: α^(255 - log(v)).
    #[inline]
    pub fn inverse(&self, v: u8) -> u8 {
        debug_assert!(v != 0, "0 has no inverse");
        self.exp[255 - self.log[v as usize] as usize]
    }

    /// Product of two field elements.
    #[inline]
    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else {
            self.exp[(self.log[a as usize] as usize + self.log[b as usize] as usize) % 255]
        }
    }

    /// Sum (equivalently difference) of two field elements.
    ///
    /// GF(256) has characteristic 2, so addition and subtraction are the
    /// same XOR.
    #[inline]
    pub fn add(a: u8, b: u8) -> u8 {
        a ^ b
    }
}
