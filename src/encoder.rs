//! Reed-Solomon encoder: fills the parity tail of a codeword so that its
//! syndromes vanish under the matching decoder.

use crate::field::Field;
use crate::poly::Poly;
use crate::Error;

/// Reed-Solomon encoder bound to a GF(256) instance.
pub struct Encoder<'a> {
    field: &'a Field,
}

impl<'a> Encoder<'a> {
    pub fn new(field: &'a Field) -> Self {
        Encoder { field }
    }

    /// Write `two_s` parity symbols into the tail of `codeword` in place.
    ///
    /// `codeword[..N - two_s]` is the data region; whatever the tail held
    /// before is overwritten. Parity is the remainder of `data(x) · x^two_s`
    /// divided by the generator `Π_{i=0}^{two_s-1} (x + α^i)`.
    pub fn encode(&self, codeword: &mut [u8], two_s: usize) -> Result<(), Error> {
        if two_s == 0 {
            return Ok(());
        }
        if two_s >= codeword.len() {
            return Err(Error::InvalidArgument("no data symbols to protect"));
        }

        let field = self.field;
        let generator = self.build_generator(two_s);

        let data_len = codeword.len() - two_s;
        let info = Poly::new(codeword[..data_len].to_vec());
        let shifted = info.multiply_by_monomial(field, two_s, 1);
        let (_, remainder) = shifted.divide(field, &generator);

        // The remainder has degree < two_s; reading coefficients through
        // `coefficient` left-pads the short ones with zeros.
        for i in 0..two_s {
            codeword[data_len + i] = remainder.coefficient(two_s - 1 - i);
        }
        Ok(())
    }

    fn build_generator(&self, two_s: usize) -> Poly {
        let field = self.field;
        let mut generator = Poly::one();
        for i in 0..two_s {
            generator = generator.multiply(field, &Poly::new(vec![1, field.exp(i)]));
        }
        generator
    }
}
