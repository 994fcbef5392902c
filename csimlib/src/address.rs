use crate::config::CacheParams;

/// Splits addresses into a tag and a set index
///
/// The masks and shifts are worked out once on construction, so decoding is a pair of shifts and
/// an and. Block offset bits are dropped entirely; nothing downstream looks at them
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AddressDecoder {
    block_bits: u32,
    tag_shift: u32,
    set_mask: u64,
}

impl AddressDecoder {
    /// Creates a decoder for `block_bits` offset bits and `set_bits` set index bits
    ///
    /// The caller is responsible for `set_bits + block_bits <= 64`, which [`CacheParams`] already
    /// guarantees
    pub fn new(block_bits: u32, set_bits: u32) -> Self {
        Self {
            block_bits,
            tag_shift: block_bits + set_bits,
            set_mask: 1u64.checked_shl(set_bits).map_or(u64::MAX, |sets| sets - 1),
        }
    }

    pub fn from_params(params: &CacheParams) -> Self {
        Self::new(params.block_bits(), params.set_bits())
    }

    /// Converts an address into `(tag, set_index)`
    ///
    /// `set_index = (address >> b) mod 2^s` and `tag = address >> (b + s)`. A shift by the full
    /// width of the address yields 0 rather than overflowing
    ///
    /// # Arguments
    ///
    /// * `address`: Any address, there are no error conditions
    ///
    /// returns: (u64, u64)
    ///
    /// # Examples
    ///
    /// ```
    /// use csimlib::address::AddressDecoder;
    /// let decoder = AddressDecoder::new(4, 4);
    /// assert_eq!(decoder.decode(0x110), (1, 1));
    /// assert_eq!(decoder.decode(0x210), (2, 1));
    /// ```
    #[inline]
    pub fn decode(&self, address: u64) -> (u64, u64) {
        let set = address.checked_shr(self.block_bits).unwrap_or(0) & self.set_mask;
        let tag = address.checked_shr(self.tag_shift).unwrap_or(0);
        (tag, set)
    }
}
