//! # Dictionary ``{ T -> Vec<u8> }`` Token Decoder

use core::marker::PhantomData;

use crate::{
    decoders::TokenDecoder,
    errors::{LipiError, LipiResult},
    types::{TokenType, token_index, token_u64},
    vocab::{Vocabulary, size_hints::EXPECTED_BYTES_PER_TOKEN},
};

/// A [`TokenDecoder<T>`] which keeps a dense array index into a shared slab.
///
/// Every vocabulary token (base and merged) is stored in the slab;
/// ids with no entry fail with `InvalidTokenId`.
///
/// ## Style Hints
///
/// When there is no local ambiguity, instance names should prefer `decoder`;
/// and expand to `dict_decoder` when there is ambiguity.
#[derive(Clone)]
pub struct DictionaryDecoder<T: TokenType> {
    index: Vec<(usize, usize)>,
    slab: Vec<u8>,

    expected_bytes_per_token: f32,
    _marker: PhantomData<T>,
}

impl<T: TokenType> DictionaryDecoder<T> {
    /// Build a [`DictionaryDecoder`] from a [`Vocabulary`].
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary to build the decoder from.
    pub fn from_vocab(vocab: &Vocabulary<T>) -> Self {
        let total_bytes = vocab.tokens().iter().map(|t| t.bytes.len()).sum();
        let mut slab = Vec::with_capacity(total_bytes);

        let index = vocab
            .tokens()
            .iter()
            .map(|t| {
                let start = slab.len();
                slab.extend_from_slice(&t.bytes);
                (start, slab.len())
            })
            .collect();

        Self {
            index,
            slab,
            expected_bytes_per_token: EXPECTED_BYTES_PER_TOKEN,
            _marker: PhantomData,
        }
    }

    /// Get the expected bytes per token.
    pub fn expected_bytes_per_token(&self) -> f32 {
        self.expected_bytes_per_token
    }

    /// Sets the expected bytes per token.
    ///
    /// This is used to bias the capacity of the output buffer in `try_decode_to_bytes`.
    pub fn with_expected_bytes_per_token(
        mut self,
        expected: f32,
    ) -> Self {
        self.expected_bytes_per_token = expected;
        self
    }

    /// Predict the capacity needed when pre-allocating output buffers.
    pub fn predicted_byte_buffer_size(
        &self,
        tokens: &[T],
    ) -> usize {
        (tokens.len() as f32 * 1.1 * self.expected_bytes_per_token) as usize
    }

    /// The number of tokens in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Lookup a token.
    pub fn lookup_span(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.index
            .get(token_index(token))
            .map(|&(start, end)| &self.slab[start..end])
    }
}

impl<T: TokenType> TokenDecoder<T> for DictionaryDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, buf)))]
    fn try_decode_append_bytes(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> LipiResult<()> {
        let start = buf.len();
        for &t in tokens {
            match self.lookup_span(t) {
                Some(span) => buf.extend_from_slice(span),
                None => {
                    buf.truncate(start);
                    return Err(LipiError::InvalidTokenId { id: token_u64(t) });
                }
            }
        }
        Ok(())
    }

    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> LipiResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.predicted_byte_buffer_size(tokens));
        self.try_decode_append_bytes(tokens, &mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compat::traits::static_is_send_sync_check,
        vocab::{SeedScript, VocabularyBuilder},
    };

    fn test_vocab() -> Vocabulary<u32> {
        let mut vocab: Vocabulary<u32> = VocabularyBuilder::new()
            .with_script(SeedScript::Telugu)
            .build()
            .unwrap();
        vocab.push_merged("భా".as_bytes().to_vec()).unwrap();
        vocab.push_merged(vec![0xE0, 0xB0]).unwrap();
        vocab
    }

    #[test]
    fn test_decoder() {
        let vocab = test_vocab();
        let decoder =
            DictionaryDecoder::from_vocab(&vocab).with_expected_bytes_per_token(3.0);
        static_is_send_sync_check(&decoder);

        assert_eq!(decoder.expected_bytes_per_token(), 3.0);
        assert_eq!(decoder.len(), 386);

        for token in vocab.tokens() {
            assert_eq!(decoder.lookup_span(token.id), Some(token.bytes.as_slice()));
        }

        let bhaa = vocab.lookup_span("భా".as_bytes()).unwrap();
        let sha = vocab.lookup_seed("ష".as_bytes()).unwrap();
        assert_eq!(decoder.try_decode_to_string(&[bhaa, sha]).unwrap(), "భాష");
        assert_eq!(decoder.try_decode_to_string(&[]).unwrap(), "");
        assert_eq!(decoder.try_decode_to_bytes(&[97, 98]).unwrap(), b"ab");
    }

    #[test]
    fn test_invalid_token() {
        let decoder = DictionaryDecoder::from_vocab(&test_vocab());

        assert!(matches!(
            decoder.try_decode_to_bytes(&[97, 386]),
            Err(LipiError::InvalidTokenId { id: 386 })
        ));
        assert!(matches!(
            decoder.try_decode_to_string(&[u32::MAX]),
            Err(LipiError::InvalidTokenId { id: 4294967295 })
        ));

        // A failed append leaves the buffer untouched.
        let mut buf = b"xyz".to_vec();
        assert!(decoder.try_decode_append_bytes(&[97, 999], &mut buf).is_err());
        assert_eq!(buf, b"xyz");
    }

    #[test]
    fn test_invalid_utf8() {
        let decoder = DictionaryDecoder::from_vocab(&test_vocab());

        // Raw bytes are still available.
        assert_eq!(decoder.try_decode_to_bytes(&[385]).unwrap(), vec![0xE0, 0xB0]);

        assert!(matches!(
            decoder.try_decode_to_string(&[97, 385]),
            Err(LipiError::InvalidUtf8 { valid_up_to: 1 })
        ));
    }

    #[test]
    fn test_batch() {
        let decoder = DictionaryDecoder::from_vocab(&test_vocab());

        let batch: Vec<&[u32]> = vec![&[104, 105], &[], &[97]];
        assert_eq!(
            decoder.try_decode_batch_to_strings(&batch).unwrap(),
            vec!["hi".to_string(), String::new(), "a".to_string()]
        );
        assert_eq!(
            decoder.try_decode_batch_to_bytes(&batch).unwrap(),
            vec![b"hi".to_vec(), vec![], b"a".to_vec()]
        );

        let bad: Vec<&[u32]> = vec![&[97], &[1000]];
        assert!(decoder.try_decode_batch_to_strings(&bad).is_err());
    }
}
