//! The binary envelope codec for [`DepositTransaction`]s.

use crate::{DEPOSIT_TX_TYPE, DepositError, DepositField, DepositTransaction, EnvelopeError};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rlp::{BufMut, Decodable, EMPTY_STRING_CODE, Encodable, Header};

impl DepositTransaction {
    /// Encodes the transaction as `0x7e || rlp([fields])`.
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out);
        out.into()
    }

    /// Writes the envelope into `out`.
    pub fn encode_to(&self, out: &mut dyn BufMut) {
        out.put_u8(DEPOSIT_TX_TYPE);
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    /// The length of the envelope produced by [`encode`](Self::encode).
    pub fn encoded_len(&self) -> usize {
        let payload_length = self.fields_len();
        1 + Header { list: true, payload_length }.length() + payload_length
    }

    /// Decodes an envelope.
    ///
    /// Fails with [`DepositError::MalformedEnvelope`] when the type byte or the list framing is
    /// wrong, [`DepositError::FieldCountMismatch`] when the list does not hold exactly eight items
    /// and [`DepositError::FieldTypeMismatch`] when an item does not decode to its field's type.
    pub fn decode(raw: &[u8]) -> Result<Self, DepositError> {
        let (&ty, body) = raw.split_first().ok_or(EnvelopeError::Empty)?;
        if ty != DEPOSIT_TX_TYPE {
            return Err(EnvelopeError::UnexpectedType(ty).into());
        }

        let items = split_list(body)?;
        let items: [&[u8]; DepositField::COUNT] = items.as_slice().try_into().map_err(|_| {
            DepositError::FieldCountMismatch { expected: DepositField::COUNT, actual: items.len() }
        })?;
        let [source_hash, from, to, mint, value, gas_limit, is_creation, data] = items;

        Ok(Self {
            source_hash: decode_field::<B256>(DepositField::SourceHash, source_hash)?,
            from: decode_field::<Address>(DepositField::From, from)?,
            to: if to == [EMPTY_STRING_CODE] {
                None
            } else {
                Some(decode_field::<Address>(DepositField::To, to)?)
            },
            mint: decode_field::<U256>(DepositField::Mint, mint)?,
            value: decode_field::<U256>(DepositField::Value, value)?,
            gas_limit: decode_field::<u64>(DepositField::GasLimit, gas_limit)?,
            is_creation: decode_field::<bool>(DepositField::IsCreation, is_creation)?,
            data: decode_field::<Bytes>(DepositField::Data, data)?,
        })
    }

    /// The length of the RLP-encoded fields, without the list header.
    fn fields_len(&self) -> usize {
        self.source_hash.length() +
            self.from.length() +
            self.to.map_or(1, |to| to.length()) +
            self.mint.length() +
            self.value.length() +
            self.gas_limit.length() +
            self.is_creation.length() +
            self.data.length()
    }

    /// Encodes the fields in [`DepositField::ALL`] order, without the list header.
    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.source_hash.encode(out);
        self.from.encode(out);
        match self.to {
            Some(to) => to.encode(out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
        self.mint.encode(out);
        self.value.encode(out);
        self.gas_limit.encode(out);
        self.is_creation.encode(out);
        self.data.encode(out);
    }
}

/// Splits the body of an envelope into the raw encodings of its list items.
fn split_list(body: &[u8]) -> Result<Vec<&[u8]>, EnvelopeError> {
    let mut buf = body;
    let header = Header::decode(&mut buf).map_err(EnvelopeError::Header)?;
    if !header.list {
        return Err(EnvelopeError::NotAList);
    }
    if header.payload_length > buf.len() {
        return Err(EnvelopeError::Truncated {
            needed: header.payload_length,
            available: buf.len(),
        });
    }
    let (mut payload, trailing) = buf.split_at(header.payload_length);
    if !trailing.is_empty() {
        return Err(EnvelopeError::TrailingBytes(trailing.len()));
    }

    let mut items = Vec::with_capacity(DepositField::COUNT);
    while !payload.is_empty() {
        let mut probe = payload;
        let item_header = Header::decode(&mut probe).map_err(EnvelopeError::Header)?;
        // Single bytes below 0x80 are their own encoding and have no header.
        let header_len = payload.len() - probe.len();
        let item_len = header_len + item_header.payload_length;
        if item_len > payload.len() {
            return Err(EnvelopeError::Truncated { needed: item_len, available: payload.len() });
        }
        let (item, rest) = payload.split_at(item_len);
        items.push(item);
        payload = rest;
    }
    Ok(items)
}

/// Decodes one list item as `T`, requiring the item to be consumed entirely.
fn decode_field<T: Decodable>(field: DepositField, mut item: &[u8]) -> Result<T, DepositError> {
    let value =
        T::decode(&mut item).map_err(|reason| DepositError::FieldTypeMismatch { field, reason })?;
    if !item.is_empty() {
        return Err(DepositError::FieldTypeMismatch {
            field,
            reason: alloy_rlp::Error::UnexpectedLength,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex};
    use proptest::prelude::*;

    fn sample() -> DepositTransaction {
        DepositTransaction {
            source_hash: b256!("0x0101010101010101010101010101010101010101010101010101010101010101"),
            from: address!("0x1234567890123456789012345678901234567890"),
            to: Some(address!("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd")),
            mint: U256::from(7),
            value: U256::from(1_000_000_000_000_000_000u64),
            gas_limit: 100_000,
            is_creation: false,
            data: Bytes::from_static(&[0x60, 0x2b, 0x57, 0xfd]),
        }
    }

    /// Wraps already-encoded items into a deposit envelope.
    fn envelope(items: &[Vec<u8>]) -> Vec<u8> {
        let payload: Vec<u8> = items.concat();
        let mut out = vec![DEPOSIT_TX_TYPE];
        Header { list: true, payload_length: payload.len() }.encode(&mut out);
        out.extend_from_slice(&payload);
        out
    }

    fn rlp<T: Encodable>(value: T) -> Vec<u8> {
        alloy_rlp::encode(value)
    }

    fn sample_items() -> Vec<Vec<u8>> {
        let tx = sample();
        vec![
            rlp(tx.source_hash),
            rlp(tx.from),
            rlp(tx.to.unwrap()),
            rlp(tx.mint),
            rlp(tx.value),
            rlp(tx.gas_limit),
            rlp(tx.is_creation),
            rlp(&tx.data),
        ]
    }

    #[test]
    fn test_layout() {
        let encoded = sample().encode();
        assert_eq!(encoded[0], DEPOSIT_TX_TYPE);
        assert_eq!(encoded.len(), sample().encoded_len());
        assert_eq!(&encoded[..], &envelope(&sample_items())[..]);
    }

    #[test]
    fn test_creation_encodes_empty_recipient() {
        let tx = DepositTransaction { to: None, is_creation: true, ..sample() };
        let encoded = tx.encode();
        // type, list header (2 bytes), source hash (33 bytes), from (21 bytes), then `to`.
        assert_eq!(encoded[1 + 2 + 33 + 21], EMPTY_STRING_CODE);
        assert_eq!(DepositTransaction::decode(&encoded).unwrap(), tx);
    }

    #[test]
    fn test_decode_known_vector() {
        let tx = DepositTransaction {
            source_hash: B256::ZERO,
            from: Address::ZERO,
            to: None,
            mint: U256::ZERO,
            value: U256::ZERO,
            gas_limit: 1,
            is_creation: true,
            data: Bytes::new(),
        };
        let raw = hex!(
            "7ef83ca00000000000000000000000000000000000000000000000000000000000000000940000000000000000000000000000000000000000808080010180"
        );
        assert_eq!(DepositTransaction::decode(&raw).unwrap(), tx);
        assert_eq!(&tx.encode()[..], &raw[..]);
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let mut raw = sample().encode().to_vec();
        raw[0] = 0x02;
        assert_eq!(
            DepositTransaction::decode(&raw).unwrap_err(),
            DepositError::MalformedEnvelope(EnvelopeError::UnexpectedType(0x02))
        );
        assert_eq!(
            DepositTransaction::decode(&[]).unwrap_err(),
            DepositError::MalformedEnvelope(EnvelopeError::Empty)
        );
    }

    #[test]
    fn test_decode_rejects_non_list_body() {
        let raw = [DEPOSIT_TX_TYPE, 0x83, 0x01, 0x02, 0x03];
        assert_eq!(
            DepositTransaction::decode(&raw).unwrap_err(),
            DepositError::MalformedEnvelope(EnvelopeError::NotAList)
        );
    }

    #[test]
    fn test_decode_rejects_trailing_and_truncated_input() {
        let mut raw = sample().encode().to_vec();
        raw.push(0x00);
        assert_eq!(
            DepositTransaction::decode(&raw).unwrap_err(),
            DepositError::MalformedEnvelope(EnvelopeError::TrailingBytes(1))
        );

        let raw = sample().encode();
        let err = DepositTransaction::decode(&raw[..raw.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            DepositError::MalformedEnvelope(
                EnvelopeError::Truncated { .. } | EnvelopeError::Header(_)
            )
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        let mut items = sample_items();
        items.pop();
        assert_eq!(
            DepositTransaction::decode(&envelope(&items)).unwrap_err(),
            DepositError::FieldCountMismatch { expected: 8, actual: 7 }
        );

        let mut items = sample_items();
        items.push(rlp(1u64));
        assert_eq!(
            DepositTransaction::decode(&envelope(&items)).unwrap_err(),
            DepositError::FieldCountMismatch { expected: 8, actual: 9 }
        );
    }

    #[test]
    fn test_decode_rejects_short_source_hash() {
        let mut items = sample_items();
        items[0] = rlp(&[0x11u8; 31][..]);
        let err = DepositTransaction::decode(&envelope(&items)).unwrap_err();
        assert!(matches!(
            err,
            DepositError::FieldTypeMismatch { field: DepositField::SourceHash, .. }
        ));
    }

    #[test]
    fn test_decode_rejects_mistyped_fields() {
        // A 19-byte recipient.
        let mut items = sample_items();
        items[2] = rlp(&[0x22u8; 19][..]);
        let err = DepositTransaction::decode(&envelope(&items)).unwrap_err();
        assert!(matches!(err, DepositError::FieldTypeMismatch { field: DepositField::To, .. }));

        // A gas limit wider than 64 bits.
        let mut items = sample_items();
        items[5] = rlp(U256::from(u128::MAX));
        let err = DepositTransaction::decode(&envelope(&items)).unwrap_err();
        assert!(matches!(
            err,
            DepositError::FieldTypeMismatch { field: DepositField::GasLimit, .. }
        ));

        // A list where the payload should be.
        let mut items = sample_items();
        items[7] = vec![0xc0];
        let err = DepositTransaction::decode(&envelope(&items)).unwrap_err();
        assert!(matches!(err, DepositError::FieldTypeMismatch { field: DepositField::Data, .. }));

        // A boolean that is neither 0x80 nor 0x01.
        let mut items = sample_items();
        items[6] = rlp(2u64);
        let err = DepositTransaction::decode(&envelope(&items)).unwrap_err();
        assert!(matches!(
            err,
            DepositError::FieldTypeMismatch { field: DepositField::IsCreation, .. }
        ));
    }

    prop_compose! {
        fn arb_deposit()(
            source_hash in any::<[u8; 32]>(),
            from in any::<[u8; 20]>(),
            to in any::<[u8; 20]>(),
            is_creation in any::<bool>(),
            mint in any::<[u8; 32]>(),
            value in any::<u128>(),
            gas_limit in any::<u64>(),
            data in proptest::collection::vec(any::<u8>(), 0..256),
        ) -> DepositTransaction {
            DepositTransaction {
                source_hash: B256::from(source_hash),
                from: Address::from(from),
                to: (!is_creation).then(|| Address::from(to)),
                mint: U256::from_be_bytes(mint),
                value: U256::from(value),
                gas_limit,
                is_creation,
                data: data.into(),
            }
        }
    }

    proptest! {
        #[test]
        fn test_roundtrip(tx in arb_deposit()) {
            let encoded = tx.encode();
            prop_assert_eq!(encoded.len(), tx.encoded_len());
            prop_assert_eq!(DepositTransaction::decode(&encoded).unwrap(), tx);
        }
    }
}
