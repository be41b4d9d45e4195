//! Payload encoding of parsed values

use super::{CLType, ParsedValue};
use crate::bytesrepr::{ByteWriter, BytesReprError};

/// Encode `value` as the payload of a CLValue of type `cl_type`
pub fn encode(value: &ParsedValue, cl_type: &CLType) -> Result<Vec<u8>, BytesReprError> {
    let mut writer = ByteWriter::new();
    write_value(&mut writer, value, cl_type)?;
    Ok(writer.into_bytes())
}

/// Append the payload encoding of `value` to `writer`.
///
/// The value is checked against the descriptor node by node; a value that
/// does not fit fails with [`BytesReprError::TypeMismatch`].
pub fn write_value(
    writer: &mut ByteWriter,
    value: &ParsedValue,
    cl_type: &CLType,
) -> Result<(), BytesReprError> {
    match (cl_type, value) {
        (CLType::Bool, ParsedValue::Bool(v)) => writer.write_bool(*v),
        (CLType::I32, ParsedValue::I32(v)) => writer.write_i32(*v),
        (CLType::I64, ParsedValue::I64(v)) => writer.write_i64(*v),
        (CLType::U8, ParsedValue::U8(v)) => writer.write_u8(*v),
        (CLType::U32, ParsedValue::U32(v)) => writer.write_u32(*v),
        (CLType::U64, ParsedValue::U64(v)) => writer.write_u64(*v),
        (CLType::U128, ParsedValue::U128(v)) => writer.write_u128(v),
        (CLType::U256, ParsedValue::U256(v)) => writer.write_u256(v),
        (CLType::U512, ParsedValue::U512(v)) => writer.write_u512(v),
        (CLType::Unit, ParsedValue::Unit) => {}
        (CLType::String, ParsedValue::String(s)) => writer.write_string(s)?,
        (CLType::Key, ParsedValue::Key(key)) => key.write(writer),
        (CLType::URef, ParsedValue::URef(uref)) => writer.write_bytes(&uref.to_bytes()),
        (CLType::PublicKey, ParsedValue::PublicKey(key)) => writer.write_bytes(&key.to_bytes()),
        (CLType::Option(_), ParsedValue::Option(None)) => writer.write_u8(0),
        (CLType::Option(inner), ParsedValue::Option(Some(v))) => {
            writer.write_u8(1);
            write_value(writer, v, inner)?;
        }
        (CLType::List(element), ParsedValue::List(items)) => {
            writer.write_len(items.len())?;
            for item in items {
                write_value(writer, item, element)?;
            }
        }
        (CLType::ByteArray(size), ParsedValue::ByteArray(bytes)) if bytes.len() == *size as usize => {
            writer.write_bytes(bytes)
        }
        (CLType::Result { err, .. }, ParsedValue::Result(Err(e))) => {
            writer.write_u8(0);
            write_value(writer, e, err)?;
        }
        (CLType::Result { ok, .. }, ParsedValue::Result(Ok(v))) => {
            writer.write_u8(1);
            write_value(writer, v, ok)?;
        }
        (CLType::Map { key, value: value_type }, ParsedValue::Map(entries)) => {
            writer.write_len(entries.len())?;
            for (k, v) in entries {
                write_value(writer, k, key)?;
                write_value(writer, v, value_type)?;
            }
        }
        (CLType::Tuple1(ta), ParsedValue::Tuple1(a)) => write_value(writer, a, ta)?,
        (CLType::Tuple2(ta, tb), ParsedValue::Tuple2(a, b)) => {
            write_value(writer, a, ta)?;
            write_value(writer, b, tb)?;
        }
        (CLType::Tuple3(ta, tb, tc), ParsedValue::Tuple3(a, b, c)) => {
            write_value(writer, a, ta)?;
            write_value(writer, b, tb)?;
            write_value(writer, c, tc)?;
        }
        (CLType::Any, ParsedValue::Any(bytes)) => writer.write_bytes(bytes),
        (expected, found) => {
            let found = match found {
                ParsedValue::ByteArray(bytes) => format!("ByteArray({})", bytes.len()),
                other => other.kind_name().to_string(),
            };
            return Err(BytesReprError::TypeMismatch {
                expected: expected.clone(),
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{AccessRights, Key, URef};
    use cspr_primitives::U512;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&ParsedValue::Bool(true), &CLType::Bool).unwrap(), vec![0x01]);
        assert_eq!(
            encode(&ParsedValue::I32(-10), &CLType::I32).unwrap(),
            vec![0xf6, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            encode(&ParsedValue::String("abc".into()), &CLType::String).unwrap(),
            vec![0x03, 0x00, 0x00, 0x00, b'a', b'b', b'c']
        );
        assert_eq!(
            encode(&ParsedValue::U512(U512::from(256u64)), &CLType::U512).unwrap(),
            vec![0x02, 0x00, 0x01]
        );
        assert!(encode(&ParsedValue::Unit, &CLType::Unit).unwrap().is_empty());
    }

    #[test]
    fn test_encode_result_discriminants() {
        let cl_type = CLType::result(CLType::U8, CLType::String);
        assert_eq!(
            encode(&ParsedValue::ok(ParsedValue::U8(7)), &cl_type).unwrap(),
            vec![0x01, 0x07]
        );
        assert_eq!(
            encode(&ParsedValue::err(ParsedValue::String(String::new())), &cl_type).unwrap(),
            vec![0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_map_keeps_order() {
        let cl_type = CLType::map(CLType::U8, CLType::Bool);
        let value = ParsedValue::Map(vec![
            (ParsedValue::U8(9), ParsedValue::Bool(true)),
            (ParsedValue::U8(1), ParsedValue::Bool(false)),
        ]);
        assert_eq!(
            encode(&value, &cl_type).unwrap(),
            vec![0x02, 0x00, 0x00, 0x00, 0x09, 0x01, 0x01, 0x00]
        );
    }

    #[test]
    fn test_encode_key_and_uref() {
        let uref = URef::new([0x11; 32], AccessRights::READ_ADD_WRITE);
        let bytes = encode(&ParsedValue::URef(uref), &CLType::URef).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[32], 0x07);

        let key = encode(&ParsedValue::Key(Key::Hash([0x22; 32])), &CLType::Key).unwrap();
        assert_eq!(key[0], 0x01);
        assert_eq!(key.len(), 33);
    }

    #[test]
    fn test_type_mismatch() {
        let err = encode(&ParsedValue::I32(1), &CLType::Bool).unwrap_err();
        assert_eq!(
            err,
            BytesReprError::TypeMismatch {
                expected: CLType::Bool,
                found: "I32".into()
            }
        );

        let nested = ParsedValue::List(vec![ParsedValue::U8(1), ParsedValue::U32(2)]);
        assert!(encode(&nested, &CLType::list(CLType::U8)).is_err());
    }

    #[test]
    fn test_byte_array_length_checked() {
        let value = ParsedValue::ByteArray(vec![0u8; 4]);
        assert!(encode(&value, &CLType::byte_array(4)).is_ok());
        let err = encode(&value, &CLType::byte_array(8)).unwrap_err();
        assert_eq!(err.to_string(), "value does not match type ByteArray(8): found ByteArray(4)");
    }
}
