use trust_iec::stdlib::bit::{and, not, or, rol, ror, shl, shr, xor};
use trust_iec::value::{AnyClass, IecType, Payload, Value};
use trust_iec::IecError;

fn typed(ty: IecType, raw: i64) -> Value {
    let mut value = Value::new(ty);
    value.set_number(raw.into());
    value
}

#[test]
fn shifts_are_masked_to_the_operand_width() {
    let mut result = Value::null();
    assert_eq!(
        shl(&mut result, &typed(IecType::Word, 0x8001), &Value::from(1_i16)),
        Ok(())
    );
    assert_eq!(result.payload(), &Payload::Word(0x0002));

    assert_eq!(
        shr(&mut result, &typed(IecType::Word, 0x8001), &Value::from(15_i16)),
        Ok(())
    );
    assert_eq!(result.payload(), &Payload::Word(1));
}

#[test]
fn signed_shift_right_is_arithmetic() {
    let mut result = Value::null();
    assert_eq!(shr(&mut result, &Value::from(-8_i16), &Value::from(1_i16)), Ok(()));
    assert_eq!(result.ty(), IecType::Int);
    assert_eq!(result.as_i64(), -4);
}

#[test]
fn negative_amount_reverses_the_shift() {
    let mut result = Value::null();
    assert_eq!(
        shl(&mut result, &typed(IecType::Byte, 0x80), &Value::from(-7_i16)),
        Ok(())
    );
    assert_eq!(result.payload(), &Payload::Byte(1));
}

#[test]
fn shift_rejects_reals() {
    let mut result = Value::null();
    assert_eq!(
        shl(&mut result, &Value::from(1.0_f64), &Value::from(1_i16)),
        Err(IecError::NotAllowedType)
    );
}

#[test]
fn rotate_within_a_byte() {
    let byte = typed(IecType::Byte, 0x81);
    let mut result = Value::null();

    assert_eq!(rol(&mut result, &byte, &Value::from(1_i16)), Ok(()));
    assert_eq!(result.payload(), &Payload::Byte(0x03));

    assert_eq!(ror(&mut result, &byte, &Value::from(1_i16)), Ok(()));
    assert_eq!(result.payload(), &Payload::Byte(0xc0));

    assert_eq!(rol(&mut result, &byte, &Value::from(-1_i16)), Ok(()));
    assert_eq!(result.payload(), &Payload::Byte(0xc0));

    assert_eq!(rol(&mut result, &byte, &Value::from(9_i16)), Ok(()));
    assert_eq!(result.payload(), &Payload::Byte(0x03));
}

#[test]
fn ror_undoes_rol() {
    let word = typed(IecType::DWord, 0x1234_5678);
    for k in 0..70_i16 {
        let mut rotated = Value::null();
        rol(&mut rotated, &word, &Value::from(k)).expect("rol");
        let mut restored = Value::null();
        ror(&mut restored, &rotated, &Value::from(k)).expect("ror");
        assert_eq!(restored.payload(), word.payload(), "k = {k}");
    }
}

#[test]
fn rotating_a_bool_is_identity() {
    let mut result = Value::null();
    assert_eq!(rol(&mut result, &Value::from(true), &Value::from(5_i16)), Ok(()));
    assert!(result.as_bool());
}

#[test]
fn bitwise_ops_widen_to_the_larger_operand() {
    let a = typed(IecType::Byte, 0xf0);
    let b = typed(IecType::Word, 0x0ff0);
    let mut result = Value::null();

    assert_eq!(and(&mut result, &a, &b), Ok(()));
    assert_eq!(result.payload(), &Payload::Word(0x00f0));

    assert_eq!(or(&mut result, &a, &b), Ok(()));
    assert_eq!(result.payload(), &Payload::Word(0x0ff0));

    assert_eq!(xor(&mut result, &a, &b), Ok(()));
    assert_eq!(result.payload(), &Payload::Word(0x0f00));
}

#[test]
fn not_is_logical_for_booleans() {
    let mut result = Value::null();
    assert_eq!(not(&mut result, &Value::from(true)), Ok(()));
    assert_eq!(result.ty(), IecType::Bool);
    assert!(!result.as_bool());

    let mut result = Value::null();
    assert_eq!(not(&mut result, &typed(IecType::Byte, 0x0f)), Ok(()));
    assert_eq!(result.payload(), &Payload::Byte(0xf0));
}

#[test]
fn ror_undoes_rol_for_every_integral_type() {
    let integral = IecType::ALL
        .into_iter()
        .filter(|ty| Value::new(*ty).class().contains(AnyClass::INTEGRAL));
    for ty in integral {
        let original = typed(ty, -0x5a5a_1234_abcd_0f0f);
        for k in 0..i16::try_from(ty.bit_width()).expect("width") {
            let mut rotated = Value::null();
            rol(&mut rotated, &original, &Value::from(k)).expect("rol");
            assert_eq!(rotated.ty(), ty);
            let mut restored = Value::null();
            ror(&mut restored, &rotated, &Value::from(k)).expect("ror");
            assert_eq!(restored.payload(), original.payload(), "{ty} k = {k}");
        }
    }
}
