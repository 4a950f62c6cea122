use trust_iec::stdlib::math::{abs, atan2, ln, sqrt};
use trust_iec::value::{IecType, Number, Value};
use trust_iec::IecError;

#[test]
fn abs_keeps_the_operand_type() {
    let mut result = Value::null();
    assert_eq!(abs(&mut result, &Value::from(-12_i32)), Ok(()));
    assert_eq!(result.ty(), IecType::DInt);
    assert_eq!(result.as_i64(), 12);

    assert_eq!(abs(&mut result, &Value::from(true)), Err(IecError::NotAllowedType));
}

#[test]
fn real_functions_require_real_operands() {
    let mut result = Value::null();
    assert_eq!(sqrt(&mut result, &Value::from(16.0_f32)), Ok(()));
    assert_eq!(result.ty(), IecType::Real);
    assert_eq!(result.number(), Some(Number::Real(4.0)));

    assert_eq!(sqrt(&mut result, &Value::from(16_i16)), Err(IecError::NotAllowedType));

    let mut result = Value::null();
    assert_eq!(ln(&mut result, &Value::from(1.0_f64)), Ok(()));
    assert_eq!(result.number(), Some(Number::Real(0.0)));
}

#[test]
fn atan2_of_axes() {
    let mut result = Value::null();
    assert_eq!(
        atan2(&mut result, &Value::from(1.0_f64), &Value::from(0.0_f64)),
        Ok(())
    );
    assert_eq!(result.number(), Some(Number::Real(std::f64::consts::FRAC_PI_2)));
}
